// Fri Oct 16 2026 - Alex

//! Memory map of the MC68HC705C8 as used by the bootloader applets.

use crate::memory::{Address, MemoryRegion, RegionKind};

/// Bytes readable through the access applet: `$0000..=$1FFF`.
pub const ADDRESS_SPACE_SIZE: usize = 0x2000;

pub const RAM_BASE: Address = Address::new(0x0050);
pub const RAM_SIZE: usize = 176;
pub const USER_PROM_BASE: Address = Address::new(0x0100);
pub const USER_PROM_SIZE: usize = 96;
pub const PROM_BASE: Address = Address::new(0x0160);
pub const PROM_SIZE: usize = 7584;
pub const VECTORS_BASE: Address = Address::new(0x1FF4);
pub const VECTORS_SIZE: usize = 12;

pub const OPTION_REGISTER: Address = Address::new(0x1FDF);
pub const MASK_OPTION_REGISTER_1: Address = Address::new(0x1FF0);
pub const MASK_OPTION_REGISTER_2: Address = Address::new(0x1FF1);

pub struct MemoryMap {
    regions: Vec<MemoryRegion>,
}

impl MemoryMap {
    pub fn mc68hc705c8() -> Self {
        let regions = vec![
            MemoryRegion::new("RAM", RegionKind::Ram, RAM_BASE, RAM_SIZE),
            MemoryRegion::new("USER PROM", RegionKind::Prom, USER_PROM_BASE, USER_PROM_SIZE),
            MemoryRegion::new("PROM", RegionKind::Prom, PROM_BASE, PROM_SIZE),
            MemoryRegion::new("OPTION", RegionKind::Register, OPTION_REGISTER, 1),
            MemoryRegion::new("MASK OPTION 1", RegionKind::Register, MASK_OPTION_REGISTER_1, 1),
            MemoryRegion::new("MASK OPTION 2", RegionKind::Register, MASK_OPTION_REGISTER_2, 1),
            MemoryRegion::new("VECTORS", RegionKind::Vectors, VECTORS_BASE, VECTORS_SIZE),
        ];
        Self { regions }
    }

    pub fn regions(&self) -> &[MemoryRegion] {
        &self.regions
    }

    pub fn find(&self, name: &str) -> Option<&MemoryRegion> {
        self.regions.iter().find(|r| r.name().eq_ignore_ascii_case(name))
    }

    pub fn region_of(&self, addr: Address) -> Option<&MemoryRegion> {
        self.regions.iter().find(|r| r.contains(addr))
    }

    pub fn ram(&self) -> &MemoryRegion {
        &self.regions[0]
    }

    pub fn prom(&self) -> &MemoryRegion {
        &self.regions[2]
    }
}

impl Default for MemoryMap {
    fn default() -> Self {
        Self::mc68hc705c8()
    }
}
