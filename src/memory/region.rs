// Fri Oct 16 2026 - Alex

use crate::memory::{Address, MemoryRange};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionKind {
    Ram,
    Prom,
    Vectors,
    Register,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryRegion {
    range: MemoryRange,
    kind: RegionKind,
    name: String,
}

impl MemoryRegion {
    pub fn new(name: &str, kind: RegionKind, start: Address, size: usize) -> Self {
        Self {
            range: MemoryRange::new(start, size),
            kind,
            name: name.to_string(),
        }
    }

    pub fn range(&self) -> &MemoryRange {
        &self.range
    }

    pub fn kind(&self) -> RegionKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn start(&self) -> Address {
        self.range.start()
    }

    pub fn size(&self) -> usize {
        self.range.size()
    }

    pub fn contains(&self, addr: Address) -> bool {
        self.range.contains(addr)
    }
}

impl fmt::Display for MemoryRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<16} {} ({} bytes)", self.name, self.range, self.size())
    }
}
