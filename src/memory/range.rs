// Fri Oct 16 2026 - Alex

use crate::memory::Address;
use std::fmt;

/// Half-open address window `[start, start + size)`. The size is kept as
/// `u32` so a window may reach the very top of the 16-bit space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemoryRange {
    start: Address,
    size: u32,
}

impl MemoryRange {
    pub fn new(start: Address, size: usize) -> Self {
        let size = size as u32;
        assert!(start.as_u16() as u32 + size <= 0x1_0000, "range exceeds 16-bit space");
        Self { start, size }
    }

    pub fn start(&self) -> Address {
        self.start
    }

    /// One past the last address, as a wide value.
    pub fn end(&self) -> u32 {
        self.start.as_u16() as u32 + self.size
    }

    pub fn size(&self) -> usize {
        self.size as usize
    }

    pub fn contains(&self, addr: Address) -> bool {
        let a = addr.as_u16() as u32;
        a >= self.start.as_u16() as u32 && a < self.end()
    }

    /// True when every address of `[addr, addr + len)` lies inside the window.
    pub fn contains_span(&self, addr: Address, len: usize) -> bool {
        let a = addr.as_u16() as u32;
        a >= self.start.as_u16() as u32 && a + len as u32 <= self.end()
    }

    pub fn offset_of(&self, addr: Address) -> Option<usize> {
        if self.contains(addr) {
            Some((addr.as_u16() - self.start.as_u16()) as usize)
        } else {
            None
        }
    }

    pub fn overlaps(&self, other: &Self) -> bool {
        (self.start.as_u16() as u32) < other.end() && self.end() > other.start.as_u16() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }
}

impl fmt::Display for MemoryRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "[{}, empty]", self.start);
        }
        write!(f, "[{}, ${:04X}]", self.start, self.end() - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_contains() {
        let ram = MemoryRange::new(Address::new(0x0050), 176);
        assert!(ram.contains(Address::new(0x0050)));
        assert!(ram.contains(Address::new(0x00FF)));
        assert!(!ram.contains(Address::new(0x0100)));
        assert!(!ram.contains(Address::new(0x004F)));
        assert_eq!(ram.offset_of(Address::new(0x0060)), Some(0x10));
    }

    #[test]
    fn test_range_span() {
        let ram = MemoryRange::new(Address::new(0x0050), 176);
        assert!(ram.contains_span(Address::new(0x00F0), 16));
        assert!(!ram.contains_span(Address::new(0x00F0), 17));
    }

    #[test]
    fn test_range_top_of_space() {
        let top = MemoryRange::new(Address::new(0xFFF0), 16);
        assert_eq!(top.end(), 0x1_0000);
        assert!(top.contains(Address::new(0xFFFF)));
        assert_eq!(top.to_string(), "[$FFF0, $FFFF]");
    }
}
