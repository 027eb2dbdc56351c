// Fri Oct 16 2026 - Alex

use crate::memory::{Address, MemoryError, MemoryRange, MemoryRegion};
use std::fmt;

/// Host-side mirror of one region of target memory.
///
/// The byte store is sized once from its region and never resized. Loads
/// zero it through [`MemoryImage::clear`] and then fill it record by record;
/// the uploader streams `loaded_len` bytes starting at the program start.
#[derive(Debug, Clone)]
pub struct MemoryImage {
    name: String,
    range: MemoryRange,
    data: Vec<u8>,
    loaded_len: usize,
    program_start: Option<Address>,
}

impl MemoryImage {
    pub fn new(name: &str, base: Address, capacity: usize) -> Self {
        Self {
            name: name.to_string(),
            range: MemoryRange::new(base, capacity),
            data: vec![0; capacity],
            loaded_len: 0,
            program_start: None,
        }
    }

    pub fn for_region(region: &MemoryRegion) -> Self {
        Self::new(region.name(), region.start(), region.size())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base(&self) -> Address {
        self.range.start()
    }

    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    pub fn range(&self) -> &MemoryRange {
        &self.range
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn loaded_len(&self) -> usize {
        self.loaded_len
    }

    pub fn program_start(&self) -> Option<Address> {
        self.program_start
    }

    pub fn is_empty(&self) -> bool {
        self.loaded_len == 0
    }

    pub fn clear(&mut self) {
        self.data.iter_mut().for_each(|b| *b = 0);
        self.loaded_len = 0;
        self.program_start = None;
    }

    /// Records `addr` as the program start unless one is already set.
    pub fn note_program_start(&mut self, addr: Address) -> bool {
        if self.program_start.is_some() {
            return false;
        }
        self.program_start = Some(addr);
        true
    }

    pub fn read(&self, addr: Address) -> Option<u8> {
        self.range.offset_of(addr).map(|offset| self.data[offset])
    }

    /// Writes `bytes` at `addr`. Either every byte lands inside the window or
    /// nothing is written.
    pub fn write(&mut self, addr: Address, bytes: &[u8]) -> Result<(), MemoryError> {
        if addr.as_u16() as usize + bytes.len() > 0x1_0000 {
            return Err(MemoryError::Overflow { address: addr, len: bytes.len() });
        }
        if !self.range.contains_span(addr, bytes.len()) {
            return Err(MemoryError::OutOfBounds {
                address: addr,
                len: bytes.len(),
                window: self.range,
            });
        }
        let offset = (addr.as_u16() - self.base().as_u16()) as usize;
        self.data[offset..offset + bytes.len()].copy_from_slice(bytes);
        self.loaded_len += bytes.len();
        Ok(())
    }

    /// Offset of the program start inside the byte store (0 when unset).
    pub fn program_offset(&self) -> usize {
        self.program_start
            .and_then(|addr| self.range.offset_of(addr))
            .unwrap_or(0)
    }

    /// The bytes the uploader streams: `loaded_len` bytes in address order
    /// from the program start, clipped to the end of the store.
    pub fn upload_bytes(&self) -> &[u8] {
        let start = self.program_offset();
        let end = (start + self.loaded_len).min(self.data.len());
        &self.data[start..end]
    }
}

impl fmt::Display for MemoryImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} loaded={}", self.name, self.range, self.loaded_len)?;
        if let Some(start) = self.program_start {
            write!(f, " start={}", start)?;
        }
        Ok(())
    }
}
