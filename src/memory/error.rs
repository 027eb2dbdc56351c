// Fri Oct 16 2026 - Alex

use crate::memory::{Address, MemoryRange};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MemoryError {
    #[error("Out of bounds: {len} byte(s) at {address} not inside {window}")]
    OutOfBounds {
        address: Address,
        len: usize,
        window: MemoryRange,
    },
    #[error("Address overflow: {len} byte(s) at {address} wrap past $FFFF")]
    Overflow { address: Address, len: usize },
}
