// Fri Oct 16 2026 - Alex

use crate::memory::{Address, MemoryRange};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SrecError {
    #[error("Error opening file {path:?}: {source}")]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Read error: {0}")]
    Read(#[from] std::io::Error),
    #[error("Line {line}: {reason}")]
    Parse { line: usize, reason: String },
    #[error("Line {line}: invalid hex digit {digit:?} at column {column}")]
    InvalidHexDigit { line: usize, column: usize, digit: char },
    #[error("Line {line}: S-record address {address} falls outside of allowable memory range {window}")]
    RecordOutOfRange {
        line: usize,
        address: Address,
        window: MemoryRange,
    },
    #[error("{len} bytes at {address} do not fit the 16-bit address space")]
    SpanTooLarge { address: Address, len: usize },
}

impl SrecError {
    pub fn parse(line: usize, reason: impl Into<String>) -> Self {
        Self::Parse { line, reason: reason.into() }
    }
}
