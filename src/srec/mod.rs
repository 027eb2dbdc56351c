// Fri Oct 16 2026 - Alex

pub mod decoder;
pub mod encoder;
pub mod error;
pub mod hex;
pub mod record;

pub use decoder::{DecodeReport, SrecDecoder};
pub use encoder::SrecEncoder;
pub use error::SrecError;
pub use record::{HexMode, MemoryRecord};
