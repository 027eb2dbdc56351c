// Fri Oct 16 2026 - Alex

pub mod address;
pub mod error;
pub mod image;
pub mod map;
pub mod range;
pub mod region;
pub mod snapshot;

pub use address::Address;
pub use error::MemoryError;
pub use image::MemoryImage;
pub use map::MemoryMap;
pub use range::MemoryRange;
pub use region::{MemoryRegion, RegionKind};
pub use snapshot::TargetSnapshot;
