// Tue Jan 15 2026 - Alex

pub mod config;
pub mod engine;
pub mod link;
pub mod memory;
pub mod protocol;
pub mod srec;
pub mod ui;
pub mod utils;

pub use config::Config;
pub use engine::{Applet, Engine, EngineError};
pub use link::{Link, ReceiveBuffer};
pub use memory::{Address, MemoryImage, MemoryMap};
pub use protocol::{AccessProtocol, AppletUploader, ErrorPolicy, FullSpaceDump, Timing};
pub use srec::{SrecDecoder, SrecEncoder};
