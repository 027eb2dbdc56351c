// Sat Oct 17 2026 - Alex

pub mod applet;
pub mod core;
pub mod error;

pub use self::core::{Engine, EngineState, SelfTestReport, SELF_TEST_SIGNATURE};
pub use applet::Applet;
pub use error::EngineError;
