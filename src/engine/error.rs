// Sat Oct 17 2026 - Alex

use crate::config::ConfigError;
use crate::protocol::ProtocolError;
use crate::srec::SrecError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Srec(#[from] SrecError),
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Error opening serial port {port}: {source}")]
    Connect {
        port: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Target did not identify itself, received {received:?}")]
    SelfTestFailed { received: String },
}
