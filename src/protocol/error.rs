// Sat Oct 17 2026 - Alex

use crate::memory::Address;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Which byte of an exchange was being transmitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxStep {
    LengthByte,
    Payload(usize),
    AddressHigh,
    AddressLow,
    Value,
}

impl fmt::Display for TxStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthByte => write!(f, "length byte"),
            Self::Payload(index) => write!(f, "payload byte {}", index),
            Self::AddressHigh => write!(f, "address high byte"),
            Self::AddressLow => write!(f, "address low byte"),
            Self::Value => write!(f, "data byte"),
        }
    }
}

#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("Error sending {step} on serial port: {source}")]
    TransportWrite {
        step: TxStep,
        #[source]
        source: std::io::Error,
    },
    #[error("Response timeout reading {address} after {waited:?}")]
    ResponseTimeout { address: Address, waited: Duration },
    #[error("Image of {len} bytes does not fit the one-byte length indicator")]
    ImageTooLarge { len: usize },
    #[error("Nothing loaded to upload")]
    EmptyImage,
    #[error("Bootloader was not armed by the operator")]
    NotArmed,
}

impl ProtocolError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::ResponseTimeout { .. })
    }

    pub fn step(&self) -> Option<TxStep> {
        match self {
            Self::TransportWrite { step, .. } => Some(*step),
            _ => None,
        }
    }
}
