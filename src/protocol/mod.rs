// Sat Oct 17 2026 - Alex

pub mod access;
pub mod dump;
pub mod error;
pub mod operator;
pub mod uploader;

pub use access::{AccessProtocol, RequestState};
pub use dump::{DumpReport, FullSpaceDump, RegisterReading};
pub use error::{ProtocolError, TxStep};
pub use operator::{AutoProceed, NoProgress, ProceedGate, ProgressCounter, ProgressSink};
pub use uploader::{AppletUploader, UploadReport};

use serde::{Deserialize, Serialize};
use std::thread;
use std::time::Duration;

/// Longest response window a configuration may ask for.
pub const MAX_RESPONSE_WINDOW: Duration = Duration::from_secs(10);
/// Longest gap allowed between two transmitted bytes.
pub const MAX_BYTE_GAP: Duration = Duration::from_secs(1);
pub const MAX_SETTLE: Duration = Duration::from_secs(60);

/// What a byte-streaming operation does when a transmit fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Log the failure and keep sending the remaining bytes.
    #[default]
    Continue,
    Abort,
}

/// Delays the target firmware needs between bytes. The defaults match the
/// bootloader and applet polling loops of a 2 MHz part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timing {
    pub upload_byte_delay_us: u64,
    pub address_gap_us: u64,
    pub poll_tick_us: u64,
    pub poll_ticks: u32,
    pub settle_ms: u64,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            upload_byte_delay_us: 5_000,
            address_gap_us: 1_000,
            poll_tick_us: 10,
            poll_ticks: 500,
            settle_ms: 800,
        }
    }
}

impl Timing {
    pub fn upload_byte_delay(&self) -> Duration {
        Duration::from_micros(self.upload_byte_delay_us)
    }

    pub fn address_gap(&self) -> Duration {
        Duration::from_micros(self.address_gap_us)
    }

    /// `poll_ticks` ticks of `poll_tick_us` each: 5 ms by default.
    pub fn response_timeout(&self) -> Duration {
        Duration::from_micros(self.poll_tick_us.saturating_mul(self.poll_ticks as u64))
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    /// Rejects zero polling and delays past the `MAX_*` limits.
    pub fn check(&self) -> Result<(), String> {
        if self.poll_ticks == 0 {
            return Err("Timing.poll_ticks must be greater than 0".to_string());
        }
        if self.poll_tick_us == 0 {
            return Err("Timing.poll_tick_us must be greater than 0".to_string());
        }
        if self.response_timeout() > MAX_RESPONSE_WINDOW {
            return Err(format!(
                "Timing.poll_ticks x Timing.poll_tick_us exceeds {} s",
                MAX_RESPONSE_WINDOW.as_secs()
            ));
        }
        if self.upload_byte_delay() > MAX_BYTE_GAP || self.address_gap() > MAX_BYTE_GAP {
            return Err(format!("Timing byte delays must not exceed {} s", MAX_BYTE_GAP.as_secs()));
        }
        if self.settle() > MAX_SETTLE {
            return Err(format!("Timing.settle_ms must not exceed {} s", MAX_SETTLE.as_secs()));
        }
        Ok(())
    }

    /// No inter-byte gaps and a short response window; for simulated targets.
    pub fn immediate() -> Self {
        Self {
            upload_byte_delay_us: 0,
            address_gap_us: 0,
            poll_tick_us: 10,
            poll_ticks: 20,
            settle_ms: 50,
        }
    }
}

pub(crate) fn pause(delay: Duration) {
    if !delay.is_zero() {
        thread::sleep(delay);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timing_matches_hardware() {
        let t = Timing::default();
        assert_eq!(t.response_timeout(), Duration::from_millis(5));
        assert_eq!(t.address_gap(), Duration::from_millis(1));
        assert_eq!(t.upload_byte_delay(), Duration::from_millis(5));
        assert_eq!(t.settle(), Duration::from_millis(800));
    }

    #[test]
    fn test_policy_serde_names() {
        let p: ErrorPolicy = serde_json::from_str("\"abort\"").unwrap();
        assert_eq!(p, ErrorPolicy::Abort);
        assert_eq!(serde_json::to_string(&ErrorPolicy::Continue).unwrap(), "\"continue\"");
    }

    #[test]
    fn test_partial_timing_fills_defaults() {
        let t: Timing = serde_json::from_str(r#"{"poll_ticks": 1000}"#).unwrap();
        assert_eq!(t.poll_ticks, 1000);
        assert_eq!(t.address_gap_us, 1000);
        assert_eq!(t.response_timeout(), Duration::from_millis(10));
    }

    #[test]
    fn test_response_timeout_saturates() {
        let t = Timing {
            poll_tick_us: u64::MAX,
            poll_ticks: 2,
            ..Timing::default()
        };
        assert_eq!(t.response_timeout(), Duration::from_micros(u64::MAX));
        assert!(t.check().is_err());
    }

    #[test]
    fn test_check_limits() {
        assert!(Timing::default().check().is_ok());
        assert!(Timing::immediate().check().is_ok());

        let at_limit = Timing {
            poll_tick_us: 10_000,
            poll_ticks: 1_000,
            ..Timing::default()
        };
        assert_eq!(at_limit.response_timeout(), MAX_RESPONSE_WINDOW);
        assert!(at_limit.check().is_ok());

        for bad in [
            Timing { poll_ticks: 1_001, poll_tick_us: 10_000, ..Timing::default() },
            Timing { upload_byte_delay_us: 2_000_000, ..Timing::default() },
            Timing { address_gap_us: u64::MAX, ..Timing::default() },
            Timing { settle_ms: u64::MAX, ..Timing::default() },
            Timing { poll_tick_us: 0, ..Timing::default() },
        ] {
            assert!(bad.check().is_err(), "{:?} accepted", bad);
        }
    }
}
