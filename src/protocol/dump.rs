// Sat Oct 17 2026 - Alex

use crate::memory::map::{MASK_OPTION_REGISTER_1, MASK_OPTION_REGISTER_2, OPTION_REGISTER};
use crate::memory::{Address, TargetSnapshot};
use crate::protocol::{AccessProtocol, ErrorPolicy, ProgressSink, ProtocolError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterReading {
    pub name: &'static str,
    pub address: Address,
    pub value: Option<u8>,
}

#[derive(Debug, Clone)]
pub struct DumpReport {
    pub snapshot: TargetSnapshot,
    pub registers: Vec<RegisterReading>,
    pub timeouts: usize,
    pub failures: usize,
}

impl DumpReport {
    pub fn is_complete(&self) -> bool {
        self.timeouts == 0 && self.failures == 0
    }
}

pub const DIAGNOSTIC_REGISTERS: [(&str, Address); 3] = [
    ("OPTION Register", OPTION_REGISTER),
    ("MASK OPTION Register 1", MASK_OPTION_REGISTER_1),
    ("MASK OPTION Register 2", MASK_OPTION_REGISTER_2),
];

/// Reads every address of the target space through the access applet.
///
/// A slot whose read fails keeps the 0xFF sentinel and the sweep moves on;
/// only a transmit failure under an abort policy ends it early.
pub struct FullSpaceDump<'p, 'a> {
    access: &'p mut AccessProtocol<'a>,
}

impl<'p, 'a> FullSpaceDump<'p, 'a> {
    pub fn new(access: &'p mut AccessProtocol<'a>) -> Self {
        Self { access }
    }

    pub fn read_registers(&mut self) -> Vec<RegisterReading> {
        DIAGNOSTIC_REGISTERS
            .iter()
            .map(|&(name, address)| {
                let value = match self.access.read(address) {
                    Ok(v) => Some(v),
                    Err(e) => {
                        log::warn!("{} at {} unreadable: {}", name, address, e);
                        None
                    }
                };
                RegisterReading { name, address, value }
            })
            .collect()
    }

    pub fn run(&mut self, progress: &mut dyn ProgressSink) -> Result<DumpReport, ProtocolError> {
        let registers = self.read_registers();
        let mut snapshot = TargetSnapshot::new();
        let mut timeouts = 0;
        let mut failures = 0;

        progress.begin("Reading target", snapshot.len() as u64);
        for address in TargetSnapshot::addresses() {
            match self.access.read(address) {
                Ok(value) => {
                    snapshot.set(address, value);
                    progress.step(true);
                }
                Err(e) if e.is_timeout() => {
                    timeouts += 1;
                    log::debug!("{}", e);
                    progress.step(false);
                }
                Err(e @ ProtocolError::TransportWrite { .. }) if self.access.policy() == ErrorPolicy::Abort => {
                    progress.finish("aborted");
                    return Err(e);
                }
                Err(e) => {
                    failures += 1;
                    let note = format!("Read of {} failed: {}", address, e);
                    log::warn!("{}", note);
                    progress.message(&note);
                    progress.step(false);
                }
            }
        }

        let summary = if timeouts + failures == 0 {
            "Entire HC05 memory space read successfully".to_string()
        } else {
            format!("{} address(es) unanswered, left as FF", timeouts + failures)
        };
        progress.finish(&summary);
        log::info!("Dump finished: {} timeouts, {} failures", timeouts, failures);

        Ok(DumpReport {
            snapshot,
            registers,
            timeouts,
            failures,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::link::stub::{stub_link, Responder};
    use crate::memory::snapshot::UNREAD_SENTINEL;
    use crate::protocol::{ProgressCounter, Timing, TxStep};

    fn fast() -> Timing {
        Timing {
            poll_ticks: 5,
            ..Timing::immediate()
        }
    }

    #[test]
    fn test_silent_target_yields_all_sentinel() {
        let (mut link, _rec) = stub_link(2, Responder::Silent);
        let mut access = AccessProtocol::new(&mut link, fast(), ErrorPolicy::Continue);
        let mut progress = ProgressCounter::default();
        let report = FullSpaceDump::new(&mut access).run(&mut progress).unwrap();

        assert_eq!(report.snapshot.len(), 8192);
        assert!(report.snapshot.as_bytes().iter().all(|&b| b == UNREAD_SENTINEL));
        assert_eq!(report.timeouts, 8192);
        assert!(report.registers.iter().all(|r| r.value.is_none()));
        assert_eq!(progress.failed, 8192);
        assert!(!report.is_complete());
    }

    #[test]
    fn test_echo_target_fills_low_address_bytes() {
        let (mut link, rec) = stub_link(2, Responder::EchoLow);
        let mut access = AccessProtocol::new(&mut link, Timing { poll_ticks: 100_000, ..fast() }, ErrorPolicy::Continue);
        let report = FullSpaceDump::new(&mut access).run(&mut crate::protocol::NoProgress).unwrap();

        for (n, &b) in report.snapshot.as_bytes().iter().enumerate() {
            assert_eq!(b, (n & 0xFF) as u8, "offset {:04X}", n);
        }
        assert!(report.is_complete());
        let values: Vec<_> = report.registers.iter().map(|r| r.value).collect();
        assert_eq!(values, vec![Some(0xDF), Some(0xF0), Some(0xF1)]);
        // three register reads, then the sweep
        let sent = rec.bytes();
        assert_eq!(sent.len(), 2 * (3 + 8192));
        assert_eq!(&sent[..2], &[0x1F, 0xDF]);
        assert_eq!(&sent[6..10], &[0x00, 0x00, 0x00, 0x01]);
    }

    #[test]
    fn test_transmit_failure_aborts_only_under_abort_policy() {
        let (mut link, rec) = stub_link(2, Responder::EchoLow);
        rec.fail_call(6);
        let mut access = AccessProtocol::new(&mut link, fast(), ErrorPolicy::Abort);
        let err = FullSpaceDump::new(&mut access).run(&mut crate::protocol::NoProgress).unwrap_err();
        assert_eq!(err.step(), Some(TxStep::AddressHigh));

        let (mut link, rec) = stub_link(2, Responder::EchoLow);
        rec.fail_call(6);
        let mut access = AccessProtocol::new(&mut link, Timing { poll_ticks: 100_000, ..fast() }, ErrorPolicy::Continue);
        let mut progress = ProgressCounter::default();
        let report = FullSpaceDump::new(&mut access).run(&mut progress).unwrap();
        assert_eq!(report.snapshot.get(Address::new(0)), Some(UNREAD_SENTINEL));
        assert_eq!(report.failures + report.timeouts, 1);
        assert_eq!(progress.messages.len(), report.failures);
    }
}
