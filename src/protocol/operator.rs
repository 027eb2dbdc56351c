// Sat Oct 17 2026 - Alex

//! Hooks towards the person at the programmer board.

/// Blocks until the operator has armed the bootloader. Returning `false`
/// cancels the operation before anything is sent.
pub trait ProceedGate {
    fn wait_for_proceed(&mut self) -> bool;
}

/// Receives progress of byte-streaming operations.
pub trait ProgressSink {
    fn begin(&mut self, _label: &str, _total: u64) {}
    /// One unit (byte or address) done; `ok` is false when it failed.
    fn step(&mut self, _ok: bool) {}
    fn message(&mut self, _text: &str) {}
    fn finish(&mut self, _summary: &str) {}
}

/// Gate for unattended runs where the board is already armed.
pub struct AutoProceed;

impl ProceedGate for AutoProceed {
    fn wait_for_proceed(&mut self) -> bool {
        true
    }
}

pub struct NoProgress;

impl ProgressSink for NoProgress {}

/// Keeps counts; handy when the caller only wants a summary.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProgressCounter {
    pub total: u64,
    pub ok: u64,
    pub failed: u64,
    pub messages: Vec<String>,
}

impl ProgressSink for ProgressCounter {
    fn begin(&mut self, _label: &str, total: u64) {
        self.total = total;
        self.ok = 0;
        self.failed = 0;
    }

    fn step(&mut self, ok: bool) {
        if ok {
            self.ok += 1;
        } else {
            self.failed += 1;
        }
    }

    fn message(&mut self, text: &str) {
        self.messages.push(text.to_string());
    }
}
