// Wed Jan 15 2026 - Alex

use crate::protocol::ProgressSink;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

const BAR_TEMPLATE: &str = "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}";

/// Terminal progress for uploads and memory sweeps.
pub struct TerminalProgress {
    bar: Option<ProgressBar>,
    hidden: bool,
    failed: u64,
}

impl TerminalProgress {
    pub fn new() -> Self {
        Self {
            bar: None,
            hidden: !atty::is(atty::Stream::Stdout),
            failed: 0,
        }
    }

    pub fn hidden() -> Self {
        Self {
            hidden: true,
            ..Self::new()
        }
    }

    fn style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template(BAR_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓▒░ ")
    }

    pub fn failed(&self) -> u64 {
        self.failed
    }
}

impl Default for TerminalProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for TerminalProgress {
    fn begin(&mut self, label: &str, total: u64) {
        let bar = ProgressBar::new(total);
        if self.hidden {
            bar.set_draw_target(ProgressDrawTarget::hidden());
        }
        bar.set_style(Self::style());
        bar.set_message(label.to_string());
        self.failed = 0;
        self.bar = Some(bar);
    }

    fn step(&mut self, ok: bool) {
        if !ok {
            self.failed += 1;
        }
        if let Some(bar) = &self.bar {
            bar.inc(1);
            if !ok {
                bar.set_message(format!("{} failed", self.failed));
            }
        }
    }

    fn message(&mut self, text: &str) {
        match &self.bar {
            Some(bar) if !self.hidden => bar.println(text),
            _ => log::info!("{}", text),
        }
    }

    fn finish(&mut self, summary: &str) {
        if let Some(bar) = self.bar.take() {
            bar.finish_with_message(summary.to_string());
        }
    }
}
