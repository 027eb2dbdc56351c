// Tue Jan 13 2026 - Alex

use crate::memory::{Address, MemoryImage, TargetSnapshot};
use crate::protocol::{DumpReport, RegisterReading};
use colored::*;

pub const BYTES_PER_ROW: usize = 16;

/// Renders byte buffers as the classic programmer hex listing:
/// `AAAA:   xx xx xx xx xx xx xx xx    xx xx xx xx xx xx xx xx |`
pub struct HexTable {
    use_color: bool,
}

impl HexTable {
    pub fn new() -> Self {
        Self { use_color: false }
    }

    pub fn with_color(mut self, use_color: bool) -> Self {
        self.use_color = use_color;
        self
    }

    /// One line per 16 bytes; a short trailing row prints what is there.
    pub fn render(&self, data: &[u8], base: Address) -> Vec<String> {
        data.chunks(BYTES_PER_ROW)
            .enumerate()
            .map(|(row, chunk)| {
                let address = base.as_usize() + row * BYTES_PER_ROW;
                self.render_row(address, chunk)
            })
            .collect()
    }

    fn render_row(&self, address: usize, chunk: &[u8]) -> String {
        let group = |bytes: &[u8]| {
            bytes.iter().map(|b| format!("{:02X}", b)).collect::<Vec<_>>().join(" ")
        };
        let (left, right) = chunk.split_at(chunk.len().min(BYTES_PER_ROW / 2));
        let label = format!("{:04X}:", address);
        let label = if self.use_color {
            label.cyan().to_string()
        } else {
            label
        };
        if right.is_empty() {
            format!("{}   {} |", label, group(left))
        } else {
            format!("{}   {}    {} |", label, group(left), group(right))
        }
    }

    pub fn print(&self, data: &[u8], base: Address) {
        for line in self.render(data, base) {
            println!("{}", line);
        }
    }

    pub fn print_image(&self, image: &MemoryImage) {
        self.print(image.data(), image.base());
    }

    pub fn print_snapshot(&self, snapshot: &TargetSnapshot) {
        self.print(snapshot.as_bytes(), Address::zero());
    }
}

impl Default for HexTable {
    fn default() -> Self {
        Self::new()
    }
}

pub fn format_register(reading: &RegisterReading) -> String {
    match reading.value {
        Some(value) => format!(" {} = {:02X}", reading.name, value),
        None => format!(" {} = -- (no response)", reading.name),
    }
}

pub fn print_dump_report(report: &DumpReport, table: &HexTable) {
    for reading in &report.registers {
        println!("{}", format_register(reading));
    }
    table.print_snapshot(&report.snapshot);
}
