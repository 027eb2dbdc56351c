// Fri Oct 16 2026 - Alex

use crate::memory::Address;
use crate::srec::hex::encode_byte;
use crate::srec::record::RECORD_OVERHEAD;
use crate::srec::SrecError;
use std::io::Write;

pub const DEFAULT_BYTES_PER_LINE: usize = 16;

/// Writes byte runs back out as Motorola S-records (`S0` / `S1` / `S9`).
#[derive(Debug, Clone)]
pub struct SrecEncoder {
    bytes_per_line: usize,
    header: Option<String>,
    terminator: bool,
}

impl SrecEncoder {
    pub fn new() -> Self {
        Self {
            bytes_per_line: DEFAULT_BYTES_PER_LINE,
            header: None,
            terminator: true,
        }
    }

    pub fn with_bytes_per_line(mut self, n: usize) -> Self {
        self.bytes_per_line = n.clamp(1, 255 - RECORD_OVERHEAD);
        self
    }

    pub fn with_header(mut self, header: &str) -> Self {
        self.header = Some(header.to_string());
        self
    }

    pub fn without_terminator(mut self) -> Self {
        self.terminator = false;
        self
    }

    pub fn encode(&self, base: Address, data: &[u8]) -> Result<Vec<String>, SrecError> {
        if base.as_usize() + data.len() > 0x1_0000 {
            return Err(SrecError::SpanTooLarge { address: base, len: data.len() });
        }

        let mut lines = Vec::with_capacity(data.len() / self.bytes_per_line + 2);
        if let Some(header) = &self.header {
            let text: Vec<u8> = header.bytes().take(255 - RECORD_OVERHEAD).collect();
            lines.push(Self::record('0', Address::zero(), &text));
        }
        for (i, chunk) in data.chunks(self.bytes_per_line).enumerate() {
            let addr = base + (i * self.bytes_per_line) as u16;
            lines.push(Self::record('1', addr, chunk));
        }
        if self.terminator {
            lines.push(Self::record('9', base, &[]));
        }
        Ok(lines)
    }

    pub fn write_to<W: Write>(&self, writer: &mut W, base: Address, data: &[u8]) -> Result<usize, SrecError> {
        let lines = self.encode(base, data)?;
        for line in &lines {
            writeln!(writer, "{}", line)?;
        }
        Ok(lines.len())
    }

    fn record(kind: char, addr: Address, payload: &[u8]) -> String {
        let count = (payload.len() + RECORD_OVERHEAD) as u8;
        let mut sum = count.wrapping_add(addr.high()).wrapping_add(addr.low());
        let mut line = String::with_capacity(4 + 2 * (count as usize + 1));
        line.push('S');
        line.push(kind);
        Self::push_byte(&mut line, count);
        Self::push_byte(&mut line, addr.high());
        Self::push_byte(&mut line, addr.low());
        for &b in payload {
            sum = sum.wrapping_add(b);
            Self::push_byte(&mut line, b);
        }
        Self::push_byte(&mut line, !sum);
        line
    }

    fn push_byte(line: &mut String, byte: u8) {
        let [h, l] = encode_byte(byte);
        line.push(h as char);
        line.push(l as char);
    }
}

impl Default for SrecEncoder {
    fn default() -> Self {
        Self::new()
    }
}
