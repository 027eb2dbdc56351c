// Fri Oct 16 2026 - Alex

use crate::memory::Address;
use crate::srec::hex::{decode_pair, decode_pair_strict};
use crate::srec::SrecError;

/// Record type prefix of a data record with a 16-bit address.
pub const DATA_RECORD_TAG: &str = "S1";

/// Address plus checksum bytes counted by the length field.
pub const RECORD_OVERHEAD: usize = 3;

/// One decoded `S1` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryRecord {
    pub address: Address,
    pub payload: Vec<u8>,
}

impl MemoryRecord {
    pub fn new(address: Address, payload: Vec<u8>) -> Self {
        Self { address, payload }
    }

    pub fn byte_count(&self) -> usize {
        self.payload.len()
    }

    pub fn end(&self) -> u32 {
        self.address.as_u16() as u32 + self.payload.len() as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HexMode {
    /// Bad digits become zero nibbles.
    #[default]
    Permissive,
    Strict,
}

pub fn is_data_record(line: &[u8]) -> bool {
    line.starts_with(DATA_RECORD_TAG.as_bytes())
}

fn trim_end_bytes(mut raw: &[u8]) -> &[u8] {
    while let [rest @ .., last] = raw {
        if !last.is_ascii_whitespace() {
            break;
        }
        raw = rest;
    }
    raw
}

struct Fields<'a> {
    bytes: &'a [u8],
    line: usize,
    mode: HexMode,
    lenient_hits: usize,
}

impl<'a> Fields<'a> {
    fn byte_at(&mut self, column: usize) -> Result<u8, SrecError> {
        let (high, low) = match (self.bytes.get(column), self.bytes.get(column + 1)) {
            (Some(&h), Some(&l)) => (h, l),
            _ => return Err(SrecError::parse(self.line, format!("record truncated at column {}", column + 1))),
        };
        match self.mode {
            HexMode::Permissive => {
                if decode_pair_strict(high, low).is_err() {
                    self.lenient_hits += 1;
                }
                Ok(decode_pair(high, low))
            }
            HexMode::Strict => decode_pair_strict(high, low).map_err(|bad| {
                let column = column + bad;
                SrecError::InvalidHexDigit {
                    line: self.line,
                    column: column + 1,
                    digit: self.bytes[column] as char,
                }
            }),
        }
    }
}

/// Parses one text line. Returns `Ok(None)` for anything that is not an `S1`
/// record; header and terminator records are not validated. The trailing
/// checksum byte is neither required nor checked.
pub fn parse_line(text: &str, line: usize, mode: HexMode) -> Result<Option<MemoryRecord>, SrecError> {
    parse_raw_line(text.as_bytes(), line, mode)
}

/// Same as [`parse_line`] on undecoded bytes; lines need not be UTF-8.
pub fn parse_raw_line(raw: &[u8], line: usize, mode: HexMode) -> Result<Option<MemoryRecord>, SrecError> {
    let raw = trim_end_bytes(raw);
    if !is_data_record(raw) {
        return Ok(None);
    }

    let mut fields = Fields {
        bytes: raw,
        line,
        mode,
        lenient_hits: 0,
    };

    let count = fields.byte_at(2)? as usize;
    if count < RECORD_OVERHEAD {
        return Err(SrecError::parse(line, format!("record length {} is shorter than its address and checksum", count)));
    }
    let address = Address::from_bytes(fields.byte_at(4)?, fields.byte_at(6)?);

    let len = count - RECORD_OVERHEAD;
    if address.as_u16() as usize + len > 0x1_0000 {
        return Err(SrecError::parse(line, format!("{} bytes at {} wrap past $FFFF", len, address)));
    }

    let mut payload = Vec::with_capacity(len);
    for n in 0..len {
        payload.push(fields.byte_at(8 + n * 2)?);
    }

    if fields.lenient_hits > 0 {
        log::warn!("Line {}: {} byte(s) contained non-hex digits, decoded as zero nibbles", line, fields.lenient_hits);
    }

    Ok(Some(MemoryRecord::new(address, payload)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_data_record() {
        let rec = parse_line("S1070050A6552001FF", 1, HexMode::Permissive).unwrap().unwrap();
        assert_eq!(rec.address, Address::new(0x0050));
        assert_eq!(rec.payload, vec![0xA6, 0x55, 0x20, 0x01]);
        assert_eq!(rec.byte_count(), 4);
    }

    #[test]
    fn test_other_record_types_ignored() {
        for line in ["S00600004844521B", "S9030000FC", "S5030001FB", "", "garbage", "s1070050A6552001FF"] {
            assert!(parse_line(line, 1, HexMode::Permissive).unwrap().is_none(), "{}", line);
        }
    }

    #[test]
    fn test_checksum_not_required() {
        let rec = parse_line("S1050060ABCD", 3, HexMode::Strict).unwrap().unwrap();
        assert_eq!(rec.payload, vec![0xAB, 0xCD]);
    }

    #[test]
    fn test_trailing_cr_is_trimmed() {
        let rec = parse_line("S104005012FF\r", 1, HexMode::Strict).unwrap().unwrap();
        assert_eq!(rec.payload, vec![0x12]);
    }

    #[test]
    fn test_truncated_record() {
        let err = parse_line("S1070050A655", 4, HexMode::Permissive).unwrap_err();
        assert!(matches!(err, SrecError::Parse { line: 4, .. }));
    }

    #[test]
    fn test_length_below_overhead() {
        let err = parse_line("S1020050", 2, HexMode::Permissive).unwrap_err();
        assert!(matches!(err, SrecError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_wrapping_record_rejected() {
        let err = parse_line("S105FFFF0102FF", 1, HexMode::Permissive).unwrap_err();
        assert!(matches!(err, SrecError::Parse { .. }));
    }

    #[test]
    fn test_lowercase_digits_permissive_vs_strict() {
        let rec = parse_line("S1050050ab12FF", 1, HexMode::Permissive).unwrap().unwrap();
        assert_eq!(rec.payload, vec![0x00, 0x12]);

        let err = parse_line("S1050050ab12FF", 7, HexMode::Strict).unwrap_err();
        match err {
            SrecError::InvalidHexDigit { line, column, digit } => {
                assert_eq!(line, 7);
                assert_eq!(column, 9);
                assert_eq!(digit, 'a');
            }
            other => panic!("unexpected error: {}", other),
        }
    }
}
