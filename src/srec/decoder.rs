// Fri Oct 16 2026 - Alex

use crate::memory::{MemoryError, MemoryImage};
use crate::srec::record::{parse_raw_line, HexMode, MemoryRecord};
use crate::srec::SrecError;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeReport {
    pub bytes_written: usize,
    pub records: usize,
    pub ignored_lines: usize,
}

/// Turns S-record text into bytes of a [`MemoryImage`].
///
/// Bytes already written when an error stops the load stay in the image;
/// `image.loaded_len()` tells how many landed.
#[derive(Debug, Clone, Default)]
pub struct SrecDecoder {
    mode: HexMode,
}

impl SrecDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strict_hex(mut self, strict: bool) -> Self {
        self.mode = if strict { HexMode::Strict } else { HexMode::Permissive };
        self
    }

    pub fn load_file(&self, path: &Path, image: &mut MemoryImage) -> Result<DecodeReport, SrecError> {
        let file = File::open(path).map_err(|source| SrecError::FileOpen {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Decoding {} into {}", path.display(), image.name());
        self.decode_reader(BufReader::new(file), image)
    }

    /// Lines are split on raw bytes; comments and other records need not be
    /// valid UTF-8.
    pub fn decode_reader<R: BufRead>(&self, reader: R, image: &mut MemoryImage) -> Result<DecodeReport, SrecError> {
        let mut report = DecodeReport::default();
        for (index, line) in reader.split(b'\n').enumerate() {
            let line = line?;
            self.decode_line(&line, index + 1, image, &mut report)?;
        }
        Ok(report)
    }

    pub fn decode_lines<'a, I>(&self, lines: I, image: &mut MemoryImage) -> Result<DecodeReport, SrecError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut report = DecodeReport::default();
        for (index, line) in lines.into_iter().enumerate() {
            self.decode_line(line.as_bytes(), index + 1, image, &mut report)?;
        }
        Ok(report)
    }

    fn decode_line(
        &self,
        raw: &[u8],
        line: usize,
        image: &mut MemoryImage,
        report: &mut DecodeReport,
    ) -> Result<(), SrecError> {
        match parse_raw_line(raw, line, self.mode)? {
            Some(record) => {
                Self::apply(&record, line, image)?;
                report.records += 1;
                report.bytes_written += record.byte_count();
            }
            None => report.ignored_lines += 1,
        }
        Ok(())
    }

    fn apply(record: &MemoryRecord, line: usize, image: &mut MemoryImage) -> Result<(), SrecError> {
        image.write(record.address, &record.payload).map_err(|e| match e {
            MemoryError::OutOfBounds { address, window, .. } => SrecError::RecordOutOfRange { line, address, window },
            MemoryError::Overflow { address, len } => SrecError::SpanTooLarge { address, len },
        })?;
        if image.note_program_start(record.address) {
            log::debug!("Program start set to {}", record.address);
        }
        log::trace!("Line {}: {} byte(s) at {}", line, record.byte_count(), record.address);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::map::{RAM_BASE, RAM_SIZE};
    use crate::memory::Address;
    use crate::srec::SrecEncoder;
    use std::io::Cursor;

    fn ram() -> MemoryImage {
        MemoryImage::new("RAM", RAM_BASE, RAM_SIZE)
    }

    #[test]
    fn test_record_writes_length_minus_three_bytes() {
        let mut image = ram();
        let report = SrecDecoder::new()
            .decode_lines(["S1070060010203044E"], &mut image)
            .unwrap();
        assert_eq!(report.bytes_written, 4);
        assert_eq!(image.loaded_len(), 4);
        assert_eq!(&image.data()[0x10..0x14], &[1, 2, 3, 4]);
        assert_eq!(image.program_start(), Some(Address::new(0x0060)));
    }

    #[test]
    fn test_program_start_only_from_first_record() {
        let mut image = ram();
        let lines = ["S00600004844521B", "S1050070AABB00", "S1050052CCDD00", "S9030000FC"];
        let report = SrecDecoder::new().decode_lines(lines, &mut image).unwrap();
        assert_eq!(report.records, 2);
        assert_eq!(report.ignored_lines, 2);
        assert_eq!(image.program_start(), Some(Address::new(0x0070)));
        assert_eq!(image.read(Address::new(0x0052)), Some(0xCC));
    }

    #[test]
    fn test_first_record_out_of_range_fails_immediately() {
        let mut image = ram();
        let lines = ["S1050010AABB00", "S1050060CCDD00"];
        let err = SrecDecoder::new().decode_lines(lines, &mut image).unwrap_err();
        assert!(matches!(err, SrecError::RecordOutOfRange { line: 1, .. }));
        assert!(image.is_empty());
        assert_eq!(image.program_start(), None);
        assert!(image.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_later_record_out_of_range_keeps_prior_records() {
        let mut image = ram();
        let lines = ["S1050050AABB00", "S10500FFCCDD00", "S1050060EEFF00"];
        let err = SrecDecoder::new().decode_lines(lines, &mut image).unwrap_err();
        match err {
            SrecError::RecordOutOfRange { line, address, .. } => {
                assert_eq!(line, 2);
                assert_eq!(address, Address::new(0x00FF));
            }
            other => panic!("unexpected error: {}", other),
        }
        assert_eq!(image.loaded_len(), 2);
        assert_eq!(image.read(Address::new(0x00FF)), Some(0));
        assert_eq!(image.read(Address::new(0x0060)), Some(0));
    }

    #[test]
    fn test_round_trip_through_encoder() {
        let data: Vec<u8> = (0..150u32).map(|n| (n * 37 % 256) as u8).collect();
        let lines = SrecEncoder::new().with_header("ROUNDTRIP").encode(Address::new(0x0058), &data).unwrap();

        let mut image = ram();
        let report = SrecDecoder::new()
            .with_strict_hex(true)
            .decode_lines(lines.iter().map(|s| s.as_str()), &mut image)
            .unwrap();
        assert_eq!(report.bytes_written, data.len());
        assert_eq!(image.program_start(), Some(Address::new(0x0058)));
        assert_eq!(image.upload_bytes(), &data[..]);
    }

    #[test]
    fn test_decode_reader() {
        let text = "S0030000FC\nS1050050A6FF00\r\nS9030000FC\n";
        let mut image = ram();
        let report = SrecDecoder::new().decode_reader(Cursor::new(text), &mut image).unwrap();
        assert_eq!(report.bytes_written, 2);
        assert_eq!(image.upload_bytes(), &[0xA6, 0xFF]);
    }

    #[test]
    fn test_decode_reader_skips_non_utf8_lines() {
        let text: &[u8] = b"S0030000FC\n; built by \xE9diteur\nS1050050A6FF00\n";
        let mut image = ram();
        let report = SrecDecoder::new().decode_reader(Cursor::new(text), &mut image).unwrap();
        assert_eq!(report.records, 1);
        assert_eq!(report.ignored_lines, 2);
        assert_eq!(image.upload_bytes(), &[0xA6, 0xFF]);
    }

    #[test]
    fn test_non_utf8_byte_in_record_is_a_bad_digit() {
        let text: &[u8] = b"S1050050A6\xE900\n";
        let mut image = ram();
        let report = SrecDecoder::new().decode_reader(Cursor::new(text), &mut image).unwrap();
        assert_eq!(image.upload_bytes(), &[0xA6, 0x00]);
        assert_eq!(report.bytes_written, 2);

        let err = SrecDecoder::new()
            .with_strict_hex(true)
            .decode_reader(Cursor::new(text), &mut ram())
            .unwrap_err();
        assert!(matches!(err, SrecError::InvalidHexDigit { line: 1, .. }));
    }

    #[test]
    fn test_missing_file() {
        let mut image = ram();
        let err = SrecDecoder::new()
            .load_file(Path::new("/nonexistent/prog05/none.s19"), &mut image)
            .unwrap_err();
        assert!(matches!(err, SrecError::FileOpen { .. }));
    }
}
