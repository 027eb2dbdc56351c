// Fri Oct 16 2026 - Alex

//! ASCII hex digit pairs as they appear in S-record lines. Only `0-9` and
//! upper-case `A-F` are digits.

pub fn hex_nibble(digit: u8) -> Option<u8> {
    match digit {
        b'0'..=b'9' => Some(digit - b'0'),
        b'A'..=b'F' => Some(digit - b'A' + 10),
        _ => None,
    }
}

/// Decodes two digits into a byte. A non-digit contributes a zero nibble
/// instead of failing, which is what existing load files rely on.
pub fn decode_pair(high: u8, low: u8) -> u8 {
    (hex_nibble(high).unwrap_or(0) << 4) | hex_nibble(low).unwrap_or(0)
}

/// Like [`decode_pair`] but reports which of the two digits (0 or 1) is bad.
pub fn decode_pair_strict(high: u8, low: u8) -> Result<u8, usize> {
    let hi = hex_nibble(high).ok_or(0usize)?;
    let lo = hex_nibble(low).ok_or(1usize)?;
    Ok((hi << 4) | lo)
}

pub fn encode_byte(byte: u8) -> [u8; 2] {
    const DIGITS: &[u8; 16] = b"0123456789ABCDEF";
    [DIGITS[(byte >> 4) as usize], DIGITS[(byte & 0x0F) as usize]]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_pair() {
        assert_eq!(decode_pair(b'1', b'A'), 0x1A);
        assert_eq!(decode_pair(b'F', b'F'), 0xFF);
        assert_eq!(decode_pair(b'0', b'0'), 0x00);
    }

    #[test]
    fn test_decode_pair_matches_numeric_value() {
        let digits = b"0123456789ABCDEF";
        for &h in digits {
            for &l in digits {
                let text = [h, l];
                let expected = u8::from_str_radix(std::str::from_utf8(&text).unwrap(), 16).unwrap();
                assert_eq!(decode_pair(h, l), expected);
            }
        }
    }

    #[test]
    fn test_invalid_digits_decode_to_zero_nibble() {
        assert_eq!(decode_pair(b'a', b'5'), 0x05);
        assert_eq!(decode_pair(b'3', b'g'), 0x30);
        assert_eq!(decode_pair(b' ', b'\r'), 0x00);
    }

    #[test]
    fn test_strict_reports_bad_position() {
        assert_eq!(decode_pair_strict(b'1', b'A'), Ok(0x1A));
        assert_eq!(decode_pair_strict(b'x', b'A'), Err(0));
        assert_eq!(decode_pair_strict(b'1', b'a'), Err(1));
    }

    #[test]
    fn test_encode_byte() {
        assert_eq!(&encode_byte(0x1A), b"1A");
        assert_eq!(&encode_byte(0x05), b"05");
    }
}
