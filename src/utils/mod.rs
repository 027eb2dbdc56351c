// Tue Jan 13 2026 - Alex

use crate::memory::Address;
use std::time::Duration;

fn strip_hex_prefix(text: &str) -> &str {
    let text = text.trim();
    text.strip_prefix('$')
        .or_else(|| text.strip_prefix("0x"))
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text)
}

fn parse_hex_digits(text: &str, digits: usize) -> Option<u16> {
    let digits_only = strip_hex_prefix(text);
    if digits_only.len() != digits || !digits_only.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u16::from_str_radix(digits_only, 16).ok()
}

/// Exactly four hexadecimal digits (`nnnn`), optionally prefixed by `$` or `0x`.
pub fn parse_hex_address(text: &str) -> Result<Address, String> {
    parse_hex_digits(text, 4)
        .map(Address::new)
        .ok_or_else(|| "Invalid user input- must be 4 hexadecimal digits (format: nnnn)".to_string())
}

/// Exactly two hexadecimal digits (`nn`), optionally prefixed by `$` or `0x`.
pub fn parse_hex_byte(text: &str) -> Result<u8, String> {
    parse_hex_digits(text, 2)
        .map(|v| v as u8)
        .ok_or_else(|| "Invalid user input- must be 2 hexadecimal digits (format: nn)".to_string())
}

pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs_f64();

    if total_secs < 1.0 {
        format!("{}ms", duration.as_millis())
    } else if total_secs < 60.0 {
        format!("{:.2}s", total_secs)
    } else {
        let mins = (total_secs / 60.0).floor();
        let secs = total_secs % 60.0;
        format!("{:.0}m {:.1}s", mins, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_address() {
        assert_eq!(parse_hex_address("1FDF"), Ok(Address::new(0x1FDF)));
        assert_eq!(parse_hex_address("00c0\r\n"), Ok(Address::new(0x00C0)));
        assert_eq!(parse_hex_address("$0050"), Ok(Address::new(0x0050)));
        assert_eq!(parse_hex_address("0x0100"), Ok(Address::new(0x0100)));
        assert!(parse_hex_address("100").is_err());
        assert!(parse_hex_address("1G00").is_err());
        assert!(parse_hex_address("01000").is_err());
        assert!(parse_hex_address("").is_err());
    }

    #[test]
    fn test_parse_hex_byte() {
        assert_eq!(parse_hex_byte("A5"), Ok(0xA5));
        assert_eq!(parse_hex_byte("0f"), Ok(0x0F));
        assert!(parse_hex_byte("5").is_err());
        assert!(parse_hex_byte("1FF").is_err());
        assert!(parse_hex_byte("+1").is_err());
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(250)), "250ms");
        assert_eq!(format_duration(Duration::from_millis(2500)), "2.50s");
        assert_eq!(format_duration(Duration::from_secs(90)), "1m 30.0s");
    }
}
