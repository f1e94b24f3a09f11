//! Serial number conversions between decimal and hexadecimal text
//!
//! Operators get serials in both forms (CA portals tend to show decimal,
//! certificate viewers hex). Conversions are arbitrary precision and return
//! `None` for anything that is not a non-negative number in the source base.

use num_bigint::BigUint;

/// `"255"` -> `Some("FF")`
pub fn decimal_to_hex(decimal: &str) -> Option<String> {
    let value = parse_radix(decimal, 10)?;
    Some(serial_to_hex(&value))
}

/// `"FF"` (or `"0xff"`) -> `Some("255")`
pub fn hex_to_decimal(hex: &str) -> Option<String> {
    let trimmed = hex.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    // Certificate viewers often group bytes with ':' or spaces
    let digits: String = digits
        .chars()
        .filter(|c| *c != ':' && !c.is_whitespace())
        .collect();
    parse_radix(&digits, 16).map(|value| value.to_str_radix(10))
}

/// Uppercase hexadecimal without leading zeros (`0` renders as `"0"`)
pub fn serial_to_hex(serial: &BigUint) -> String {
    serial.to_str_radix(16).to_uppercase()
}

fn parse_radix(text: &str, radix: u32) -> Option<BigUint> {
    let text = text.trim();
    if text.is_empty() || !text.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    BigUint::parse_bytes(text.as_bytes(), radix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_to_hex() {
        assert_eq!(decimal_to_hex("255").as_deref(), Some("FF"));
        assert_eq!(decimal_to_hex("0").as_deref(), Some("0"));
        assert_eq!(decimal_to_hex(" 4096 ").as_deref(), Some("1000"));
    }

    #[test]
    fn test_decimal_to_hex_rejects_non_numeric() {
        assert_eq!(decimal_to_hex(""), None);
        assert_eq!(decimal_to_hex("abc"), None);
        assert_eq!(decimal_to_hex("-1"), None);
        assert_eq!(decimal_to_hex("+1"), None);
        assert_eq!(decimal_to_hex("1.5"), None);
    }

    #[test]
    fn test_hex_to_decimal() {
        assert_eq!(hex_to_decimal("FF").as_deref(), Some("255"));
        assert_eq!(hex_to_decimal("0xff").as_deref(), Some("255"));
        assert_eq!(hex_to_decimal("1a:2b:3c:4d:5e").as_deref(), Some("112394521950"));
        assert_eq!(hex_to_decimal("xyz"), None);
        assert_eq!(hex_to_decimal(""), None);
    }

    #[test]
    fn test_large_serial() {
        // 20-byte serials exceed u128
        let hex = "7FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF";
        let decimal = hex_to_decimal(hex).unwrap();
        assert_eq!(decimal_to_hex(&decimal).as_deref(), Some(hex));
    }
}
