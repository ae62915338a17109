//! Numeric cell decoding.
//!
//! Numerics are IBM System/360 hexadecimal floats: a sign bit, a base-16
//! exponent biased by 64 and a 56-bit fraction. Variables shorter than 8
//! bytes hold the leading bytes only.

use crate::dataset::{MissingValue, XptValue};

const FRACTION_MASK: u64 = 0x00FF_FFFF_FFFF_FFFF;

/// Decode a numeric cell of 1 to 8 bytes.
pub fn decode(bytes: &[u8]) -> XptValue {
    let mut raw = [0u8; 8];
    let len = bytes.len().min(8);
    raw[..len].copy_from_slice(&bytes[..len]);

    if raw[1..].iter().all(|&b| b == 0)
        && let Some(missing) = MissingValue::from_code(raw[0])
    {
        return XptValue::Missing(missing);
    }
    XptValue::Num(ibm_to_f64(raw))
}

pub fn ibm_to_f64(raw: [u8; 8]) -> f64 {
    let word = u64::from_be_bytes(raw);
    let fraction = word & FRACTION_MASK;
    if fraction == 0 {
        return 0.0;
    }
    let exponent = ((word >> 56) & 0x7F) as i32 - 64;
    let magnitude = fraction as f64 * 2f64.powi(4 * exponent - 56);
    if word >> 63 == 1 { -magnitude } else { magnitude }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_values() {
        assert_eq!(ibm_to_f64([0x41, 0x10, 0, 0, 0, 0, 0, 0]), 1.0);
        assert_eq!(ibm_to_f64([0xC1, 0x10, 0, 0, 0, 0, 0, 0]), -1.0);
        assert_eq!(ibm_to_f64([0x42, 0x64, 0, 0, 0, 0, 0, 0]), 100.0);
        assert_eq!(ibm_to_f64([0x40, 0x80, 0, 0, 0, 0, 0, 0]), 0.5);
        assert_eq!(ibm_to_f64([0; 8]), 0.0);
    }

    #[test]
    fn test_missing_codes() {
        assert_eq!(decode(b".\0\0\0\0\0\0\0"), XptValue::numeric_missing());
        assert_eq!(
            decode(b"_\0\0\0\0\0\0\0"),
            XptValue::Missing(MissingValue::Underscore)
        );
        assert_eq!(
            decode(b"Z\0\0"),
            XptValue::Missing(MissingValue::Special('Z'))
        );
        // 'A' followed by fraction bits is a number, not `.A`
        assert!(matches!(decode(&[0x41, 0x10, 0, 0, 0, 0, 0, 0]), XptValue::Num(_)));
    }

    #[test]
    fn test_short_numeric() {
        assert_eq!(decode(&[0x42, 0x64, 0]), XptValue::numeric(100.0));
    }
}
