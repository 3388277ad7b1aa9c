//! Number display rules
//!
//! A non-negative decimal count renders fixed-point with exactly that many
//! fractional digits. A decimal count of `-1` renders scientific notation
//! with six mantissa digits, an uppercase `E`, an explicit exponent sign and
//! at least three exponent digits (`1234.5` -> `1.234500E+003`).

use crate::SCIENTIFIC_DECIMALS;

/// Format a value using a cell's decimal count
pub fn format_number(value: f64, decimals: i32) -> String {
    if decimals <= SCIENTIFIC_DECIMALS {
        return format_scientific(value);
    }
    format!("{:.*}", decimals as usize, value)
}

fn format_scientific(value: f64) -> String {
    let raw = format!("{:.6e}", value);
    match raw.split_once('e') {
        Some((mantissa, exponent)) => {
            let exponent: i32 = exponent.parse().unwrap_or(0);
            let sign = if exponent < 0 { '-' } else { '+' };
            format!("{}E{}{:03}", mantissa, sign, exponent.abs())
        }
        // NaN and infinities have no exponent part
        None => raw,
    }
}

/// Left-align `text` in a field of `width` characters, truncating if longer
pub fn fit_left(text: &str, width: usize) -> String {
    let mut out: String = text.chars().take(width).collect();
    let len = out.chars().count();
    out.extend(std::iter::repeat(' ').take(width - len));
    out
}

/// Right-align `text` in a field of `width` characters.
///
/// Text longer than the field keeps its first `width` characters.
pub fn fit_right(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.chars().take(width).collect();
    }
    format!("{}{}", " ".repeat(width - len), text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_point() {
        assert_eq!(format_number(14.0, 2), "14.00");
        assert_eq!(format_number(2.5, 0), "2");
        assert_eq!(format_number(-0.125, 3), "-0.125");
        assert_eq!(format_number(1.0 / 3.0, 11), "0.33333333333");
    }

    #[test]
    fn test_scientific() {
        assert_eq!(format_number(1234.5, -1), "1.234500E+003");
        assert_eq!(format_number(0.00012, -1), "1.200000E-004");
        assert_eq!(format_number(0.0, -1), "0.000000E+000");
        assert_eq!(format_number(-6.02e23, -1), "-6.020000E+023");
        assert_eq!(format_number(1e-300, -1), "1.000000E-300");
    }

    #[test]
    fn test_fit() {
        assert_eq!(fit_left("abc", 5), "abc  ");
        assert_eq!(fit_left("abcdef", 3), "abc");
        assert_eq!(fit_right("1.00", 6), "  1.00");
        assert_eq!(fit_right("123456.789", 4), "1234");
        assert_eq!(fit_right("", 2), "  ");
    }
}
