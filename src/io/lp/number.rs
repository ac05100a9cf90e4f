//! # Writing numbers
//!
//! Coefficients and right-hand sides are written such that the same value always leads to the same
//! text.

/// Values this close to an integer are written as that integer.
pub const INTEGER_TOLERANCE: f64 = 1e-9;

/// Coefficients and right-hand sides with a magnitude below this value are left out of (or snapped
/// to zero in) human-readable constraints.
pub const READABLE_ZERO_TOLERANCE: f64 = 1e-15;

/// Significant digits used by `format_general`.
const GENERAL_PRECISION: usize = 6;

/// Replace a value by the nearest integer, if it is close enough.
#[must_use]
pub fn snap_to_integer(value: f64) -> f64 {
    let rounded = value.round();
    if (value - rounded).abs() < INTEGER_TOLERANCE {
        rounded
    } else {
        value
    }
}

/// Shortest text that reads back to the same value.
///
/// Integral values are written without a decimal point and negative zero is written as `0`.
#[must_use]
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}

/// Write a value with six significant digits, without trailing zeros.
///
/// Switches to scientific notation for very small and very large magnitudes, like the `%g`
/// conversion of `printf`.
#[must_use]
pub fn format_general(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return if value.is_nan() {
            "nan".to_string()
        } else if value > 0.0 {
            "inf".to_string()
        } else {
            "-inf".to_string()
        };
    }

    // Rounding to the number of significant digits can change the exponent (e.g. 999999.5), so
    // the exponent is taken from the rounded scientific representation.
    let scientific = format!("{:.*e}", GENERAL_PRECISION - 1, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };

    if exponent < -4 || exponent >= GENERAL_PRECISION as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exponent.abs())
    } else {
        let decimals = (GENERAL_PRECISION as i32 - 1 - exponent) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

#[cfg(test)]
mod test {
    use crate::io::lp::number::{format_general, format_number, snap_to_integer};

    #[test]
    fn snapping() {
        assert_eq!(snap_to_integer(2.0000000001), 2.0);
        assert_eq!(snap_to_integer(-0.9999999999), -1.0);
        assert_eq!(snap_to_integer(2.5), 2.5);
        assert_eq!(snap_to_integer(1.00001), 1.00001);
    }

    #[test]
    fn numbers() {
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(-3.0), "-3");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(0.1), "0.1");
    }

    #[test]
    fn general() {
        assert_eq!(format_general(0.0), "0");
        assert_eq!(format_general(1.0), "1");
        assert_eq!(format_general(2.5), "2.5");
        assert_eq!(format_general(-3.25), "-3.25");
        assert_eq!(format_general(100000.0), "100000");
        assert_eq!(format_general(1000000.0), "1e+06");
        assert_eq!(format_general(1234567.0), "1.23457e+06");
        assert_eq!(format_general(0.0001), "0.0001");
        assert_eq!(format_general(0.00001), "1e-05");
        assert_eq!(format_general(1.0 / 3.0), "0.333333");
        assert_eq!(format_general(999999.5), "1e+06");
    }
}
