//! crates/batchlog/src/number.rs
//! Floating-point rendering with a fixed number of significant digits.
//!
//! Console output and benchmark records print floats the way a C++ stream in
//! its default float mode does: `precision` significant digits, fixed notation
//! unless the decimal exponent is below -4 or at least `precision`, trailing
//! zeros removed. Existing benchmark files and downstream scripts depend on
//! this shape (`3.14159`, `0.0001`, `1.23457e+06`).

use std::fmt;

/// Display adapter that renders an `f64` with `precision` significant digits.
///
/// ```
/// use batchlog::Significant;
///
/// assert_eq!(Significant::new(3.14159, 6).to_string(), "3.14159");
/// assert_eq!(Significant::new(2.0, 6).to_string(), "2");
/// assert_eq!(Significant::new(1234567.0, 6).to_string(), "1.23457e+06");
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Significant {
    value: f64,
    precision: usize,
}

impl Significant {
    /// Wraps `value` for rendering with `precision` significant digits.
    ///
    /// A precision of zero is treated as one.
    #[must_use]
    pub const fn new(value: f64, precision: usize) -> Self {
        Self { value, precision }
    }
}

impl fmt::Display for Significant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.value;
        if value.is_nan() {
            return f.write_str("nan");
        }
        if value.is_infinite() {
            return f.write_str(if value < 0.0 { "-inf" } else { "inf" });
        }
        if value == 0.0 {
            return f.write_str(if value.is_sign_negative() { "-0" } else { "0" });
        }

        let precision = self.precision.max(1);
        let scientific = format!("{:.*e}", precision - 1, value);
        let (mantissa, exponent) = scientific
            .split_once('e')
            .ok_or(fmt::Error)?;
        let exponent: i64 = exponent.parse().map_err(|_| fmt::Error)?;

        if exponent < -4 || exponent >= precision as i64 {
            let sign = if exponent < 0 { '-' } else { '+' };
            write!(
                f,
                "{}e{sign}{:02}",
                trim_fraction(mantissa),
                exponent.unsigned_abs()
            )
        } else {
            let decimals = (precision as i64 - 1 - exponent) as usize;
            let fixed = format!("{value:.decimals$}");
            f.write_str(trim_fraction(&fixed))
        }
    }
}

/// Drops trailing fractional zeros and a dangling decimal point.
fn trim_fraction(digits: &str) -> &str {
    if digits.contains('.') {
        digits.trim_end_matches('0').trim_end_matches('.')
    } else {
        digits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(value: f64, precision: usize) -> String {
        Significant::new(value, precision).to_string()
    }

    #[test]
    fn fixed_notation_keeps_significant_digits() {
        assert_eq!(render(3.14159, 6), "3.14159");
        assert_eq!(render(3.141_592_653, 6), "3.14159");
        assert_eq!(render(3.141_592_653, 3), "3.14");
        assert_eq!(render(100_000.0, 6), "100000");
        assert_eq!(render(-42.5, 6), "-42.5");
    }

    #[test]
    fn small_values_switch_at_exponent_minus_five() {
        assert_eq!(render(0.0001, 6), "0.0001");
        assert_eq!(render(0.000_012_5, 6), "1.25e-05");
    }

    #[test]
    fn large_values_switch_at_precision() {
        assert_eq!(render(1_234_567.0, 6), "1.23457e+06");
        assert_eq!(render(1_000_000.0, 6), "1e+06");
        assert_eq!(render(999_999.0, 6), "999999");
    }

    #[test]
    fn rounding_can_bump_the_exponent() {
        assert_eq!(render(999_999.5, 6), "1e+06");
        assert_eq!(render(9.999_999, 6), "10");
    }

    #[test]
    fn zero_precision_behaves_like_one() {
        assert_eq!(render(3.7, 0), "4");
    }

    #[test]
    fn special_values() {
        assert_eq!(render(0.0, 6), "0");
        assert_eq!(render(-0.0, 6), "-0");
        assert_eq!(render(f64::INFINITY, 6), "inf");
        assert_eq!(render(f64::NEG_INFINITY, 6), "-inf");
        assert_eq!(render(f64::NAN, 6), "nan");
    }
}
