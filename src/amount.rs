//! Currency amounts as printed on payslips.
//!
//! Payslip amounts use comma grouping and mark negatives with a trailing
//! minus (`1,234.56-`). Values are kept as `rust_decimal` fixed-point numbers
//! with exactly 2 decimal places.

use crate::error::PayslipError;
use rust_decimal::Decimal;
use std::fmt;
use std::ops::{Add, Neg, Sub};
use std::str::FromStr;

/// A signed currency amount with exactly 2 decimal places.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use payslip_reports::Amount;
///
/// let amount = Amount::from_str("1,234.5-").unwrap();
/// assert_eq!(amount.to_string(), "-1234.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(Decimal);

impl Amount {
    /// The number of decimal places to maintain.
    pub const SCALE: u32 = 2;

    /// Zero value.
    pub const ZERO: Self = Amount(Decimal::ZERO);

    /// Creates a new `Amount` from a `Decimal`, normalizing to 2 decimal places.
    pub fn new(value: Decimal) -> Self {
        let mut normalized = value;
        normalized.rescale(Self::SCALE);
        Amount(normalized)
    }

    /// Returns `true` if this value is negative.
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Returns `true` if this value is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Formats the amount the way payslips print it: comma grouping and a
    /// trailing minus for negatives.
    pub fn to_payslip_string(&self) -> String {
        let plain = format!("{:.2}", self.0.abs());
        let (whole, fraction) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (idx, digit) in whole.chars().enumerate() {
            if idx > 0 && (whole.len() - idx) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(digit);
        }

        let sign = if self.is_negative() { "-" } else { "" };
        format!("{grouped}.{fraction}{sign}")
    }
}

impl FromStr for Amount {
    type Err = PayslipError;

    /// Parses a payslip amount.
    ///
    /// Grouping commas are stripped and a trailing `-` negates the magnitude
    /// before it. Values needing more than [`Amount::SCALE`] decimal places
    /// are rejected rather than rounded.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let invalid = || PayslipError::Amount {
            text: s.to_string(),
        };

        let digits: String = s.trim().chars().filter(|c| *c != ',').collect();
        let (magnitude, negative) = match digits.strip_suffix('-') {
            Some(rest) => (rest, true),
            None => (digits.as_str(), false),
        };

        let value = Decimal::from_str(magnitude).map_err(|_| invalid())?;
        if value.normalize().scale() > Self::SCALE {
            return Err(invalid());
        }

        Ok(if negative && !value.is_zero() {
            -Amount::new(value)
        } else {
            Amount::new(value)
        })
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Amount::new(self.0 + rhs.0)
    }
}

impl Sub for Amount {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Amount::new(self.0 - rhs.0)
    }
}

impl Neg for Amount {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Amount::new(-self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amount(s: &str) -> Amount {
        Amount::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_grouped_amount() {
        assert_eq!(amount("1,234.56").to_string(), "1234.56");
        assert_eq!(amount("1,234,567.89").to_string(), "1234567.89");
    }

    #[test]
    fn test_parse_trailing_minus() {
        let value = amount("1,234.56-");
        assert_eq!(value.to_string(), "-1234.56");
        assert!(value.is_negative());
    }

    #[test]
    fn test_parse_zero() {
        let value = amount("0.00");
        assert!(value.is_zero());
        assert_eq!(value, Amount::ZERO);
        assert_eq!(value.to_string(), "0.00");
    }

    #[test]
    fn test_parse_normalizes_scale() {
        assert_eq!(amount("150").to_string(), "150.00");
        assert_eq!(amount("  2.5  ").to_string(), "2.50");
    }

    #[test]
    fn test_parse_rejects_extra_precision() {
        for text in ["1.005", "1.015", "2,500.001-"] {
            assert!(matches!(
                Amount::from_str(text),
                Err(PayslipError::Amount { .. })
            ));
        }
        assert_eq!(amount("1.500").to_string(), "1.50");
        assert_eq!(amount("7.0000").to_string(), "7.00");
    }

    #[test]
    fn test_parse_rejects_malformed_text() {
        for text in ["", "-", "abc", "12.34.56", "1,2x3.00"] {
            match Amount::from_str(text) {
                Err(PayslipError::Amount { text: offending }) => assert_eq!(offending, text),
                other => panic!("Expected amount error for {:?}, got {:?}", text, other),
            }
        }
    }

    #[test]
    fn test_payslip_format_round_trip_preserves_sign() {
        for text in ["1,234.56", "1,234.56-", "0.00", "999.99-", "12,000.00"] {
            let value = amount(text);
            assert_eq!(value.to_payslip_string(), text);
            assert_eq!(amount(&value.to_payslip_string()), value);
        }
    }

    #[test]
    fn test_arithmetic_preserves_scale() {
        let a = amount("2,500.00");
        let b = amount("100.00-");
        assert_eq!((a + b).to_string(), "2400.00");
        assert_eq!((a - b).to_string(), "2600.00");
        assert_eq!((-a).to_string(), "-2500.00");
    }
}
