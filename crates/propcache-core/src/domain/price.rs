//! Fixed-point price value object.

use crate::PropcacheError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A non-negative price with exactly two fraction digits.
///
/// Stored as integer cents so that the value is exact; rendered as a decimal
/// string such as `30000.00` everywhere it leaves the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Price {
    cents: u64,
}

impl Price {
    /// Maximum number of fraction digits accepted when parsing.
    pub const SCALE: usize = 2;

    /// Creates a price from a whole number of cents.
    #[must_use]
    pub const fn from_cents(cents: u64) -> Self {
        Self { cents }
    }

    /// Creates a price from whole units and cents (`units.cents`).
    pub fn new(units: u64, cents: u8) -> Result<Self, PropcacheError> {
        if cents >= 100 {
            return Err(PropcacheError::validation("Cents must be below 100"));
        }
        units
            .checked_mul(100)
            .and_then(|c| c.checked_add(u64::from(cents)))
            .map(Self::from_cents)
            .ok_or_else(|| PropcacheError::validation("Price is out of range"))
    }

    /// Returns the price in cents.
    #[must_use]
    pub const fn cents(&self) -> u64 {
        self.cents
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.cents / 100, self.cents % 100)
    }
}

impl FromStr for Price {
    type Err = PropcacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.starts_with('-') {
            return Err(PropcacheError::validation("Price must be non-negative"));
        }

        let (whole, fraction) = match s.split_once('.') {
            Some((_, "")) => {
                return Err(PropcacheError::validation(format!("Invalid price '{}'", s)));
            }
            Some(parts) => parts,
            None => (s, ""),
        };
        let digits_only = |part: &str| part.bytes().all(|b| b.is_ascii_digit());

        if whole.is_empty() || !digits_only(whole) || !digits_only(fraction) {
            return Err(PropcacheError::validation(format!("Invalid price '{}'", s)));
        }
        if fraction.len() > Self::SCALE {
            return Err(PropcacheError::validation(format!(
                "Price '{}' has more than {} decimal places",
                s,
                Self::SCALE
            )));
        }

        let units: u64 = whole
            .parse()
            .map_err(|_| PropcacheError::validation("Price is out of range"))?;
        let cents: u8 = format!("{:0<2}", fraction)
            .parse()
            .map_err(|_| PropcacheError::validation(format!("Invalid price '{}'", s)))?;

        Self::new(units, cents)
    }
}

impl TryFrom<String> for Price {
    type Error = PropcacheError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Price> for String {
    fn from(price: Price) -> Self {
        price.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_always_has_two_decimals() {
        assert_eq!(Price::from_cents(3_000_000).to_string(), "30000.00");
        assert_eq!(Price::from_cents(5).to_string(), "0.05");
        assert_eq!(Price::from_cents(123_456).to_string(), "1234.56");
    }

    #[test]
    fn test_parse_accepts_short_fractions() {
        assert_eq!("30000".parse::<Price>().unwrap().cents(), 3_000_000);
        assert_eq!("30000.5".parse::<Price>().unwrap().cents(), 3_000_050);
        assert_eq!("30000.05".parse::<Price>().unwrap().cents(), 3_000_005);
        assert_eq!(" 12.00 ".parse::<Price>().unwrap().cents(), 1200);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!("-1.00".parse::<Price>().is_err());
        assert!("1.234".parse::<Price>().is_err());
        assert!("abc".parse::<Price>().is_err());
        assert!(".50".parse::<Price>().is_err());
        assert!("1.".parse::<Price>().is_err());
        assert!("30000.".parse::<Price>().is_err());
        assert!("1e5".parse::<Price>().is_err());
        assert!("99999999999999999999".parse::<Price>().is_err());
    }

    #[test]
    fn test_serializes_as_decimal_string() {
        let json = serde_json::to_string(&Price::from_cents(3_000_000)).unwrap();
        assert_eq!(json, "\"30000.00\"");

        let back: Price = serde_json::from_str("\"30000.00\"").unwrap();
        assert_eq!(back, Price::from_cents(3_000_000));
    }

    #[test]
    fn test_new_rejects_overflowing_cents() {
        assert!(Price::new(1, 100).is_err());
        assert_eq!(Price::new(1, 99).unwrap().cents(), 199);
    }
}
