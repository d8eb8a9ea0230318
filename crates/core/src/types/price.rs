//! Type-safe price representation using decimal arithmetic.
//!
//! Catalog prices are plain amounts in the store currency. They are kept as
//! [`Decimal`] so cart totals never accumulate float error, and they travel
//! through JSON as numbers so stored carts stay readable by any client.

use core::fmt;
use core::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Deserializer, Serialize, de};

/// Currency every catalog price is denominated in.
pub const STORE_CURRENCY: &str = "SEK";

/// A non-negative amount in [`STORE_CURRENCY`].
///
/// Deserializing goes through [`Price::new`], so a negative amount is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct Price(#[serde(serialize_with = "rust_decimal::serde::float::serialize")] Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price, returning `None` for negative amounts.
    #[must_use]
    pub fn new(amount: Decimal) -> Option<Self> {
        (!amount.is_sign_negative() || amount.is_zero()).then_some(Self(amount))
    }

    /// Create a price from a float, returning `None` for NaN, infinities and
    /// negative amounts.
    #[must_use]
    pub fn from_f64(amount: f64) -> Option<Self> {
        if !amount.is_finite() {
            return None;
        }
        Decimal::from_f64(amount).and_then(Self::new)
    }

    /// Parse a price from text such as `"1299"` or `"49.90"`.
    ///
    /// Surrounding whitespace is ignored. Returns `None` when the text is not a
    /// number or the amount is negative.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        match Decimal::from_str(trimmed) {
            Ok(amount) => Self::new(amount),
            Err(_) => trimmed.parse::<f64>().ok().and_then(Self::from_f64),
        }
    }

    /// Get the amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Price of `quantity` units.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Decimal {
        self.0 * Decimal::from(quantity)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = rust_decimal::serde::float::deserialize(deserializer)?;
        Self::new(amount).ok_or_else(|| de::Error::custom("price must not be negative"))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {STORE_CURRENCY}", self.0.normalize())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_price_rejects_negative() {
        assert!(Price::new(Decimal::new(-1, 0)).is_none());
        assert!(Price::from_f64(-0.5).is_none());
        assert!(Price::parse("-10").is_none());
    }

    #[test]
    fn test_price_rejects_non_finite() {
        assert!(Price::from_f64(f64::NAN).is_none());
        assert!(Price::from_f64(f64::INFINITY).is_none());
    }

    #[test]
    fn test_price_parse_text() {
        assert_eq!(Price::parse("1299").unwrap().amount(), Decimal::new(1299, 0));
        assert_eq!(Price::parse(" 49.90 ").unwrap().amount(), Decimal::new(4990, 2));
        assert!(Price::parse("cheap").is_none());
    }

    #[test]
    fn test_price_times() {
        let price = Price::parse("49.90").unwrap();
        assert_eq!(price.times(3), Decimal::new(14970, 2));
        assert_eq!(price.times(0), Decimal::ZERO);
    }

    #[test]
    fn test_price_display() {
        assert_eq!(Price::parse("300").unwrap().to_string(), "300 SEK");
        assert_eq!(Price::parse("49.50").unwrap().to_string(), "49.5 SEK");
    }

    #[test]
    fn test_price_serializes_as_number() {
        let json = serde_json::to_value(Price::parse("49.5").unwrap()).unwrap();
        assert!(json.is_number());
        assert!((json.as_f64().unwrap() - 49.5).abs() < f64::EPSILON);

        let price: Price = serde_json::from_str("1299").unwrap();
        assert_eq!(price.amount(), Decimal::new(1299, 0));
    }

    #[test]
    fn test_price_deserialize_rejects_negative() {
        assert!(serde_json::from_str::<Price>("-50").is_err());
        assert_eq!(serde_json::from_str::<Price>("0").unwrap(), Price::ZERO);
    }
}
