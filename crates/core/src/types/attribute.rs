//! Attribute values for product variants.

use core::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Largest integer an `f64` represents exactly (2^53).
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// A single value of a variant attribute, e.g. `"white"` for Color or `6.5`
/// for Power.
///
/// Text and numbers never compare equal to each other: `"32"` and `32` are
/// different values.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Text(String),
    Number(f64),
}

impl AttributeValue {
    /// Integral numbers within the exactly representable range, as an `i64`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // range and fraction checked first
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Number(n) if n.fract() == 0.0 && n.abs() <= MAX_EXACT_INTEGER => {
                Some(*n as i64)
            }
            _ => None,
        }
    }

    /// Convert to a JSON value. Integral numbers become JSON integers.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Text(text) => serde_json::Value::String(text.clone()),
            Self::Number(n) => self.as_integer().map_or_else(
                || {
                    serde_json::Number::from_f64(*n)
                        .map_or(serde_json::Value::Null, serde_json::Value::Number)
                },
                serde_json::Value::from,
            ),
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(n) => match self.as_integer() {
                Some(i) => write!(f, "{i}"),
                None => write!(f, "{n}"),
            },
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for AttributeValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl Serialize for AttributeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(text) => serializer.serialize_str(text),
            Self::Number(n) => match self.as_integer() {
                Some(i) => serializer.serialize_i64(i),
                None => serializer.serialize_f64(*n),
            },
        }
    }
}

impl<'de> Deserialize<'de> for AttributeValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(AttributeValueVisitor)
    }
}

struct AttributeValueVisitor;

impl Visitor<'_> for AttributeValueVisitor {
    type Value = AttributeValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string or a number")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(AttributeValue::Text(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(AttributeValue::Text(v))
    }

    #[allow(clippy::cast_precision_loss)] // attribute numbers are small display values
    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(AttributeValue::Number(v as f64))
    }

    #[allow(clippy::cast_precision_loss)]
    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(AttributeValue::Number(v as f64))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(AttributeValue::Number(v))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_text_and_number_are_distinct() {
        assert_ne!(AttributeValue::from("32"), AttributeValue::from(32));
        assert_eq!(AttributeValue::from(6.5), AttributeValue::Number(6.5));
    }

    #[test]
    fn test_display() {
        assert_eq!(AttributeValue::from("white").to_string(), "white");
        assert_eq!(AttributeValue::from(250).to_string(), "250");
        assert_eq!(AttributeValue::from(6.5).to_string(), "6.5");
    }

    #[test]
    fn test_integral_numbers_serialize_without_fraction() {
        assert_eq!(serde_json::to_string(&AttributeValue::from(9.0)).unwrap(), "9");
        assert_eq!(serde_json::to_string(&AttributeValue::from(9.5)).unwrap(), "9.5");
        assert_eq!(serde_json::to_string(&AttributeValue::from("9")).unwrap(), "\"9\"");
    }

    #[test]
    fn test_deserialize_accepts_strings_and_numbers() {
        let values: Vec<AttributeValue> = serde_json::from_str(r#"["red", 32, 6.5]"#).unwrap();
        assert_eq!(
            values,
            vec![
                AttributeValue::from("red"),
                AttributeValue::from(32),
                AttributeValue::from(6.5)
            ]
        );
        assert!(serde_json::from_str::<AttributeValue>("true").is_err());
    }
}
