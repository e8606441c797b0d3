//! Exact decimal quantities.
//!
//! Counted and declared quantities are compared as exact decimal values so
//! `2.10` and `2.1` are the same quantity. Values are stored as a normalized
//! mantissa/scale pair; no floating point is involved in parsing or
//! comparison. The single parse function below accepts both comma and dot as
//! the decimal separator and is the one normalization point shared by input
//! handling and equality checks.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ConferenceError;

/// Largest number of fraction digits kept after normalization.
///
/// Counts and weights in manifests use at most three decimal places; six
/// leaves headroom while keeping cross-scale comparison within `i128`.
pub const MAX_FRACTION_DIGITS: usize = 6;

/// An exact, non-negative decimal quantity.
///
/// The stored form is canonical: trailing fraction zeros are stripped, so
/// two equal values always have identical mantissa and scale and the derived
/// `Eq`/`Hash` agree with numeric equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Quantity {
    /// Digits of the value with the decimal point removed.
    mantissa: u64,
    /// Number of fraction digits in `mantissa`.
    scale: u8,
}

impl Quantity {
    pub const ZERO: Quantity = Quantity {
        mantissa: 0,
        scale: 0,
    };

    /// Parse operator-entered text as an exact quantity.
    ///
    /// Accepts `12`, `12.5`, `12,5`, `.5`, and `5.`; rejects signs, letters,
    /// repeated separators, values needing more than [`MAX_FRACTION_DIGITS`]
    /// fraction digits after normalization, and anything overflowing the
    /// mantissa.
    pub fn parse(input: &str) -> Result<Self, ConferenceError> {
        let invalid = || ConferenceError::InvalidQuantity {
            input: input.to_string(),
        };
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(invalid());
        }

        let mut integer = String::new();
        let mut fraction = String::new();
        let mut seen_separator = false;
        for ch in trimmed.chars() {
            match ch {
                '0'..='9' => {
                    if seen_separator {
                        fraction.push(ch);
                    } else {
                        integer.push(ch);
                    }
                }
                '.' | ',' => {
                    if seen_separator {
                        return Err(invalid());
                    }
                    seen_separator = true;
                }
                _ => return Err(invalid()),
            }
        }
        if integer.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }

        let fraction = fraction.trim_end_matches('0');
        if fraction.len() > MAX_FRACTION_DIGITS {
            return Err(invalid());
        }
        let scale = fraction.len() as u8;

        let integer_part: u64 = if integer.is_empty() {
            0
        } else {
            integer.parse().map_err(|_| invalid())?
        };
        let fraction_part: u64 = if fraction.is_empty() {
            0
        } else {
            fraction.parse().map_err(|_| invalid())?
        };
        let mantissa = integer_part
            .checked_mul(pow10(scale))
            .and_then(|scaled| scaled.checked_add(fraction_part))
            .ok_or_else(invalid)?;

        Ok(Self { mantissa, scale })
    }

    pub fn is_zero(&self) -> bool {
        self.mantissa == 0
    }

    /// Render with a comma decimal separator, the way operators read
    /// quantities and weights on printed manifests.
    pub fn to_comma_string(&self) -> String {
        self.to_string().replace('.', ",")
    }
}

fn pow10(scale: u8) -> u64 {
    10u64.pow(u32::from(scale))
}

impl From<u64> for Quantity {
    fn from(value: u64) -> Self {
        Self {
            mantissa: value,
            scale: 0,
        }
    }
}

impl FromStr for Quantity {
    type Err = ConferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Ord for Quantity {
    fn cmp(&self, other: &Self) -> Ordering {
        let common = self.scale.max(other.scale);
        let left = i128::from(self.mantissa) * i128::from(pow10(common - self.scale));
        let right = i128::from(other.mantissa) * i128::from(pow10(common - other.scale));
        left.cmp(&right)
    }
}

impl PartialOrd for Quantity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.scale == 0 {
            return write!(f, "{}", self.mantissa);
        }
        let digits = self.mantissa.to_string();
        let scale = usize::from(self.scale);
        if digits.len() <= scale {
            write!(f, "0.{}{}", "0".repeat(scale - digits.len()), digits)
        } else {
            let (integer, fraction) = digits.split_at(digits.len() - scale);
            write!(f, "{integer}.{fraction}")
        }
    }
}

impl Serialize for Quantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct QuantityVisitor;

        impl de::Visitor<'_> for QuantityVisitor {
            type Value = Quantity;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a non-negative decimal number or numeric string")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Quantity, E> {
                Quantity::parse(value).map_err(E::custom)
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<Quantity, E> {
                Ok(Quantity::from(value))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<Quantity, E> {
                u64::try_from(value)
                    .map(Quantity::from)
                    .map_err(|_| E::custom("quantity must not be negative"))
            }

            fn visit_f64<E: de::Error>(self, value: f64) -> Result<Quantity, E> {
                if !value.is_finite() || value < 0.0 {
                    return Err(E::custom("quantity must be a finite non-negative number"));
                }
                Quantity::parse(&value.to_string()).map_err(E::custom)
            }
        }

        deserializer.deserialize_any(QuantityVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comma_and_dot_parse_to_the_same_value() {
        assert_eq!(
            Quantity::parse("12,5").unwrap(),
            Quantity::parse("12.5").unwrap()
        );
    }

    #[test]
    fn trailing_zeros_do_not_create_divergence() {
        assert_eq!(
            Quantity::parse("2.10").unwrap(),
            Quantity::parse("2.1").unwrap()
        );
        assert_eq!(Quantity::parse("5.000").unwrap(), Quantity::from(5));
    }

    #[test]
    fn bare_separator_forms_are_accepted() {
        assert_eq!(Quantity::parse(".5").unwrap().to_string(), "0.5");
        assert_eq!(Quantity::parse("5.").unwrap(), Quantity::from(5));
    }

    #[test]
    fn malformed_input_is_rejected() {
        for input in ["", "  ", "-1", "+2", "1.2.3", "1,2,3", "1.2,3", "abc", "1x"] {
            assert!(Quantity::parse(input).is_err(), "accepted {input:?}");
        }
    }

    #[test]
    fn ordering_is_exact_across_scales() {
        let a = Quantity::parse("2.05").unwrap();
        let b = Quantity::parse("2.5").unwrap();
        assert!(a < b);
        assert!(Quantity::parse("10").unwrap() > Quantity::parse("9.999999").unwrap());
    }

    #[test]
    fn display_keeps_leading_zero() {
        assert_eq!(Quantity::parse("0.05").unwrap().to_string(), "0.05");
        assert_eq!(Quantity::parse("0,05").unwrap().to_comma_string(), "0,05");
    }
}
