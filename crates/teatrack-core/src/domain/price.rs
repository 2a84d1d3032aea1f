//! Price and commodity value types.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A validated price per kilogram.
///
/// Always finite and strictly positive. Two prices are equal when their
/// numeric values are equal, regardless of how they were written on input.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct PricePerKilo(f64);

impl PricePerKilo {
    /// Create a price, rejecting zero, negative and non-finite values.
    pub fn new(value: f64) -> Result<Self, PriceError> {
        if !value.is_finite() {
            return Err(PriceError::NotFinite);
        }
        if value <= 0.0 {
            return Err(PriceError::NotPositive(value));
        }
        Ok(Self(value))
    }

    /// The raw numeric value.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Whether `other` is a different numeric price.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn differs_from(self, other: Self) -> bool {
        self.0 != other.0
    }
}

impl fmt::Display for PricePerKilo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PricePerKilo {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value: f64 = trimmed
            .parse()
            .map_err(|_| PriceError::NotNumeric(trimmed.to_string()))?;
        Self::new(value)
    }
}

impl TryFrom<f64> for PricePerKilo {
    type Error = PriceError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl Serialize for PricePerKilo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.0)
    }
}

impl<'de> Deserialize<'de> for PricePerKilo {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}

/// Reasons a price input is rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PriceError {
    #[error("price must be a number, got {0:?}")]
    NotNumeric(String),

    #[error("price must be greater than zero, got {0}")]
    NotPositive(f64),

    #[error("price must be a finite number")]
    NotFinite,
}

/// A price as it arrived from a caller, before numeric coercion.
///
/// Clients send `pricePerKilo` either as a JSON number or as a numeric
/// string. Both forms coerce to the same [`PricePerKilo`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriceInput {
    Number(f64),
    Text(String),
}

impl PriceInput {
    /// Coerce to a validated numeric price.
    pub fn coerce(&self) -> Result<PricePerKilo, PriceError> {
        match self {
            Self::Number(n) => PricePerKilo::new(*n),
            Self::Text(s) => s.parse(),
        }
    }
}

impl From<f64> for PriceInput {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for PriceInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<PricePerKilo> for PriceInput {
    fn from(value: PricePerKilo) -> Self {
        Self::Number(value.value())
    }
}

/// The commodity a factory procures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommodityType {
    Tea,
    Coffee,
}

impl CommodityType {
    /// Parse a commodity from its exact name.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "Tea" => Some(Self::Tea),
            "Coffee" => Some(Self::Coffee),
            _ => None,
        }
    }

    /// Canonical name, as stored and serialized.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Tea => "Tea",
            Self::Coffee => "Coffee",
        }
    }
}

impl fmt::Display for CommodityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
