//! Quantity value object - amount plus unit, with phase-aware comparison
//!
//! Listings store quantities in one of four units. Comparisons normalize to
//! a base unit per phase (grams for solids, milliliters for liquids); units
//! of different phases never match each other.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Physical phase of a unit; cross-phase quantities are incomparable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Solid,
    Liquid,
}

/// Accepted quantity units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityUnit {
    Grams,
    Kilograms,
    Milliliters,
    Liters,
}

impl QuantityUnit {
    /// Canonical lowercase symbol, as persisted
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Grams => "g",
            Self::Kilograms => "kg",
            Self::Milliliters => "ml",
            Self::Liters => "l",
        }
    }

    pub fn phase(&self) -> Phase {
        match self {
            Self::Grams | Self::Kilograms => Phase::Solid,
            Self::Milliliters | Self::Liters => Phase::Liquid,
        }
    }

    /// Multiplier into the phase base unit (grams or milliliters)
    pub fn base_factor(&self) -> f64 {
        match self {
            Self::Grams | Self::Milliliters => 1.0,
            Self::Kilograms | Self::Liters => 1000.0,
        }
    }

    /// All units sharing this unit's phase, for store-side filtering
    pub fn phase_family(&self) -> &'static [&'static str] {
        match self.phase() {
            Phase::Solid => &["g", "kg"],
            Phase::Liquid => &["ml", "l"],
        }
    }
}

/// Error when parsing a unit symbol
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown quantity unit: {0}")]
pub struct UnitParseError(pub String);

impl FromStr for QuantityUnit {
    type Err = UnitParseError;

    // Case-insensitive: clients send "Kg" and "L" alongside "g" and "ml"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "g" => Ok(Self::Grams),
            "kg" => Ok(Self::Kilograms),
            "ml" => Ok(Self::Milliliters),
            "l" => Ok(Self::Liters),
            other => Err(UnitParseError(other.to_string())),
        }
    }
}

impl fmt::Display for QuantityUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl Serialize for QuantityUnit {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.symbol())
    }
}

impl<'de> Deserialize<'de> for QuantityUnit {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// An amount paired with its unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    pub value: f64,
    pub unit: QuantityUnit,
}

impl Quantity {
    pub fn new(value: f64, unit: QuantityUnit) -> Self {
        Self { value, unit }
    }

    /// Amount expressed in the phase base unit
    pub fn base_value(&self) -> f64 {
        self.value * self.unit.base_factor()
    }

    /// Whether this quantity satisfies a requested minimum.
    ///
    /// True iff both quantities share a phase and this one, base-converted,
    /// is at least the requested amount. `2 kg` satisfies `1500 g`;
    /// `1 L` never satisfies `1 kg`.
    pub fn satisfies(&self, requested: &Quantity) -> bool {
        self.unit.phase() == requested.unit.phase() && self.base_value() >= requested.base_value()
    }

    /// Best-effort parse of a quantity filter sent as a JSON string.
    ///
    /// Malformed input drops the filter rather than failing the search;
    /// callers treat `None` as "no quantity criterion".
    pub fn parse_lenient(raw: &str) -> Option<Quantity> {
        serde_json::from_str::<Quantity>(raw)
            .ok()
            .filter(|q| q.value.is_finite() && q.value > 0.0)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}
