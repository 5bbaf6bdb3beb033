//! DistanceUnit - Units accepted for route requests

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub enum DistanceUnit {
    #[serde(rename = "m")]
    Meters,
    #[default]
    #[serde(rename = "km")]
    Kilometers,
    #[serde(rename = "mi")]
    Miles,
}

impl DistanceUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            DistanceUnit::Meters => "m",
            DistanceUnit::Kilometers => "km",
            DistanceUnit::Miles => "mi",
        }
    }

    /// Multiplier converting a distance in this unit to kilometres
    pub fn to_km_factor(&self) -> f64 {
        match self {
            DistanceUnit::Meters => 0.001,
            DistanceUnit::Kilometers => 1.0,
            DistanceUnit::Miles => 1.609_344,
        }
    }
}

impl std::fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DistanceUnit {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "m" => Ok(DistanceUnit::Meters),
            "km" => Ok(DistanceUnit::Kilometers),
            "mi" => Ok(DistanceUnit::Miles),
            _ => Err(DomainError::Validation(format!(
                "Invalid units {s:?}. Valid units: m, km, mi"
            ))),
        }
    }
}
