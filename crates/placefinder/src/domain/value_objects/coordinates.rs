//! Coordinates - A WGS84 point

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Like `new`, but rejects points outside the WGS84 ranges
    pub fn try_new(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(DomainError::Validation(format!(
                "Latitude {latitude} is out of range (-90 to 90)"
            )));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(DomainError::Validation(format!(
                "Longitude {longitude} is out of range (-180 to 180)"
            )));
        }
        Ok(Self::new(latitude, longitude))
    }

    /// `[longitude, latitude]`, the order GeoJSON based APIs expect
    pub fn lon_lat(&self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// Parses `"lat,lng"`
impl std::str::FromStr for Coordinates {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || {
            DomainError::Validation(format!(
                "Invalid location {s:?}: expected \"latitude,longitude\""
            ))
        };

        let (lat, lng) = s.split_once(',').ok_or_else(invalid)?;
        let latitude: f64 = lat.trim().parse().map_err(|_| invalid())?;
        let longitude: f64 = lng.trim().parse().map_err(|_| invalid())?;

        Self::try_new(latitude, longitude).map_err(|_| invalid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lat_lng() {
        let c: Coordinates = "48.8566, 2.3522".parse().unwrap();
        assert_eq!(c, Coordinates::new(48.8566, 2.3522));
        assert_eq!(c.lon_lat(), [2.3522, 48.8566]);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for input in ["", "48.8566", "north,south", "95.0,0", "0,181"] {
            let err = input.parse::<Coordinates>().unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)), "{input}");
        }
    }

    #[test]
    fn test_try_new_checks_ranges() {
        assert!(Coordinates::try_new(-90.0, 180.0).is_ok());
        assert!(Coordinates::try_new(90.5, 0.0).is_err());
        assert!(Coordinates::try_new(0.0, -180.5).is_err());
    }
}
