//! RoutingProfile - Travel mode for routing requests

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum RoutingProfile {
    #[default]
    DrivingCar,
    DrivingHgv,
    CyclingRegular,
    CyclingMountain,
    CyclingRoad,
    CyclingElectric,
    FootWalking,
    FootHiking,
    Wheelchair,
}

impl RoutingProfile {
    pub const ALL: [RoutingProfile; 9] = [
        RoutingProfile::DrivingCar,
        RoutingProfile::DrivingHgv,
        RoutingProfile::CyclingRegular,
        RoutingProfile::CyclingMountain,
        RoutingProfile::CyclingRoad,
        RoutingProfile::CyclingElectric,
        RoutingProfile::FootWalking,
        RoutingProfile::FootHiking,
        RoutingProfile::Wheelchair,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoutingProfile::DrivingCar => "driving-car",
            RoutingProfile::DrivingHgv => "driving-hgv",
            RoutingProfile::CyclingRegular => "cycling-regular",
            RoutingProfile::CyclingMountain => "cycling-mountain",
            RoutingProfile::CyclingRoad => "cycling-road",
            RoutingProfile::CyclingElectric => "cycling-electric",
            RoutingProfile::FootWalking => "foot-walking",
            RoutingProfile::FootHiking => "foot-hiking",
            RoutingProfile::Wheelchair => "wheelchair",
        }
    }
}

impl std::fmt::Display for RoutingProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RoutingProfile {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|profile| profile.as_str() == s)
            .ok_or_else(|| {
                let valid: Vec<&str> = Self::ALL.iter().map(RoutingProfile::as_str).collect();
                DomainError::Validation(format!(
                    "Invalid profile {s:?}. Valid profiles: {}",
                    valid.join(", ")
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profiles_round_trip_through_str() {
        for profile in RoutingProfile::ALL {
            assert_eq!(profile.as_str().parse::<RoutingProfile>().unwrap(), profile);
        }
    }

    #[test]
    fn test_unknown_profile_lists_valid_ones() {
        let err = "hovercraft".parse::<RoutingProfile>().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("hovercraft"));
        assert!(message.contains("foot-hiking"));
        assert!(message.contains("wheelchair"));
    }
}
