//! Place - Points of interest

use serde::{Deserialize, Serialize};

/// Geographic point attached to a place (both halves may be missing upstream)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Place - A single search or details result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Display name of the place
    pub name: String,
    pub address: Option<String>,
    pub location: Location,
    /// Average user rating (1-5)
    pub rating: Option<f64>,
    pub review_count: Option<u64>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub price_level: Option<String>,
    #[serde(default)]
    pub types: Vec<String>,
    /// Editorial summary text
    pub summary: Option<String>,
    /// Opening hours, one entry per weekday
    #[serde(default)]
    pub opening_hours: Vec<String>,
    /// Google Place ID for further lookups
    pub place_id: Option<String>,
}

/// Place search result list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceSearchResponse {
    pub count: usize,
    pub places: Vec<Place>,
}

impl PlaceSearchResponse {
    pub fn new(places: Vec<Place>) -> Self {
        Self {
            count: places.len(),
            places,
        }
    }
}
