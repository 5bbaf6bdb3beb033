//! Google Places API (New) payloads

use serde_json::Value;

use placefinder::{Location, Place};

use super::{array_at, f64_at, str_at, u64_at};

pub fn parse_place(raw: &Value) -> Place {
    Place {
        name: str_at(raw, &["displayName", "text"]).unwrap_or_else(|| "Unknown".to_string()),
        address: str_at(raw, &["formattedAddress"]),
        location: Location {
            latitude: f64_at(raw, &["location", "latitude"]),
            longitude: f64_at(raw, &["location", "longitude"]),
        },
        rating: f64_at(raw, &["rating"]),
        review_count: u64_at(raw, &["userRatingCount"]),
        phone: str_at(raw, &["nationalPhoneNumber"]),
        website: str_at(raw, &["websiteUri"]),
        price_level: str_at(raw, &["priceLevel"]),
        types: array_at(raw, &["types"])
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        summary: str_at(raw, &["editorialSummary", "text"]).filter(|s| !s.is_empty()),
        opening_hours: array_at(raw, &["regularOpeningHours", "weekdayDescriptions"])
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        place_id: str_at(raw, &["id"]).filter(|s| !s.is_empty()),
    }
}

/// Places from a search response's `places` array
pub fn parse_places(raw: &Value) -> Vec<Place> {
    array_at(raw, &["places"]).iter().map(parse_place).collect()
}
