//! Google Places API (New) client
//!
//! - POST /places:searchText
//! - POST /places:searchNearby
//! - GET  /places/{place_id}

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

use placefinder::{DomainError, LocationBias, NearbySearch, Place, PlacesService};

use super::formatters::places::{parse_place, parse_places};
use super::{http_client, read_json, request_failed};

const BASE_URL: &str = "https://places.googleapis.com/v1";
const SERVICE: &str = "Google Places";
const TIMEOUT: Duration = Duration::from_secs(10);
/// Upstream page size limit
const MAX_PAGE_SIZE: u32 = 20;

const FIELDS: [&str; 12] = [
    "id",
    "displayName",
    "formattedAddress",
    "location",
    "rating",
    "userRatingCount",
    "types",
    "regularOpeningHours",
    "websiteUri",
    "nationalPhoneNumber",
    "priceLevel",
    "editorialSummary",
];

fn search_field_mask() -> String {
    FIELDS
        .iter()
        .map(|f| format!("places.{f}"))
        .collect::<Vec<_>>()
        .join(",")
}

fn detail_field_mask() -> String {
    FIELDS.join(",")
}

fn circle(center_lat: f64, center_lng: f64, radius: f64) -> Value {
    json!({
        "circle": {
            "center": {"latitude": center_lat, "longitude": center_lng},
            "radius": radius,
        }
    })
}

pub struct GooglePlacesClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GooglePlacesClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, DomainError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(DomainError::missing_setting("GOOGLE_PLACES_API_KEY"));
        }
        Ok(Self {
            client: http_client(TIMEOUT)?,
            api_key,
            base_url: BASE_URL.to_string(),
        })
    }

    /// Point the client at another host (tests, proxies)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn post_search(&self, path: &str, body: Value) -> Result<Vec<Place>, DomainError> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .header("X-Goog-Api-Key", &self.api_key)
            .header("X-Goog-FieldMask", search_field_mask())
            .json(&body)
            .send()
            .await
            .map_err(|e| request_failed(SERVICE, e))?;

        let payload = read_json(response, SERVICE).await?;
        Ok(parse_places(&payload))
    }
}

#[async_trait]
impl PlacesService for GooglePlacesClient {
    async fn search_text(
        &self,
        query: &str,
        bias: Option<LocationBias>,
        max_results: u32,
    ) -> Result<Vec<Place>, DomainError> {
        tracing::debug!("Text search: query={:?}, max_results={}", query, max_results);

        let mut body = json!({
            "textQuery": query,
            "pageSize": max_results.min(MAX_PAGE_SIZE),
        });
        if let Some(bias) = bias {
            body["locationBias"] = circle(
                bias.center.latitude,
                bias.center.longitude,
                bias.radius_meters,
            );
        }

        self.post_search("/places:searchText", body).await
    }

    async fn search_nearby(&self, search: &NearbySearch) -> Result<Vec<Place>, DomainError> {
        tracing::debug!(
            "Nearby search: center={}, radius={}, type={:?}",
            search.center,
            search.radius_meters,
            search.place_type
        );

        let mut body = json!({
            "maxResultCount": search.max_results.min(MAX_PAGE_SIZE),
            "locationRestriction": circle(
                search.center.latitude,
                search.center.longitude,
                search.radius_meters,
            ),
        });
        if let Some(place_type) = &search.place_type {
            body["includedTypes"] = json!([place_type]);
        }

        self.post_search("/places:searchNearby", body).await
    }

    async fn place_details(&self, place_id: &str) -> Result<Place, DomainError> {
        tracing::debug!("Place details: place_id={:?}", place_id);

        let response = self
            .client
            .get(format!("{}/places/{}", self.base_url, place_id))
            .header("X-Goog-Api-Key", &self.api_key)
            .header("X-Goog-FieldMask", detail_field_mask())
            .send()
            .await
            .map_err(|e| request_failed(SERVICE, e))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(DomainError::not_found("Place", place_id));
        }

        let payload = read_json(response, SERVICE).await?;
        Ok(parse_place(&payload))
    }
}
