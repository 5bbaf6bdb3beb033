//! OpenRouteService client
//!
//! - POST /v2/directions/{profile}
//! - GET  /geocode/search
//! - GET  /geocode/reverse
//! - POST /v2/isochrones/{profile}
//! - POST /v2/matrix/{profile}

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde_json::{json, Value};
use std::time::Duration;

use placefinder::{
    Coordinates, DirectionsRequest, DirectionsResponse, DomainError, GeocodeRequest,
    GeocodeResponse, IsochroneRequest, IsochroneResponse, MatrixRequest, MatrixResponse,
    RoutingService,
};

use super::formatters::routing::{parse_directions, parse_geocode, parse_isochrones, parse_matrix};
use super::{http_client, read_json, request_failed};

const BASE_URL: &str = "https://api.openrouteservice.org";
const SERVICE: &str = "OpenRouteService";
const TIMEOUT: Duration = Duration::from_secs(15);
const MAX_GEOCODE_RESULTS: u32 = 20;

pub struct OpenRouteServiceClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenRouteServiceClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, DomainError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(DomainError::missing_setting("OPEN_ROUTE_SERVICE_API_KEY"));
        }
        Ok(Self {
            client: http_client(TIMEOUT)?,
            api_key,
            base_url: BASE_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("Authorization", &self.api_key)
            .header("Accept", "application/json, application/geo+json")
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value, DomainError> {
        let request = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .json(&body);
        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(|e| request_failed(SERVICE, e))?;
        read_json(response, SERVICE).await
    }

    async fn get(&self, path: &str, params: &[(&str, String)]) -> Result<Value, DomainError> {
        let request = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .query(params);
        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(|e| request_failed(SERVICE, e))?;
        read_json(response, SERVICE).await
    }
}

#[async_trait]
impl RoutingService for OpenRouteServiceClient {
    async fn directions(
        &self,
        request: &DirectionsRequest,
    ) -> Result<DirectionsResponse, DomainError> {
        tracing::debug!("Directions: profile={}, {} -> {}", request.profile, request.start, request.end);

        let body = json!({
            "coordinates": [request.start.lon_lat(), request.end.lon_lat()],
            "language": "en",
            "units": request.units.as_str(),
            "geometry": true,
            "instructions": true,
        });
        let payload = self
            .post(&format!("/v2/directions/{}", request.profile), body)
            .await?;
        Ok(parse_directions(&payload, request.units))
    }

    async fn geocode(&self, request: &GeocodeRequest) -> Result<GeocodeResponse, DomainError> {
        tracing::debug!("Geocode: text={:?}, size={}", request.text, request.size);

        let mut params = vec![
            ("text", request.text.clone()),
            ("size", request.size.clamp(1, MAX_GEOCODE_RESULTS).to_string()),
        ];
        if let Some(country) = &request.country {
            params.push(("boundary.country", country.clone()));
        }
        let payload = self.get("/geocode/search", &params).await?;
        Ok(parse_geocode(&payload))
    }

    async fn reverse_geocode(
        &self,
        at: Coordinates,
        size: u32,
    ) -> Result<GeocodeResponse, DomainError> {
        tracing::debug!("Reverse geocode: {}, size={}", at, size);

        let params = [
            ("point.lat", at.latitude.to_string()),
            ("point.lon", at.longitude.to_string()),
            ("size", size.clamp(1, MAX_GEOCODE_RESULTS).to_string()),
        ];
        let payload = self.get("/geocode/reverse", &params).await?;
        Ok(parse_geocode(&payload))
    }

    async fn isochrones(
        &self,
        request: &IsochroneRequest,
    ) -> Result<IsochroneResponse, DomainError> {
        tracing::debug!(
            "Isochrones: profile={}, center={}, ranges={:?}",
            request.profile,
            request.center,
            request.range_minutes
        );

        let ranges: Vec<u64> = request
            .range_minutes
            .iter()
            .map(|minutes| u64::from(*minutes) * 60)
            .collect();
        let body = json!({
            "locations": [request.center.lon_lat()],
            "range": ranges,
            "range_type": "time",
            "attributes": ["area"],
        });
        let payload = self
            .post(&format!("/v2/isochrones/{}", request.profile), body)
            .await?;
        Ok(parse_isochrones(&payload))
    }

    async fn matrix(&self, request: &MatrixRequest) -> Result<MatrixResponse, DomainError> {
        tracing::debug!(
            "Matrix: profile={}, locations={}",
            request.profile,
            request.locations.len()
        );

        let locations: Vec<[f64; 2]> = request.locations.iter().map(Coordinates::lon_lat).collect();
        let body = json!({
            "locations": locations,
            "metrics": ["duration", "distance"],
            "units": "m",
        });
        let payload = self
            .post(&format!("/v2/matrix/{}", request.profile), body)
            .await?;
        Ok(parse_matrix(&payload))
    }
}
