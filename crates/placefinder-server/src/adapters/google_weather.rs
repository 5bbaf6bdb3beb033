//! Google Weather API client
//!
//! - GET /currentConditions:lookup
//! - GET /forecast/days:lookup
//!
//! Authenticates with the Places API key as a `key` query parameter.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use placefinder::{Coordinates, CurrentWeatherResponse, DomainError, ForecastResponse, WeatherService};

use super::formatters::weather::{parse_current_weather, parse_forecast};
use super::{http_client, read_json, request_failed};

const BASE_URL: &str = "https://weather.googleapis.com/v1";
const SERVICE: &str = "Google Weather";
const TIMEOUT: Duration = Duration::from_secs(10);
/// The API serves at most ten forecast days
pub const MAX_FORECAST_DAYS: u32 = 10;

pub struct GoogleWeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GoogleWeatherClient {
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

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn lookup(&self, path: &str, params: &[(&str, String)]) -> Result<Value, DomainError> {
        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .query(&[("key", self.api_key.as_str())])
            .query(params)
            .send()
            .await
            .map_err(|e| request_failed(SERVICE, e))?;

        read_json(response, SERVICE).await
    }
}

fn location_params(at: Coordinates) -> Vec<(&'static str, String)> {
    vec![
        ("location.latitude", at.latitude.to_string()),
        ("location.longitude", at.longitude.to_string()),
    ]
}

#[async_trait]
impl WeatherService for GoogleWeatherClient {
    async fn current_conditions(
        &self,
        at: Coordinates,
    ) -> Result<CurrentWeatherResponse, DomainError> {
        tracing::debug!("Current conditions: {}", at);
        let payload = self
            .lookup("/currentConditions:lookup", &location_params(at))
            .await?;
        Ok(parse_current_weather(&payload))
    }

    async fn daily_forecast(
        &self,
        at: Coordinates,
        days: u32,
    ) -> Result<ForecastResponse, DomainError> {
        let days = days.clamp(1, MAX_FORECAST_DAYS);
        tracing::debug!("Daily forecast: {}, days={}", at, days);

        let mut params = location_params(at);
        params.push(("days", days.to_string()));
        // The first page would otherwise stop at five days
        params.push(("pageSize", days.to_string()));

        let payload = self.lookup("/forecast/days:lookup", &params).await?;
        Ok(parse_forecast(&payload))
    }
}
