//! Weather Service Port

use async_trait::async_trait;

use crate::domain::entities::{CurrentWeatherResponse, ForecastResponse};
use crate::domain::errors::DomainError;
use crate::domain::value_objects::Coordinates;

/// Service interface for weather lookups
#[async_trait]
pub trait WeatherService: Send + Sync {
    async fn current_conditions(
        &self,
        at: Coordinates,
    ) -> Result<CurrentWeatherResponse, DomainError>;

    /// Daily forecast starting today
    async fn daily_forecast(
        &self,
        at: Coordinates,
        days: u32,
    ) -> Result<ForecastResponse, DomainError>;
}
