//! Weather tools

use std::sync::Arc;

use async_trait::async_trait;
use placefinder::WeatherService;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{coordinates, parse_arguments, to_output, ToolDef, ToolError, ToolHandler};

fn default_forecast_days() -> u32 {
    5
}

pub fn tools(service: Arc<dyn WeatherService>) -> Vec<ToolDef> {
    let point = json!({
        "latitude": { "type": "number" },
        "longitude": { "type": "number" }
    });
    let mut forecast_properties = point.clone();
    forecast_properties["forecast_days"] =
        json!({ "type": "integer", "minimum": 1, "maximum": 10, "default": 5 });

    vec![
        ToolDef::new(
            "get_current_weather",
            "Get Current Weather",
            "Get current weather conditions at a location: temperature, feels-like, \
             humidity, wind, precipitation and visibility.",
            json!({
                "type": "object",
                "properties": point,
                "required": ["latitude", "longitude"]
            }),
            CurrentWeather(service.clone()),
        )
        .with_tags(["weather", "current"]),
        ToolDef::new(
            "get_weather_forecast",
            "Get Weather Forecast",
            "Get a daily weather forecast (up to 10 days) with highs, lows, conditions, \
             precipitation chance, wind, sunrise and sunset.",
            json!({
                "type": "object",
                "properties": forecast_properties,
                "required": ["latitude", "longitude"]
            }),
            WeatherForecast(service),
        )
        .with_tags(["weather", "forecast"]),
    ]
}

#[derive(Debug, Deserialize)]
struct CurrentWeatherArgs {
    latitude: f64,
    longitude: f64,
}

struct CurrentWeather(Arc<dyn WeatherService>);

#[async_trait]
impl ToolHandler for CurrentWeather {
    async fn call(&self, arguments: Value) -> Result<Value, ToolError> {
        let args: CurrentWeatherArgs = parse_arguments(arguments)?;
        let at = coordinates(args.latitude, args.longitude)?;
        to_output(&self.0.current_conditions(at).await?)
    }
}

#[derive(Debug, Deserialize)]
struct ForecastArgs {
    latitude: f64,
    longitude: f64,
    #[serde(default = "default_forecast_days")]
    forecast_days: u32,
}

struct WeatherForecast(Arc<dyn WeatherService>);

#[async_trait]
impl ToolHandler for WeatherForecast {
    async fn call(&self, arguments: Value) -> Result<Value, ToolError> {
        let args: ForecastArgs = parse_arguments(arguments)?;
        if args.forecast_days == 0 {
            return Err(ToolError::InvalidArguments(
                "forecast_days must be at least 1".to_string(),
            ));
        }
        let at = coordinates(args.latitude, args.longitude)?;
        to_output(&self.0.daily_forecast(at, args.forecast_days).await?)
    }
}
