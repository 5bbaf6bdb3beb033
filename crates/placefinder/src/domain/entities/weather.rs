//! Weather - Current conditions and daily forecasts

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    pub speed_value: Option<f64>,
    pub speed_unit: Option<String>,
    pub direction_cardinal: Option<String>,
    pub direction_degrees: Option<f64>,
    pub gust_value: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Precipitation {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub probability_percent: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Visibility {
    pub value: Option<f64>,
    pub unit: Option<String>,
}

/// CurrentWeatherResponse - Conditions at a single point right now
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeatherResponse {
    /// Human readable condition, e.g. "Partly cloudy"
    pub condition: Option<String>,
    pub condition_type: Option<String>,
    pub temperature_c: Option<f64>,
    pub feels_like_c: Option<f64>,
    pub humidity_percent: Option<f64>,
    pub dew_point_c: Option<f64>,
    pub cloud_cover_percent: Option<f64>,
    pub uv_index: Option<f64>,
    pub wind: Wind,
    pub precipitation: Precipitation,
    pub visibility: Visibility,
    pub pressure_mbar: Option<f64>,
    pub is_daytime: Option<bool>,
    pub timezone: Option<String>,
    pub observation_time: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastPrecipitation {
    pub probability_percent: Option<f64>,
    pub amount: Option<f64>,
    pub unit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    /// ISO date (YYYY-MM-DD)
    pub date: Option<String>,
    pub max_temperature_c: Option<f64>,
    pub min_temperature_c: Option<f64>,
    pub daytime_condition: Option<String>,
    pub nighttime_condition: Option<String>,
    pub humidity_percent: Option<f64>,
    pub uv_index: Option<f64>,
    pub precipitation: ForecastPrecipitation,
    pub wind: Wind,
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResponse {
    pub timezone: Option<String>,
    pub days: Vec<ForecastDay>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precipitation_kind_serializes_as_type() {
        let precipitation = Precipitation {
            kind: Some("RAIN".to_string()),
            probability_percent: Some(40.0),
        };
        let value = serde_json::to_value(&precipitation).unwrap();
        assert_eq!(value["type"], "RAIN");
        assert!(value.get("kind").is_none());
    }
}
