//! Google Weather API payloads
//!
//! Some fields moved between API revisions (`visibility.value` vs
//! `visibility.distance`, day-level vs `daytimeForecast` humidity), so
//! both shapes are read.

use serde_json::Value;

use placefinder::{
    CurrentWeatherResponse, ForecastDay, ForecastPrecipitation, ForecastResponse, Precipitation,
    Visibility, Wind,
};

use super::{array_at, at, f64_at, first_f64, first_str, str_at};

fn parse_wind(raw: Option<&Value>) -> Wind {
    let Some(raw) = raw else {
        return Wind::default();
    };
    Wind {
        speed_value: f64_at(raw, &["speed", "value"]),
        speed_unit: str_at(raw, &["speed", "unit"]),
        direction_cardinal: str_at(raw, &["direction", "cardinal"]),
        direction_degrees: f64_at(raw, &["direction", "degrees"]),
        gust_value: f64_at(raw, &["gust", "value"]),
    }
}

pub fn parse_current_weather(raw: &Value) -> CurrentWeatherResponse {
    CurrentWeatherResponse {
        condition: str_at(raw, &["weatherCondition", "description", "text"]),
        condition_type: str_at(raw, &["weatherCondition", "type"]),
        temperature_c: f64_at(raw, &["temperature", "degrees"]),
        feels_like_c: f64_at(raw, &["feelsLikeTemperature", "degrees"]),
        humidity_percent: f64_at(raw, &["relativeHumidity"]),
        dew_point_c: f64_at(raw, &["dewPoint", "degrees"]),
        cloud_cover_percent: f64_at(raw, &["cloudCover"]),
        uv_index: f64_at(raw, &["uvIndex"]),
        wind: parse_wind(at(raw, &["wind"])),
        precipitation: Precipitation {
            kind: first_str(
                raw,
                &[
                    &["precipitation", "probability", "type"],
                    &["precipitation", "type"],
                ],
            ),
            probability_percent: f64_at(raw, &["precipitation", "probability", "percent"]),
        },
        visibility: Visibility {
            value: first_f64(
                raw,
                &[&["visibility", "distance"], &["visibility", "value"]],
            ),
            unit: str_at(raw, &["visibility", "unit"]),
        },
        pressure_mbar: f64_at(raw, &["airPressure", "meanSeaLevelMillibars"]),
        is_daytime: at(raw, &["isDaytime"]).and_then(Value::as_bool),
        timezone: str_at(raw, &["timeZone", "id"]),
        observation_time: str_at(raw, &["currentTime"]),
    }
}

fn display_date(raw: &Value) -> Option<String> {
    let part = |key: &str| at(raw, &["displayDate", key]).and_then(Value::as_u64);
    Some(format!(
        "{:04}-{:02}-{:02}",
        part("year")?,
        part("month")?,
        part("day")?
    ))
}

fn parse_forecast_day(raw: &Value) -> ForecastDay {
    ForecastDay {
        date: display_date(raw),
        max_temperature_c: f64_at(raw, &["maxTemperature", "degrees"]),
        min_temperature_c: f64_at(raw, &["minTemperature", "degrees"]),
        daytime_condition: str_at(
            raw,
            &["daytimeForecast", "weatherCondition", "description", "text"],
        ),
        nighttime_condition: str_at(
            raw,
            &["nighttimeForecast", "weatherCondition", "description", "text"],
        ),
        humidity_percent: first_f64(
            raw,
            &[
                &["relativeHumidity"],
                &["daytimeForecast", "relativeHumidity"],
            ],
        ),
        uv_index: first_f64(raw, &[&["uvIndex"], &["daytimeForecast", "uvIndex"]]),
        precipitation: ForecastPrecipitation {
            probability_percent: first_f64(
                raw,
                &[
                    &["precipitation", "probability", "percent"],
                    &["daytimeForecast", "precipitation", "probability", "percent"],
                ],
            ),
            amount: first_f64(
                raw,
                &[
                    &["precipitation", "qpf", "quantity"],
                    &["precipitation", "qpf", "value"],
                    &["daytimeForecast", "precipitation", "qpf", "quantity"],
                ],
            ),
            unit: first_str(
                raw,
                &[
                    &["precipitation", "qpf", "unit"],
                    &["daytimeForecast", "precipitation", "qpf", "unit"],
                ],
            ),
        },
        wind: parse_wind(at(raw, &["wind"]).or_else(|| at(raw, &["daytimeForecast", "wind"]))),
        sunrise: first_str(
            raw,
            &[&["sunEvents", "sunriseTime"], &["sunEvents", "sunrise"]],
        ),
        sunset: first_str(raw, &[&["sunEvents", "sunsetTime"], &["sunEvents", "sunset"]]),
    }
}

pub fn parse_forecast(raw: &Value) -> ForecastResponse {
    ForecastResponse {
        timezone: str_at(raw, &["timeZone", "id"]),
        days: array_at(raw, &["forecastDays"])
            .iter()
            .map(parse_forecast_day)
            .collect(),
    }
}
