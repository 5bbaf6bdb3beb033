//! OpenRouteService payloads
//!
//! Directions are reported in the requested units and seconds; everything
//! is normalised to km and minutes for routes, metres and seconds for steps.

use serde_json::Value;

use placefinder::{
    DirectionsResponse, DistanceUnit, GeocodeResponse, GeocodedLocation, Isochrone,
    IsochroneResponse, MatrixLocation, MatrixResponse, Route, RouteSegment, RouteStep,
};

use super::{array_at, f64_at, lon_lat, str_at, u64_at};

const SECONDS_PER_MINUTE: f64 = 60.0;
const SQUARE_METRES_PER_KM2: f64 = 1_000_000.0;

fn parse_step(raw: &Value, km_factor: f64) -> RouteStep {
    RouteStep {
        instruction: str_at(raw, &["instruction"]),
        distance_m: f64_at(raw, &["distance"]).map(|d| d * km_factor * 1000.0),
        duration_s: f64_at(raw, &["duration"]),
    }
}

fn parse_segment(raw: &Value, km_factor: f64) -> RouteSegment {
    RouteSegment {
        distance_km: f64_at(raw, &["distance"]).map(|d| d * km_factor),
        duration_min: f64_at(raw, &["duration"]).map(|d| d / SECONDS_PER_MINUTE),
        steps: array_at(raw, &["steps"])
            .iter()
            .map(|step| parse_step(step, km_factor))
            .collect(),
    }
}

pub fn parse_directions(raw: &Value, units: DistanceUnit) -> DirectionsResponse {
    let km_factor = units.to_km_factor();
    let routes = array_at(raw, &["routes"])
        .iter()
        .map(|route| Route {
            // ORS omits zero distances/durations from the summary
            distance_km: Some(f64_at(route, &["summary", "distance"]).unwrap_or(0.0) * km_factor),
            duration_min: Some(
                f64_at(route, &["summary", "duration"]).unwrap_or(0.0) / SECONDS_PER_MINUTE,
            ),
            segments: array_at(route, &["segments"])
                .iter()
                .map(|segment| parse_segment(segment, km_factor))
                .collect(),
        })
        .collect();
    DirectionsResponse::new(routes)
}

/// Forward and reverse geocoding share the GeoJSON feature shape
pub fn parse_geocode(raw: &Value) -> GeocodeResponse {
    let results = array_at(raw, &["features"])
        .iter()
        .map(|feature| {
            let (longitude, latitude) =
                lon_lat(feature.get("geometry").and_then(|g| g.get("coordinates")));
            let prop = |key: &str| str_at(feature, &["properties", key]);
            GeocodedLocation {
                name: prop("name"),
                label: prop("label"),
                latitude,
                longitude,
                locality: prop("locality"),
                county: prop("county"),
                region: prop("region"),
                country: prop("country"),
                confidence: f64_at(feature, &["properties", "confidence"]),
            }
        })
        .collect();
    GeocodeResponse::new(results)
}

/// Isochrones requested as time ranges in seconds with the area attribute
pub fn parse_isochrones(raw: &Value) -> IsochroneResponse {
    let isochrones = array_at(raw, &["features"])
        .iter()
        .map(|feature| {
            let (center_longitude, center_latitude) =
                lon_lat(feature.get("properties").and_then(|p| p.get("center")));
            let outer_ring = array_at(feature, &["geometry", "coordinates"])
                .first()
                .and_then(Value::as_array)
                .map(Vec::len)
                .unwrap_or(0);
            Isochrone {
                range_value: f64_at(feature, &["properties", "value"])
                    .map(|secs| secs / SECONDS_PER_MINUTE),
                center_latitude,
                center_longitude,
                area_km2: f64_at(feature, &["properties", "area"])
                    .map(|m2| m2 / SQUARE_METRES_PER_KM2),
                group_index: u64_at(feature, &["properties", "group_index"]),
                boundary_points: outer_ring,
            }
        })
        .collect();
    IsochroneResponse::new(isochrones)
}

fn parse_matrix_locations(raw: &Value, key: &str) -> Vec<MatrixLocation> {
    array_at(raw, &[key])
        .iter()
        .enumerate()
        .map(|(i, location)| {
            let (longitude, latitude) = lon_lat(location.get("location"));
            MatrixLocation {
                label: str_at(location, &["name"]).or_else(|| Some(format!("Point {}", i + 1))),
                latitude,
                longitude,
            }
        })
        .collect()
}

/// Rows of optional cells, scaled; `null` marks an unreachable pair
fn parse_grid(raw: &Value, key: &str, divisor: f64) -> Vec<Vec<Option<f64>>> {
    array_at(raw, &[key])
        .iter()
        .map(|row| {
            row.as_array()
                .map(|cells| {
                    cells
                        .iter()
                        .map(|cell| cell.as_f64().map(|v| v / divisor))
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default()
        })
        .collect()
}

/// Matrix requested with durations in seconds and distances in metres
pub fn parse_matrix(raw: &Value) -> MatrixResponse {
    MatrixResponse {
        sources: parse_matrix_locations(raw, "sources"),
        destinations: parse_matrix_locations(raw, "destinations"),
        durations_min: parse_grid(raw, "durations", SECONDS_PER_MINUTE),
        distances_km: parse_grid(raw, "distances", 1000.0),
    }
}
