//! Route - Directions, geocoding, isochrones and travel matrices
//!
//! Distances and durations are always normalised: routes carry kilometres
//! and minutes, individual steps carry metres and seconds.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteStep {
    pub instruction: Option<String>,
    pub distance_m: Option<f64>,
    pub duration_s: Option<f64>,
}

/// A leg between two consecutive waypoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSegment {
    pub distance_km: Option<f64>,
    pub duration_min: Option<f64>,
    #[serde(default)]
    pub steps: Vec<RouteStep>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub distance_km: Option<f64>,
    pub duration_min: Option<f64>,
    #[serde(default)]
    pub segments: Vec<RouteSegment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectionsResponse {
    pub count: usize,
    pub routes: Vec<Route>,
}

impl DirectionsResponse {
    pub fn new(routes: Vec<Route>) -> Self {
        Self {
            count: routes.len(),
            routes,
        }
    }
}

/// GeocodedLocation - A forward or reverse geocoding match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodedLocation {
    pub name: Option<String>,
    /// Full formatted label
    pub label: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub locality: Option<String>,
    pub county: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
    /// Match confidence (0-1)
    pub confidence: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeResponse {
    pub count: usize,
    pub results: Vec<GeocodedLocation>,
}

impl GeocodeResponse {
    pub fn new(results: Vec<GeocodedLocation>) -> Self {
        Self {
            count: results.len(),
            results,
        }
    }
}

/// Isochrone - Area reachable within a travel time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Isochrone {
    /// Travel time limit in minutes
    pub range_value: Option<f64>,
    pub center_latitude: Option<f64>,
    pub center_longitude: Option<f64>,
    pub area_km2: Option<f64>,
    pub group_index: Option<u64>,
    /// Number of points on the polygon boundary
    pub boundary_points: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IsochroneResponse {
    pub count: usize,
    pub isochrones: Vec<Isochrone>,
}

impl IsochroneResponse {
    pub fn new(isochrones: Vec<Isochrone>) -> Self {
        Self {
            count: isochrones.len(),
            isochrones,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixLocation {
    pub label: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// MatrixResponse - Travel times and distances between every pair
///
/// `None` cells mark unreachable pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixResponse {
    pub sources: Vec<MatrixLocation>,
    pub destinations: Vec<MatrixLocation>,
    pub durations_min: Vec<Vec<Option<f64>>>,
    pub distances_km: Vec<Vec<Option<f64>>>,
}
