//! Routing tools: directions, geocoding, isochrones and travel matrices

use std::sync::Arc;

use async_trait::async_trait;
use placefinder::{
    Coordinates, DirectionsRequest, DistanceUnit, GeocodeRequest, IsochroneRequest,
    MatrixRequest, RoutingProfile, RoutingService,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::{
    coordinates, invalid, parse_arguments, required, to_output, ToolDef, ToolError, ToolHandler,
};

fn default_profile() -> String {
    RoutingProfile::default().as_str().to_string()
}

fn default_units() -> String {
    DistanceUnit::default().as_str().to_string()
}

fn default_max_results() -> u32 {
    5
}

fn default_range_minutes() -> Vec<u32> {
    vec![15]
}

fn profile(value: &str) -> Result<RoutingProfile, ToolError> {
    value.trim().parse().map_err(invalid)
}

fn profile_schema() -> Value {
    let profiles: Vec<&str> = RoutingProfile::ALL.iter().map(RoutingProfile::as_str).collect();
    json!({ "type": "string", "enum": profiles, "default": "driving-car" })
}

pub fn tools(service: Arc<dyn RoutingService>) -> Vec<ToolDef> {
    vec![
        ToolDef::new(
            "get_directions",
            "Get Directions",
            "Get turn-by-turn directions between two points. Distances are reported in \
             kilometres and durations in minutes.",
            json!({
                "type": "object",
                "properties": {
                    "start_longitude": { "type": "number" },
                    "start_latitude": { "type": "number" },
                    "end_longitude": { "type": "number" },
                    "end_latitude": { "type": "number" },
                    "profile": profile_schema(),
                    "units": { "type": "string", "enum": ["m", "km", "mi"], "default": "km" }
                },
                "required": ["start_longitude", "start_latitude", "end_longitude", "end_latitude"]
            }),
            Directions(service.clone()),
        )
        .with_tags(["routing", "directions"]),
        ToolDef::new(
            "geocode",
            "Geocode Address",
            "Convert an address or place name into coordinates.",
            json!({
                "type": "object",
                "properties": {
                    "address": { "type": "string" },
                    "max_results": { "type": "integer", "minimum": 1, "maximum": 20, "default": 5 },
                    "country": {
                        "type": "string",
                        "description": "Optional ISO 3166-1 country code filter",
                        "default": ""
                    }
                },
                "required": ["address"]
            }),
            Geocode(service.clone()),
        )
        .with_tags(["routing", "geocoding"]),
        ToolDef::new(
            "reverse_geocode",
            "Reverse Geocode",
            "Find the address or place names at a coordinate.",
            json!({
                "type": "object",
                "properties": {
                    "latitude": { "type": "number" },
                    "longitude": { "type": "number" },
                    "max_results": { "type": "integer", "minimum": 1, "maximum": 20, "default": 5 }
                },
                "required": ["latitude", "longitude"]
            }),
            ReverseGeocode(service.clone()),
        )
        .with_tags(["routing", "geocoding"]),
        ToolDef::new(
            "get_isochrones",
            "Get Isochrones",
            "Get the areas reachable from a point within the given travel times, e.g. \
             everything within a 15 minute walk.",
            json!({
                "type": "object",
                "properties": {
                    "longitude": { "type": "number" },
                    "latitude": { "type": "number" },
                    "range_minutes": {
                        "type": "array",
                        "items": { "type": "integer", "minimum": 1 },
                        "default": [15]
                    },
                    "profile": profile_schema()
                },
                "required": ["longitude", "latitude"]
            }),
            Isochrones(service.clone()),
        )
        .with_tags(["routing", "isochrones"]),
        ToolDef::new(
            "get_travel_matrix",
            "Get Travel Matrix",
            "Get travel times (minutes) and distances (km) between every pair of locations.",
            json!({
                "type": "object",
                "properties": {
                    "locations": {
                        "type": "array",
                        "description": "[longitude, latitude] pairs",
                        "items": {
                            "type": "array",
                            "items": { "type": "number" },
                            "minItems": 2,
                            "maxItems": 2
                        },
                        "minItems": 2
                    },
                    "profile": profile_schema()
                },
                "required": ["locations"]
            }),
            TravelMatrix(service),
        )
        .with_tags(["routing", "matrix"]),
    ]
}

#[derive(Debug, Deserialize)]
struct DirectionsArgs {
    start_longitude: f64,
    start_latitude: f64,
    end_longitude: f64,
    end_latitude: f64,
    #[serde(default = "default_profile")]
    profile: String,
    #[serde(default = "default_units")]
    units: String,
}

struct Directions(Arc<dyn RoutingService>);

#[async_trait]
impl ToolHandler for Directions {
    async fn call(&self, arguments: Value) -> Result<Value, ToolError> {
        let args: DirectionsArgs = parse_arguments(arguments)?;
        let request = DirectionsRequest {
            start: coordinates(args.start_latitude, args.start_longitude)?,
            end: coordinates(args.end_latitude, args.end_longitude)?,
            profile: profile(&args.profile)?,
            units: args.units.trim().parse().map_err(invalid)?,
        };
        to_output(&self.0.directions(&request).await?)
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeArgs {
    address: String,
    #[serde(default = "default_max_results")]
    max_results: u32,
    #[serde(default)]
    country: String,
}

struct Geocode(Arc<dyn RoutingService>);

#[async_trait]
impl ToolHandler for Geocode {
    async fn call(&self, arguments: Value) -> Result<Value, ToolError> {
        let args: GeocodeArgs = parse_arguments(arguments)?;
        let country = args.country.trim();
        let request = GeocodeRequest {
            text: required("address", &args.address)?.to_string(),
            size: args.max_results,
            country: (!country.is_empty()).then(|| country.to_string()),
        };
        to_output(&self.0.geocode(&request).await?)
    }
}

#[derive(Debug, Deserialize)]
struct ReverseGeocodeArgs {
    latitude: f64,
    longitude: f64,
    #[serde(default = "default_max_results")]
    max_results: u32,
}

struct ReverseGeocode(Arc<dyn RoutingService>);

#[async_trait]
impl ToolHandler for ReverseGeocode {
    async fn call(&self, arguments: Value) -> Result<Value, ToolError> {
        let args: ReverseGeocodeArgs = parse_arguments(arguments)?;
        let at = coordinates(args.latitude, args.longitude)?;
        to_output(&self.0.reverse_geocode(at, args.max_results).await?)
    }
}

#[derive(Debug, Deserialize)]
struct IsochroneArgs {
    longitude: f64,
    latitude: f64,
    #[serde(default = "default_range_minutes")]
    range_minutes: Vec<u32>,
    #[serde(default = "default_profile")]
    profile: String,
}

struct Isochrones(Arc<dyn RoutingService>);

#[async_trait]
impl ToolHandler for Isochrones {
    async fn call(&self, arguments: Value) -> Result<Value, ToolError> {
        let args: IsochroneArgs = parse_arguments(arguments)?;
        if args.range_minutes.is_empty() || args.range_minutes.contains(&0) {
            return Err(ToolError::InvalidArguments(
                "range_minutes must list at least one positive duration".to_string(),
            ));
        }
        let request = IsochroneRequest {
            center: coordinates(args.latitude, args.longitude)?,
            range_minutes: args.range_minutes,
            profile: profile(&args.profile)?,
        };
        to_output(&self.0.isochrones(&request).await?)
    }
}

#[derive(Debug, Deserialize)]
struct MatrixArgs {
    locations: Vec<[f64; 2]>,
    #[serde(default = "default_profile")]
    profile: String,
}

struct TravelMatrix(Arc<dyn RoutingService>);

#[async_trait]
impl ToolHandler for TravelMatrix {
    async fn call(&self, arguments: Value) -> Result<Value, ToolError> {
        let args: MatrixArgs = parse_arguments(arguments)?;
        if args.locations.len() < 2 {
            return Err(ToolError::InvalidArguments(
                "locations must contain at least two [longitude, latitude] pairs".to_string(),
            ));
        }
        let locations = args
            .locations
            .iter()
            .map(|[longitude, latitude]| coordinates(*latitude, *longitude))
            .collect::<Result<Vec<Coordinates>, _>>()?;

        let request = MatrixRequest {
            locations,
            profile: profile(&args.profile)?,
        };
        to_output(&self.0.matrix(&request).await?)
    }
}
