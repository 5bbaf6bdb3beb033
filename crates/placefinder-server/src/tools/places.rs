//! Place search tools

use std::sync::Arc;

use async_trait::async_trait;
use placefinder::{Coordinates, LocationBias, NearbySearch, PlaceSearchResponse, PlacesService};
use serde::Deserialize;
use serde_json::{json, Value};

use super::{
    coordinates, invalid, parse_arguments, required, to_output, ToolDef, ToolError, ToolHandler,
};

/// Radius of the soft bias applied when `search_places` gets a location
const LOCATION_BIAS_RADIUS_M: f64 = 5000.0;

fn default_max_results() -> u32 {
    5
}

fn default_radius() -> f64 {
    1000.0
}

pub fn tools(service: Arc<dyn PlacesService>) -> Vec<ToolDef> {
    vec![
        ToolDef::new(
            "search_places",
            "Search Places",
            "Search for places by free text, e.g. \"ramen in Shibuya\" or \"museums near the \
             Louvre\". Optionally bias results toward a \"latitude,longitude\" location.",
            json!({
                "type": "object",
                "properties": {
                    "query": { "type": "string", "description": "Free text search query" },
                    "location": {
                        "type": "string",
                        "description": "Optional \"latitude,longitude\" to bias results toward",
                        "default": ""
                    },
                    "max_results": { "type": "integer", "minimum": 1, "maximum": 20, "default": 5 }
                },
                "required": ["query"]
            }),
            SearchPlaces(service.clone()),
        )
        .with_tags(["places", "search"]),
        ToolDef::new(
            "search_nearby_places",
            "Search Nearby Places",
            "Find places within a radius of a point, optionally filtered by place type \
             (e.g. \"restaurant\", \"tourist_attraction\").",
            json!({
                "type": "object",
                "properties": {
                    "latitude": { "type": "number" },
                    "longitude": { "type": "number" },
                    "radius_meters": { "type": "number", "default": 1000 },
                    "place_type": { "type": "string", "default": "" },
                    "max_results": { "type": "integer", "minimum": 1, "maximum": 20, "default": 5 }
                },
                "required": ["latitude", "longitude"]
            }),
            SearchNearby(service.clone()),
        )
        .with_tags(["places", "search", "nearby"]),
        ToolDef::new(
            "get_place_details",
            "Get Place Details",
            "Get full details for a place: address, rating, phone, website, opening hours \
             and summary.",
            json!({
                "type": "object",
                "properties": {
                    "place_id": { "type": "string", "description": "Place ID from a search result" }
                },
                "required": ["place_id"]
            }),
            PlaceDetails(service),
        )
        .with_tags(["places", "details"]),
    ]
}

#[derive(Debug, Deserialize)]
struct SearchPlacesArgs {
    query: String,
    #[serde(default)]
    location: String,
    #[serde(default = "default_max_results")]
    max_results: u32,
}

/// Parse an optional `"lat,lng"` bias; blank means no bias
fn location_bias(location: &str) -> Result<Option<LocationBias>, ToolError> {
    let location = location.trim();
    if location.is_empty() {
        return Ok(None);
    }
    let center: Coordinates = location.parse().map_err(invalid)?;
    Ok(Some(LocationBias {
        center,
        radius_meters: LOCATION_BIAS_RADIUS_M,
    }))
}

struct SearchPlaces(Arc<dyn PlacesService>);

#[async_trait]
impl ToolHandler for SearchPlaces {
    async fn call(&self, arguments: Value) -> Result<Value, ToolError> {
        let args: SearchPlacesArgs = parse_arguments(arguments)?;
        let query = required("query", &args.query)?;
        let bias = location_bias(&args.location)?;

        let places = self.0.search_text(query, bias, args.max_results).await?;
        to_output(&PlaceSearchResponse::new(places))
    }
}

#[derive(Debug, Deserialize)]
struct SearchNearbyArgs {
    latitude: f64,
    longitude: f64,
    #[serde(default = "default_radius")]
    radius_meters: f64,
    #[serde(default)]
    place_type: String,
    #[serde(default = "default_max_results")]
    max_results: u32,
}

struct SearchNearby(Arc<dyn PlacesService>);

#[async_trait]
impl ToolHandler for SearchNearby {
    async fn call(&self, arguments: Value) -> Result<Value, ToolError> {
        let args: SearchNearbyArgs = parse_arguments(arguments)?;
        if args.radius_meters <= 0.0 {
            return Err(ToolError::InvalidArguments(
                "radius_meters must be positive".to_string(),
            ));
        }

        let place_type = args.place_type.trim();
        let search = NearbySearch {
            center: coordinates(args.latitude, args.longitude)?,
            radius_meters: args.radius_meters,
            place_type: (!place_type.is_empty()).then(|| place_type.to_string()),
            max_results: args.max_results,
        };

        let places = self.0.search_nearby(&search).await?;
        to_output(&PlaceSearchResponse::new(places))
    }
}

#[derive(Debug, Deserialize)]
struct PlaceDetailsArgs {
    place_id: String,
}

struct PlaceDetails(Arc<dyn PlacesService>);

#[async_trait]
impl ToolHandler for PlaceDetails {
    async fn call(&self, arguments: Value) -> Result<Value, ToolError> {
        let args: PlaceDetailsArgs = parse_arguments(arguments)?;
        let place = self.0.place_details(required("place_id", &args.place_id)?).await?;
        to_output(&place)
    }
}
