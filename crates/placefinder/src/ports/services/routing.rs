//! Routing Service Port
//!
//! Abstract interface for directions, geocoding, isochrones and
//! travel-time matrices.

use async_trait::async_trait;

use crate::domain::entities::{
    DirectionsResponse, GeocodeResponse, IsochroneResponse, MatrixResponse,
};
use crate::domain::errors::DomainError;
use crate::domain::value_objects::{Coordinates, DistanceUnit, RoutingProfile};

#[derive(Debug, Clone, PartialEq)]
pub struct DirectionsRequest {
    pub start: Coordinates,
    pub end: Coordinates,
    pub profile: RoutingProfile,
    /// Units the upstream reports in; responses are normalised regardless
    pub units: DistanceUnit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeRequest {
    pub text: String,
    pub size: u32,
    /// ISO 3166-1 alpha-2/3 country filter
    pub country: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IsochroneRequest {
    pub center: Coordinates,
    pub range_minutes: Vec<u32>,
    pub profile: RoutingProfile,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatrixRequest {
    pub locations: Vec<Coordinates>,
    pub profile: RoutingProfile,
}

/// Service interface for routing operations
#[async_trait]
pub trait RoutingService: Send + Sync {
    async fn directions(&self, request: &DirectionsRequest)
        -> Result<DirectionsResponse, DomainError>;

    async fn geocode(&self, request: &GeocodeRequest) -> Result<GeocodeResponse, DomainError>;

    async fn reverse_geocode(
        &self,
        at: Coordinates,
        size: u32,
    ) -> Result<GeocodeResponse, DomainError>;

    async fn isochrones(&self, request: &IsochroneRequest)
        -> Result<IsochroneResponse, DomainError>;

    /// Durations and distances between every pair of locations
    async fn matrix(&self, request: &MatrixRequest) -> Result<MatrixResponse, DomainError>;
}
