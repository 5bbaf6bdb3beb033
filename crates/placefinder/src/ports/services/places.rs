//! Places Service Port
//!
//! Abstract interface for point-of-interest search.

use async_trait::async_trait;

use crate::domain::entities::Place;
use crate::domain::errors::DomainError;
use crate::domain::value_objects::Coordinates;

/// Soft preference for results near a point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationBias {
    pub center: Coordinates,
    pub radius_meters: f64,
}

/// Hard restriction to a circle around a point
#[derive(Debug, Clone, PartialEq)]
pub struct NearbySearch {
    pub center: Coordinates,
    pub radius_meters: f64,
    /// Upstream place type filter, e.g. "restaurant"
    pub place_type: Option<String>,
    pub max_results: u32,
}

/// Service interface for place search
#[async_trait]
pub trait PlacesService: Send + Sync {
    /// Free text search, e.g. "ramen in Shibuya"
    async fn search_text(
        &self,
        query: &str,
        bias: Option<LocationBias>,
        max_results: u32,
    ) -> Result<Vec<Place>, DomainError>;

    async fn search_nearby(&self, search: &NearbySearch) -> Result<Vec<Place>, DomainError>;

    /// Full details for one place
    async fn place_details(&self, place_id: &str) -> Result<Place, DomainError>;
}
