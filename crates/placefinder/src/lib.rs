//! Place Finder Domain Library
//!
//! Core domain types and interfaces for the Place Finder tool server.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain/`): Pure business entities and logic
//!   - `entities/`: Tool output schemas (places, weather, routes, preferences)
//!     and prompt definitions
//!   - `value_objects/`: Immutable value types (Coordinates, RoutingProfile)
//!   - `services/`: Pure domain services (content fingerprints)
//!   - `errors/`: Domain-specific error types
//!
//! - **Prompts** (`prompts/`): The local prompt registry, source of truth for
//!   every managed prompt
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits) for the external
//!   services each tool wraps
//!
//! # Usage
//!
//! ```rust,ignore
//! use placefinder::{PromptRegistry, PlacesService, Coordinates};
//! ```

pub mod domain;
pub mod ports;
pub mod prompts;

// Re-export commonly used types
pub use domain::{
    content_fingerprint, extract_variables, short_fingerprint, substitute_variables,
    Coordinates, CurrentWeatherResponse, DeletePreferenceResponse, DirectionsResponse,
    DistanceUnit, DomainError, ForecastDay, ForecastPrecipitation, ForecastResponse,
    GeocodeResponse, GeocodedLocation, Isochrone, IsochroneResponse, Location, MatrixLocation,
    MatrixResponse, ModelParameters, Place, PlaceSearchResponse, Precipitation,
    PreferenceListResponse, PreferenceRecord, PromptDefinition, Route, RouteSegment, RouteStep,
    RoutingProfile, StorePreferenceResponse, Visibility, Wind,
};
pub use ports::{
    DeleteOutcome,
    DirectionsRequest,
    GeocodeRequest,
    IsochroneRequest,
    LocationBias,
    MatrixRequest,
    NearbySearch,
    // Services
    PlacesService,
    PreferenceStore,
    PromptStore,
    RemotePrompt,
    RoutingService,
    StoredPreference,
    VersionPage,
    WeatherService,
};
pub use prompts::PromptRegistry;
