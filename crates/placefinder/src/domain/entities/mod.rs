//! Domain Entities
//!
//! Pure domain models without infrastructure dependencies.
//! - Place: Points of interest returned by place search
//! - Weather: Current conditions and daily forecasts
//! - Route: Directions, geocoding, isochrones and travel matrices
//! - Preference: Long-term user preference records
//! - Prompt: Managed prompt definitions

mod place;
mod preference;
mod prompt;
mod route;
mod weather;

pub use place::*;
pub use preference::*;
pub use prompt::*;
pub use route::*;
pub use weather::*;
