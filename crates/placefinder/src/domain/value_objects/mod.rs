//! Value Objects
//!
//! Immutable objects defined by their attributes rather than identity.

mod coordinates;
mod distance_unit;
mod routing_profile;

pub use coordinates::*;
pub use distance_unit::*;
pub use routing_profile::*;
