//! Service Ports
//!
//! Abstract interfaces for external services.

mod places;
mod preferences;
mod prompt_store;
mod routing;
mod weather;

pub use places::*;
pub use preferences::*;
pub use prompt_store::*;
pub use routing::*;
pub use weather::*;
