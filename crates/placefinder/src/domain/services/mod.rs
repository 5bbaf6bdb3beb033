//! Domain Services
//!
//! Pure functions over domain data, free of I/O.

mod fingerprint;

pub use fingerprint::*;
