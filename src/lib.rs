//! Staged rocket flight dynamics: mass depletion, thrust composition,
//! momentum-conserving separation, and attitude evolution.
//!
//! The physics lives in the workspace member crates; this crate stitches
//! them together behind one facade and owns scenario assembly so multiple
//! front-ends (CLI, tests) share a single entry point.

pub use ascent_config as config;
pub use ascent_core::{constants, units, vector};
pub use ascent_export as export;
pub use ascent_flight as flight;
pub use ascent_vehicle as vehicle;

pub mod scenario;

/// Returns the version of the library for smoke tests.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
