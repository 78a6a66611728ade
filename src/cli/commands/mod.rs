//! CLI command implementations.

pub mod analyze;
pub mod params;
pub mod validate;
