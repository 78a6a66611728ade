//! Core traits shared across the workspace.

mod indicator;
mod series_source;

pub use indicator::{Indicator, MultiOutputIndicator, OhlcvIndicator};
pub use series_source::SeriesSource;
