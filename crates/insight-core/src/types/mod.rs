//! Core data types.

mod ohlcv;

pub use ohlcv::{OhlcvPoint, SeriesExt};
