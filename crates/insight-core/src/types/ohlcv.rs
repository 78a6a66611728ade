//! OHLCV (Open, High, Low, Close, Volume) data types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One sampled trading period.
/// Uses f64 for fast indicator calculations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OhlcvPoint {
    /// Unix timestamp in milliseconds
    pub timestamp: i64,
    /// Opening price
    pub open: f64,
    /// Highest price
    pub high: f64,
    /// Lowest price
    pub low: f64,
    /// Closing price
    pub close: f64,
    /// Trading volume
    pub volume: f64,
}

impl OhlcvPoint {
    /// Create a new point.
    pub fn new(timestamp: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Get the timestamp as a DateTime, if it is representable.
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }
}

/// Column extraction over an ordered OHLCV series.
///
/// Series are plain slices ordered oldest to newest; this trait gives them
/// the accessors indicator code needs.
pub trait SeriesExt {
    /// Extract close prices.
    fn closes(&self) -> Vec<f64>;

    /// Extract high prices.
    fn highs(&self) -> Vec<f64>;

    /// Extract low prices.
    fn lows(&self) -> Vec<f64>;

    /// Check that timestamps strictly increase.
    fn is_time_ordered(&self) -> bool;
}

impl SeriesExt for [OhlcvPoint] {
    fn closes(&self) -> Vec<f64> {
        self.iter().map(|p| p.close).collect()
    }

    fn highs(&self) -> Vec<f64> {
        self.iter().map(|p| p.high).collect()
    }

    fn lows(&self) -> Vec<f64> {
        self.iter().map(|p| p.low).collect()
    }

    fn is_time_ordered(&self) -> bool {
        self.windows(2).all(|w| w[0].timestamp < w[1].timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<OhlcvPoint> {
        vec![
            OhlcvPoint::new(1, 100.0, 101.0, 99.0, 100.5, 1000.0),
            OhlcvPoint::new(2, 100.5, 102.0, 100.0, 101.5, 2000.0),
        ]
    }

    #[test]
    fn test_point_datetime() {
        let point = OhlcvPoint::new(1_705_312_800_000, 1.0, 1.0, 1.0, 1.0, 0.0);
        let dt = point.datetime().unwrap();
        assert_eq!(dt.timestamp(), 1_705_312_800);
    }

    #[test]
    fn test_series_extractions() {
        let series = sample();

        assert_eq!(series.closes(), vec![100.5, 101.5]);
        assert_eq!(series.highs(), vec![101.0, 102.0]);
        assert_eq!(series.lows(), vec![99.0, 100.0]);
    }

    #[test]
    fn test_time_ordering() {
        let mut series = sample();
        assert!(series.is_time_ordered());

        series[1].timestamp = 1;
        assert!(!series.is_time_ordered());

        let empty: Vec<OhlcvPoint> = vec![];
        assert!(empty.is_time_ordered());
    }
}
