//! OHLCV series loaders.
//!
//! Each source reads one symbol's history from a file. [`load_series`] picks
//! the source by file extension and prepares the result for the engine.

mod csv_source;
mod json_source;
mod record;

pub use csv_source::{parse_csv, CsvSource};
pub use json_source::{parse_json, JsonSource};

use insight_core::error::DataError;
use insight_core::traits::SeriesSource;
use insight_core::types::OhlcvPoint;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// Post-load handling of a series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    /// Sort points by ascending timestamp after loading
    pub sort_by_timestamp: bool,
    /// Warn when a series has fewer points than this
    pub min_data_points: usize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            sort_by_timestamp: true,
            min_data_points: 20,
        }
    }
}

/// Sort (if enabled) and sanity-check a freshly loaded series.
///
/// A short series is still returned; the engine degrades the windowed
/// indicators itself.
pub fn prepare_series(mut points: Vec<OhlcvPoint>, options: &LoadOptions) -> Vec<OhlcvPoint> {
    if options.sort_by_timestamp {
        points.sort_by_key(|p| p.timestamp);
    }

    if points.len() < options.min_data_points {
        warn!(
            points = points.len(),
            minimum = options.min_data_points,
            "Series is shorter than the configured minimum"
        );
    }

    points
}

/// Pick a source for `path` by its extension.
pub fn open_source(path: &Path) -> Result<Box<dyn SeriesSource>, DataError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("csv") => Ok(Box::new(CsvSource::new(path)?)),
        Some("json") => Ok(Box::new(JsonSource::new(path)?)),
        _ => Err(DataError::UnsupportedFormat(path.display().to_string())),
    }
}

/// Load and prepare the series stored at `path`.
pub async fn load_series(path: &Path, options: &LoadOptions) -> Result<Vec<OhlcvPoint>, DataError> {
    let source = open_source(path)?;
    let points = source.load_series().await?;

    if points.is_empty() {
        return Err(DataError::NoDataAvailable(path.display().to_string()));
    }

    info!(source = source.name(), points = points.len(), "Loaded series");
    Ok(prepare_series(points, options))
}

/// Symbol-like name for a file: its stem, or the whole path.
pub fn source_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn point(timestamp: i64, close: f64) -> OhlcvPoint {
        OhlcvPoint::new(timestamp, close, close, close, close, 1.0)
    }

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("insight-data-{}-{name}", std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_prepare_sorts_by_timestamp() {
        let points = vec![point(3, 3.0), point(1, 1.0), point(2, 2.0)];
        let prepared = prepare_series(points, &LoadOptions::default());

        let closes: Vec<f64> = prepared.iter().map(|p| p.close).collect();
        assert_eq!(closes, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_prepare_without_sorting_keeps_order() {
        let options = LoadOptions {
            sort_by_timestamp: false,
            ..Default::default()
        };
        let prepared = prepare_series(vec![point(2, 2.0), point(1, 1.0)], &options);
        assert_eq!(prepared[0].timestamp, 2);
    }

    #[test]
    fn test_open_source_rejects_unknown_extension() {
        assert!(matches!(
            open_source(Path::new("prices.parquet")),
            Err(DataError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            open_source(Path::new("prices")),
            Err(DataError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_source_name() {
        assert_eq!(source_name(Path::new("/data/BTC.csv")), "BTC");
    }

    #[tokio::test]
    async fn test_load_csv_file_sorted() {
        let path = temp_file(
            "ETH.csv",
            "date,open,high,low,close,volume\n2024-01-02,2,3,1,2.5,10\n2024-01-01,1,2,0.5,1.5,10\n",
        );

        let points = load_series(&path, &LoadOptions::default()).await.unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(points.len(), 2);
        assert_eq!(points[0].close, 1.5);
    }

    #[tokio::test]
    async fn test_load_json_file() {
        let path = temp_file(
            "SOL.json",
            r#"{"data": [{"time": 1700000000000, "open": 1, "high": 2, "low": 0.5, "close": 1.5, "volume": 3}]}"#,
        );

        let source = open_source(&path).unwrap();
        assert!(source.name().ends_with("SOL"));
        let points = source.load_series().await.unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(points.len(), 1);
    }

    #[tokio::test]
    async fn test_load_empty_file_is_no_data() {
        let path = temp_file("EMPTY.json", "[]");

        let result = load_series(&path, &LoadOptions::default()).await;
        std::fs::remove_file(&path).ok();

        assert!(matches!(result, Err(DataError::NoDataAvailable(_))));
    }
}
