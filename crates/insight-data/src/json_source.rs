//! JSON series source.
//!
//! Accepts either a bare array of records or an object with the records
//! under `data`, the shape returned by most market data APIs. Timestamps are
//! epoch milliseconds under `timestamp` or `time`.

use async_trait::async_trait;
use insight_core::error::DataError;
use insight_core::traits::SeriesSource;
use insight_core::types::OhlcvPoint;
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::record::require;

#[derive(Debug, Deserialize)]
struct JsonRecord {
    #[serde(alias = "time")]
    timestamp: Option<i64>,
    open: Option<f64>,
    high: Option<f64>,
    low: Option<f64>,
    close: Option<f64>,
    volume: Option<f64>,
}

/// JSON file holding one symbol's history.
pub struct JsonSource {
    path: PathBuf,
    name: String,
}

impl JsonSource {
    pub fn new(path: &Path) -> Result<Self, DataError> {
        if !path.exists() {
            return Err(DataError::NoDataAvailable(path.display().to_string()));
        }
        Ok(Self {
            path: path.to_path_buf(),
            name: crate::source_name(path),
        })
    }
}

#[async_trait]
impl SeriesSource for JsonSource {
    async fn load_series(&self) -> Result<Vec<OhlcvPoint>, DataError> {
        let text = tokio::fs::read_to_string(&self.path).await?;
        parse_json(&text)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Parse a JSON document into points.
///
/// All six fields are required. Values are never coerced: a price given as
/// a string is a parse error.
pub fn parse_json(text: &str) -> Result<Vec<OhlcvPoint>, DataError> {
    let document: Value =
        serde_json::from_str(text).map_err(|e| DataError::ParseError(e.to_string()))?;

    let records = match document {
        Value::Array(_) => document,
        Value::Object(mut map) => map.remove("data").ok_or_else(|| {
            DataError::UnsupportedFormat("JSON object without a `data` array".into())
        })?,
        _ => {
            return Err(DataError::UnsupportedFormat(
                "expected a JSON array of records".into(),
            ))
        }
    };

    let records: Vec<JsonRecord> =
        serde_json::from_value(records).map_err(|e| DataError::ParseError(e.to_string()))?;

    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            Ok(OhlcvPoint::new(
                require(record.timestamp, index, "timestamp")?,
                require(record.open, index, "open")?,
                require(record.high, index, "high")?,
                require(record.low, index, "low")?,
                require(record.close, index, "close")?,
                require(record.volume, index, "volume")?,
            ))
        })
        .collect()
}
