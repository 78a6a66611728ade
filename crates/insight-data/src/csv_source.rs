//! CSV series source.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use csv::ReaderBuilder;
use insight_core::error::DataError;
use insight_core::traits::SeriesSource;
use insight_core::types::OhlcvPoint;
use serde::Deserialize;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::record::require;

/// CSV record format.
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(
        alias = "Date",
        alias = "timestamp",
        alias = "Timestamp",
        alias = "time"
    )]
    date: Option<String>,
    #[serde(alias = "Open")]
    open: Option<f64>,
    #[serde(alias = "High")]
    high: Option<f64>,
    #[serde(alias = "Low")]
    low: Option<f64>,
    #[serde(alias = "Close", alias = "Adj Close")]
    close: Option<f64>,
    #[serde(alias = "Volume", default)]
    volume: Option<f64>,
}

/// CSV file holding one symbol's history.
pub struct CsvSource {
    path: PathBuf,
    name: String,
}

impl CsvSource {
    /// Create a new CSV source.
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
impl SeriesSource for CsvSource {
    async fn load_series(&self) -> Result<Vec<OhlcvPoint>, DataError> {
        let bytes = tokio::fs::read(&self.path).await?;
        parse_csv(bytes.as_slice())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Parse CSV rows into points.
///
/// Volume defaults to 0 when the column is absent; every other field is
/// required.
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<OhlcvPoint>, DataError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut points = Vec::new();

    for (index, result) in reader.deserialize().enumerate() {
        let record: CsvRecord = result.map_err(|e| DataError::ParseError(e.to_string()))?;

        let date = require(record.date, index, "timestamp")?;
        points.push(OhlcvPoint::new(
            parse_timestamp(&date)?,
            require(record.open, index, "open")?,
            require(record.high, index, "high")?,
            require(record.low, index, "low")?,
            require(record.close, index, "close")?,
            record.volume.unwrap_or(0.0),
        ));
    }

    Ok(points)
}

/// Parse various timestamp formats into epoch milliseconds.
fn parse_timestamp(date_str: &str) -> Result<i64, DataError> {
    let formats = [
        "%Y-%m-%d",
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d",
        "%m/%d/%Y",
        "%d-%m-%Y",
    ];

    for format in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(date_str, format) {
            return Ok(dt.and_utc().timestamp_millis());
        }
        if let Ok(d) = NaiveDate::parse_from_str(date_str, format) {
            return Ok(d.and_time(NaiveTime::MIN).and_utc().timestamp_millis());
        }
    }

    // Unix timestamp; assume milliseconds if > 10 digits
    if let Ok(ts) = date_str.parse::<i64>() {
        if ts > 10_000_000_000 {
            return Ok(ts);
        }
        return ts.checked_mul(1000).ok_or_else(|| {
            DataError::ParseError(format!("Timestamp out of range: {date_str}"))
        });
    }

    Err(DataError::ParseError(format!(
        "Could not parse date: {date_str}"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timestamp() {
        assert_eq!(parse_timestamp("2024-01-15").unwrap(), 1_705_276_800_000);
        assert!(parse_timestamp("2024-01-15 10:30:00").is_ok());
        assert!(parse_timestamp("01/15/2024").is_ok());
        assert_eq!(parse_timestamp("1705312800000").unwrap(), 1_705_312_800_000); // Unix ms
        assert_eq!(parse_timestamp("1705312800").unwrap(), 1_705_312_800_000); // Unix sec
        assert!(parse_timestamp("yesterday").is_err());
    }

    #[test]
    fn test_parse_csv_with_aliases() {
        let data = "\
Date,Open,High,Low,Adj Close,Volume
2024-01-01,100,105,99,104,1200
2024-01-02,104,106,101,102,900
";
        let points = parse_csv(data.as_bytes()).unwrap();

        assert_eq!(points.len(), 2);
        assert_eq!(points[0].close, 104.0);
        assert_eq!(points[1].volume, 900.0);
        assert!(points[0].timestamp < points[1].timestamp);
    }

    #[test]
    fn test_parse_csv_volume_optional() {
        let data = "timestamp,open,high,low,close\n1705312800000,1,2,0.5,1.5\n";
        let points = parse_csv(data.as_bytes()).unwrap();

        assert_eq!(points[0].volume, 0.0);
        assert_eq!(points[0].timestamp, 1_705_312_800_000);
    }

    #[test]
    fn test_parse_csv_missing_field() {
        let data = "date,open,high,low,close\n2024-01-01,1,2,0.5,1.5\n2024-01-02,1,2,,1.5\n";
        let err = parse_csv(data.as_bytes()).unwrap_err();

        assert!(matches!(
            err,
            DataError::Validation {
                index: 1,
                field: "low"
            }
        ));
    }

    #[test]
    fn test_parse_csv_rejects_non_numeric() {
        let data = "date,open,high,low,close\n2024-01-01,1,2,abc,1.5\n";
        assert!(matches!(
            parse_csv(data.as_bytes()),
            Err(DataError::ParseError(_))
        ));
    }

    #[test]
    fn test_out_of_range_timestamp_is_parse_error() {
        let data = "timestamp,open,high,low,close\n-9223372036854776,1,2,0.5,1.5\n";
        let err = parse_csv(data.as_bytes()).unwrap_err();

        assert!(matches!(err, DataError::ParseError(msg) if msg.contains("out of range")));
        assert_eq!(parse_timestamp("-86400").unwrap(), -86_400_000);
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            CsvSource::new(Path::new("/nonexistent/prices.csv")),
            Err(DataError::NoDataAvailable(_))
        ));
    }
}
