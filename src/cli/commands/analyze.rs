//! Analyze command implementation.

use anyhow::{Context, Result};
use futures::future::try_join_all;
use insight_config::AppConfig;
use insight_core::OhlcvPoint;
use insight_data::{load_series, source_name};
use insight_engine::{IndicatorEngine, IndicatorResult};
use serde::Serialize;
use std::fmt::Write;
use tracing::info;

use crate::cli::{AnalyzeArgs, OutputFormat};

/// Indicators for one symbol, optionally with the series they came from.
#[derive(Debug, Serialize)]
pub struct MarketSnapshot {
    pub symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ohlcv: Option<Vec<OhlcvPoint>>,
    pub indicators: IndicatorResult,
    #[serde(skip)]
    last: Option<OhlcvPoint>,
    #[serde(skip)]
    bars: usize,
}

pub async fn run(args: AnalyzeArgs, config: &AppConfig) -> Result<()> {
    info!(files = args.data.len(), "Starting analysis");

    let options = &config.data;
    let loads = args.data.iter().map(|path| async move {
        let series = load_series(path, options)
            .await
            .with_context(|| format!("Failed to load {}", path.display()))?;
        Ok::<_, anyhow::Error>((source_name(path), series))
    });
    let loaded = try_join_all(loads).await?;

    let engine = IndicatorEngine::new(config.indicators.clone());
    let snapshots = loaded
        .into_iter()
        .map(|(symbol, series)| {
            let indicators = engine
                .analyze(&series)
                .with_context(|| format!("Failed to compute indicators for {symbol}"))?;
            Ok(MarketSnapshot {
                symbol,
                last: series.last().copied(),
                bars: series.len(),
                ohlcv: args.include_ohlcv.then_some(series),
                indicators,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&snapshots)?),
        OutputFormat::Text => {
            for snapshot in &snapshots {
                println!("{}", summary(snapshot));
            }
        }
    }

    if let Some(save_path) = &args.save {
        let json = serde_json::to_string_pretty(&snapshots)?;
        tokio::fs::write(save_path, json)
            .await
            .with_context(|| format!("Failed to write {}", save_path.display()))?;
        info!("Results saved to {:?}", save_path);
    }

    Ok(())
}

fn value(v: f64) -> String {
    if v.is_finite() {
        format!("{v:.2}")
    } else {
        "n/a".to_string()
    }
}

fn percent(v: f64) -> String {
    if v.is_finite() {
        format!("{:.2}%", v * 100.0)
    } else {
        "n/a".to_string()
    }
}

/// Lowercase label as it appears in JSON output.
fn label<T: Serialize>(v: Option<T>) -> String {
    match serde_json::to_value(v) {
        Ok(serde_json::Value::String(s)) => s,
        _ => "n/a".to_string(),
    }
}

/// Human-readable report for one symbol.
pub fn summary(snapshot: &MarketSnapshot) -> String {
    let mut out = String::new();
    let ind = &snapshot.indicators;

    let as_of = snapshot
        .last
        .and_then(|p| p.datetime())
        .map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| "n/a".to_string());
    let close = snapshot.last.map(|p| p.close).unwrap_or(f64::NAN);

    let _ = writeln!(out, "=== {} ===", snapshot.symbol);
    let _ = writeln!(
        out,
        "Bars: {}  Last close: {}  As of: {}",
        snapshot.bars,
        value(close),
        as_of
    );

    match &ind.trend {
        Some(trend) => {
            let averages: Vec<String> = trend
                .averages
                .iter()
                .map(|(period, v)| format!("MA{period} {}", value(v)))
                .collect();
            let _ = writeln!(
                out,
                "Trend:      {} ({})  {}",
                label(trend.direction),
                label(trend.strength),
                averages.join("  ")
            );
        }
        None => {
            let _ = writeln!(out, "Trend:      n/a");
        }
    }

    match &ind.rsi {
        Some(rsi) => {
            let _ = writeln!(
                out,
                "RSI:        {}  signal {}  trend {}",
                value(rsi.value),
                label(Some(rsi.signal)),
                label(Some(rsi.trend))
            );
        }
        None => {
            let _ = writeln!(out, "RSI:        n/a");
        }
    }

    match &ind.macd {
        Some(macd) => {
            let _ = writeln!(
                out,
                "MACD:       {}  signal {}  histogram {}  trend {}  crossover {}",
                value(macd.macd),
                value(macd.signal),
                value(macd.histogram),
                label(macd.trend),
                label(macd.crossover)
            );
        }
        None => {
            let _ = writeln!(out, "MACD:       n/a");
        }
    }

    match &ind.bollinger_bands {
        Some(bands) => {
            let _ = writeln!(
                out,
                "Bollinger:  upper {}  middle {}  lower {}  width {}  %B {}  position {}",
                value(bands.upper),
                value(bands.middle),
                value(bands.lower),
                value(bands.bandwidth),
                value(bands.percent_b),
                label(bands.position)
            );
        }
        None => {
            let _ = writeln!(out, "Bollinger:  n/a");
        }
    }

    match &ind.support_resistance {
        Some(levels) => {
            let _ = writeln!(
                out,
                "Levels:     support {} ({} away)  resistance {} ({} away)",
                value(levels.support),
                percent(levels.distance_to_support),
                value(levels.resistance),
                percent(levels.distance_to_resistance)
            );
        }
        None => {
            let _ = writeln!(out, "Levels:     n/a");
        }
    }

    out
}
