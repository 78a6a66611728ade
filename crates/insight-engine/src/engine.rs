//! The indicator engine.

use insight_core::error::IndicatorError;
use insight_core::traits::{Indicator, MultiOutputIndicator};
use insight_core::types::{OhlcvPoint, SeriesExt};
use insight_indicators::{ensure_finite, BollingerBands, Macd, Rsi, Sma, SupportResistance};
use tracing::{debug, warn};

use crate::params::IndicatorParameters;
use crate::reading::{
    BollingerReading, IndicatorResult, MacdReading, MovingAverages, RsiReading,
    SupportResistanceReading, TrendReading,
};

/// Stateless technical indicator engine.
///
/// Holds only default parameters, so one instance can be shared freely
/// across threads. Every call works on the caller's series and returns a
/// fresh [`IndicatorResult`].
///
/// The series must be ordered by ascending timestamp. The engine checks this
/// and logs a warning on violation, but computes on the given order.
#[derive(Debug, Clone, Default)]
pub struct IndicatorEngine {
    defaults: IndicatorParameters,
}

impl IndicatorEngine {
    /// Create an engine with the given default parameters.
    pub fn new(defaults: IndicatorParameters) -> Self {
        Self { defaults }
    }

    /// Default parameters used by [`IndicatorEngine::analyze`].
    pub fn defaults(&self) -> &IndicatorParameters {
        &self.defaults
    }

    /// Compute indicators with the engine's default parameters.
    pub fn analyze(&self, series: &[OhlcvPoint]) -> Result<IndicatorResult, IndicatorError> {
        self.compute(series, &self.defaults)
    }

    /// Compute every indicator over `series`.
    ///
    /// Fails only when the series is empty. Short history degrades
    /// individual indicators to NaN; an indicator that cannot be computed at
    /// all (invalid parameter, non-finite input) is reported as `None`.
    pub fn compute(
        &self,
        series: &[OhlcvPoint],
        params: &IndicatorParameters,
    ) -> Result<IndicatorResult, IndicatorError> {
        let closes = series.closes();
        let Some(&close) = closes.last() else {
            return Err(IndicatorError::InsufficientData {
                required: 1,
                available: 0,
            });
        };

        if !series.is_time_ordered() {
            warn!(
                bars = series.len(),
                "Series timestamps are not strictly increasing; computing in given order"
            );
        }

        let moving_averages = isolate("moving_averages", || {
            moving_averages(&closes, &params.ma_periods)
        });
        let trend = moving_averages
            .as_ref()
            .map(|averages| TrendReading::from_averages(close, averages.clone()));

        let result = IndicatorResult {
            trend,
            rsi: isolate("rsi", || rsi(&closes, params.rsi_period)),
            macd: isolate("macd", || macd(&closes, params)),
            bollinger_bands: isolate("bollinger_bands", || bollinger(&closes, params)),
            moving_averages,
            support_resistance: isolate("support_resistance", || {
                support_resistance(series, params.support_resistance_window)
            }),
        };

        debug!(bars = series.len(), close, "Computed technical indicators");
        Ok(result)
    }
}

/// Run one indicator, turning a failure into an unavailable field.
fn isolate<T>(
    indicator: &'static str,
    compute: impl FnOnce() -> Result<T, IndicatorError>,
) -> Option<T> {
    match compute() {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(indicator, error = %e, "Indicator unavailable");
            None
        }
    }
}

fn note_degraded(indicator: &'static str, check: Result<(), IndicatorError>) {
    if let Err(IndicatorError::InsufficientData {
        required,
        available,
    }) = check
    {
        warn!(
            indicator,
            required, available, "Insufficient history, indicator degraded"
        );
    }
}

fn moving_averages(closes: &[f64], periods: &[usize]) -> Result<MovingAverages, IndicatorError> {
    ensure_finite(closes, "close")?;

    let mut averages = MovingAverages::default();
    for &period in periods {
        let sma = Sma::new(period)?;
        note_degraded("moving_averages", sma.validate_data(closes));
        averages.insert(period, sma.last(closes));
    }
    Ok(averages)
}

fn rsi(closes: &[f64], period: usize) -> Result<RsiReading, IndicatorError> {
    ensure_finite(closes, "close")?;

    let rsi = Rsi::new(period)?;
    note_degraded("rsi", rsi.validate_data(closes));
    let value = rsi.calculate(closes).last().copied().unwrap_or(f64::NAN);
    Ok(RsiReading::from_value(value))
}

fn macd(closes: &[f64], params: &IndicatorParameters) -> Result<MacdReading, IndicatorError> {
    ensure_finite(closes, "close")?;

    let macd = Macd::with_periods(params.macd_fast, params.macd_slow, params.macd_signal)?;
    note_degraded("macd", macd.validate_data(closes));

    let outputs = macd.calculate(closes);
    let (current, previous) = match outputs.as_slice() {
        [.., prev, last] => (last, Some(prev)),
        [last] => (last, None),
        [] => {
            return Err(IndicatorError::InsufficientData {
                required: 1,
                available: 0,
            })
        }
    };
    Ok(MacdReading::from_outputs(previous, current))
}

fn bollinger(
    closes: &[f64],
    params: &IndicatorParameters,
) -> Result<BollingerReading, IndicatorError> {
    ensure_finite(closes, "close")?;

    let bands = BollingerBands::with_params(params.bollinger_period, params.bollinger_std_dev)?;
    note_degraded("bollinger_bands", bands.validate_data(closes));

    match closes.last() {
        Some(&close) => Ok(BollingerReading::from_output(close, &bands.latest(closes))),
        None => Err(IndicatorError::InsufficientData {
            required: 1,
            available: 0,
        }),
    }
}

fn support_resistance(
    series: &[OhlcvPoint],
    window: usize,
) -> Result<SupportResistanceReading, IndicatorError> {
    let highs = series.highs();
    let lows = series.lows();
    let closes = series.closes();
    ensure_finite(&highs, "high")?;
    ensure_finite(&lows, "low")?;
    ensure_finite(&closes, "close")?;

    let levels = SupportResistance::new(window)?;
    levels
        .latest(&highs, &lows, &closes)
        .ok_or(IndicatorError::InsufficientData {
            required: 1,
            available: 0,
        })
}
