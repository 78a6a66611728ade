//! Support and resistance levels.

use insight_core::error::IndicatorError;
use insight_core::traits::OhlcvIndicator;
use serde::{Deserialize, Serialize};

/// Support/resistance output for one bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelsOutput {
    /// Lowest low in the window
    pub support: f64,
    /// Highest high in the window
    pub resistance: f64,
    /// (close - support) / close
    pub distance_to_support: f64,
    /// (resistance - close) / close
    pub distance_to_resistance: f64,
}

/// Trailing-window extrema of highs and lows.
///
/// Bars near the start of the series use whatever history exists, so a
/// series shorter than the window still yields levels.
#[derive(Debug, Clone)]
pub struct SupportResistance {
    window: usize,
}

impl SupportResistance {
    /// Create a new support/resistance indicator.
    pub fn new(window: usize) -> Result<Self, IndicatorError> {
        if window == 0 {
            return Err(IndicatorError::InvalidParameter(
                "Support/resistance window must be greater than 0".into(),
            ));
        }
        Ok(Self { window })
    }

    fn relative(numerator: f64, close: f64) -> f64 {
        if close == 0.0 {
            0.0
        } else {
            numerator / close
        }
    }
}

impl SupportResistance {
    /// Levels for the latest bar only; `None` for an empty series.
    pub fn latest(&self, high: &[f64], low: &[f64], close: &[f64]) -> Option<LevelsOutput> {
        let len = high.len().min(low.len()).min(close.len());
        let last = len.checked_sub(1)?;
        Some(self.at(last, high, low, close))
    }

    fn at(&self, i: usize, high: &[f64], low: &[f64], close: &[f64]) -> LevelsOutput {
        let start = (i + 1).saturating_sub(self.window);
        let resistance = high[start..=i]
            .iter()
            .cloned()
            .fold(f64::NEG_INFINITY, f64::max);
        let support = low[start..=i]
            .iter()
            .cloned()
            .fold(f64::INFINITY, f64::min);

        let price = close[i];
        LevelsOutput {
            support,
            resistance,
            distance_to_support: Self::relative(price - support, price),
            distance_to_resistance: Self::relative(resistance - price, price),
        }
    }
}

impl OhlcvIndicator for SupportResistance {
    type Output = LevelsOutput;

    fn calculate(&self, high: &[f64], low: &[f64], close: &[f64]) -> Vec<LevelsOutput> {
        let len = high.len().min(low.len()).min(close.len());
        (0..len).map(|i| self.at(i, high, low, close)).collect()
    }

    fn period(&self) -> usize {
        self.window
    }

    fn name(&self) -> &str {
        "Support/Resistance"
    }
}
