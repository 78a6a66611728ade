//! Momentum indicators.

use insight_core::error::IndicatorError;
use insight_core::traits::{Indicator, MultiOutputIndicator};
use serde::{Deserialize, Serialize};

use crate::moving_average::Ema;

/// Relative Strength Index (RSI).
///
/// Measures the speed and magnitude of recent price changes
/// to evaluate overbought or oversold conditions.
#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
}

impl Rsi {
    /// Create a new RSI indicator.
    ///
    /// Common periods are 14 (default) or 9.
    pub fn new(period: usize) -> Result<Self, IndicatorError> {
        if period == 0 {
            return Err(IndicatorError::InvalidParameter(
                "RSI period must be greater than 0".into(),
            ));
        }
        Ok(Self { period })
    }

    fn rsi_from(avg_gain: f64, avg_loss: f64) -> f64 {
        if avg_loss == 0.0 {
            100.0
        } else {
            100.0 - (100.0 / (1.0 + avg_gain / avg_loss))
        }
    }
}

impl Indicator for Rsi {
    type Output = f64;

    /// Wilder's smoothing: the first `period` deltas seed the averages with
    /// their arithmetic mean, then `avg = (avg * (period - 1) + x) / period`.
    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        let mut result = vec![f64::NAN; data.len()];
        if data.len() <= self.period {
            return result;
        }

        // Calculate price changes
        let mut gains = Vec::with_capacity(data.len() - 1);
        let mut losses = Vec::with_capacity(data.len() - 1);

        for pair in data.windows(2) {
            let change = pair[1] - pair[0];
            gains.push(change.max(0.0));
            losses.push((-change).max(0.0));
        }

        let period_f64 = self.period as f64;
        let mut avg_gain = gains[..self.period].iter().sum::<f64>() / period_f64;
        let mut avg_loss = losses[..self.period].iter().sum::<f64>() / period_f64;
        result[self.period] = Self::rsi_from(avg_gain, avg_loss);

        for i in self.period..gains.len() {
            avg_gain = (avg_gain * (period_f64 - 1.0) + gains[i]) / period_f64;
            avg_loss = (avg_loss * (period_f64 - 1.0) + losses[i]) / period_f64;
            // gains[i] is the change into bar i + 1
            result[i + 1] = Self::rsi_from(avg_gain, avg_loss);
        }

        result
    }

    fn period(&self) -> usize {
        self.period + 1 // Need period+1 data points
    }

    fn name(&self) -> &str {
        "RSI"
    }
}

/// MACD (Moving Average Convergence Divergence) output.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MacdOutput {
    /// MACD line (fast EMA - slow EMA)
    pub macd: f64,
    /// Signal line (EMA of MACD)
    pub signal: f64,
    /// Histogram (MACD - Signal)
    pub histogram: f64,
}

/// MACD indicator.
///
/// Uses two EMAs to identify trend direction and momentum.
#[derive(Debug, Clone)]
pub struct Macd {
    fast: Ema,
    slow: Ema,
    signal: Ema,
}

impl Macd {
    /// Create a new MACD with default parameters (12, 26, 9).
    pub fn new() -> Self {
        Self {
            fast: Ema::with_span(12),
            slow: Ema::with_span(26),
            signal: Ema::with_span(9),
        }
    }

    /// Create a MACD with custom spans.
    pub fn with_periods(fast: usize, slow: usize, signal: usize) -> Result<Self, IndicatorError> {
        if fast >= slow {
            return Err(IndicatorError::InvalidParameter(format!(
                "MACD fast span ({fast}) must be less than slow span ({slow})"
            )));
        }
        Ok(Self {
            fast: Ema::new(fast)?,
            slow: Ema::new(slow)?,
            signal: Ema::new(signal)?,
        })
    }
}

impl Default for Macd {
    fn default() -> Self {
        Self::new()
    }
}

impl MultiOutputIndicator for Macd {
    type Outputs = MacdOutput;

    fn calculate(&self, data: &[f64]) -> Vec<MacdOutput> {
        let fast_ema = self.fast.calculate(data);
        let slow_ema = self.slow.calculate(data);

        // NaN wherever the slow EMA is still warming up
        let macd_line: Vec<f64> = fast_ema
            .iter()
            .zip(slow_ema.iter())
            .map(|(f, s)| f - s)
            .collect();

        let signal_line = self.signal.calculate(&macd_line);

        macd_line
            .iter()
            .zip(signal_line.iter())
            .map(|(&macd, &signal)| MacdOutput {
                macd,
                signal,
                histogram: macd - signal,
            })
            .collect()
    }

    fn period(&self) -> usize {
        self.slow.period() + self.signal.period() - 1
    }

    fn name(&self) -> &str {
        "MACD"
    }
}
