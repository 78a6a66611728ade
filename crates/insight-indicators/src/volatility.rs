//! Volatility indicators.

use insight_core::error::IndicatorError;
use insight_core::traits::MultiOutputIndicator;
use serde::{Deserialize, Serialize};

/// Mean and sample standard deviation (n - 1 denominator) of a window.
fn window_stats(window: &[f64]) -> (f64, f64) {
    let n = window.len() as f64;
    let mean: f64 = window.iter().sum::<f64>() / n;
    let variance: f64 = window.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);
    (mean, variance.sqrt())
}

/// Bollinger Bands output.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BollingerOutput {
    /// Upper band
    pub upper: f64,
    /// Middle band (SMA)
    pub middle: f64,
    /// Lower band
    pub lower: f64,
    /// Bandwidth ((upper - lower) / middle)
    pub bandwidth: f64,
    /// %B ((price - lower) / (upper - lower))
    pub percent_b: f64,
}

impl BollingerOutput {
    /// Output for a bar whose window has not filled.
    pub fn undefined() -> Self {
        Self {
            upper: f64::NAN,
            middle: f64::NAN,
            lower: f64::NAN,
            bandwidth: f64::NAN,
            percent_b: f64::NAN,
        }
    }

    /// Whether every band is defined.
    pub fn is_defined(&self) -> bool {
        self.upper.is_finite() && self.middle.is_finite() && self.lower.is_finite()
    }

    /// Check if price is above upper band.
    pub fn is_overbought(&self, price: f64) -> bool {
        price > self.upper
    }

    /// Check if price is below lower band.
    pub fn is_oversold(&self, price: f64) -> bool {
        price < self.lower
    }
}

/// Bollinger Bands.
///
/// Consists of a middle band (SMA) with upper and lower bands
/// at a specified number of sample standard deviations.
#[derive(Debug, Clone)]
pub struct BollingerBands {
    period: usize,
    std_dev_multiplier: f64,
}

impl BollingerBands {
    /// Create new Bollinger Bands with default parameters (20, 2.0).
    pub fn new() -> Self {
        Self {
            period: 20,
            std_dev_multiplier: 2.0,
        }
    }

    /// Create Bollinger Bands with custom parameters.
    pub fn with_params(period: usize, std_dev_multiplier: f64) -> Result<Self, IndicatorError> {
        if period < 2 {
            return Err(IndicatorError::InvalidParameter(
                "Bollinger period must be at least 2".into(),
            ));
        }
        if !(std_dev_multiplier.is_finite() && std_dev_multiplier > 0.0) {
            return Err(IndicatorError::InvalidParameter(
                "Bollinger std dev multiplier must be positive".into(),
            ));
        }
        Ok(Self {
            period,
            std_dev_multiplier,
        })
    }
}

impl Default for BollingerBands {
    fn default() -> Self {
        Self::new()
    }
}

impl BollingerBands {
    /// Bands for the latest bar only; undefined until the window fills.
    pub fn latest(&self, data: &[f64]) -> BollingerOutput {
        match data.len().checked_sub(self.period) {
            Some(start) => self.bands(&data[start..]),
            None => BollingerOutput::undefined(),
        }
    }

    /// Bands over one full window, with %B for its last value.
    fn bands(&self, window: &[f64]) -> BollingerOutput {
        let (mean, std_dev) = window_stats(window);
        let band = self.std_dev_multiplier * std_dev;

        let upper = mean + band;
        let lower = mean - band;

        let bandwidth = if mean != 0.0 {
            (upper - lower) / mean
        } else {
            0.0
        };

        let price = window[window.len() - 1];
        let percent_b = if upper != lower {
            (price - lower) / (upper - lower)
        } else {
            0.5
        };

        BollingerOutput {
            upper,
            middle: mean,
            lower,
            bandwidth,
            percent_b,
        }
    }
}

impl MultiOutputIndicator for BollingerBands {
    type Outputs = BollingerOutput;

    fn calculate(&self, data: &[f64]) -> Vec<BollingerOutput> {
        let mut result = vec![BollingerOutput::undefined(); data.len()];

        for (i, window) in data.windows(self.period).enumerate() {
            result[i + self.period - 1] = self.bands(window);
        }

        result
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "Bollinger Bands"
    }
}
