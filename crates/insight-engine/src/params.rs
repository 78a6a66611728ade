//! Indicator parameters.

use insight_core::error::IndicatorError;
use serde::{Deserialize, Serialize};

/// Computation parameters for the indicator engine.
///
/// Every field is optional when deserialized; absent options fall back to
/// the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorParameters {
    /// RSI lookback (Wilder smoothing period)
    pub rsi_period: usize,
    /// MACD fast EMA span
    pub macd_fast: usize,
    /// MACD slow EMA span
    pub macd_slow: usize,
    /// MACD signal EMA span
    pub macd_signal: usize,
    /// Bollinger SMA window
    pub bollinger_period: usize,
    /// Bollinger band width in standard deviations
    pub bollinger_std_dev: f64,
    /// Simple moving average windows, also used for the trend chain
    pub ma_periods: Vec<usize>,
    /// Lookback for support/resistance extrema
    pub support_resistance_window: usize,
}

impl Default for IndicatorParameters {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            bollinger_period: 20,
            bollinger_std_dev: 2.0,
            ma_periods: vec![20, 50, 200],
            support_resistance_window: 20,
        }
    }
}

impl IndicatorParameters {
    /// Check every option.
    ///
    /// The engine never calls this: an invalid option there only makes the
    /// affected indicator unavailable. Configuration loading calls it so
    /// mistakes surface before any data is processed.
    pub fn validate(&self) -> Result<(), IndicatorError> {
        let positive = [
            ("rsi_period", self.rsi_period),
            ("macd_fast", self.macd_fast),
            ("macd_slow", self.macd_slow),
            ("macd_signal", self.macd_signal),
            ("support_resistance_window", self.support_resistance_window),
        ];
        for (name, value) in positive {
            if value == 0 {
                return Err(IndicatorError::InvalidParameter(format!(
                    "{name} must be greater than 0"
                )));
            }
        }

        if self.macd_fast >= self.macd_slow {
            return Err(IndicatorError::InvalidParameter(format!(
                "macd_fast ({}) must be less than macd_slow ({})",
                self.macd_fast, self.macd_slow
            )));
        }
        if self.bollinger_period < 2 {
            return Err(IndicatorError::InvalidParameter(
                "bollinger_period must be at least 2".into(),
            ));
        }
        if !(self.bollinger_std_dev.is_finite() && self.bollinger_std_dev > 0.0) {
            return Err(IndicatorError::InvalidParameter(
                "bollinger_std_dev must be a positive number".into(),
            ));
        }
        if self.ma_periods.is_empty() {
            return Err(IndicatorError::InvalidParameter(
                "ma_periods must list at least one period".into(),
            ));
        }
        if self.ma_periods.contains(&0) {
            return Err(IndicatorError::InvalidParameter(
                "ma_periods must not contain 0".into(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let params = IndicatorParameters::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.ma_periods, vec![20, 50, 200]);
        assert_eq!(params.rsi_period, 14);
    }

    #[test]
    fn test_partial_deserialization_uses_defaults() {
        let params: IndicatorParameters =
            serde_json::from_str(r#"{"rsi_period": 9, "ma_periods": [10, 30]}"#).unwrap();

        assert_eq!(params.rsi_period, 9);
        assert_eq!(params.ma_periods, vec![10, 30]);
        assert_eq!(params.macd_slow, 26);
        assert_eq!(params.bollinger_std_dev, 2.0);
    }

    #[test]
    fn test_validation_failures() {
        let cases = [
            IndicatorParameters {
                rsi_period: 0,
                ..Default::default()
            },
            IndicatorParameters {
                macd_fast: 26,
                macd_slow: 12,
                ..Default::default()
            },
            IndicatorParameters {
                bollinger_period: 1,
                ..Default::default()
            },
            IndicatorParameters {
                bollinger_std_dev: -1.0,
                ..Default::default()
            },
            IndicatorParameters {
                ma_periods: vec![],
                ..Default::default()
            },
            IndicatorParameters {
                ma_periods: vec![20, 0],
                ..Default::default()
            },
        ];

        for params in cases {
            assert!(
                matches!(params.validate(), Err(IndicatorError::InvalidParameter(_))),
                "expected rejection for {params:?}"
            );
        }
    }
}
