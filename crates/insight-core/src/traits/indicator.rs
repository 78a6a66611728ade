//! Indicator trait definitions.
//!
//! Every indicator returns a vector aligned index-for-index with its input.
//! Positions inside the warm-up window hold `f64::NAN` (or an output whose
//! fields are NaN), so the last element always describes the latest bar.

use crate::error::IndicatorError;

/// Trait for single-input technical indicators.
pub trait Indicator: Send + Sync {
    /// The output type of the indicator.
    type Output;

    /// Calculate indicator values for the given data.
    ///
    /// # Arguments
    /// * `data` - Input data (typically close prices)
    ///
    /// # Returns
    /// One value per input point; warm-up positions are NaN.
    fn calculate(&self, data: &[f64]) -> Vec<Self::Output>;

    /// Get the minimum data points required for a defined latest value.
    fn period(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;

    /// Validate that there's enough data.
    fn validate_data(&self, data: &[f64]) -> Result<(), IndicatorError> {
        check_len(data.len(), self.period())
    }
}

/// Multi-output indicator (e.g., Bollinger Bands, MACD).
///
/// Some indicators produce multiple related values.
pub trait MultiOutputIndicator: Send + Sync {
    /// The output type containing multiple values.
    type Outputs;

    /// Calculate indicator values for the given data.
    fn calculate(&self, data: &[f64]) -> Vec<Self::Outputs>;

    /// Get the minimum data points required for a defined latest value.
    fn period(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;

    /// Validate that there's enough data.
    fn validate_data(&self, data: &[f64]) -> Result<(), IndicatorError> {
        check_len(data.len(), self.period())
    }
}

/// Indicator that reads bar extremes as well as closes.
pub trait OhlcvIndicator: Send + Sync {
    /// The output type of the indicator.
    type Output;

    /// Calculate indicator values from bar data.
    ///
    /// # Arguments
    /// * `high` - High prices
    /// * `low` - Low prices
    /// * `close` - Close prices
    fn calculate(&self, high: &[f64], low: &[f64], close: &[f64]) -> Vec<Self::Output>;

    /// Get the lookback window.
    fn period(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;
}

fn check_len(available: usize, required: usize) -> Result<(), IndicatorError> {
    if available < required {
        return Err(IndicatorError::InsufficientData {
            required,
            available,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestIndicator {
        period: usize,
    }

    impl Indicator for TestIndicator {
        type Output = f64;

        fn calculate(&self, data: &[f64]) -> Vec<f64> {
            // Rolling sum, NaN until the window fills
            (0..data.len())
                .map(|i| {
                    if i + 1 < self.period {
                        f64::NAN
                    } else {
                        data[i + 1 - self.period..=i].iter().sum()
                    }
                })
                .collect()
        }

        fn period(&self) -> usize {
            self.period
        }

        fn name(&self) -> &str {
            "test"
        }
    }

    #[test]
    fn test_indicator_validation() {
        let indicator = TestIndicator { period: 5 };

        assert_eq!(
            indicator.validate_data(&[1.0, 2.0, 3.0]),
            Err(IndicatorError::InsufficientData {
                required: 5,
                available: 3
            })
        );
        assert!(indicator.validate_data(&[1.0, 2.0, 3.0, 4.0, 5.0]).is_ok());
    }

    #[test]
    fn test_indicator_alignment() {
        let indicator = TestIndicator { period: 3 };
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let result = indicator.calculate(&data);

        assert_eq!(result.len(), data.len());
        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        assert!((result[2] - 6.0).abs() < 0.001); // 1+2+3
        assert!((result[4] - 12.0).abs() < 0.001); // 3+4+5
    }
}
