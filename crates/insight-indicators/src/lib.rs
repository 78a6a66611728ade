//! Technical indicator primitives.
//!
//! This crate provides the building blocks the indicator engine composes:
//! - Moving averages (SMA, EMA)
//! - Momentum indicators (RSI, MACD)
//! - Volatility indicators (Bollinger Bands)
//! - Support/resistance levels from trailing extrema
//!
//! Every indicator returns output aligned with its input, NaN during warm-up.

pub mod levels;
pub mod momentum;
pub mod moving_average;
pub mod volatility;

pub use levels::{LevelsOutput, SupportResistance};
pub use momentum::{Macd, MacdOutput, Rsi};
pub use moving_average::{Ema, Sma};
pub use volatility::{BollingerBands, BollingerOutput};

use insight_core::error::IndicatorError;

/// Reject series containing NaN or infinite values.
///
/// Indicators fold every value into running sums, so one bad record would
/// silently poison every later output.
pub fn ensure_finite(values: &[f64], field: &'static str) -> Result<(), IndicatorError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(IndicatorError::NonFiniteInput { field, index }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_finite() {
        assert!(ensure_finite(&[1.0, 2.0], "close").is_ok());
        assert_eq!(
            ensure_finite(&[1.0, f64::INFINITY, f64::NAN], "high"),
            Err(IndicatorError::NonFiniteInput {
                field: "high",
                index: 1
            })
        );
    }
}
