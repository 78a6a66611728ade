//! Moving average indicators.

use insight_core::error::IndicatorError;
use insight_core::traits::Indicator;

/// Simple Moving Average (SMA).
///
/// Calculates the arithmetic mean of the last N values.
#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
}

impl Sma {
    /// Create a new SMA with the specified period.
    pub fn new(period: usize) -> Result<Self, IndicatorError> {
        if period == 0 {
            return Err(IndicatorError::InvalidParameter(
                "SMA period must be greater than 0".into(),
            ));
        }
        Ok(Self { period })
    }

    /// Latest SMA value, NaN when the window has not filled.
    pub fn last(&self, data: &[f64]) -> f64 {
        if data.len() < self.period {
            return f64::NAN;
        }
        data[data.len() - self.period..].iter().sum::<f64>() / self.period as f64
    }
}

impl Indicator for Sma {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        let mut result = vec![f64::NAN; data.len()];
        if data.len() < self.period {
            return result;
        }

        let period_f64 = self.period as f64;

        // Initial sum
        let mut sum: f64 = data[..self.period].iter().sum();
        result[self.period - 1] = sum / period_f64;

        // Sliding window
        for i in self.period..data.len() {
            sum = sum - data[i - self.period] + data[i];
            result[i] = sum / period_f64;
        }

        result
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "SMA"
    }
}

/// Exponential Moving Average (EMA).
///
/// Recursive form without bias adjustment: the first sample seeds the
/// average and every later sample applies
/// `ema = price * alpha + ema_prev * (1 - alpha)` with `alpha = 2 / (span + 1)`.
/// Values are masked as NaN until `span` samples have been folded in.
/// NaN inputs are skipped, so a series with a NaN warm-up prefix (such as a
/// MACD line) starts its own recurrence at its first defined value.
#[derive(Debug, Clone)]
pub struct Ema {
    span: usize,
    alpha: f64,
}

impl Ema {
    /// Create a new EMA with the specified span.
    pub fn new(span: usize) -> Result<Self, IndicatorError> {
        if span == 0 {
            return Err(IndicatorError::InvalidParameter(
                "EMA span must be greater than 0".into(),
            ));
        }
        Ok(Self::with_span(span))
    }

    /// Constructor for spans already known to be non-zero.
    pub(crate) fn with_span(span: usize) -> Self {
        let alpha = 2.0 / (span as f64 + 1.0);
        Self { span, alpha }
    }
}

impl Indicator for Ema {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        let mut result = Vec::with_capacity(data.len());
        let one_minus_alpha = 1.0 - self.alpha;
        let mut ema: Option<f64> = None;
        let mut observed = 0usize;

        for &price in data {
            if price.is_nan() {
                result.push(f64::NAN);
                continue;
            }

            let next = match ema {
                Some(prev) => price * self.alpha + prev * one_minus_alpha,
                None => price,
            };
            ema = Some(next);
            observed += 1;

            result.push(if observed >= self.span { next } else { f64::NAN });
        }

        result
    }

    fn period(&self) -> usize {
        self.span
    }

    fn name(&self) -> &str {
        "EMA"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sma() {
        let sma = Sma::new(3).unwrap();
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let result = sma.calculate(&data);

        assert_eq!(result.len(), 5);
        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        assert!((result[2] - 2.0).abs() < 1e-10); // (1+2+3)/3
        assert!((result[3] - 3.0).abs() < 1e-10); // (2+3+4)/3
        assert!((result[4] - 4.0).abs() < 1e-10); // (3+4+5)/3
        assert!((sma.last(&data) - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_sma_insufficient_data() {
        let sma = Sma::new(5).unwrap();
        let data = vec![1.0, 2.0, 3.0];

        assert!(sma.calculate(&data).iter().all(|v| v.is_nan()));
        assert!(sma.last(&data).is_nan());
        assert!(sma.validate_data(&data).is_err());
    }

    #[test]
    fn test_zero_period_rejected() {
        assert!(Sma::new(0).is_err());
        assert!(Ema::new(0).is_err());
    }

    #[test]
    fn test_ema_recursive_seed() {
        let ema = Ema::new(3).unwrap();
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let result = ema.calculate(&data);

        // alpha = 2/(3+1) = 0.5, seeded with the first price
        // 1.0 -> 1.5 -> 2.25 -> 3.125 -> 4.0625
        assert_eq!(result.len(), 5);
        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        assert!((result[2] - 2.25).abs() < 1e-10);
        assert!((result[3] - 3.125).abs() < 1e-10);
        assert!((result[4] - 4.0625).abs() < 1e-10);
    }

    #[test]
    fn test_ema_skips_leading_nan() {
        let ema = Ema::new(2).unwrap();
        let data = vec![f64::NAN, f64::NAN, 4.0, 6.0, 6.0];
        let result = ema.calculate(&data);

        // alpha = 2/3; seeded at 4.0
        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        assert!(result[2].is_nan());
        let expected = 6.0 * (2.0 / 3.0) + 4.0 / 3.0;
        assert!((result[3] - expected).abs() < 1e-10);
        assert!(result[4] > result[3]);
    }

    #[test]
    fn test_ema_constant_series() {
        let ema = Ema::new(5).unwrap();
        let data = vec![42.0; 10];
        let result = ema.calculate(&data);

        for value in &result[4..] {
            assert!((value - 42.0).abs() < 1e-10);
        }
    }
}
