//! Indicator result types.
//!
//! Numeric fields are NaN when history is too short (serialized as `null`);
//! label fields are `None` when the numbers they derive from are undefined.

use insight_indicators::{BollingerOutput, LevelsOutput, MacdOutput};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

/// RSI level above which the market reads as overbought.
pub const RSI_OVERBOUGHT: f64 = 70.0;
/// RSI level below which the market reads as oversold.
pub const RSI_OVERSOLD: f64 = 30.0;
/// Relative distance from the shortest MA that makes a trend strong.
pub const STRONG_TREND_THRESHOLD: f64 = 0.02;

/// Direction of a trend or momentum reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Bullish,
    Bearish,
}

/// Strength of the price trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendStrength {
    Strong,
    Weak,
}

/// RSI zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RsiSignal {
    Overbought,
    Oversold,
    Neutral,
}

/// RSI bias relative to the 50 midline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RsiTrend {
    Bullish,
    Bearish,
    Neutral,
}

/// MACD histogram sign change over the last two bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Crossover {
    Bullish,
    Bearish,
    #[serde(rename = "none")]
    NoCrossover,
}

impl Crossover {
    /// Classify the transition between two histogram values.
    ///
    /// Returns `None` when either value is undefined.
    pub fn from_histogram(previous: f64, current: f64) -> Option<Self> {
        if !(previous.is_finite() && current.is_finite()) {
            return None;
        }
        Some(if previous < 0.0 && current > 0.0 {
            Crossover::Bullish
        } else if previous > 0.0 && current < 0.0 {
            Crossover::Bearish
        } else {
            Crossover::NoCrossover
        })
    }
}

/// Where the close sits relative to the Bollinger Bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BandPosition {
    Upper,
    Middle,
    Lower,
}

/// Simple moving averages keyed by period.
///
/// Serializes as a flat map of `ma<period>` keys, e.g. `{"ma20": 101.5}`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovingAverages {
    values: BTreeMap<usize, f64>,
}

impl MovingAverages {
    pub(crate) fn insert(&mut self, period: usize, value: f64) {
        self.values.insert(period, value);
    }

    /// Value for a configured period; NaN when history was too short.
    pub fn get(&self, period: usize) -> Option<f64> {
        self.values.get(&period).copied()
    }

    /// Periods in ascending order with their values.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.values.iter().map(|(&p, &v)| (p, v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Serialize for MovingAverages {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (period, value) in &self.values {
            map.serialize_entry(&format!("ma{period}"), value)?;
        }
        map.end()
    }
}

/// Price trend against the moving-average chain.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendReading {
    /// `None` when no moving average is defined
    pub direction: Option<TrendDirection>,
    /// `None` when the shortest moving average is undefined
    pub strength: Option<TrendStrength>,
    #[serde(flatten)]
    pub averages: MovingAverages,
}

impl TrendReading {
    /// Derive the trend of `close` against already computed averages.
    ///
    /// The close and every defined average must form a strictly descending
    /// chain, shortest period first, for the trend to be bullish. Undefined
    /// averages drop out of the chain.
    pub fn from_averages(close: f64, averages: MovingAverages) -> Self {
        let defined: Vec<f64> = averages
            .iter()
            .map(|(_, v)| v)
            .filter(|v| v.is_finite())
            .collect();

        let direction = if defined.is_empty() {
            None
        } else {
            let bullish = std::iter::once(close)
                .chain(defined.iter().copied())
                .collect::<Vec<_>>()
                .windows(2)
                .all(|w| w[0] > w[1]);
            Some(if bullish {
                TrendDirection::Bullish
            } else {
                TrendDirection::Bearish
            })
        };

        let strength = averages
            .iter()
            .next()
            .map(|(_, v)| v)
            .filter(|v| v.is_finite())
            .map(|shortest| {
                let distance = if shortest == 0.0 {
                    0.0
                } else {
                    (close - shortest).abs() / shortest
                };
                if distance > STRONG_TREND_THRESHOLD {
                    TrendStrength::Strong
                } else {
                    TrendStrength::Weak
                }
            });

        Self {
            direction,
            strength,
            averages,
        }
    }
}

/// Latest RSI value with its classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RsiReading {
    pub value: f64,
    pub signal: RsiSignal,
    pub trend: RsiTrend,
}

impl RsiReading {
    /// Classify an RSI value. NaN reads as neutral on both axes.
    pub fn from_value(value: f64) -> Self {
        if value.is_nan() {
            return Self {
                value,
                signal: RsiSignal::Neutral,
                trend: RsiTrend::Neutral,
            };
        }

        let signal = if value > RSI_OVERBOUGHT {
            RsiSignal::Overbought
        } else if value < RSI_OVERSOLD {
            RsiSignal::Oversold
        } else {
            RsiSignal::Neutral
        };
        let trend = if value > 50.0 {
            RsiTrend::Bullish
        } else {
            RsiTrend::Bearish
        };

        Self {
            value,
            signal,
            trend,
        }
    }

    pub fn is_available(&self) -> bool {
        self.value.is_finite()
    }
}

/// Latest MACD values with trend and crossover.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MacdReading {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
    pub trend: Option<TrendDirection>,
    pub crossover: Option<Crossover>,
}

impl MacdReading {
    /// Build from the last two MACD outputs (`previous` absent for a one-bar series).
    pub fn from_outputs(previous: Option<&MacdOutput>, current: &MacdOutput) -> Self {
        let trend = if current.macd.is_finite() && current.signal.is_finite() {
            Some(if current.macd > current.signal {
                TrendDirection::Bullish
            } else {
                TrendDirection::Bearish
            })
        } else {
            None
        };
        let crossover =
            previous.and_then(|prev| Crossover::from_histogram(prev.histogram, current.histogram));

        Self {
            macd: current.macd,
            signal: current.signal,
            histogram: current.histogram,
            trend,
            crossover,
        }
    }
}

/// Latest Bollinger Bands with the close's position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BollingerReading {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
    pub bandwidth: f64,
    pub percent_b: f64,
    pub position: Option<BandPosition>,
}

impl BollingerReading {
    pub fn from_output(close: f64, bands: &BollingerOutput) -> Self {
        let position = bands.is_defined().then(|| {
            if bands.is_overbought(close) {
                BandPosition::Upper
            } else if bands.is_oversold(close) {
                BandPosition::Lower
            } else {
                BandPosition::Middle
            }
        });

        Self {
            upper: bands.upper,
            middle: bands.middle,
            lower: bands.lower,
            bandwidth: bands.bandwidth,
            percent_b: bands.percent_b,
            position,
        }
    }
}

/// Support and resistance with relative distances from the close.
pub type SupportResistanceReading = LevelsOutput;

/// Composite output of one engine call.
///
/// A `None` field means that indicator failed (invalid parameter or
/// non-finite input) and the failure was logged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorResult {
    pub trend: Option<TrendReading>,
    pub rsi: Option<RsiReading>,
    pub macd: Option<MacdReading>,
    pub bollinger_bands: Option<BollingerReading>,
    pub moving_averages: Option<MovingAverages>,
    pub support_resistance: Option<SupportResistanceReading>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn averages(values: &[(usize, f64)]) -> MovingAverages {
        let mut ma = MovingAverages::default();
        for &(p, v) in values {
            ma.insert(p, v);
        }
        ma
    }

    #[test]
    fn test_trend_strict_chain() {
        let ma = averages(&[(20, 105.0), (50, 100.0), (200, 95.0)]);
        let trend = TrendReading::from_averages(110.0, ma);
        assert_eq!(trend.direction, Some(TrendDirection::Bullish));
        assert_eq!(trend.strength, Some(TrendStrength::Strong));

        // A tie breaks the strict chain
        let ma = averages(&[(20, 105.0), (50, 105.0), (200, 95.0)]);
        let trend = TrendReading::from_averages(110.0, ma);
        assert_eq!(trend.direction, Some(TrendDirection::Bearish));
    }

    #[test]
    fn test_trend_skips_undefined_averages() {
        let ma = averages(&[(20, 100.0), (50, f64::NAN), (200, f64::NAN)]);
        let trend = TrendReading::from_averages(101.0, ma);

        assert_eq!(trend.direction, Some(TrendDirection::Bullish));
        // 1% away from MA20
        assert_eq!(trend.strength, Some(TrendStrength::Weak));
    }

    #[test]
    fn test_trend_without_averages() {
        let ma = averages(&[(20, f64::NAN), (50, f64::NAN)]);
        let trend = TrendReading::from_averages(101.0, ma);

        assert_eq!(trend.direction, None);
        assert_eq!(trend.strength, None);
    }

    #[test]
    fn test_trend_zero_average_guard() {
        let ma = averages(&[(20, 0.0)]);
        let trend = TrendReading::from_averages(0.0, ma);
        assert_eq!(trend.strength, Some(TrendStrength::Weak));
    }

    #[test]
    fn test_rsi_classification() {
        let reading = RsiReading::from_value(75.0);
        assert_eq!(reading.signal, RsiSignal::Overbought);
        assert_eq!(reading.trend, RsiTrend::Bullish);

        let reading = RsiReading::from_value(25.0);
        assert_eq!(reading.signal, RsiSignal::Oversold);
        assert_eq!(reading.trend, RsiTrend::Bearish);

        // Boundaries are exclusive
        let reading = RsiReading::from_value(70.0);
        assert_eq!(reading.signal, RsiSignal::Neutral);
        let reading = RsiReading::from_value(50.0);
        assert_eq!(reading.trend, RsiTrend::Bearish);

        let reading = RsiReading::from_value(f64::NAN);
        assert!(!reading.is_available());
        assert_eq!(reading.signal, RsiSignal::Neutral);
        assert_eq!(reading.trend, RsiTrend::Neutral);
    }

    #[test]
    fn test_crossover_classification() {
        assert_eq!(Crossover::from_histogram(-0.5, 0.3), Some(Crossover::Bullish));
        assert_eq!(Crossover::from_histogram(0.5, -0.3), Some(Crossover::Bearish));
        assert_eq!(Crossover::from_histogram(0.5, 0.3), Some(Crossover::NoCrossover));
        assert_eq!(Crossover::from_histogram(0.0, 0.3), Some(Crossover::NoCrossover));
        assert_eq!(Crossover::from_histogram(f64::NAN, 0.3), None);
    }

    #[test]
    fn test_bollinger_position() {
        let bands = BollingerOutput {
            upper: 110.0,
            middle: 100.0,
            lower: 90.0,
            bandwidth: 0.2,
            percent_b: 0.5,
        };
        assert_eq!(
            BollingerReading::from_output(111.0, &bands).position,
            Some(BandPosition::Upper)
        );
        assert_eq!(
            BollingerReading::from_output(110.0, &bands).position,
            Some(BandPosition::Middle)
        );
        assert_eq!(
            BollingerReading::from_output(89.0, &bands).position,
            Some(BandPosition::Lower)
        );
        assert_eq!(
            BollingerReading::from_output(100.0, &BollingerOutput::undefined()).position,
            None
        );
    }

    #[test]
    fn test_serialized_labels() {
        let json = serde_json::to_value(Crossover::NoCrossover).unwrap();
        assert_eq!(json, "none");
        let json = serde_json::to_value(RsiSignal::Overbought).unwrap();
        assert_eq!(json, "overbought");
    }

    #[test]
    fn test_moving_averages_serialize_as_ma_keys() {
        let ma = averages(&[(20, 101.5), (200, f64::NAN)]);
        let json = serde_json::to_value(&ma).unwrap();

        assert_eq!(json["ma20"], 101.5);
        assert!(json["ma200"].is_null());
    }
}
