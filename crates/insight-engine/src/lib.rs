//! Composite technical indicator engine.
//!
//! Turns an ordered OHLCV series into an [`IndicatorResult`]: trend, RSI,
//! MACD, Bollinger Bands, moving averages and support/resistance. The engine
//! is a pure function of its input and parameters; it performs no I/O.
//!
//! ```
//! use insight_core::OhlcvPoint;
//! use insight_engine::IndicatorEngine;
//!
//! let series: Vec<OhlcvPoint> = (0..30)
//!     .map(|i| {
//!         let close = 100.0 + i as f64;
//!         OhlcvPoint::new(i * 86_400_000, close, close + 1.0, close - 1.0, close, 1.0)
//!     })
//!     .collect();
//!
//! let result = IndicatorEngine::default().analyze(&series).unwrap();
//! assert_eq!(result.rsi.unwrap().value, 100.0);
//! ```

mod engine;
mod params;
mod reading;

pub use engine::IndicatorEngine;
pub use params::IndicatorParameters;
pub use reading::{
    BandPosition, BollingerReading, Crossover, IndicatorResult, MacdReading, MovingAverages,
    RsiReading, RsiSignal, RsiTrend, SupportResistanceReading, TrendDirection, TrendReading,
    TrendStrength, RSI_OVERBOUGHT, RSI_OVERSOLD, STRONG_TREND_THRESHOLD,
};
