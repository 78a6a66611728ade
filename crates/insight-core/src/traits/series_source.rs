//! Series source trait definitions.

use crate::error::DataError;
use crate::types::OhlcvPoint;
use async_trait::async_trait;

/// Trait for anything that can hand an OHLCV series to the engine.
///
/// Implementations own the retrieval concern (files, provider payloads).
/// The engine only ever sees the resulting slice.
#[async_trait]
pub trait SeriesSource: Send + Sync {
    /// Load the full series.
    ///
    /// # Returns
    /// Points in the order the source produced them. Callers that need
    /// ascending timestamps should prepare the series before computing.
    async fn load_series(&self) -> Result<Vec<OhlcvPoint>, DataError>;

    /// Get the source name, typically the symbol or file stem.
    fn name(&self) -> &str;
}
