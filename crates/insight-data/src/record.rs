//! Shared record checks.

use insight_core::error::DataError;

/// Unwrap a required field, naming the record and field on failure.
pub(crate) fn require<T>(
    value: Option<T>,
    index: usize,
    field: &'static str,
) -> Result<T, DataError> {
    value.ok_or(DataError::Validation { index, field })
}
