//! Error types for the stream-summary library.
//!
//! ## Key Components
//!
//! - [`InvariantError`]: Returned when the table's indices disagree with each
//!   other (a bucket is asked to drop an item it does not hold, the minimum
//!   bucket is missing on eviction, ...). This is a defect signal, never a
//!   condition callers are expected to recover from.
//! - [`ConfigError`]: Returned when table configuration is invalid
//!   (e.g. zero capacity).
//!
//! ## Example Usage
//!
//! ```
//! use stream_summary::error::ConfigError;
//! use stream_summary::FrequencyTable;
//!
//! let table: Result<FrequencyTable<String>, ConfigError> = FrequencyTable::try_new(16);
//! assert!(table.is_ok());
//!
//! // Zero capacity is caught without panicking
//! let bad = FrequencyTable::<String>::try_new(0);
//! assert!(bad.is_err());
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal table invariants are violated.
///
/// Produced by [`FrequencyTable::try_add`](crate::FrequencyTable::try_add),
/// [`FrequencyTable::check_invariants`](crate::FrequencyTable::check_invariants)
/// and the [`Bucket`](crate::ds::Bucket) list operations. Carries a
/// human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when table configuration parameters are invalid.
///
/// Produced by [`FrequencyTable::try_new`](crate::FrequencyTable::try_new)
/// and [`FrequencyTableBuilder::try_build`](crate::builder::FrequencyTableBuilder::try_build).
///
/// # Example
///
/// ```
/// use stream_summary::FrequencyTable;
///
/// let err = FrequencyTable::<u64>::try_new(0).unwrap_err();
/// assert!(err.to_string().contains("capacity"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
