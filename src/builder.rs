//! Validated construction of frequency tables.
//!
//! Collects the sizing knobs in one place and checks them once, so callers
//! taking capacities from configuration get a [`ConfigError`] instead of a
//! panic.
//!
//! ## Example
//!
//! ```rust
//! use stream_summary::builder::FrequencyTableBuilder;
//!
//! let mut table = FrequencyTableBuilder::new(100)
//!     .bucket_hint(64)
//!     .try_build::<String>()
//!     .unwrap();
//! table.add("hello".to_string());
//! assert!(table.exists_borrowed("hello"));
//!
//! assert!(FrequencyTableBuilder::new(0).try_build::<String>().is_err());
//! ```

use std::hash::Hash;

use crate::error::ConfigError;
use crate::summary::{DEFAULT_BUCKET_PREALLOC, FrequencyTable};

/// Builder for [`FrequencyTable`] (and the concurrent wrapper).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrequencyTableBuilder {
    capacity: usize,
    bucket_hint: usize,
}

impl FrequencyTableBuilder {
    /// Starts a builder for a table tracking at most `capacity` items.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            bucket_hint: DEFAULT_BUCKET_PREALLOC,
        }
    }

    /// Expected number of distinct counts alive at once. Only sizes the value
    /// index up front; it never limits the table.
    pub fn bucket_hint(mut self, bucket_hint: usize) -> Self {
        self.bucket_hint = bucket_hint;
        self
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::new("capacity must be > 0"));
        }
        if self.bucket_hint == 0 {
            return Err(ConfigError::new("bucket_hint must be > 0"));
        }
        Ok(())
    }

    /// Builds the table, or reports which parameter is invalid.
    pub fn try_build<K>(self) -> Result<FrequencyTable<K>, ConfigError>
    where
        K: Eq + Hash + Clone,
    {
        self.validate()?;
        Ok(FrequencyTable::with_bucket_hint(
            self.capacity,
            self.bucket_hint,
        ))
    }

    /// Builds the table.
    ///
    /// # Panics
    ///
    /// Panics if the configuration is invalid.
    pub fn build<K>(self) -> FrequencyTable<K>
    where
        K: Eq + Hash + Clone,
    {
        match self.try_build() {
            Ok(table) => table,
            Err(err) => panic!("invalid frequency table configuration: {err}"),
        }
    }

    /// Builds a lock-wrapped table.
    #[cfg(feature = "concurrency")]
    pub fn try_build_concurrent<K>(
        self,
    ) -> Result<crate::summary::ConcurrentFrequencyTable<K>, ConfigError>
    where
        K: Eq + Hash + Clone,
    {
        self.try_build()
            .map(crate::summary::ConcurrentFrequencyTable::from_table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let builder = FrequencyTableBuilder::new(10);
        assert_eq!(builder.capacity(), 10);
        let table: FrequencyTable<u32> = builder.build();
        assert_eq!(table.capacity(), 10);
        assert!(table.is_empty());
    }

    #[test]
    fn builder_rejects_zero_capacity() {
        let err = FrequencyTableBuilder::new(0)
            .try_build::<u32>()
            .unwrap_err();
        assert!(err.message().contains("capacity"));
    }

    #[test]
    fn builder_rejects_zero_bucket_hint() {
        let err = FrequencyTableBuilder::new(4)
            .bucket_hint(0)
            .try_build::<u32>()
            .unwrap_err();
        assert!(err.message().contains("bucket_hint"));
    }

    #[test]
    #[should_panic(expected = "invalid frequency table configuration")]
    fn builder_build_panics_on_invalid() {
        let _ = FrequencyTableBuilder::new(0).build::<u32>();
    }

    #[cfg(feature = "concurrency")]
    #[test]
    fn builder_concurrent() {
        let table = FrequencyTableBuilder::new(2)
            .try_build_concurrent::<&str>()
            .unwrap();
        table.add("a");
        assert!(table.exists(&"a"));
    }
}
