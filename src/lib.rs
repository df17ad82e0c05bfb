//! stream-summary: Space-Saving frequency tables for unbounded streams.
//!
//! [`FrequencyTable`] keeps the `capacity` most frequent items seen so far in
//! O(capacity) memory with O(1) updates. Estimates never undercount; an item's
//! overcount is bounded by the count of the item it replaced, reported by
//! [`FrequencyTable::error_bound`].
//!
//! ```
//! use stream_summary::FrequencyTable;
//!
//! let mut table = FrequencyTable::new(2);
//! for ip in ["10.0.0.1", "10.0.0.2", "10.0.0.1", "10.0.0.3", "10.0.0.1"] {
//!     table.add(ip);
//! }
//! assert_eq!(table.top_k(1), vec![("10.0.0.1", 3)]);
//! ```
//!
//! ## Feature Flags
//!
//! - `concurrency`: [`ConcurrentFrequencyTable`], a `parking_lot::RwLock`
//!   around one table.
//! - `metrics`: operation counters, snapshots and a Prometheus text exporter.

pub mod builder;
pub mod ds;
pub mod error;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
pub mod summary;

pub use builder::FrequencyTableBuilder;
pub use error::{ConfigError, InvariantError};
#[cfg(feature = "concurrency")]
pub use summary::ConcurrentFrequencyTable;
pub use summary::{AddOutcome, FrequencyTable};
