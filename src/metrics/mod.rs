//! Operation counters for [`FrequencyTable`](crate::FrequencyTable).
//!
//! Enabled with the `metrics` feature. Recording, snapshotting and export are
//! split across three traits:
//!
//! - [`traits::TableMetricsRecorder`] is written by the table on every `add`.
//! - [`traits::MetricsSnapshotProvider`] copies counters plus gauges out.
//! - [`traits::MetricsExporter`] publishes a snapshot, e.g. through
//!   [`exporter::PrometheusTextExporter`].
//!
//! ```
//! use stream_summary::FrequencyTable;
//! use stream_summary::metrics::traits::MetricsSnapshotProvider;
//!
//! let mut table = FrequencyTable::new(2);
//! table.add("a");
//! table.add("a");
//! table.add("b");
//! table.add("c");
//!
//! let snap = table.snapshot();
//! assert_eq!(snap.add_calls, 4);
//! assert_eq!(snap.promotions, 1);
//! assert_eq!(snap.admissions, 2);
//! assert_eq!(snap.replacements, 1);
//! ```

pub mod cell;
pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;
