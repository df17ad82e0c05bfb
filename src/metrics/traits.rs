//! # Metrics Traits
//!
//! ```text
//!   ┌──────────────────────────────┐
//!   │    TableMetricsRecorder      │  written by FrequencyTable::add
//!   │ add/promotion/admission/     │
//!   │ replacement/bucket churn     │
//!   └──────────────┬───────────────┘
//!                  │
//!   ┌──────────────┴───────────────┐    ┌──────────────────────────────┐
//!   │ MetricsSnapshotProvider<S>   │    │ MetricsExporter<S>           │
//!   │ (bench/test)                 │    │ (production monitoring)      │
//!   └──────────────────────────────┘    └──────────────────────────────┘
//! ```
//!
//! Recorders only write counters; providers only read; exporters only publish.

/// Counters written on the mutation path.
pub trait TableMetricsRecorder {
    fn record_add_call(&mut self);
    /// A tracked item moved to the next count.
    fn record_promotion(&mut self);
    /// An untracked item took a free slot.
    fn record_admission(&mut self);
    /// An untracked item replaced the oldest minimum-count item.
    fn record_replacement(&mut self);
    fn record_bucket_created(&mut self);
    fn record_bucket_dropped(&mut self);
    fn record_clear(&mut self);
}

/// Counters written on `&self` lookups (interior mutability).
pub trait TableMetricsReadRecorder {
    fn record_lookup_call(&self);
    fn record_lookup_hit(&self);
}

/// Snapshot provider for bench/testing.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Reset metrics between tests or benchmark iterations.
pub trait MetricsReset {
    fn reset_metrics(&mut self);
}

/// Export/publish metrics to production monitoring backends.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
