use crate::metrics::cell::MetricsCell;
use crate::metrics::traits::{MetricsReset, TableMetricsReadRecorder, TableMetricsRecorder};

/// Live counters owned by a [`FrequencyTable`](crate::FrequencyTable).
#[derive(Debug, Default)]
pub struct TableMetrics {
    pub add_calls: u64,
    pub promotions: u64,
    pub admissions: u64,
    pub replacements: u64,
    pub buckets_created: u64,
    pub buckets_dropped: u64,
    pub clears: u64,
    pub lookup_calls: MetricsCell,
    pub lookup_hits: MetricsCell,
}

impl TableMetricsRecorder for TableMetrics {
    fn record_add_call(&mut self) {
        self.add_calls += 1;
    }

    fn record_promotion(&mut self) {
        self.promotions += 1;
    }

    fn record_admission(&mut self) {
        self.admissions += 1;
    }

    fn record_replacement(&mut self) {
        self.replacements += 1;
    }

    fn record_bucket_created(&mut self) {
        self.buckets_created += 1;
    }

    fn record_bucket_dropped(&mut self) {
        self.buckets_dropped += 1;
    }

    fn record_clear(&mut self) {
        self.clears += 1;
    }
}

impl TableMetricsReadRecorder for TableMetrics {
    fn record_lookup_call(&self) {
        self.lookup_calls.incr();
    }

    fn record_lookup_hit(&self) {
        self.lookup_hits.incr();
    }
}

impl MetricsReset for TableMetrics {
    fn reset_metrics(&mut self) {
        *self = Self::default();
    }
}
