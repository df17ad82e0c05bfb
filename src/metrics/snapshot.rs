/// Point-in-time copy of a table's counters and gauges.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TableMetricsSnapshot {
    pub add_calls: u64,
    pub promotions: u64,
    pub admissions: u64,
    pub replacements: u64,
    pub buckets_created: u64,
    pub buckets_dropped: u64,

    pub lookup_calls: u64,
    pub lookup_hits: u64,

    // gauges captured at snapshot time
    pub tracked_len: usize,
    pub capacity: usize,
    pub bucket_count: usize,
    pub min_count: u64, // 0 when empty
    pub observed: u64,
}

impl TableMetricsSnapshot {
    /// Fraction of `add` calls that hit an already tracked item.
    pub fn promotion_ratio(&self) -> f64 {
        if self.add_calls == 0 {
            0.0
        } else {
            self.promotions as f64 / self.add_calls as f64
        }
    }
}
