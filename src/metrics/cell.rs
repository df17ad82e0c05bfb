use std::sync::atomic::{AtomicU64, Ordering};

/// A counter that can be bumped through `&self`.
///
/// Read-side table operations (`exists`, `estimate`) only borrow the table,
/// and the concurrent wrapper lets several readers in at once, so these
/// counters are relaxed atomics rather than plain cells.
#[repr(transparent)]
#[derive(Debug, Default)]
pub struct MetricsCell(AtomicU64);

impl MetricsCell {
    #[inline]
    pub fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    #[inline]
    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn incr(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn reset(&self) {
        self.0.store(0, Ordering::Relaxed);
    }
}
