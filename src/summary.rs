//! Space-Saving frequency table.
//!
//! Tracks at most `capacity` distinct items from an unbounded stream, each with
//! an estimated count that never undercounts and overcounts by at most the count
//! of the item it replaced. Every update is O(1) amortized.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                         FrequencyTable<K> Layout                            │
//! │                                                                             │
//! │   ┌─────────────────────────────┐   ┌─────────────────────────────────┐     │
//! │   │  index: FxHashMap<K,SlotId> │   │  entries: SlotArena<Member<K>>  │     │
//! │   │                             │   │                                 │     │
//! │   │   "a"  ─────────────────────┼───┼──► id_0 { count:2, error:0 }    │     │
//! │   │   "c"  ─────────────────────┼───┼──► id_2 { count:1, error:0 }    │     │
//! │   │   "d"  ─────────────────────┼───┼──► id_1 { count:2, error:1 }    │     │
//! │   └─────────────────────────────┘   └─────────────────────────────────┘     │
//! │                                                                             │
//! │   ┌───────────────────────────────────────────────────────────────────┐     │
//! │   │  buckets: FxHashMap<u64, Bucket>  (count → arrival-ordered list)  │     │
//! │   │                                                                   │     │
//! │   │  min_value = 1                                                    │     │
//! │   │       │                                                           │     │
//! │   │       ▼                                                           │     │
//! │   │  1: head ──► [id_2] ◄── tail                                      │     │
//! │   │  2: head ──► [id_0] ◄──► [id_1] ◄── tail                          │     │
//! │   │     oldest (evict first)     newest                               │     │
//! │   │                                                                   │     │
//! │   │  Chain: 1 ──higher──► 2,  2 ──lower──► 1                          │     │
//! │   └───────────────────────────────────────────────────────────────────┘     │
//! └─────────────────────────────────────────────────────────────────────────────┘
//!
//! add(x), x tracked at v        add(x), untracked, full
//! ─────────────────────         ───────────────────────
//!   1. unlink x from bucket v     1. victim = oldest of bucket min_value
//!   2. bucket v empty → drop,     2. unlink + free victim, drop bucket
//!      relink chain, fix min         if empty, fix min
//!   3. find-or-create v+1         3. find-or-create min_value+1
//!      next to v in the chain     4. append x there with error = min_value
//!   4. append x as newest
//! ```
//!
//! ## Operations
//!
//! | Operation        | Time     | Notes                                     |
//! |------------------|----------|-------------------------------------------|
//! | `add`            | O(1)     | Promote, admit, or replace the minimum    |
//! | `exists`         | O(1)     | Index lookup                              |
//! | `estimate`       | O(1)     | Upper bound on the true count             |
//! | `tracked_items`  | O(n)     | Owned snapshot, unspecified order         |
//! | `top_k`          | O(n)     | Walks the bucket chain from the top       |
//! | `dump`           | O(n)     | One `tracing` event per bucket            |
//!
//! ## Minimum tracking
//!
//! Live buckets form a chain ordered by value. When a bucket empties it is
//! unlinked and the minimum moves to its `higher` neighbour, so the minimum is
//! always the smallest live value even when the chain has gaps (e.g. live
//! counts `{3}` after every count-1 item was promoted twice).
//!
//! ## Example Usage
//!
//! ```
//! use stream_summary::FrequencyTable;
//!
//! let mut table = FrequencyTable::new(3);
//! table.add("a");
//! table.add("b");
//! table.add("c");
//! table.add("a");
//!
//! // Full: "d" replaces "b", the oldest item at the minimum count.
//! table.add("d");
//! assert!(!table.exists(&"b"));
//! assert_eq!(table.estimate(&"d"), Some(2));
//! assert_eq!(table.error_bound(&"d"), Some(1));
//! assert_eq!(table.len(), 3);
//! ```
//!
//! ## Thread Safety
//!
//! - [`FrequencyTable`]: Not thread-safe; `add` is the only mutator.
//! - [`ConcurrentFrequencyTable`]: one `RwLock` around the whole table
//!   (feature `concurrency`).

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::bucket::{Bucket, Member};
use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::TableMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::TableMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    MetricsReset, MetricsSnapshotProvider, TableMetricsReadRecorder, TableMetricsRecorder,
};

/// Default bucket pre-allocation.
/// Most streams keep the bulk of tracked items within a few dozen counts of
/// the minimum, so 32 distinct values covers the common case.
pub const DEFAULT_BUCKET_PREALLOC: usize = 32;

/// `tracing` target used by [`FrequencyTable::dump`].
pub const DUMP_TARGET: &str = "stream_summary::dump";

/// What a single [`FrequencyTable::try_add`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome<K> {
    /// The item was already tracked; its estimate is now `count`.
    Promoted { count: u64 },
    /// The item took a free slot at count 1.
    Admitted,
    /// The table was full: `evicted` (estimated at `evicted_count`) made room
    /// and the new item starts at `evicted_count + 1`.
    Replaced { evicted: K, evicted_count: u64 },
}

/// Space-Saving summary over a stream of `K`.
///
/// # Type Parameters
///
/// - `K`: Item type, must be `Eq + Hash + Clone`. Rendering via
///   [`dump`](Self::dump) or `Display` additionally needs `K: Display`.
///
/// # Example
///
/// ```
/// use stream_summary::FrequencyTable;
///
/// let mut table = FrequencyTable::new(3);
/// for word in "the cat saw the dog and the bird".split(' ') {
///     table.add(word.to_string());
/// }
///
/// assert_eq!(table.len(), 3);
/// assert_eq!(table.observed(), 8);
/// let (top, count) = table.top_k(1).remove(0);
/// assert_eq!(top, "the");
/// assert_eq!(count, 3);
/// assert_eq!(table.error_bound(&"the".to_string()), Some(0));
/// ```
pub struct FrequencyTable<K> {
    capacity: usize,
    entries: SlotArena<Member<K>>,
    index: FxHashMap<K, SlotId>,
    buckets: FxHashMap<u64, Bucket>,
    min_value: u64,
    observed: u64,
    #[cfg(feature = "metrics")]
    metrics: TableMetrics,
}

impl<K> FrequencyTable<K>
where
    K: Eq + Hash + Clone,
{
    /// Creates a table tracking at most `capacity` items.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0. Use [`try_new`](Self::try_new) for
    /// user-supplied capacities.
    pub fn new(capacity: usize) -> Self {
        Self::with_bucket_hint(capacity, DEFAULT_BUCKET_PREALLOC)
    }

    /// Creates a table, rejecting a zero capacity.
    ///
    /// ```
    /// use stream_summary::FrequencyTable;
    ///
    /// assert!(FrequencyTable::<u32>::try_new(8).is_ok());
    /// assert!(FrequencyTable::<u32>::try_new(0).is_err());
    /// ```
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        validate_capacity(capacity)?;
        Ok(Self::with_bucket_hint(capacity, DEFAULT_BUCKET_PREALLOC))
    }

    /// Creates a table with a custom pre-allocation for the value index.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0.
    pub fn with_bucket_hint(capacity: usize, bucket_hint: usize) -> Self {
        assert!(capacity > 0, "capacity must be > 0");
        Self {
            capacity,
            entries: SlotArena::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            buckets: FxHashMap::with_capacity_and_hasher(
                bucket_hint.min(capacity),
                Default::default(),
            ),
            min_value: 0,
            observed: 0,
            #[cfg(feature = "metrics")]
            metrics: TableMetrics::default(),
        }
    }

    /// Maximum number of items tracked at once.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of items currently tracked.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Total number of `add` calls since creation or the last `clear`.
    pub fn observed(&self) -> u64 {
        self.observed
    }

    /// Number of distinct counts currently represented.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Smallest estimated count among tracked items.
    pub fn min_count(&self) -> Option<u64> {
        (self.min_value != 0).then_some(self.min_value)
    }

    /// Records one occurrence of `item`.
    ///
    /// # Panics
    ///
    /// Panics if the table's indices are inconsistent. That can only follow
    /// from a defect in this crate; the failure is logged through `tracing`
    /// before the panic. [`try_add`](Self::try_add) surfaces it as an error
    /// instead.
    pub fn add(&mut self, item: K) {
        if let Err(err) = self.try_add(item) {
            tracing::error!(error = %err, "frequency table invariant violated");
            panic!("frequency table invariant violated: {err}");
        }
    }

    /// Records one occurrence of `item` and reports what happened.
    ///
    /// Returns `Err` only on internal inconsistency; the table must not be
    /// used further after that.
    ///
    /// ```
    /// use stream_summary::{AddOutcome, FrequencyTable};
    ///
    /// let mut table = FrequencyTable::new(1);
    /// assert_eq!(table.try_add("a"), Ok(AddOutcome::Admitted));
    /// assert_eq!(table.try_add("a"), Ok(AddOutcome::Promoted { count: 2 }));
    /// assert_eq!(
    ///     table.try_add("b"),
    ///     Ok(AddOutcome::Replaced { evicted: "a", evicted_count: 2 })
    /// );
    /// assert_eq!(table.estimate(&"b"), Some(3));
    /// ```
    pub fn try_add(&mut self, item: K) -> Result<AddOutcome<K>, InvariantError> {
        self.observed = self.observed.saturating_add(1);
        #[cfg(feature = "metrics")]
        self.metrics.record_add_call();

        if let Some(&id) = self.index.get(&item) {
            return self.promote(id);
        }
        if self.index.len() < self.capacity {
            return self.admit(item);
        }
        self.replace_min(item)
    }

    /// Returns `true` if `item` is currently tracked.
    #[inline]
    pub fn exists(&self, item: &K) -> bool {
        self.lookup(item).is_some()
    }

    /// Borrowed-key form of [`exists`](Self::exists).
    ///
    /// ```
    /// use stream_summary::FrequencyTable;
    ///
    /// let mut table = FrequencyTable::new(4);
    /// table.add("hello".to_string());
    /// assert!(table.exists_borrowed("hello"));
    /// ```
    pub fn exists_borrowed<Q>(&self, item: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.lookup(item).is_some()
    }

    /// Estimated count of `item`; never below its true count.
    #[inline]
    pub fn estimate(&self, item: &K) -> Option<u64> {
        self.lookup(item).map(|node| node.count)
    }

    /// Borrowed-key form of [`estimate`](Self::estimate).
    pub fn estimate_borrowed<Q>(&self, item: &Q) -> Option<u64>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.lookup(item).map(|node| node.count)
    }

    /// Maximum overestimation of `item`: the count of the item it replaced,
    /// or 0 if it was admitted into a free slot.
    pub fn error_bound(&self, item: &K) -> Option<u64> {
        self.lookup(item).map(|node| node.error)
    }

    /// Count `item` is guaranteed to have reached (`estimate - error`).
    ///
    /// ```
    /// use stream_summary::FrequencyTable;
    ///
    /// let mut table = FrequencyTable::new(1);
    /// table.add("a");
    /// table.add("b"); // replaces "a"
    /// table.add("b");
    /// assert_eq!(table.estimate(&"b"), Some(3));
    /// assert_eq!(table.guaranteed(&"b"), Some(2));
    /// ```
    pub fn guaranteed(&self, item: &K) -> Option<u64> {
        self.lookup(item).map(|node| node.count - node.error)
    }

    /// Snapshot of every tracked item, in unspecified order.
    pub fn tracked_items(&self) -> Vec<K> {
        self.index.keys().cloned().collect()
    }

    /// Iterates live buckets from the lowest count upward.
    pub fn iter_buckets(&self) -> BucketChainIter<'_> {
        BucketChainIter {
            buckets: &self.buckets,
            current: self.min_count(),
        }
    }

    /// Items estimated at exactly `value`, oldest first.
    pub fn iter_bucket(&self, value: u64) -> impl Iterator<Item = &K> + '_ {
        self.buckets
            .get(&value)
            .into_iter()
            .flat_map(|bucket| bucket.members(&self.entries))
            .map(|(_, node)| &node.key)
    }

    /// Up to `k` tracked items with the highest estimates, highest first.
    ///
    /// Items sharing a count are listed oldest first.
    pub fn top_k(&self, k: usize) -> Vec<(K, u64)> {
        let k = k.min(self.len());
        let mut out = Vec::with_capacity(k);
        let chain: Vec<&Bucket> = self.iter_buckets().collect();
        for bucket in chain.into_iter().rev() {
            for (_, node) in bucket.members(&self.entries) {
                if out.len() == k {
                    return out;
                }
                out.push((node.key.clone(), node.count));
            }
        }
        out
    }

    /// Tracked items whose estimate exceeds `phi * observed()`.
    ///
    /// With `capacity >= 1/phi`, every item whose true frequency exceeds
    /// `phi * observed()` is included. Ordered like [`top_k`](Self::top_k).
    ///
    /// ```
    /// use stream_summary::FrequencyTable;
    ///
    /// let mut table = FrequencyTable::new(10);
    /// for _ in 0..50 { table.add("hot"); }
    /// for i in 0..50 { table.add(if i % 2 == 0 { "warm" } else { "cold" }); }
    ///
    /// let hitters = table.heavy_hitters(0.3);
    /// assert_eq!(hitters, vec![("hot", 50)]);
    /// ```
    pub fn heavy_hitters(&self, phi: f64) -> Vec<(K, u64)> {
        let threshold = phi * self.observed as f64;
        let mut out = Vec::new();
        let chain: Vec<&Bucket> = self.iter_buckets().collect();
        for bucket in chain.into_iter().rev() {
            if (bucket.value() as f64) <= threshold {
                break;
            }
            out.extend(
                bucket
                    .members(&self.entries)
                    .map(|(_, node)| (node.key.clone(), node.count)),
            );
        }
        out
    }

    /// Drops every tracked item and resets the observed counter.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
        self.buckets.clear();
        self.min_value = 0;
        self.observed = 0;
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();
    }

    /// Clears all state and releases spare storage.
    pub fn clear_shrink(&mut self) {
        self.clear();
        self.entries.shrink_to_fit();
        self.index.shrink_to_fit();
        self.buckets.shrink_to_fit();
    }

    /// Returns an approximate memory footprint in bytes.
    pub fn approx_bytes(&self) -> usize {
        std::mem::size_of::<Self>()
            + self.entries.capacity() * std::mem::size_of::<Option<Member<K>>>()
            + self.index.capacity() * std::mem::size_of::<(K, SlotId)>()
            + self.buckets.capacity() * std::mem::size_of::<(u64, Bucket)>()
    }

    /// Verifies every structural invariant.
    ///
    /// O(n). Checks the capacity bound, that the index, arena and buckets
    /// agree, that no bucket is empty, that the bucket chain is ascending and
    /// starts at the minimum, and that estimates sum to `observed()`.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.index.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "{} items tracked over capacity {}",
                self.index.len(),
                self.capacity
            )));
        }
        if self.index.len() != self.entries.len() {
            return Err(InvariantError::new(format!(
                "index holds {} items but arena holds {}",
                self.index.len(),
                self.entries.len()
            )));
        }
        if self.is_empty() {
            if !self.buckets.is_empty() || self.min_value != 0 {
                return Err(InvariantError::new("empty table still has buckets"));
            }
            return Ok(());
        }

        let mut walked_buckets = 0usize;
        let mut walked_items = 0usize;
        let mut mass: u128 = 0;
        let mut previous: Option<u64> = None;
        let mut current = Some(self.min_value);
        while let Some(value) = current {
            let bucket = self.buckets.get(&value).ok_or_else(|| {
                InvariantError::new(format!("chain names missing bucket {}", value))
            })?;
            if bucket.value() != value || value == 0 {
                return Err(InvariantError::new(format!(
                    "bucket keyed {} carries value {}",
                    value,
                    bucket.value()
                )));
            }
            if bucket.lower() != previous {
                return Err(InvariantError::new(format!(
                    "bucket {} links lower {:?}, expected {:?}",
                    value,
                    bucket.lower(),
                    previous
                )));
            }
            if bucket.is_empty() {
                return Err(InvariantError::new(format!("bucket {} is empty", value)));
            }

            let mut members = 0usize;
            for (id, node) in bucket.members(&self.entries) {
                if node.count != value {
                    return Err(InvariantError::new(format!(
                        "slot {} in bucket {} carries count {}",
                        id.index(),
                        value,
                        node.count
                    )));
                }
                if node.error >= node.count {
                    return Err(InvariantError::new(format!(
                        "slot {} error {} not below count {}",
                        id.index(),
                        node.error,
                        node.count
                    )));
                }
                if self.index.get(&node.key) != Some(&id) {
                    return Err(InvariantError::new(format!(
                        "slot {} in bucket {} is not indexed",
                        id.index(),
                        value
                    )));
                }
                members += 1;
                if members > bucket.len() {
                    break;
                }
            }
            if members != bucket.len() {
                return Err(InvariantError::new(format!(
                    "bucket {} reports {} members, links {}",
                    value,
                    bucket.len(),
                    members
                )));
            }

            walked_buckets += 1;
            walked_items += members;
            mass += u128::from(value) * members as u128;
            previous = Some(value);
            current = bucket.higher();
            if current.is_some_and(|next| next <= value) {
                return Err(InvariantError::new(format!(
                    "chain not ascending after bucket {}",
                    value
                )));
            }
        }

        if walked_buckets != self.buckets.len() {
            return Err(InvariantError::new(format!(
                "chain reaches {} of {} buckets",
                walked_buckets,
                self.buckets.len()
            )));
        }
        if walked_items != self.index.len() {
            return Err(InvariantError::new(format!(
                "buckets link {} of {} tracked items",
                walked_items,
                self.index.len()
            )));
        }
        if self.observed < u64::MAX && mass != u128::from(self.observed) {
            return Err(InvariantError::new(format!(
                "estimates sum to {} but {} items were observed",
                mass, self.observed
            )));
        }
        Ok(())
    }

    #[cfg(any(test, debug_assertions))]
    /// Asserts [`check_invariants`](Self::check_invariants).
    pub fn debug_validate_invariants(&self) {
        if let Err(err) = self.check_invariants() {
            panic!("frequency table invariant violated: {err}");
        }
    }

    fn lookup<Q>(&self, item: &Q) -> Option<&Member<K>>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        #[cfg(feature = "metrics")]
        self.metrics.record_lookup_call();
        let node = self.entries.get(*self.index.get(item)?);
        #[cfg(feature = "metrics")]
        if node.is_some() {
            self.metrics.record_lookup_hit();
        }
        node
    }

    fn promote(&mut self, id: SlotId) -> Result<AddOutcome<K>, InvariantError> {
        let value = self.entries.get(id).map(|node| node.count).ok_or_else(|| {
            InvariantError::new(format!("indexed slot {} is vacant", id.index()))
        })?;
        // Counts saturate; a node at u64::MAX is re-queued at the same value.
        let next = value.saturating_add(1);
        let (lower, higher) = self.detach(value, id)?;
        self.attach(next, lower, higher, id)?;
        #[cfg(feature = "metrics")]
        self.metrics.record_promotion();
        Ok(AddOutcome::Promoted { count: next })
    }

    fn admit(&mut self, item: K) -> Result<AddOutcome<K>, InvariantError> {
        let id = self.entries.insert(Member::new(item.clone(), 0));
        self.index.insert(item, id);
        // Count 1 is always the bottom of the chain.
        let higher = self.min_count();
        self.attach(1, None, higher, id)?;
        #[cfg(feature = "metrics")]
        self.metrics.record_admission();
        Ok(AddOutcome::Admitted)
    }

    fn replace_min(&mut self, item: K) -> Result<AddOutcome<K>, InvariantError> {
        let value = self.min_value;
        let victim = self
            .buckets
            .get(&value)
            .ok_or_else(|| InvariantError::new(format!("minimum bucket {} is missing", value)))?
            .oldest_member()?;
        let (lower, higher) = self.detach(value, victim)?;
        let evicted = self.entries.remove(victim).ok_or_else(|| {
            InvariantError::new(format!("eviction victim slot {} is vacant", victim.index()))
        })?;
        self.index.remove(&evicted.key);

        let id = self.entries.insert(Member::new(item.clone(), value));
        self.index.insert(item, id);
        self.attach(value.saturating_add(1), lower, higher, id)?;

        tracing::trace!(
            evicted_count = value,
            min_count = self.min_value,
            "replaced minimum-count item"
        );
        #[cfg(feature = "metrics")]
        self.metrics.record_replacement();
        Ok(AddOutcome::Replaced {
            evicted: evicted.key,
            evicted_count: value,
        })
    }

    /// Unlinks `id` from the bucket at `value`, dropping the bucket if it
    /// empties. Returns the chain neighbours a bucket for `value + 1` belongs
    /// between.
    fn detach(
        &mut self,
        value: u64,
        id: SlotId,
    ) -> Result<(Option<u64>, Option<u64>), InvariantError> {
        let bucket = self
            .buckets
            .get_mut(&value)
            .ok_or_else(|| InvariantError::new(format!("bucket {} is missing", value)))?;
        bucket.remove(&mut self.entries, id)?;
        let (lower, higher) = (bucket.lower(), bucket.higher());
        if bucket.is_empty() {
            self.drop_bucket(value, lower, higher);
            Ok((lower, higher))
        } else {
            Ok((Some(value), higher))
        }
    }

    /// Appends `id` to the bucket at `value`, creating it between `lower`
    /// and `higher` if it is not live.
    fn attach(
        &mut self,
        value: u64,
        lower: Option<u64>,
        higher: Option<u64>,
        id: SlotId,
    ) -> Result<(), InvariantError> {
        if !self.buckets.contains_key(&value) {
            self.link_bucket(value, lower, higher);
        }
        let bucket = self
            .buckets
            .get_mut(&value)
            .ok_or_else(|| InvariantError::new(format!("bucket {} is missing", value)))?;
        bucket.insert(&mut self.entries, id)?;
        if self.min_value == 0 || value < self.min_value {
            self.min_value = value;
        }
        Ok(())
    }

    fn link_bucket(&mut self, value: u64, lower: Option<u64>, higher: Option<u64>) {
        self.buckets.insert(value, Bucket::new(value, lower, higher));
        if let Some(bucket) = lower.and_then(|lower| self.buckets.get_mut(&lower)) {
            bucket.set_higher(Some(value));
        }
        if let Some(bucket) = higher.and_then(|higher| self.buckets.get_mut(&higher)) {
            bucket.set_lower(Some(value));
        }
        #[cfg(feature = "metrics")]
        self.metrics.record_bucket_created();
    }

    fn drop_bucket(&mut self, value: u64, lower: Option<u64>, higher: Option<u64>) {
        if let Some(bucket) = lower.and_then(|lower| self.buckets.get_mut(&lower)) {
            bucket.set_higher(higher);
        }
        if let Some(bucket) = higher.and_then(|higher| self.buckets.get_mut(&higher)) {
            bucket.set_lower(lower);
        }
        self.buckets.remove(&value);
        if self.min_value == value {
            self.min_value = higher.unwrap_or(0);
        }
        #[cfg(feature = "metrics")]
        self.metrics.record_bucket_dropped();
    }
}

impl<K> FrequencyTable<K>
where
    K: Eq + Hash + Clone + fmt::Display,
{
    /// Writes every bucket to `tracing` at DEBUG under [`DUMP_TARGET`].
    ///
    /// One event per bucket, lowest count first, message
    /// `"<value>: <item1> <item2> ... "`. Nothing is printed unless a
    /// subscriber is installed.
    pub fn dump(&self) {
        let mut line = String::new();
        for bucket in self.iter_buckets() {
            line.clear();
            if self.write_bucket_line(&mut line, bucket).is_ok() {
                tracing::debug!(
                    target: DUMP_TARGET,
                    value = bucket.value(),
                    members = bucket.len(),
                    "{}",
                    line
                );
            }
        }
    }

    /// Writes the same lines as [`dump`](Self::dump) to `out`, newline
    /// terminated.
    ///
    /// ```
    /// use stream_summary::FrequencyTable;
    ///
    /// let mut table = FrequencyTable::new(3);
    /// table.add("a");
    /// table.add("b");
    /// table.add("a");
    ///
    /// let mut out = String::new();
    /// table.dump_to(&mut out).unwrap();
    /// assert_eq!(out, "1: b \n2: a \n");
    /// ```
    pub fn dump_to<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        for bucket in self.iter_buckets() {
            self.write_bucket_line(out, bucket)?;
            out.write_char('\n')?;
        }
        Ok(())
    }

    fn write_bucket_line<W: fmt::Write>(&self, out: &mut W, bucket: &Bucket) -> fmt::Result {
        write!(out, "{}: ", bucket.value())?;
        for (_, node) in bucket.members(&self.entries) {
            write!(out, "{} ", node.key)?;
        }
        Ok(())
    }
}

impl<K> fmt::Display for FrequencyTable<K>
where
    K: Eq + Hash + Clone + fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.dump_to(f)
    }
}

impl<K> fmt::Debug for FrequencyTable<K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrequencyTable")
            .field("capacity", &self.capacity)
            .field("len", &self.index.len())
            .field("buckets", &self.buckets.len())
            .field("min_value", &self.min_value)
            .field("observed", &self.observed)
            .finish()
    }
}

#[cfg(feature = "metrics")]
impl<K> FrequencyTable<K>
where
    K: Eq + Hash + Clone,
{
    pub fn metrics_snapshot(&self) -> TableMetricsSnapshot {
        TableMetricsSnapshot {
            add_calls: self.metrics.add_calls,
            promotions: self.metrics.promotions,
            admissions: self.metrics.admissions,
            replacements: self.metrics.replacements,
            buckets_created: self.metrics.buckets_created,
            buckets_dropped: self.metrics.buckets_dropped,
            lookup_calls: self.metrics.lookup_calls.get(),
            lookup_hits: self.metrics.lookup_hits.get(),
            tracked_len: self.len(),
            capacity: self.capacity,
            bucket_count: self.buckets.len(),
            min_count: self.min_value,
            observed: self.observed,
        }
    }

    pub fn reset_metrics(&mut self) {
        self.metrics.reset_metrics();
    }
}

#[cfg(feature = "metrics")]
impl<K> MetricsSnapshotProvider<TableMetricsSnapshot> for FrequencyTable<K>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> TableMetricsSnapshot {
        self.metrics_snapshot()
    }
}

/// Iterator over live buckets in ascending count order.
///
/// Created by [`FrequencyTable::iter_buckets`].
pub struct BucketChainIter<'a> {
    buckets: &'a FxHashMap<u64, Bucket>,
    current: Option<u64>,
}

impl<'a> Iterator for BucketChainIter<'a> {
    type Item = &'a Bucket;

    fn next(&mut self) -> Option<Self::Item> {
        let bucket = self.buckets.get(&self.current?)?;
        self.current = bucket.higher();
        Some(bucket)
    }
}

fn validate_capacity(capacity: usize) -> Result<(), ConfigError> {
    if capacity == 0 {
        return Err(ConfigError::new("capacity must be > 0"));
    }
    Ok(())
}

/// A [`FrequencyTable`] behind a single `RwLock`.
///
/// Every mutation touches both indices, so the whole table is the unit of
/// locking: `add` takes the write lock, lookups and snapshots the read lock.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use std::thread;
/// use stream_summary::ConcurrentFrequencyTable;
///
/// let table = Arc::new(ConcurrentFrequencyTable::new(8));
///
/// let handles: Vec<_> = (0..4).map(|_| {
///     let table = Arc::clone(&table);
///     thread::spawn(move || {
///         for _ in 0..25 {
///             table.add("shared");
///         }
///     })
/// }).collect();
///
/// for h in handles {
///     h.join().unwrap();
/// }
///
/// assert_eq!(table.estimate(&"shared"), Some(100));
/// ```
#[cfg(feature = "concurrency")]
#[derive(Debug)]
pub struct ConcurrentFrequencyTable<K> {
    inner: parking_lot::RwLock<FrequencyTable<K>>,
}

#[cfg(feature = "concurrency")]
impl<K> ConcurrentFrequencyTable<K>
where
    K: Eq + Hash + Clone,
{
    /// # Panics
    ///
    /// Panics if `capacity` is 0.
    pub fn new(capacity: usize) -> Self {
        Self::from_table(FrequencyTable::new(capacity))
    }

    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        FrequencyTable::try_new(capacity).map(Self::from_table)
    }

    pub fn from_table(table: FrequencyTable<K>) -> Self {
        Self {
            inner: parking_lot::RwLock::new(table),
        }
    }

    pub fn add(&self, item: K) {
        self.inner.write().add(item);
    }

    pub fn try_add(&self, item: K) -> Result<AddOutcome<K>, InvariantError> {
        self.inner.write().try_add(item)
    }

    pub fn exists(&self, item: &K) -> bool {
        self.inner.read().exists(item)
    }

    pub fn estimate(&self, item: &K) -> Option<u64> {
        self.inner.read().estimate(item)
    }

    pub fn tracked_items(&self) -> Vec<K> {
        self.inner.read().tracked_items()
    }

    pub fn top_k(&self, k: usize) -> Vec<(K, u64)> {
        self.inner.read().top_k(k)
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.read().capacity()
    }

    pub fn clear(&self) {
        self.inner.write().clear();
    }

    /// Runs `f` against a consistent view of the table.
    pub fn with_read<R>(&self, f: impl FnOnce(&FrequencyTable<K>) -> R) -> R {
        f(&self.inner.read())
    }

    pub fn into_inner(self) -> FrequencyTable<K> {
        self.inner.into_inner()
    }
}

#[cfg(feature = "concurrency")]
impl<K> ConcurrentFrequencyTable<K>
where
    K: Eq + Hash + Clone + fmt::Display,
{
    pub fn dump(&self) {
        self.inner.read().dump();
    }
}
