//! Count buckets for the Space-Saving table.
//!
//! A [`Bucket`] groups every tracked item whose estimated count is exactly
//! `value`. Members are intrusive nodes stored in a shared
//! [`SlotArena`](crate::ds::SlotArena) and linked by [`SlotId`]; the bucket
//! itself only keeps the head/tail handles and its length, so a bucket costs the
//! same regardless of how many items it holds.
//!
//! ## Architecture
//!
//! ```text
//!   value index (FxHashMap<u64, Bucket>)       members (SlotArena<Member<K>>)
//!
//!   1 ─► Bucket { head, tail, len: 2 }         ┌────────┬───────────────────────┐
//!          │             │                     │ id_0   │ "b" count:1 next:id_2 │
//!          ▼             ▼                     │ id_1   │ "a" count:2           │
//!        [id_0] ◄──► [id_2]                    │ id_2   │ "c" count:1 prev:id_0 │
//!        oldest       newest                   └────────┴───────────────────────┘
//!
//!   2 ─► Bucket { head: id_1, tail: id_1, len: 1 }
//!
//!   Chain: 1 ──higher──► 2     2 ──lower──► 1
//! ```
//!
//! Insertion appends at the tail, so the head is always the member that has
//! sat at this count the longest: the eviction candidate.
//!
//! Buckets are also nodes of a value-ordered chain (`lower`/`higher`), which
//! lets the table find the true minimum after a bucket disappears without
//! assuming that live values are contiguous.

use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::InvariantError;

/// A tracked item as stored in the arena.
///
/// `count` always equals the value of the bucket that currently links the
/// node; [`Bucket::insert`] stamps it.
#[derive(Debug)]
#[repr(C)]
pub(crate) struct Member<K> {
    // Hot fields - touched on every relink
    prev: Option<SlotId>,
    next: Option<SlotId>,
    pub(crate) count: u64,
    pub(crate) error: u64,
    // Cold field - read on eviction and snapshots
    pub(crate) key: K,
}

impl<K> Member<K> {
    /// Creates an unlinked node carrying the overestimation `error` it was
    /// admitted with.
    pub(crate) fn new(key: K, error: u64) -> Self {
        Self {
            prev: None,
            next: None,
            count: 0,
            error,
            key,
        }
    }
}

/// The set of tracked items currently estimated at one count value.
///
/// A bucket's value never changes after creation; only membership does. An
/// empty bucket is transient and is dropped by the owning table before the
/// operation that emptied it returns.
#[derive(Debug)]
pub struct Bucket {
    value: u64,
    head: Option<SlotId>,
    tail: Option<SlotId>,
    len: usize,
    lower: Option<u64>,
    higher: Option<u64>,
}

impl Bucket {
    pub(crate) fn new(value: u64, lower: Option<u64>, higher: Option<u64>) -> Self {
        Self {
            value,
            head: None,
            tail: None,
            len: 0,
            lower,
            higher,
        }
    }

    /// Returns the count shared by every member.
    #[inline]
    pub fn value(&self) -> u64 {
        self.value
    }

    /// Returns the number of members.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Alias of [`len`](Self::len).
    #[inline]
    pub fn size(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Value of the next live bucket below this one.
    #[inline]
    pub fn lower(&self) -> Option<u64> {
        self.lower
    }

    /// Value of the next live bucket above this one.
    #[inline]
    pub fn higher(&self) -> Option<u64> {
        self.higher
    }

    pub(crate) fn set_lower(&mut self, lower: Option<u64>) {
        self.lower = lower;
    }

    pub(crate) fn set_higher(&mut self, higher: Option<u64>) {
        self.higher = higher;
    }

    /// Returns the member with the longest residency at this value.
    ///
    /// Fails when the bucket is empty; the table never keeps an empty bucket,
    /// so this signals corrupted indices.
    pub fn oldest_member(&self) -> Result<SlotId, InvariantError> {
        self.head.ok_or_else(|| {
            InvariantError::new(format!("bucket {} is empty but still indexed", self.value))
        })
    }

    /// Appends `id` as the newest member and stamps its count.
    ///
    /// Fails only for a handle that no longer names a live node.
    pub(crate) fn insert<K>(
        &mut self,
        members: &mut SlotArena<Member<K>>,
        id: SlotId,
    ) -> Result<(), InvariantError> {
        let old_tail = self.tail;
        let node = members.get_mut(id).ok_or_else(|| {
            InvariantError::new(format!(
                "slot {} inserted into bucket {} is vacant",
                id.index(),
                self.value
            ))
        })?;
        node.prev = old_tail;
        node.next = None;
        node.count = self.value;

        match old_tail.and_then(|tail| members.get_mut(tail)) {
            Some(tail) => tail.next = Some(id),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        self.len += 1;
        Ok(())
    }

    /// Unlinks `id` from this bucket.
    ///
    /// The node stays in the arena; the caller decides whether it moves to
    /// another bucket or is evicted.
    pub(crate) fn remove<K>(
        &mut self,
        members: &mut SlotArena<Member<K>>,
        id: SlotId,
    ) -> Result<(), InvariantError> {
        let (prev, next) = match members.get(id) {
            Some(node) if node.count == self.value && self.is_linked(node, id) => {
                (node.prev, node.next)
            },
            _ => {
                return Err(InvariantError::new(format!(
                    "bucket {} does not hold slot {}",
                    self.value,
                    id.index()
                )));
            },
        };

        match prev.and_then(|prev| members.get_mut(prev)) {
            Some(node) => node.next = next,
            None => self.head = next,
        }
        match next.and_then(|next| members.get_mut(next)) {
            Some(node) => node.prev = prev,
            None => self.tail = prev,
        }
        if let Some(node) = members.get_mut(id) {
            node.prev = None;
            node.next = None;
        }
        self.len -= 1;
        Ok(())
    }

    /// Iterates members from oldest to newest.
    pub(crate) fn members<'a, K>(&self, members: &'a SlotArena<Member<K>>) -> BucketMembers<'a, K> {
        BucketMembers {
            members,
            current: self.head,
        }
    }

    // A member with no predecessor must be our head, one with no successor
    // our tail. Catches nodes that carry our value but were never linked here.
    fn is_linked<K>(&self, node: &Member<K>, id: SlotId) -> bool {
        self.len > 0
            && (node.prev.is_some() || self.head == Some(id))
            && (node.next.is_some() || self.tail == Some(id))
    }
}

/// Iterator over a bucket's members, oldest first.
pub(crate) struct BucketMembers<'a, K> {
    members: &'a SlotArena<Member<K>>,
    current: Option<SlotId>,
}

impl<'a, K> Iterator for BucketMembers<'a, K> {
    type Item = (SlotId, &'a Member<K>);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let node = self.members.get(id)?;
        self.current = node.next;
        Some((id, node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bucket_with(
        value: u64,
        keys: &[&'static str],
    ) -> (Bucket, SlotArena<Member<&'static str>>, Vec<SlotId>) {
        let mut arena = SlotArena::new();
        let mut bucket = Bucket::new(value, None, None);
        let ids = keys
            .iter()
            .map(|key| {
                let id = arena.insert(Member::new(*key, 0));
                bucket.insert(&mut arena, id).unwrap();
                id
            })
            .collect();
        (bucket, arena, ids)
    }

    fn keys(bucket: &Bucket, arena: &SlotArena<Member<&'static str>>) -> Vec<&'static str> {
        bucket.members(arena).map(|(_, node)| node.key).collect()
    }

    #[test]
    fn bucket_insert_appends_in_arrival_order() {
        let (bucket, arena, ids) = bucket_with(1, &["a", "b", "c"]);
        assert_eq!(bucket.len(), 3);
        assert_eq!(bucket.size(), 3);
        assert_eq!(bucket.value(), 1);
        assert_eq!(keys(&bucket, &arena), vec!["a", "b", "c"]);
        assert_eq!(bucket.oldest_member(), Ok(ids[0]));
        assert!(arena.iter().all(|(_, node)| node.count == 1));
    }

    #[test]
    fn bucket_remove_head_middle_tail() {
        let (mut bucket, mut arena, ids) = bucket_with(4, &["a", "b", "c", "d"]);

        bucket.remove(&mut arena, ids[1]).unwrap();
        assert_eq!(keys(&bucket, &arena), vec!["a", "c", "d"]);

        bucket.remove(&mut arena, ids[0]).unwrap();
        assert_eq!(bucket.oldest_member(), Ok(ids[2]));

        bucket.remove(&mut arena, ids[3]).unwrap();
        assert_eq!(keys(&bucket, &arena), vec!["c"]);

        bucket.remove(&mut arena, ids[2]).unwrap();
        assert!(bucket.is_empty());
        assert!(bucket.oldest_member().is_err());
    }

    #[test]
    fn bucket_oldest_member_advances_as_members_leave() {
        let names: Vec<&'static str> = vec!["n0", "n1", "n2", "n3", "n4", "n5", "n6", "n7"];
        let (mut bucket, mut arena, ids) = bucket_with(5, &names);
        for (i, id) in ids.iter().enumerate() {
            assert_eq!(bucket.oldest_member(), Ok(*id));
            bucket.remove(&mut arena, *id).unwrap();
            assert_eq!(bucket.len(), names.len() - i - 1);
        }
        assert!(bucket.is_empty());
    }

    #[test]
    fn bucket_remove_foreign_member_is_invariant_error() {
        let (mut one, mut arena, _) = bucket_with(1, &["a"]);
        let mut two = Bucket::new(2, Some(1), None);
        let b = arena.insert(Member::new("b", 0));
        two.insert(&mut arena, b).unwrap();

        let err = one.remove(&mut arena, b).unwrap_err();
        assert!(err.message().contains("bucket 1"));
        assert_eq!(one.len(), 1);
        assert_eq!(two.len(), 1);
    }

    #[test]
    fn bucket_remove_twice_is_invariant_error() {
        let (mut bucket, mut arena, ids) = bucket_with(3, &["a", "b"]);
        bucket.remove(&mut arena, ids[0]).unwrap();
        assert!(bucket.remove(&mut arena, ids[0]).is_err());
        assert_eq!(bucket.len(), 1);
    }

    #[test]
    fn bucket_insert_vacant_slot_is_invariant_error() {
        let (mut bucket, mut arena, ids) = bucket_with(1, &["a"]);
        bucket.remove(&mut arena, ids[0]).unwrap();
        arena.remove(ids[0]);
        assert!(bucket.insert(&mut arena, ids[0]).is_err());
        assert!(bucket.is_empty());
    }

    #[test]
    fn bucket_insert_stamps_count() {
        let mut arena = SlotArena::new();
        let id = arena.insert(Member::new("x", 4));
        let mut bucket = Bucket::new(9, None, None);
        bucket.insert(&mut arena, id).unwrap();
        let node = arena.get(id).unwrap();
        assert_eq!(node.count, 9);
        assert_eq!(node.error, 4);
    }
}
