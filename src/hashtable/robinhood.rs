//! Robin Hood hashing: linear probing where the entry currently furthest
//! from its home ("poorest") always wins a slot, displacing anything
//! richer found along the way. No tombstones; removal uses backward-shift
//! deletion to keep probe sequences intact.
//!
//! Ported from `HASHTABLE_ROBINHOOD` in
//! `examples/original_source/src/hashtable.c` and
//! `examples/original_source/robin_hood.h`. The early-stop condition in
//! lookup uses the *wrapped* displacement `(index - home) mod capacity`
//! consistently, rather than a raw loop counter that would be wrong at
//! the point a probe wraps past the end of the table.

use super::common::{grown_capacity, hash_key, home_of, rounded_capacity, should_grow, should_shrink, shrink_target};
use super::raw::RawTable;
use crate::config::HASH_EMPTY;
use std::borrow::Borrow;
use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hash};

/// Displacement of the entry at `idx` with sanitized hash `hash`: how
/// far it sits from its own home slot, wrapping modulo `cap`.
#[inline]
fn displacement(idx: usize, hash: u64, cap: usize) -> usize {
    idx.wrapping_sub(home_of(hash, cap)) & (cap - 1)
}

/// An open-addressed map using Robin Hood hashing.
pub struct RobinHood<K, V, S = RandomState> {
    raw: RawTable<(K, V)>,
    num_entries: usize,
    hash_builder: S,
}

impl<K: Hash + Eq, V> RobinHood<K, V, RandomState> {
    /// An empty table with no backing allocation.
    pub fn new() -> Self {
        Self::with_hasher(RandomState::new())
    }

    /// An empty table preallocated for at least `capacity_hint` entries.
    pub fn with_capacity(capacity_hint: usize) -> Self {
        Self::with_capacity_and_hasher(capacity_hint, RandomState::new())
    }
}

impl<K: Hash + Eq, V> Default for RobinHood<K, V, RandomState> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> RobinHood<K, V, S> {
    /// An empty table using an explicit hasher builder.
    pub fn with_hasher(hash_builder: S) -> Self {
        RobinHood {
            raw: RawTable::new(),
            num_entries: 0,
            hash_builder,
        }
    }

    /// As [`RobinHood::with_hasher`], preallocated for `capacity_hint`
    /// entries.
    pub fn with_capacity_and_hasher(capacity_hint: usize, hash_builder: S) -> Self {
        let mut table = Self::with_hasher(hash_builder);
        let cap = rounded_capacity(capacity_hint);
        if cap > 0 {
            table.raw = RawTable::with_capacity(cap);
        }
        table
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.num_entries
    }

    /// `true` iff there are no live entries.
    pub fn is_empty(&self) -> bool {
        self.num_entries == 0
    }

    /// Allocated slot count, always a power of two (or zero).
    pub fn capacity(&self) -> usize {
        self.raw.cap()
    }

    fn find_slot<Q: ?Sized + Hash + Eq>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
    {
        let cap = self.raw.cap();
        if cap == 0 {
            return None;
        }
        let hash = hash_key(&self.hash_builder, key);
        let home = home_of(hash, cap);
        let mut idx = home;
        let mut dist = 0usize;
        loop {
            if self.raw.is_empty_slot(idx) {
                return None;
            }
            let slot_hash = self.raw.hash_at(idx);
            if slot_hash == hash {
                let entry = unsafe { &*self.raw.entry_ptr(idx) };
                if entry.0.borrow() == key {
                    return Some(idx);
                }
            }
            let slot_dist = displacement(idx, slot_hash, cap);
            if slot_dist < dist {
                // Every later slot on this probe is at least as rich as
                // this one would need to be to still hold our key.
                return None;
            }
            idx = (idx + 1) & (cap - 1);
            dist += 1;
        }
    }

    /// Reference to the value stored for `key`, if present.
    pub fn get<Q: ?Sized + Hash + Eq>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
    {
        self.find_slot(key).map(|idx| unsafe { &(*self.raw.entry_ptr(idx)).1 })
    }

    /// Mutable reference to the value stored for `key`, if present.
    pub fn get_mut<Q: ?Sized + Hash + Eq>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
    {
        self.find_slot(key).map(move |idx| unsafe { &mut (*self.raw.entry_ptr(idx)).1 })
    }

    /// `true` iff `key` is currently present.
    pub fn contains_key<Q: ?Sized + Hash + Eq>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
    {
        self.find_slot(key).is_some()
    }

    /// Walk the probe sequence from `hash`'s home, swapping the carried
    /// entry with any incumbent that is richer (closer to its own home)
    /// than the carried entry currently is, until an empty slot accepts
    /// whichever entry is being carried at that point. Returns the
    /// index where the originally-passed `entry` ends up (which may be
    /// earlier than the loop's final write, if it was displaced along
    /// the way).
    fn place(raw: &mut RawTable<(K, V)>, mut hash: u64, mut entry: (K, V)) -> usize {
        let cap = raw.cap();
        let mut idx = home_of(hash, cap);
        let mut dist = 0usize;
        let mut result_idx = None;
        loop {
            if raw.is_empty_slot(idx) {
                raw.set_hash_at(idx, hash);
                unsafe { raw.write_entry(idx, entry) };
                return result_idx.unwrap_or(idx);
            }
            let slot_hash = raw.hash_at(idx);
            let slot_dist = displacement(idx, slot_hash, cap);
            if slot_dist < dist {
                if result_idx.is_none() {
                    result_idx = Some(idx);
                }
                let displaced_entry = unsafe { raw.read_entry(idx) };
                raw.set_hash_at(idx, hash);
                unsafe { raw.write_entry(idx, entry) };
                hash = slot_hash;
                entry = displaced_entry;
                dist = slot_dist;
            }
            idx = (idx + 1) & (cap - 1);
            dist += 1;
        }
    }

    /// Insert `key`/`value`, returning the previous value if `key` was
    /// already present.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(idx) = self.find_slot(&key) {
            let slot = unsafe { &mut *self.raw.entry_ptr(idx) };
            return Some(std::mem::replace(&mut slot.1, value));
        }
        let cap = self.raw.cap();
        if cap == 0 || should_grow(cap, self.num_entries) {
            self.rebuild(grown_capacity(cap));
        }
        let hash = hash_key(&self.hash_builder, &key);
        Self::place(&mut self.raw, hash, (key, value));
        self.num_entries += 1;
        None
    }

    /// Remove and return the value stored for `key`, using backward-shift
    /// deletion to pull later entries left into the vacancy.
    pub fn remove<Q: ?Sized + Hash + Eq>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
    {
        let idx = self.find_slot(key)?;
        let cap = self.raw.cap();
        let (_, value) = unsafe { self.raw.read_entry(idx) };
        self.raw.set_hash_at(idx, HASH_EMPTY);

        let mut hole = idx;
        loop {
            let next = (hole + 1) & (cap - 1);
            if self.raw.is_empty_slot(next) {
                break;
            }
            let next_hash = self.raw.hash_at(next);
            if displacement(next, next_hash, cap) == 0 {
                break;
            }
            let moved = unsafe { self.raw.read_entry(next) };
            self.raw.set_hash_at(hole, next_hash);
            unsafe { self.raw.write_entry(hole, moved) };
            self.raw.set_hash_at(next, HASH_EMPTY);
            hole = next;
        }
        self.num_entries -= 1;

        if should_shrink(cap, self.num_entries) {
            self.rebuild(shrink_target(cap));
        }
        Some(value)
    }

    /// Reset to empty, keeping the current allocation.
    pub fn clear(&mut self) {
        unsafe { self.raw.drop_live_entries() };
        for i in 0..self.raw.cap() {
            self.raw.set_hash_at(i, HASH_EMPTY);
        }
        self.num_entries = 0;
    }

    /// Rebuild into a freshly allocated table of `new_cap` slots,
    /// re-placing every live entry in slot order.
    fn rebuild(&mut self, new_cap: usize) {
        let mut old_raw = std::mem::replace(&mut self.raw, RawTable::with_capacity(new_cap));
        let old_cap = old_raw.cap();
        for i in 0..old_cap {
            if old_raw.is_live(i) {
                let hash = old_raw.hash_at(i);
                let entry = unsafe { old_raw.read_entry(i) };
                Self::place(&mut self.raw, hash, entry);
            }
        }
        unsafe { old_raw.dealloc() };
    }

    /// Iterate over `(&K, &V)` pairs in slot order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter { raw: &self.raw, next: 0 }
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> Drop for RobinHood<K, V, S> {
    fn drop(&mut self) {
        unsafe {
            self.raw.drop_live_entries();
            self.raw.dealloc();
        }
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> std::fmt::Debug for RobinHood<K, V, S>
where
    K: std::fmt::Debug,
    V: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, K: Hash + Eq, V, S: BuildHasher> IntoIterator for &'a RobinHood<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Slot-order iterator over a [`RobinHood`] table's live entries.
pub struct Iter<'a, K, V> {
    raw: &'a RawTable<(K, V)>,
    next: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.raw.first_live_from(self.next);
        if idx >= self.raw.cap() {
            self.next = self.raw.cap();
            return None;
        }
        self.next = idx + 1;
        let entry = unsafe { &*self.raw.entry_ptr(idx) };
        Some((&entry.0, &entry.1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_lookup_remove_roundtrip() {
        let mut table: RobinHood<i32, &str> = RobinHood::new();
        assert_eq!(table.insert(1, "one"), None);
        assert_eq!(table.insert(2, "two"), None);
        assert_eq!(table.get(&1), Some(&"one"));
        assert_eq!(table.remove(&2), Some("two"));
        assert_eq!(table.get(&2), None);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn displacements_are_non_decreasing_across_adjacent_live_slots() {
        let mut table: RobinHood<i32, i32> = RobinHood::new();
        for i in 0..2000 {
            table.insert(i, i);
        }
        let cap = table.capacity();
        for i in 0..cap {
            let j = (i + 1) & (cap - 1);
            if table.raw.is_live(i) && table.raw.is_live(j) {
                let d0 = displacement(i, table.raw.hash_at(i), cap);
                let d1 = displacement(j, table.raw.hash_at(j), cap);
                assert!(d0 + 1 >= d1);
            }
        }
    }

    #[test]
    fn backward_shift_removal_keeps_every_surviving_key_findable() {
        let mut table: RobinHood<i32, i32> = RobinHood::with_capacity(64);
        for i in 0..40 {
            table.insert(i, i);
        }
        for i in (0..40).step_by(3) {
            table.remove(&i);
        }
        for i in 0..40 {
            if i % 3 == 0 {
                assert_eq!(table.get(&i), None);
            } else {
                assert_eq!(table.get(&i), Some(&i));
            }
        }
    }

    #[test]
    fn million_key_stress_scenario() {
        let mut table: RobinHood<u32, u32> = RobinHood::new();
        let mut order: Vec<u32> = (0..100_000).collect();
        let mut seed = 88172645463325252u64;
        let mut rand = move || {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            seed
        };
        for i in (1..order.len()).rev() {
            let j = (rand() as usize) % (i + 1);
            order.swap(i, j);
        }
        for &k in &order {
            table.insert(k, k);
        }
        assert_eq!(table.len(), 100_000);
        for &k in &order {
            assert_eq!(table.get(&k), Some(&k));
        }
        for k in 100_000..110_000 {
            assert_eq!(table.get(&k), None);
        }
        for i in (1..order.len()).rev() {
            let j = (rand() as usize) % (i + 1);
            order.swap(i, j);
        }
        for &k in &order {
            table.remove(&k);
        }
        assert_eq!(table.len(), 0);
    }
}
