//! Capacity policy and hashing glue shared by all three probing strategies.

use crate::config::{hashtable_min_capacity, sanitize_hash, HASHTABLE_THRESHOLD};
use std::hash::{BuildHasher, Hash, Hasher};

/// Floor capacity for any non-empty table, matching the dynamic array's
/// own `ARRAY_INITIAL_SIZE`-style floor.
pub(super) const HASHTABLE_MIN_CAP: usize = 8;

/// Hash `key` with `hash_builder` and sanitize the result so it never
/// collides with the reserved `EMPTY`/`TOMBSTONE` codes.
#[inline]
pub(super) fn hash_key<K: Hash + ?Sized, S: BuildHasher>(hash_builder: &S, key: &K) -> u64 {
    let mut hasher = hash_builder.build_hasher();
    key.hash(&mut hasher);
    sanitize_hash(hasher.finish())
}

/// Capacity (rounded up to a power of two, floored at
/// [`HASHTABLE_MIN_CAP`]) able to hold `capacity_hint` entries at
/// [`HASHTABLE_THRESHOLD`] load.
pub(super) fn rounded_capacity(capacity_hint: usize) -> usize {
    if capacity_hint == 0 {
        return 0;
    }
    hashtable_min_capacity(capacity_hint, HASHTABLE_THRESHOLD)
        .next_power_of_two()
        .max(HASHTABLE_MIN_CAP)
}

/// `true` once `occupied` (live entries plus, for quadratic, tombstones)
/// would exceed `HASHTABLE_THRESHOLD` load at `cap`.
#[inline]
pub(super) fn should_grow(cap: usize, occupied: usize) -> bool {
    occupied * 10 > cap * HASHTABLE_THRESHOLD
}

/// Capacity to grow to from `cap` on a threshold-triggered insert-time
/// grow: double it, or the floor if the table has no allocation yet.
#[inline]
pub(super) fn grown_capacity(cap: usize) -> usize {
    if cap == 0 {
        HASHTABLE_MIN_CAP
    } else {
        cap * 2
    }
}

/// `true` once `num_entries` has fallen low enough relative to `cap` to
/// justify shrinking (never below the floor).
#[inline]
pub(super) fn should_shrink(cap: usize, num_entries: usize) -> bool {
    cap > HASHTABLE_MIN_CAP && num_entries < cap / 8
}

/// Target capacity for a shrink, per §4.2 ("targeting a new capacity of
/// `capacity/4`"), never below the floor.
#[inline]
pub(super) fn shrink_target(cap: usize) -> usize {
    (cap / 4).max(HASHTABLE_MIN_CAP)
}

/// Map a sanitized hash to a slot index. Thin re-export of
/// [`crate::config::hash_to_index`] under the name used throughout this
/// module, kept local so strategy files don't need to know which
/// `config` item backs it.
#[inline]
pub(super) fn home_of(hash: u64, cap: usize) -> usize {
    crate::config::hash_to_index(hash, cap)
}
