//! Compile-time tunables shared by every container in this crate.
//!
//! These are plain `const`s rather than environment variables or runtime
//! parameters: the amortized-cost bounds documented on each operation are
//! only meaningful if growth/resize thresholds are fixed ahead of time.

/// Floor on [`crate::array::DynArray`] capacity once it has ever grown past zero.
pub const ARRAY_INITIAL_SIZE: usize = 8;

/// Numerator of the array growth factor (`G_num / G_den`, must be `> G_den`).
pub const ARRAY_GROWTH_FACTOR_NUMERATOR: usize = 3;

/// Denominator of the array growth factor.
pub const ARRAY_GROWTH_FACTOR_DENOMINATOR: usize = 2;

/// First debug-only magic word stamped into every [`crate::array::DynArray`]
/// header, checked on access to catch use-after-free and wrong-pointer bugs.
/// Present only in debug builds; matches the original C library's
/// `ARRAY_MAGIC1`. Kept as a fixed-width `u64` (rather than `usize`, which
/// the original expresses it as via `size_t`) so the constant doesn't
/// depend on pointer width.
pub const ARRAY_MAGIC1: u64 = 0xcccc_cccc_cccc_cccc;

/// Second debug-only magic word; matches the original C library's
/// `ARRAY_MAGIC2`.
pub const ARRAY_MAGIC2: u64 = 0xdead_babe_beef_cafe;

/// Maximum load factor for the hash table, expressed as tenths.
///
/// Must be in `5..=9`. The table grows once
/// `num_entries + num_tombstones > capacity * HASHTABLE_THRESHOLD / 10`.
pub const HASHTABLE_THRESHOLD: usize = 8;

/// Hopscotch neighborhood size: the number of consecutive slots a home
/// slot may claim as "within reach" of it.
pub const HASHTABLE_HOPSCOTCH_H: usize = 32;

/// Reserved hash code meaning "slot has never been used, or was cleared".
pub const HASH_EMPTY: u64 = 0;

/// Reserved hash code meaning "slot previously held an entry since removed"
/// (quadratic probing only; other strategies never write it).
pub const HASH_TOMBSTONE: u64 = 1;

/// First hash value that is not reserved by [`HASH_EMPTY`]/[`HASH_TOMBSTONE`].
pub const HASH_MIN_VALID: u64 = 2;

/// Remap a raw 64-bit hash away from the two reserved sentinel codes.
///
/// Matches the original C implementation's sanitization
/// (`_hashtable_sanitize_hash`): any hash below [`HASH_MIN_VALID`]
/// becomes `hash - HASH_MIN_VALID`, wrapping. Both reserved codes take
/// this same branch, so `HASH_TOMBSTONE` (1) maps to `hash - 2`, not
/// `hash - 1` — mapping it to `hash - 1` would land exactly on
/// `HASH_EMPTY`, defeating the entire point of sanitization.
#[inline]
pub const fn sanitize_hash(hash: u64) -> u64 {
    if hash < HASH_MIN_VALID {
        hash.wrapping_sub(HASH_MIN_VALID)
    } else {
        hash
    }
}

/// Map a sanitized hash to a slot index for a power-of-two `capacity`.
///
/// The multiplicative constant is the one used by the original
/// implementation this crate's hash table is modeled on; it is a fixed
/// odd constant, not a tunable, since changing it changes the probe
/// sequence of every strategy.
#[inline]
pub const fn hash_to_index(hash: u64, capacity: usize) -> usize {
    ((11u64.wrapping_mul(hash)) as usize) & (capacity - 1)
}

/// Precomputed integer coefficients solving `min_capacity(n) = 10n / THRESHOLD`
/// without runtime division, i.e. `min_capacity(n) = n*f1 + ceil(n*f2/f3)`.
///
/// `THRESHOLD` ranges over `5..=9`; this table is indexed by `threshold - 5`.
const MIN_CAPACITY_COEFFS: [(usize, usize, usize); 5] = [
    // threshold = 5: 10/5 = 2 exactly
    (2, 0, 1),
    // threshold = 6: 10/6 = 1 + 4/6
    (1, 4, 6),
    // threshold = 7: 10/7 = 1 + 3/7
    (1, 3, 7),
    // threshold = 8: 10/8 = 1 + 2/8
    (1, 2, 8),
    // threshold = 9: 10/9 = 1 + 1/9
    (1, 1, 9),
];

/// Minimum capacity able to hold `n` entries without exceeding `threshold`
/// load (see [`HASHTABLE_THRESHOLD`]), using only integer multiply/add/div.
#[inline]
pub const fn hashtable_min_capacity(n: usize, threshold: usize) -> usize {
    let (f1, f2, f3) = MIN_CAPACITY_COEFFS[threshold - 5];
    n * f1 + (n * f2 + f3 - 1) / f3
}
