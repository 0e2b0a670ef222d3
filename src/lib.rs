/*!
A personal library of foundational data structure primitives: a growable
array, a generic open-addressed hash table, and intrusive balanced binary
search trees.

### About

Three independent primitives, each usable on its own:

* **Array** ([`array::DynArray`]) - a contiguous, growable sequence with
  amortized-`O(1)` append, binary search helpers, and both ordered and
  unordered removal.
* **Hash table** ([`hashtable`]) - a generic open-addressed associative
  container with three interchangeable probing strategies:
  [`hashtable::Quadratic`], [`hashtable::Hopscotch`], and
  [`hashtable::RobinHood`]. All three share the same resize/rehash
  discipline and expose the same operation surface, so a consumer can
  swap strategies without changing call sites.
* **Trees** ([`tree`]) - intrusive AVL ([`tree::avl`]) and red-black
  ([`tree::rb`]) trees. "Intrusive" means the tree stores no copy of your
  data: you embed an [`tree::avl::AvlNode`] or [`tree::rb::RbNode`]
  directly inside your own struct, and the tree operates on pointers to
  that field. Lookup (walking by key) is the caller's job; the tree only
  handles structural insertion, removal, and rebalancing once the caller
  has found the insertion point.

Strives for two properties:

* **Debug-time safety:** `debug_assert!` for logical invariants (capacity
  bookkeeping, balance factors, black-height) exercised in testing, with
  zero runtime cost in release builds.
* **No hidden allocation policy surprises:** growth/resize/rehash
  thresholds are all plain constants in [`config`], not environment- or
  runtime-configurable, so the amortized cost bounds documented on each
  operation actually hold.

Other features:

* **Generic:** array elements and hash table keys/values can be any
  owned type; no `Ord`/`Hash`/`Default` blanket requirement is imposed
  beyond what a given operation needs (`bsearch`-family array methods need
  `Ord`, hash table operations need a `hash` function and an equality
  predicate supplied by the caller).
* **Unsafe, where it buys something:** the dynamic array manages its own
  buffer via `alloc`/raw pointers (same territory as `std::vec::Vec`);
  the intrusive trees recover a node's address from a raw pointer the
  caller supplies. Everything else in this crate is safe Rust.

### Usage

```rust
use foundry::array::DynArray;

let mut arr: DynArray<i32> = DynArray::new();
arr.add(3);
arr.add(1);
arr.add(2);
arr.insert_sorted(0, |a, b| a.cmp(b));
assert_eq!(arr.as_slice(), &[0, 1, 2, 3]);
assert_eq!(arr.bsearch_index(&2, |a, b| a.cmp(b)), Ok(2));
```

```rust
use foundry::hashtable::RobinHood;

let mut table: RobinHood<i32, &str> = RobinHood::new();
table.insert(1, "one");
table.insert(2, "two");
assert_eq!(table.get(&1), Some(&"one"));
assert_eq!(table.remove(&2), Some("two"));
```

### Algorithmic Complexity

| Operation | Array | Hash table (average) | Tree |
| --- | --- | --- | --- |
| lookup | `O(1)` by index, `O(log n)` by `bsearch` | `O(1)` | `O(log n)` |
| insert | Amortized `O(1)` at tail, `O(n)` at index | Amortized `O(1)` | `O(log n)` |
| remove | `O(1)` unordered, `O(n)` ordered | `O(1)` average | `O(log n)` |

### License and Contributing

Licensed under the MIT license. Contributions are welcome!
*/

pub mod config;

pub mod array;
pub use crate::array::DynArray;

pub mod hashtable;

pub mod tree;
