use criterion::{criterion_group, criterion_main, Criterion};
use rand::Rng;
use std::ptr::NonNull;

use foundry::tree::avl::{self, AvlNode, AvlRoot};
use foundry::tree::rb::{self, RbNode, RbRoot};
use foundry::tree::{container_of, Direction};

// Rand Test Data --------------------------------------------------------------------------------------------------

struct RandTestData {
    keys: Vec<usize>,
}

impl RandTestData {
    fn new(size: usize) -> Self {
        let mut rng = rand::thread_rng();
        RandTestData {
            keys: (0..size).map(|_| rng.gen()).collect(),
        }
    }
}

// A minimal intrusive entry per tree kind, the same shape each module's own
// `#[cfg(test)]` fixture uses: the caller owns lookup/allocation, the tree
// owns only splicing and rebalancing.

struct AvlEntry {
    key: usize,
    node: AvlNode,
}

fn avl_node_offset() -> usize {
    let dummy = AvlEntry { key: 0, node: AvlNode::new() };
    (&dummy.node as *const AvlNode as usize) - (&dummy as *const AvlEntry as usize)
}

unsafe fn avl_entry_of(n: NonNull<AvlNode>) -> *mut AvlEntry {
    container_of::<AvlEntry, AvlNode>(n.as_ptr(), avl_node_offset())
}

fn find_avl_insertion_point(root: &AvlRoot, key: usize) -> Result<NonNull<AvlNode>, (Option<NonNull<AvlNode>>, Direction)> {
    let mut cur = root.root();
    let mut parent = None;
    let mut dir = Direction::Left;
    while let Some(c) = cur {
        let entry = unsafe { &*avl_entry_of(c) };
        parent = Some(c);
        if key == entry.key {
            return Ok(c);
        } else if key < entry.key {
            dir = Direction::Left;
            cur = unsafe { avl::child(c, Direction::Left) };
        } else {
            dir = Direction::Right;
            cur = unsafe { avl::child(c, Direction::Right) };
        }
    }
    Err((parent, dir))
}

fn avl_insert(root: &mut AvlRoot, key: usize) {
    if let Err((parent, dir)) = find_avl_insertion_point(root, key) {
        let boxed = Box::new(AvlEntry { key, node: AvlNode::new() });
        let ptr = Box::into_raw(boxed);
        let node_ptr = unsafe { NonNull::new_unchecked(&mut (*ptr).node as *mut AvlNode) };
        avl::insert_node(root, node_ptr, parent, dir);
    }
}

fn drain_avl(root: &mut AvlRoot) {
    while let Some(n) = avl::first(root) {
        avl::remove_node(root, n);
        unsafe { drop(Box::from_raw(avl_entry_of(n))) };
    }
}

struct RbEntry {
    key: usize,
    node: RbNode,
}

fn rb_node_offset() -> usize {
    let dummy = RbEntry { key: 0, node: RbNode::new() };
    (&dummy.node as *const RbNode as usize) - (&dummy as *const RbEntry as usize)
}

unsafe fn rb_entry_of(n: NonNull<RbNode>) -> *mut RbEntry {
    container_of::<RbEntry, RbNode>(n.as_ptr(), rb_node_offset())
}

fn find_rb_insertion_point(root: &RbRoot, key: usize) -> Result<NonNull<RbNode>, (Option<NonNull<RbNode>>, Direction)> {
    let mut cur = root.root();
    let mut parent = None;
    let mut dir = Direction::Left;
    while let Some(c) = cur {
        let entry = unsafe { &*rb_entry_of(c) };
        parent = Some(c);
        if key == entry.key {
            return Ok(c);
        } else if key < entry.key {
            dir = Direction::Left;
            cur = unsafe { rb::child(c, Direction::Left) };
        } else {
            dir = Direction::Right;
            cur = unsafe { rb::child(c, Direction::Right) };
        }
    }
    Err((parent, dir))
}

fn rb_insert(root: &mut RbRoot, key: usize) {
    if let Err((parent, dir)) = find_rb_insertion_point(root, key) {
        let boxed = Box::new(RbEntry { key, node: RbNode::new() });
        let ptr = Box::into_raw(boxed);
        let node_ptr = unsafe { NonNull::new_unchecked(&mut (*ptr).node as *mut RbNode) };
        rb::insert_node(root, node_ptr, parent, dir);
    }
}

fn drain_rb(root: &mut RbRoot) {
    while let Some(n) = rb::first(root) {
        rb::remove_node(root, n);
        unsafe { drop(Box::from_raw(rb_entry_of(n))) };
    }
}

// Benches -------------------------------------------------------------------------------------------------------------

fn avl_insert_bench(c: &mut Criterion) {
    let rtd_100 = RandTestData::new(100);
    let rtd_1_000 = RandTestData::new(1_000);

    c.bench_function("avl_insert_100", |b| {
        b.iter(|| {
            let mut root = AvlRoot::default();
            for &k in &rtd_100.keys {
                avl_insert(&mut root, k);
            }
            drain_avl(&mut root);
        })
    });

    c.bench_function("avl_insert_1_000", |b| {
        b.iter(|| {
            let mut root = AvlRoot::default();
            for &k in &rtd_1_000.keys {
                avl_insert(&mut root, k);
            }
            drain_avl(&mut root);
        })
    });
}

fn rb_insert_bench(c: &mut Criterion) {
    let rtd_100 = RandTestData::new(100);
    let rtd_1_000 = RandTestData::new(1_000);

    c.bench_function("rb_insert_100", |b| {
        b.iter(|| {
            let mut root = RbRoot::default();
            for &k in &rtd_100.keys {
                rb_insert(&mut root, k);
            }
            drain_rb(&mut root);
        })
    });

    c.bench_function("rb_insert_1_000", |b| {
        b.iter(|| {
            let mut root = RbRoot::default();
            for &k in &rtd_1_000.keys {
                rb_insert(&mut root, k);
            }
            drain_rb(&mut root);
        })
    });
}

fn avl_lookup_bench(c: &mut Criterion) {
    let rtd = RandTestData::new(1_000);
    let mut root = AvlRoot::default();
    for &k in &rtd.keys {
        avl_insert(&mut root, k);
    }

    c.bench_function("avl_lookup_1_000", |b| {
        b.iter(|| {
            for &k in &rtd.keys {
                let _ = find_avl_insertion_point(&root, k);
            }
        })
    });

    drain_avl(&mut root);
}

criterion_group!(benches, avl_insert_bench, rb_insert_bench, avl_lookup_bench);
criterion_main!(benches);
