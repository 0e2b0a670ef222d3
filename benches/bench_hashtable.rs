use criterion::{criterion_group, criterion_main, Criterion};
use rand::Rng;

use foundry::hashtable::{Hopscotch, Quadratic, RobinHood};

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

// Benches, by strategy ------------------------------------------------------------------------------------------------

macro_rules! insert_bench_for {
    ($fn_name:ident, $bench_prefix:expr, $ty:ident) => {
        fn $fn_name(c: &mut Criterion) {
            let rtd_100 = RandTestData::new(100);
            let rtd_1_000 = RandTestData::new(1_000);
            let rtd_10_000 = RandTestData::new(10_000);

            c.bench_function(concat!($bench_prefix, "_insert_100"), |b| {
                b.iter(|| {
                    let mut table: $ty<usize, usize> = $ty::new();
                    for k in &rtd_100.keys {
                        table.insert(*k, *k);
                    }
                })
            });

            c.bench_function(concat!($bench_prefix, "_insert_1_000"), |b| {
                b.iter(|| {
                    let mut table: $ty<usize, usize> = $ty::new();
                    for k in &rtd_1_000.keys {
                        table.insert(*k, *k);
                    }
                })
            });

            c.bench_function(concat!($bench_prefix, "_insert_10_000"), |b| {
                b.iter(|| {
                    let mut table: $ty<usize, usize> = $ty::new();
                    for k in &rtd_10_000.keys {
                        table.insert(*k, *k);
                    }
                })
            });
        }
    };
}

insert_bench_for!(quadratic_insert_bench, "quadratic", Quadratic);
insert_bench_for!(hopscotch_insert_bench, "hopscotch", Hopscotch);
insert_bench_for!(robinhood_insert_bench, "robinhood", RobinHood);

fn robinhood_lookup_bench(c: &mut Criterion) {
    let rtd = RandTestData::new(10_000);
    let mut table: RobinHood<usize, usize> = RobinHood::new();
    for k in &rtd.keys {
        table.insert(*k, *k);
    }

    c.bench_function("robinhood_lookup_10_000", |b| {
        b.iter(|| {
            for k in &rtd.keys {
                table.get(k);
            }
        })
    });
}

criterion_group!(
    benches,
    quadratic_insert_bench,
    hopscotch_insert_bench,
    robinhood_insert_bench,
    robinhood_lookup_bench
);
criterion_main!(benches);
