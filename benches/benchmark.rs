use criterion::measurement::WallTime;
use criterion::BenchmarkGroup;
use criterion::BenchmarkId;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::thread;

extern crate libspinlock;

use libspinlock::*;

const ITERATION: u64 = 1000;

const LOCKS: [fn(usize) -> LockType; 5] = [
    |_| TASLock::new().into(),
    |_| TTASLock::new().into(),
    |_| BackoffLock::new(BackoffConfig::default()).into(),
    |n| ALock::new(n).unwrap().into(),
    |n| ALockPadded::new(n).unwrap().into(),
];

pub fn lock_bench(bencher: &mut Criterion) {
    let mut group = bencher.benchmark_group("Spin Locks");
    group.sample_size(10);

    for thread_count in [2, 4, 8] {
        for make_lock in LOCKS {
            let name = make_lock(thread_count).to_string();
            bench_inner(&mut group, &name, thread_count, make_lock);
        }
    }

    group.finish();
}

fn bench_inner(
    group: &mut BenchmarkGroup<WallTime>,
    name: &str,
    thread_count: usize,
    make_lock: fn(usize) -> LockType,
) {
    group.bench_with_input(
        BenchmarkId::new(name, thread_count),
        &thread_count,
        |b, &thread_count| {
            b.iter(|| {
                // array locks bind to the threads of one trial
                let counter = SpinLock::new(make_lock(thread_count), 0u64);

                thread::scope(|s| {
                    for _ in 0..thread_count {
                        let counter = &counter;
                        s.spawn(move || {
                            for _ in 0..ITERATION {
                                *counter.lock() += 1;
                            }
                        });
                    }
                });

                black_box(counter.into_inner())
            })
        },
    );
}

criterion_group!(benches, lock_bench);
criterion_main!(benches);
