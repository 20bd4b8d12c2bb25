//! Benchmarks to measure the compute overhead of `call_timer` logic itself.
//!
//! These benchmarks log empty measurements, so all the time measured is spent
//! inside the timer infrastructure.

#![allow(
    missing_docs,
    reason = "No need for API documentation in benchmark code"
)]

use std::hint::black_box;
use std::sync::Barrier;
use std::thread;
use std::time::{Duration, Instant};

use call_timer::Registry;
use criterion::{Criterion, criterion_group, criterion_main};

criterion_group!(benches, entrypoint);
criterion_main!(benches);

const CONTENDING_THREADS: usize = 4;

fn entrypoint(c: &mut Criterion) {
    let mut group = c.benchmark_group("call_timer_overhead");

    // Baseline measurement - no tracking at all
    group.bench_function("baseline_empty", |b| {
        b.iter(|| {
            black_box(());
        });
    });

    let registry = Registry::new();

    let log_timer = registry.must_new_timer("log_duration", None);
    group.bench_function("log_duration", |b| {
        b.iter(|| {
            log_timer.log_duration(black_box(Duration::from_nanos(1)));
        });
    });

    let since_timer = registry.must_new_timer("log_since", None);
    group.bench_function("log_since", |b| {
        b.iter(|| {
            since_timer.log_since(black_box(Instant::now()));
        });
    });

    let span_timer = registry.must_new_timer("span", None);
    group.bench_function("span_empty", |b| {
        b.iter(|| {
            let _span = span_timer.span();
            black_box(());
        });
    });

    // Other threads hammer the same timer while we measure, to expose lock contention.
    let contended_timer = registry.must_new_timer("contended", None);
    group.bench_function("log_duration_contended", |b| {
        b.iter_custom(|iters| {
            let barrier = Barrier::new(CONTENDING_THREADS + 1);

            thread::scope(|s| {
                for _ in 0..CONTENDING_THREADS {
                    s.spawn(|| {
                        barrier.wait();
                        for _ in 0..iters {
                            contended_timer.log_duration(Duration::from_nanos(1));
                        }
                    });
                }

                barrier.wait();
                let start = Instant::now();
                for _ in 0..iters {
                    contended_timer.log_duration(black_box(Duration::from_nanos(1)));
                }
                start.elapsed()
            })
        });
    });

    let inactive = Registry::builder().active(false).build();
    let inert_timer = inactive.must_new_timer("inert", None);
    group.bench_function("log_duration_inert", |b| {
        b.iter(|| {
            inert_timer.log_duration(black_box(Duration::from_nanos(1)));
        });
    });

    group.finish();
}
