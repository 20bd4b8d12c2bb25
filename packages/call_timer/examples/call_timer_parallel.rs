//! Timers logged from several threads at once.
//!
//! `middle2` runs four `inner` calls in parallel, so `inner` accumulates more time
//! than the wall-clock time of its parents. The tree is for display only and
//! does not attempt to reconcile the two.
//!
//! Run with: `cargo run --example call_timer_parallel`.

use std::thread;
use std::time::Duration;

use call_timer::{Registry, Timer};

const DELAY: Duration = Duration::from_millis(10);

struct Timers {
    outer: Timer,
    middle1: Timer,
    middle2: Timer,
    inner: Timer,
}

impl Timers {
    fn register(registry: &Registry) -> Self {
        let outer = registry.must_new_timer("outer", None);
        let middle1 = registry.must_new_timer("middle1", Some(&outer));
        let middle2 = registry.must_new_timer("middle2", Some(&outer));
        let inner = registry.must_new_timer("inner", Some(&middle1));

        Self {
            outer,
            middle1,
            middle2,
            inner,
        }
    }

    // Roughly 10ms.
    fn inner(&self) {
        self.inner.time(|| thread::sleep(DELAY));
    }

    // Roughly 4x inner, so 40ms.
    fn middle1(&self) {
        let _span = self.middle1.span();
        for _ in 0..4 {
            self.inner();
        }
    }

    // Roughly one inner, since the four calls run in parallel.
    fn middle2(&self) {
        let _span = self.middle2.span();
        thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| self.inner());
            }
        });
    }

    // Roughly 3x middle1 plus 3x middle2, so 150ms.
    fn outer(&self) {
        let _span = self.outer.span();
        for _ in 0..3 {
            self.middle1();
        }
        for _ in 0..3 {
            self.middle2();
        }
    }
}

fn main() {
    let registry = Registry::new();
    let timers = Timers::register(&registry);

    for _ in 0..2 {
        timers.outer();
    }

    registry.print_to_stdout();

    // Example output:
    // outer     total 329.379542ms in  2 calls, avg 164.689771ms
    //   middle1 total 264.478584ms in  6 calls, avg  44.079764ms
    //     inner total 522.944044ms in 48 calls, avg  10.894667ms
    //   middle2 total  64.893792ms in  6 calls, avg  10.815632ms
}
