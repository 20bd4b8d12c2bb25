//! Nested timers in the global registry, each function timing its own body.
//!
//! The timers form a chain: `main` > `outer` > `middle` > `inner`.
//!
//! Run with: `cargo run --example call_timer_nested`.

use std::sync::LazyLock;
use std::thread;
use std::time::{Duration, Instant};

use call_timer::Timer;

static MAIN_TIMER: LazyLock<Timer> = LazyLock::new(|| call_timer::must_new_timer("main", None));
static OUTER_TIMER: LazyLock<Timer> =
    LazyLock::new(|| call_timer::must_new_timer("outer", Some(&*MAIN_TIMER)));
static MIDDLE_TIMER: LazyLock<Timer> =
    LazyLock::new(|| call_timer::must_new_timer("middle", Some(&*OUTER_TIMER)));
static INNER_TIMER: LazyLock<Timer> =
    LazyLock::new(|| call_timer::must_new_timer("inner", Some(&*MIDDLE_TIMER)));

const DELAY: Duration = Duration::from_millis(10);

// Roughly 10ms.
fn inner() {
    let _span = INNER_TIMER.span();
    thread::sleep(DELAY);
}

// Roughly 4x inner, so 40ms.
fn middle() {
    let _span = MIDDLE_TIMER.span();
    for _ in 0..4 {
        inner();
    }
}

// Roughly 3x (middle + 10ms), so 150ms.
fn outer() {
    let _span = OUTER_TIMER.span();
    for _ in 0..3 {
        thread::sleep(DELAY);
        middle();
    }
}

fn main() {
    // Register the whole chain up front so that creation order is fixed.
    LazyLock::force(&INNER_TIMER);

    let start = Instant::now();
    for _ in 0..2 {
        outer();
    }
    MAIN_TIMER.log_since(start);

    call_timer::global().print_to_stdout();

    // Example output:
    // main        total 304.512375ms in  1 calls, avg 304.512375ms
    //   outer     total 304.509125ms in  2 calls, avg 152.254562ms
    //     middle  total 243.590083ms in  6 calls, avg  40.598347ms
    //       inner total 243.546708ms in 24 calls, avg  10.147779ms
}
