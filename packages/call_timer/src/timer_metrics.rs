use std::num::NonZero;
use std::time::Duration;

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Measurement state of a single timer.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct TimerMetrics {
    pub(crate) total: Duration,
    pub(crate) calls: u64,
}

impl TimerMetrics {
    /// Adds one sample to the accumulated total and bumps the call count.
    ///
    /// Both values saturate instead of overflowing. A timer that has run for
    /// longer than `Duration::MAX` is not a realistic scenario and we do not
    /// want the hot path to panic over it.
    pub(crate) fn add_sample(&mut self, duration: Duration) {
        self.total = self.total.saturating_add(duration);
        self.calls = self.calls.saturating_add(1);
    }

    pub(crate) fn mean(&self) -> Option<Duration> {
        mean_duration(self.total, self.calls)
    }
}

/// Divides `total` by `calls`, truncating to whole nanoseconds.
///
/// Returns `None` if `calls` is zero - a timer that was never called has no average.
pub(crate) fn mean_duration(total: Duration, calls: u64) -> Option<Duration> {
    let calls = NonZero::new(u128::from(calls))?;

    let nanos = total
        .as_nanos()
        .checked_div(calls.get())
        .expect("division by zero impossible - divisor is NonZero");

    let secs = nanos
        .checked_div(NANOS_PER_SEC)
        .expect("constant divisor is not zero");
    let subsec_nanos = nanos
        .checked_rem(NANOS_PER_SEC)
        .expect("constant divisor is not zero");

    Some(Duration::new(
        u64::try_from(secs).expect("mean cannot exceed the total, which fits in Duration"),
        u32::try_from(subsec_nanos).expect("remainder of division by one billion fits in u32"),
    ))
}
