//! Scoped measurement of a single call.

use std::time::{Duration, Instant};

use crate::Timer;

/// A span of code whose duration is logged against a timer when the span is dropped.
///
/// Created via [`Timer::span()`].
///
/// # Examples
///
/// ```
/// use call_timer::Registry;
///
/// let registry = Registry::new();
/// let timer = registry.new_timer("handle_request", None).unwrap();
///
/// fn handle_request(timer: &call_timer::Timer) {
///     let _span = timer.span();
///     // Everything until the end of the function is measured.
/// }
///
/// handle_request(&timer);
/// handle_request(&timer);
///
/// assert_eq!(timer.calls(), 2);
/// ```
#[derive(Debug)]
#[must_use = "Measurements are taken between creation and drop"]
pub struct TimerSpan<'a> {
    timer: &'a Timer,
    start: Instant,
}

impl<'a> TimerSpan<'a> {
    pub(crate) fn new(timer: &'a Timer) -> Self {
        Self {
            timer,
            start: Instant::now(),
        }
    }

    /// Time elapsed since the span was started.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for TimerSpan<'_> {
    fn drop(&mut self) {
        self.timer.log_since(self.start);
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::thread;

    use super::*;
    use crate::Registry;

    static_assertions::assert_impl_all!(TimerSpan<'static>: Send, Sync);

    #[test]
    fn logs_one_call_on_drop() {
        let registry = Registry::new();
        let timer = registry.new_timer("test", None).unwrap();

        {
            let _span = timer.span();
            assert_eq!(timer.calls(), 0);
        }

        assert_eq!(timer.calls(), 1);
    }

    #[test]
    fn logs_at_least_the_elapsed_time() {
        let registry = Registry::new();
        let timer = registry.new_timer("test", None).unwrap();

        let observed = {
            let span = timer.span();
            thread::sleep(Duration::from_millis(5));
            span.elapsed()
        };

        assert!(observed >= Duration::from_millis(5));
        assert!(timer.total() >= observed);
    }

    #[test]
    fn span_on_inert_timer_is_harmless() {
        let timer = Timer::inert();

        {
            let _span = timer.span();
        }

        assert_eq!(timer.calls(), 0);
    }
}
