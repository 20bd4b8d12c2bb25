//! Timer handles and the shared per-timer state behind them.

use std::fmt;
use std::io;
use std::sync::{Arc, Mutex, Weak};
use std::time::{Duration, Instant};

use crate::settings::Settings;
use crate::timer_metrics::TimerMetrics;
use crate::{ERR_POISONED_LOCK, Report, TimerSpan};

/// The registered state of one timer.
///
/// Name and parent link are fixed at creation. The children list only ever grows and
/// is only appended to while the owning registry holds its creation lock.
pub(crate) struct TimerNode {
    name: String,

    // Non-owning: the parent owns us through its `children` list, never the reverse.
    parent: Option<Weak<TimerNode>>,

    // Creation order, which is also report order.
    children: Mutex<Vec<Arc<TimerNode>>>,

    // One lock per timer so that logging against different timers never contends.
    metrics: Mutex<TimerMetrics>,

    settings: Arc<Settings>,
}

impl TimerNode {
    pub(crate) fn new(name: String, parent: Option<&Arc<Self>>, settings: Arc<Settings>) -> Self {
        Self {
            name,
            parent: parent.map(Arc::downgrade),
            children: Mutex::new(Vec::new()),
            metrics: Mutex::new(TimerMetrics::default()),
            settings,
        }
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn settings(&self) -> &Arc<Settings> {
        &self.settings
    }

    pub(crate) fn adopt(&self, child: Arc<Self>) {
        self.children.lock().expect(ERR_POISONED_LOCK).push(child);
    }

    /// Copy of the child list, taken under the lock and released before returning.
    pub(crate) fn children(&self) -> Vec<Arc<Self>> {
        self.children.lock().expect(ERR_POISONED_LOCK).clone()
    }

    /// Snapshot of the measurement state, taken under the lock and released before returning.
    pub(crate) fn metrics(&self) -> TimerMetrics {
        *self.metrics.lock().expect(ERR_POISONED_LOCK)
    }

    fn add_sample(&self, duration: Duration) {
        self.metrics
            .lock()
            .expect(ERR_POISONED_LOCK)
            .add_sample(duration);
    }
}

impl fmt::Debug for TimerNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Children and parent are left out, printing them would walk the whole tree.
        f.debug_struct("TimerNode")
            .field("name", &self.name)
            .field("metrics", &self.metrics)
            .finish_non_exhaustive()
    }
}

/// A named accumulator of elapsed time, created via a [`Registry`][crate::Registry].
///
/// Each timer records the total time logged against it and how many times something
/// was logged. Timers are cheap to clone, all clones refer to the same timer, and they
/// can be used from any thread concurrently.
///
/// A timer created while its registry is inactive is *inert*: it is not registered
/// anywhere and logging against it does nothing.
///
/// # Examples
///
/// ```
/// use std::time::{Duration, Instant};
///
/// use call_timer::Registry;
///
/// let registry = Registry::new();
/// let parse = registry.new_timer("parse", None).unwrap();
///
/// let start = Instant::now();
/// // ... parse something ...
/// parse.log_since(start);
///
/// parse.log_duration(Duration::from_millis(5));
///
/// assert_eq!(parse.calls(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct Timer {
    node: Option<Arc<TimerNode>>,
}

impl Timer {
    pub(crate) fn registered(node: Arc<TimerNode>) -> Self {
        Self { node: Some(node) }
    }

    /// Creates an inert timer that is not registered anywhere.
    ///
    /// This is the same kind of handle that an inactive registry hands out. Logging
    /// against it does nothing and reporting it produces no output.
    #[must_use]
    pub fn inert() -> Self {
        Self { node: None }
    }

    pub(crate) fn node(&self) -> Option<&Arc<TimerNode>> {
        self.node.as_ref()
    }

    /// Whether this is an inert handle that records nothing.
    #[must_use]
    pub fn is_inert(&self) -> bool {
        self.node.is_none()
    }

    /// The unique name of the timer. Empty for an inert timer.
    #[must_use]
    pub fn name(&self) -> &str {
        self.node.as_deref().map_or("", TimerNode::name)
    }

    /// Adds `duration` to the accumulated total and increments the call count.
    ///
    /// Safe to call concurrently from any number of threads; no sample is ever lost.
    /// Does nothing if the timer is inert or its registry is inactive.
    pub fn log_duration(&self, duration: Duration) {
        if let Some(node) = self.active_node() {
            node.add_sample(duration);
        }
    }

    /// Logs the time elapsed since `start` as one call.
    ///
    /// A `start` in the future is logged as a zero-length call.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::time::Instant;
    ///
    /// use call_timer::Registry;
    ///
    /// let registry = Registry::new();
    /// let timer = registry.new_timer("work", None).unwrap();
    ///
    /// let start = Instant::now();
    /// std::hint::black_box((0..1000).sum::<u64>());
    /// timer.log_since(start);
    /// ```
    pub fn log_since(&self, start: Instant) {
        if let Some(node) = self.active_node() {
            node.add_sample(start.elapsed());
        }
    }

    /// Starts a span that logs one call against this timer when dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use call_timer::Registry;
    ///
    /// let registry = Registry::new();
    /// let timer = registry.new_timer("load_config", None).unwrap();
    ///
    /// {
    ///     let _span = timer.span();
    ///     // ... load the configuration ...
    /// } // Elapsed time is logged here.
    ///
    /// assert_eq!(timer.calls(), 1);
    /// ```
    pub fn span(&self) -> TimerSpan<'_> {
        TimerSpan::new(self)
    }

    /// Runs `f`, logging its duration as one call, and returns its result.
    ///
    /// # Examples
    ///
    /// ```
    /// use call_timer::Registry;
    ///
    /// let registry = Registry::new();
    /// let timer = registry.new_timer("sum", None).unwrap();
    ///
    /// let sum = timer.time(|| (1..=10).sum::<u32>());
    ///
    /// assert_eq!(sum, 55);
    /// assert_eq!(timer.calls(), 1);
    /// ```
    pub fn time<R>(&self, f: impl FnOnce() -> R) -> R {
        let _span = self.span();
        f()
    }

    /// Total time logged against this timer.
    #[must_use]
    pub fn total(&self) -> Duration {
        self.metrics().total
    }

    /// Number of calls logged against this timer.
    #[must_use]
    pub fn calls(&self) -> u64 {
        self.metrics().calls
    }

    /// Average time per call, or `None` if nothing has been logged yet.
    #[must_use]
    pub fn mean(&self) -> Option<Duration> {
        self.metrics().mean()
    }

    /// The parent this timer was created under, if any.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.node
            .as_ref()?
            .parent
            .as_ref()?
            .upgrade()
            .map(Self::registered)
    }

    /// The children of this timer, in creation order.
    #[must_use]
    pub fn children(&self) -> Vec<Self> {
        self.node.as_ref().map_or_else(Vec::new, |node| {
            node.children().into_iter().map(Self::registered).collect()
        })
    }

    /// Whether this timer was created without a parent.
    ///
    /// Inert timers are not part of any tree and are not roots.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.node.as_ref().is_some_and(|node| node.parent.is_none())
    }

    /// Writes a report of this timer and its descendants to `out`, using the current
    /// format of the registry that created the timer.
    ///
    /// Writes nothing if the registry is inactive or if no time was logged anywhere
    /// in the subtree.
    ///
    /// # Errors
    ///
    /// Returns any error produced by `out`.
    pub fn report(&self, out: &mut impl io::Write) -> io::Result<()> {
        self.active_node()
            .map(|node| Report::collect([node], node.settings().format()))
            .map_or(Ok(()), |report| report.write_to(out))
    }

    fn metrics(&self) -> TimerMetrics {
        self.node
            .as_ref()
            .map(|node| node.metrics())
            .unwrap_or_default()
    }

    fn active_node(&self) -> Option<&Arc<TimerNode>> {
        self.node
            .as_ref()
            .filter(|node| node.settings().is_active())
    }
}
