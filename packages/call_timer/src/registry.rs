use std::collections::hash_map::Entry;
use std::fmt;
use std::io;
use std::sync::{Arc, Mutex};

use foldhash::{HashMap, HashMapExt};
use tracing::{debug, trace};

use crate::settings::Settings;
use crate::timer::TimerNode;
use crate::{ERR_POISONED_LOCK, Error, RegistryBuilder, Report, ReportFormat, Result, Timer};

/// Owns a set of uniquely named timers and renders reports about them.
///
/// Timers form a display tree: a timer created with a parent is listed under that parent
/// in reports. The tree only affects how reports are laid out, never what is measured.
///
/// Most programs use the process-wide registry behind [`global()`][crate::global()] and the
/// free functions of this crate. Separate instances are useful when a component wants its
/// own namespace of timer names, or in tests.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use call_timer::Registry;
///
/// let registry = Registry::new();
///
/// let request = registry.new_timer("request", None).unwrap();
/// let query = registry.new_timer("query", Some(&request)).unwrap();
///
/// query.log_duration(Duration::from_millis(30));
/// request.log_duration(Duration::from_millis(45));
///
/// let mut out = Vec::new();
/// registry.report_all(&mut out).unwrap();
///
/// assert_eq!(
///     String::from_utf8(out).unwrap(),
///     "request total 45ms in 1 calls, avg 45ms\n  query total 30ms in 1 calls, avg 30ms\n"
/// );
/// ```
pub struct Registry {
    // Held only while checking and inserting a new name, never while logging or rendering.
    state: Mutex<RegistryState>,

    settings: Arc<Settings>,
}

struct RegistryState {
    // Used for duplicate detection and lookup by name.
    by_name: HashMap<String, Arc<TimerNode>>,

    // Creation order, which is also the order of `report_all()`.
    roots: Vec<Arc<TimerNode>>,
}

impl Registry {
    /// Creates an active registry that reports in [`ReportFormat::PlainText`].
    #[expect(
        clippy::new_without_default,
        reason = "to avoid ambiguity with the notion of a 'default registry', which is the global one"
    )]
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Starts building a registry with a non-default configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use call_timer::{Registry, ReportFormat};
    ///
    /// let registry = Registry::builder()
    ///     .format(ReportFormat::Csv)
    ///     .active(false)
    ///     .build();
    ///
    /// assert!(!registry.is_active());
    /// ```
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    pub(crate) fn with_settings(active: bool, format: ReportFormat) -> Self {
        Self {
            state: Mutex::new(RegistryState {
                by_name: HashMap::new(),
                roots: Vec::new(),
            }),
            settings: Arc::new(Settings::new(active, format)),
        }
    }

    /// Creates a timer with a unique name.
    ///
    /// Without a parent, the timer becomes a new root. With a parent, it is appended to
    /// the parent's children. The parent must have been created by this registry.
    ///
    /// If the registry is inactive, nothing is registered and an inert timer is returned.
    /// An inert parent is treated the same as no parent.
    ///
    /// # Errors
    ///
    /// * [`Error::NameRequired`] if `name` is empty.
    /// * [`Error::DuplicateName`] if a timer with this name already exists in this registry.
    /// * [`Error::ForeignParent`] if `parent` was created by another registry.
    ///
    /// # Examples
    ///
    /// ```
    /// use call_timer::{Error, Registry};
    ///
    /// let registry = Registry::new();
    /// let parse = registry.new_timer("parse", None).unwrap();
    ///
    /// assert!(matches!(
    ///     registry.new_timer("parse", None),
    ///     Err(Error::DuplicateName { .. })
    /// ));
    /// ```
    pub fn new_timer(&self, name: impl Into<String>, parent: Option<&Timer>) -> Result<Timer> {
        let name = name.into();

        if !self.settings.is_active() {
            trace!(name = name.as_str(), "registry is inactive, handing out an inert timer");
            return Ok(Timer::inert());
        }

        if name.is_empty() {
            return Err(Error::NameRequired);
        }

        let parent = parent.and_then(Timer::node);

        if let Some(foreign) =
            parent.filter(|parent| !Arc::ptr_eq(parent.settings(), &self.settings))
        {
            return Err(Error::ForeignParent {
                parent: foreign.name().to_string(),
            });
        }

        let node = {
            let mut state = self.state.lock().expect(ERR_POISONED_LOCK);
            let RegistryState { by_name, roots } = &mut *state;

            let entry = match by_name.entry(name) {
                Entry::Occupied(entry) => {
                    return Err(Error::DuplicateName {
                        name: entry.key().clone(),
                    });
                }
                Entry::Vacant(entry) => entry,
            };

            let node = Arc::new(TimerNode::new(
                entry.key().clone(),
                parent,
                Arc::clone(&self.settings),
            ));

            // Linking happens under the same lock as the name check, so a concurrent
            // report either sees the timer fully linked or not at all.
            match parent {
                Some(parent) => parent.adopt(Arc::clone(&node)),
                None => roots.push(Arc::clone(&node)),
            }

            entry.insert(Arc::clone(&node));
            node
        };

        debug!(
            name = node.name(),
            parent = parent.map(|parent| parent.name()),
            "registered timer"
        );

        Ok(Timer::registered(node))
    }

    /// Creates a timer, panicking if that is not possible.
    ///
    /// Intended for timers set up once at startup, where the names are known to be
    /// unique and any failure is a programming error.
    ///
    /// # Panics
    ///
    /// Panics in every situation where [`new_timer()`](Self::new_timer) returns an error.
    ///
    /// # Examples
    ///
    /// ```
    /// use call_timer::Registry;
    ///
    /// let registry = Registry::new();
    ///
    /// let caller = registry.must_new_timer("caller", None);
    /// let callee = registry.must_new_timer("callee", Some(&caller));
    /// ```
    #[track_caller]
    pub fn must_new_timer(&self, name: impl Into<String>, parent: Option<&Timer>) -> Timer {
        match self.new_timer(name, parent) {
            Ok(timer) => timer,
            Err(error) => panic!("cannot create timer: {error}"),
        }
    }

    /// Looks up a registered timer by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Timer> {
        self.state
            .lock()
            .expect(ERR_POISONED_LOCK)
            .by_name
            .get(name)
            .cloned()
            .map(Timer::registered)
    }

    /// The timers created without a parent, in creation order.
    #[must_use]
    pub fn roots(&self) -> Vec<Timer> {
        self.root_nodes().into_iter().map(Timer::registered).collect()
    }

    /// Number of registered timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.lock().expect(ERR_POISONED_LOCK).by_name.len()
    }

    /// Whether no timers have been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the registry records timings and produces reports. Defaults to `true`.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.settings.is_active()
    }

    /// Turns recording and reporting on or off.
    ///
    /// While inactive, new timers are inert, logging against existing timers does nothing
    /// and reports are empty. Data logged before deactivation is kept.
    ///
    /// This is a coarse switch meant to be flipped around startup or shutdown. Operations
    /// racing with a toggle may observe either state.
    pub fn set_active(&self, active: bool) {
        debug!(active, "timer registry active flag changed");
        self.settings.set_active(active);
    }

    /// The format used by reports.
    #[must_use]
    pub fn format(&self) -> ReportFormat {
        self.settings.format()
    }

    /// Selects the format for all subsequent reports, including reports of individual timers.
    pub fn set_format(&self, format: ReportFormat) {
        debug!(%format, "timer report format changed");
        self.settings.set_format(format);
    }

    /// Collects a report of every root timer, in creation order, with its subtree.
    ///
    /// Roots with no logged time anywhere in their subtree are left out. The report is
    /// empty if the registry is inactive.
    #[must_use]
    pub fn to_report(&self) -> Report {
        let format = self.settings.format();

        if !self.settings.is_active() {
            return Report::empty(format);
        }

        // The root list is copied so that no registry lock is held while timers are read.
        Report::collect(&self.root_nodes(), format)
    }

    /// Collects a report of a single timer and its descendants.
    ///
    /// The report is empty if the registry is inactive, the timer is inert, the timer
    /// was created by a different registry or no time was logged anywhere in its subtree.
    #[must_use]
    pub fn to_timer_report(&self, timer: &Timer) -> Report {
        let format = self.settings.format();

        let own_node = timer
            .node()
            .filter(|node| Arc::ptr_eq(node.settings(), &self.settings));

        match own_node {
            Some(node) if self.settings.is_active() => Report::collect([node], format),
            _ => Report::empty(format),
        }
    }

    /// Writes a report of all root timers and their subtrees to `out`.
    ///
    /// Writes nothing if there is nothing to report.
    ///
    /// # Errors
    ///
    /// Returns any error produced by `out`.
    pub fn report_all(&self, out: &mut impl io::Write) -> io::Result<()> {
        self.to_report().write_to(out)
    }

    /// Writes a report of `timer` and its descendants to `out`.
    ///
    /// Writes nothing if there is nothing to report.
    ///
    /// # Errors
    ///
    /// Returns any error produced by `out`.
    pub fn report(&self, timer: &Timer, out: &mut impl io::Write) -> io::Result<()> {
        self.to_timer_report(timer).write_to(out)
    }

    /// Prints a report of all root timers to stdout.
    ///
    /// Prints nothing if there is nothing to report, not even an empty line.
    #[cfg_attr(test, mutants::skip)] // Too difficult to test stdout output reliably - manually tested.
    pub fn print_to_stdout(&self) {
        self.to_report().print_to_stdout();
    }

    fn root_nodes(&self) -> Vec<Arc<TimerNode>> {
        self.state.lock().expect(ERR_POISONED_LOCK).roots.clone()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("timers", &self.len())
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
