//! The process-wide registry and shortcuts to it.

use std::io;
use std::sync::LazyLock;

use crate::{Registry, ReportFormat, Result, Timer};

static GLOBAL_REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

/// The process-wide registry, created on first use and never torn down.
///
/// Timer names are unique across everything registered here, and every timer created
/// through the free functions of this crate lives here.
#[must_use]
pub fn global() -> &'static Registry {
    &GLOBAL_REGISTRY
}

/// Creates a timer in the [global registry](global()). See [`Registry::new_timer()`].
///
/// # Errors
///
/// See [`Registry::new_timer()`].
pub fn new_timer(name: impl Into<String>, parent: Option<&Timer>) -> Result<Timer> {
    global().new_timer(name, parent)
}

/// Creates a timer in the [global registry](global()), panicking if that is not possible.
/// See [`Registry::must_new_timer()`].
///
/// # Panics
///
/// Panics if the name is empty or already taken.
#[track_caller]
pub fn must_new_timer(name: impl Into<String>, parent: Option<&Timer>) -> Timer {
    global().must_new_timer(name, parent)
}

/// Writes a report of all root timers in the [global registry](global()) to `out`.
///
/// # Errors
///
/// Returns any error produced by `out`.
pub fn report_all(out: &mut impl io::Write) -> io::Result<()> {
    global().report_all(out)
}

/// Whether the [global registry](global()) records timings and produces reports.
#[must_use]
pub fn is_active() -> bool {
    global().is_active()
}

/// Turns the [global registry](global()) on or off. See [`Registry::set_active()`].
pub fn set_active(active: bool) {
    global().set_active(active);
}

/// The report format of the [global registry](global()).
#[must_use]
pub fn format() -> ReportFormat {
    global().format()
}

/// Selects the report format of the [global registry](global()).
pub fn set_format(format: ReportFormat) {
    global().set_format(format);
}
