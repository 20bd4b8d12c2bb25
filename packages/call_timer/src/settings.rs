use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::{ERR_POISONED_LOCK, ReportFormat};

/// Registry-wide switches, shared by the registry and every timer it creates.
///
/// Timers consult these on every operation, so toggling the registry off silences
/// timers that were created before the toggle as well.
#[derive(Debug)]
pub(crate) struct Settings {
    active: AtomicBool,
    format: Mutex<ReportFormat>,
}

impl Settings {
    pub(crate) fn new(active: bool, format: ReportFormat) -> Self {
        Self {
            active: AtomicBool::new(active),
            format: Mutex::new(format),
        }
    }

    // Relaxed is enough: the flag is a coarse switch and we make no promise about
    // which side of a concurrent toggle an in-flight operation lands on.
    pub(crate) fn is_active(&self) -> bool {
        self.active.load(Ordering::Relaxed)
    }

    pub(crate) fn set_active(&self, active: bool) {
        self.active.store(active, Ordering::Relaxed);
    }

    pub(crate) fn format(&self) -> ReportFormat {
        *self.format.lock().expect(ERR_POISONED_LOCK)
    }

    pub(crate) fn set_format(&self, format: ReportFormat) {
        *self.format.lock().expect(ERR_POISONED_LOCK) = format;
    }
}
