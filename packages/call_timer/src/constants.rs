// A poisoned lock means the process is in an unrecoverable/unsafe state and must exit (we panic).
pub(crate) const ERR_POISONED_LOCK: &str = "encountered poisoned lock - continued execution \
    is not safe because timer measurements may have been left half-updated";

/// Each level of the display tree indents the timer name by this many columns.
pub(crate) const INDENT_WIDTH: usize = 2;
