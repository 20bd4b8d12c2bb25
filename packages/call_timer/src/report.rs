//! Timer tree reports.

use std::fmt;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use crate::ReportFormat;
use crate::constants::INDENT_WIDTH;
use crate::layout::ColumnWidths;
use crate::render;
use crate::timer::TimerNode;
use crate::timer_metrics::mean_duration;

/// A snapshot of timer statistics, ready to be rendered.
///
/// Rows are ordered depth-first, each timer followed by its children in creation order.
/// Rows are grouped per reported root; a root whose whole subtree has no logged time is
/// left out of the report entirely.
///
/// For human-readable output, use the `Display` implementation, which renders the rows
/// in the report's [`ReportFormat`]. For machine-readable output, inspect the rows via
/// [`rows()`](Self::rows).
///
/// Each timer is read under its own lock, one timer at a time. Timers that are logged
/// against while the report is being collected may therefore reflect slightly different
/// instants, but every row is internally consistent.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use call_timer::Registry;
///
/// let registry = Registry::new();
/// let timer = registry.new_timer("work", None).unwrap();
/// timer.log_duration(Duration::from_millis(10));
///
/// let report = registry.to_report();
/// for row in report.rows() {
///     println!("{} was called {} times", row.name(), row.calls());
/// }
///
/// print!("{report}");
/// ```
#[derive(Clone, Debug)]
pub struct Report {
    format: ReportFormat,

    // One entry per reported root with activity somewhere in its subtree.
    sections: Vec<Box<[ReportRow]>>,
}

/// Statistics for a single timer in a [`Report`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReportRow {
    name: String,
    depth: usize,
    total: Duration,
    calls: u64,
}

impl Report {
    /// Collects the subtrees of the given roots, in order, skipping inactive subtrees.
    pub(crate) fn collect<'a>(
        roots: impl IntoIterator<Item = &'a Arc<TimerNode>>,
        format: ReportFormat,
    ) -> Self {
        let sections = roots
            .into_iter()
            .filter_map(|root| {
                let mut rows = Vec::new();
                collect_subtree(root, 0, &mut rows);

                // The filter is applied to the snapshot, so a subtree is either
                // reported in full or not at all.
                rows.iter()
                    .any(ReportRow::has_activity)
                    .then(|| rows.into_boxed_slice())
            })
            .collect();

        Self { format, sections }
    }

    /// Creates a report that contains nothing.
    pub(crate) fn empty(format: ReportFormat) -> Self {
        Self {
            format,
            sections: Vec::new(),
        }
    }

    #[cfg(test)]
    pub(crate) fn fake(format: ReportFormat, sections: Vec<Vec<ReportRow>>) -> Self {
        Self {
            format,
            sections: sections.into_iter().map(Vec::into_boxed_slice).collect(),
        }
    }

    /// The format used by the `Display` implementation.
    #[must_use]
    pub fn format(&self) -> ReportFormat {
        self.format
    }

    /// Returns the same report, to be rendered in a different format.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::time::Duration;
    ///
    /// use call_timer::{Registry, ReportFormat};
    ///
    /// let registry = Registry::new();
    /// let timer = registry.new_timer("work", None).unwrap();
    /// timer.log_duration(Duration::from_millis(10));
    ///
    /// let csv = registry.to_report().with_format(ReportFormat::Csv);
    /// assert_eq!(csv.to_string(), "Timer;Total;Calls;Average\nwork;10ms;1;10ms\n");
    /// ```
    #[must_use]
    pub fn with_format(self, format: ReportFormat) -> Self {
        Self { format, ..self }
    }

    /// Whether the report contains no rows. An empty report renders as nothing at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Iterates over all rows, depth-first, in report order.
    pub fn rows(&self) -> impl Iterator<Item = &ReportRow> {
        self.sections.iter().flat_map(|section| section.iter())
    }

    /// Number of root subtrees in the report.
    #[must_use]
    pub fn root_count(&self) -> usize {
        self.sections.len()
    }

    pub(crate) fn sections(&self) -> impl Iterator<Item = &[ReportRow]> {
        self.sections.iter().map(|section| &**section)
    }

    /// Writes the rendered report to `out`. Writes nothing if the report is empty.
    ///
    /// # Errors
    ///
    /// Returns any error produced by `out`.
    pub fn write_to(&self, out: &mut impl io::Write) -> io::Result<()> {
        if self.is_empty() {
            return Ok(());
        }

        write!(out, "{self}")
    }

    /// Prints the report to stdout.
    ///
    /// Prints nothing if the report is empty, not even an empty line.
    #[cfg_attr(test, mutants::skip)] // Too difficult to test stdout output reliably - manually tested.
    pub fn print_to_stdout(&self) {
        if self.is_empty() {
            return;
        }

        print!("{self}");
    }
}

fn collect_subtree(node: &TimerNode, depth: usize, rows: &mut Vec<ReportRow>) {
    let metrics = node.metrics();

    rows.push(ReportRow {
        name: node.name().to_string(),
        depth,
        total: metrics.total,
        calls: metrics.calls,
    });

    for child in node.children() {
        collect_subtree(&child, depth.saturating_add(1), rows);
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }

        // Widths are shared by all roots so that columns line up across the whole report.
        let widths = ColumnWidths::measure(self.rows());

        match self.format {
            ReportFormat::Table => render::table(f, self.sections(), &widths),
            ReportFormat::PlainText => render::plain_text(f, self.rows(), &widths),
            ReportFormat::Csv => render::csv(f, self.rows()),
        }
    }
}

impl ReportRow {
    #[cfg(test)]
    pub(crate) fn fake(name: &str, depth: usize, total: Duration, calls: u64) -> Self {
        Self {
            name: name.to_string(),
            depth,
            total,
            calls,
        }
    }

    /// Name of the timer.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Distance from the reported root, which has depth zero.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Total time logged against the timer.
    #[must_use]
    pub fn total(&self) -> Duration {
        self.total
    }

    /// Number of calls logged against the timer.
    #[must_use]
    pub fn calls(&self) -> u64 {
        self.calls
    }

    /// Average time per call, or `None` if the timer was never called.
    #[must_use]
    pub fn mean(&self) -> Option<Duration> {
        mean_duration(self.total, self.calls)
    }

    fn has_activity(&self) -> bool {
        !self.total.is_zero()
    }

    pub(crate) fn indent(&self) -> usize {
        self.depth.saturating_mul(INDENT_WIDTH)
    }

    /// Columns taken up by the indented name.
    pub(crate) fn leader_width(&self) -> usize {
        self.indent().saturating_add(self.name.chars().count())
    }

    pub(crate) fn total_text(&self) -> String {
        duration_text(self.total)
    }

    pub(crate) fn calls_text(&self) -> String {
        self.calls.to_string()
    }

    pub(crate) fn mean_text(&self) -> Option<String> {
        self.mean().map(duration_text)
    }
}

/// Human-readable rendering of a duration, such as `10.5ms` or `1s`.
pub(crate) fn duration_text(duration: Duration) -> String {
    format!("{duration:?}")
}
