use std::cmp;

use crate::ReportRow;

/// Maximum text widths of each report column, measured over every row of a report.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct ColumnWidths {
    /// Indentation plus timer name.
    pub(crate) leader: usize,
    pub(crate) total: usize,
    pub(crate) calls: usize,
    /// Only rows with at least one call have an average, the rest do not contribute.
    pub(crate) mean: usize,
}

impl ColumnWidths {
    pub(crate) fn measure<'a>(rows: impl IntoIterator<Item = &'a ReportRow>) -> Self {
        rows.into_iter().fold(Self::default(), |widths, row| Self {
            leader: cmp::max(widths.leader, row.leader_width()),
            total: cmp::max(widths.total, row.total_text().chars().count()),
            calls: cmp::max(widths.calls, row.calls_text().len()),
            mean: row
                .mean_text()
                .map_or(widths.mean, |mean| cmp::max(widths.mean, mean.chars().count())),
        })
    }
}
