//! Text layouts for reports. Every layout writes the rows it is given in order.

use std::cmp;
use std::fmt::{self, Write};

use crate::ReportRow;
use crate::layout::ColumnWidths;

const TABLE_HEADERS: [&str; 4] = [
    "Timer name",
    "Total time",
    "Nr. of calls",
    "Average time/call",
];

const CSV_HEADER: &str = "Timer;Total;Calls;Average";

/// Each root subtree gets its own bordered table, all tables sharing the same column widths.
pub(crate) fn table<'a>(
    f: &mut impl Write,
    sections: impl Iterator<Item = &'a [ReportRow]>,
    widths: &ColumnWidths,
) -> fmt::Result {
    let [name_header, total_header, calls_header, mean_header] = TABLE_HEADERS;

    // A column is never narrower than its header.
    let name_w = cmp::max(widths.leader, name_header.chars().count());
    let total_w = cmp::max(widths.total, total_header.chars().count());
    let calls_w = cmp::max(widths.calls, calls_header.chars().count());
    let mean_w = cmp::max(widths.mean, mean_header.chars().count());
    let columns = [name_w, total_w, calls_w, mean_w];

    for rows in sections {
        write_rule(f, columns)?;
        writeln!(
            f,
            "| {name_header:<name_w$} | {total_header:<total_w$} | {calls_header:<calls_w$} | {mean_header:<mean_w$} |"
        )?;
        write_rule(f, columns)?;

        for row in rows {
            let indent = row.indent();
            let name_pad = name_w.saturating_sub(row.leader_width());

            writeln!(
                f,
                "| {:indent$}{}{:name_pad$} | {:>total_w$} | {:>calls_w$} | {:>mean_w$} |",
                "",
                row.name(),
                "",
                row.total_text(),
                row.calls_text(),
                row.mean_text().unwrap_or_default(),
            )?;
        }

        write_rule(f, columns)?;
    }

    Ok(())
}

fn write_rule(f: &mut impl Write, columns: [usize; 4]) -> fmt::Result {
    for width in columns {
        // One space of padding on either side of the cell content.
        let dashes = width.saturating_add(2);
        write!(f, "+{:-<dashes$}", "")?;
    }

    writeln!(f, "+")
}

/// `<indented name><pad>total <duration> in <count> calls[, avg <duration>]`
pub(crate) fn plain_text<'a>(
    f: &mut impl Write,
    rows: impl Iterator<Item = &'a ReportRow>,
    widths: &ColumnWidths,
) -> fmt::Result {
    let total_w = widths.total;
    let calls_w = widths.calls;
    let mean_w = widths.mean;

    for row in rows {
        let indent = row.indent();

        // At least one space between the longest leader and the statistics.
        let pad = widths
            .leader
            .saturating_sub(row.leader_width())
            .saturating_add(1);

        write!(
            f,
            "{:indent$}{}{:pad$}total {:>total_w$} in {:>calls_w$} calls",
            "",
            row.name(),
            "",
            row.total_text(),
            row.calls_text(),
        )?;

        if let Some(mean) = row.mean_text() {
            write!(f, ", avg {mean:>mean_w$}")?;
        }

        writeln!(f)?;
    }

    Ok(())
}

/// One header line, then `name;total;calls;average` per row with no indentation or padding.
pub(crate) fn csv<'a>(f: &mut impl Write, rows: impl Iterator<Item = &'a ReportRow>) -> fmt::Result {
    writeln!(f, "{CSV_HEADER}")?;

    for row in rows {
        writeln!(
            f,
            "{};{};{};{}",
            row.name(),
            row.total_text(),
            row.calls_text(),
            row.mean_text().unwrap_or_default(),
        )?;
    }

    Ok(())
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::time::Duration;

    use super::*;

    fn nested_rows() -> Vec<ReportRow> {
        vec![
            ReportRow::fake("main", 0, Duration::from_millis(300), 1),
            ReportRow::fake("outer", 1, Duration::from_millis(300), 2),
            ReportRow::fake("middle", 2, Duration::from_millis(240), 6),
            ReportRow::fake("inner", 3, Duration::from_millis(240), 24),
        ]
    }

    #[test]
    fn plain_text_aligns_columns() {
        let rows = nested_rows();
        let widths = ColumnWidths::measure(&rows);

        let mut out = String::new();
        plain_text(&mut out, rows.iter(), &widths).unwrap();

        assert_eq!(
            out,
            "main        total 300ms in  1 calls, avg 300ms\n\
             \x20 outer     total 300ms in  2 calls, avg 150ms\n\
             \x20   middle  total 240ms in  6 calls, avg  40ms\n\
             \x20     inner total 240ms in 24 calls, avg  10ms\n"
        );
    }

    #[test]
    fn plain_text_omits_average_without_calls() {
        let rows = vec![
            ReportRow::fake("root", 0, Duration::from_millis(5), 1),
            ReportRow::fake("idle", 1, Duration::ZERO, 0),
        ];
        let widths = ColumnWidths::measure(&rows);

        let mut out = String::new();
        plain_text(&mut out, rows.iter(), &widths).unwrap();

        assert_eq!(
            out,
            "root   total 5ms in 1 calls, avg 5ms\n\
             \x20 idle total 0ns in 0 calls\n"
        );
    }

    #[test]
    fn csv_has_header_and_four_fields_per_row() {
        let rows = nested_rows();

        let mut out = String::new();
        csv(&mut out, rows.iter()).unwrap();

        assert_eq!(
            out,
            "Timer;Total;Calls;Average\n\
             main;300ms;1;300ms\n\
             outer;300ms;2;150ms\n\
             middle;240ms;6;40ms\n\
             inner;240ms;24;10ms\n"
        );
    }

    #[test]
    fn csv_leaves_average_empty_without_calls() {
        let rows = [ReportRow::fake("idle", 2, Duration::ZERO, 0)];

        let mut out = String::new();
        csv(&mut out, rows.iter()).unwrap();

        assert_eq!(out, "Timer;Total;Calls;Average\nidle;0ns;0;\n");
    }

    #[test]
    fn table_draws_borders_around_each_section() {
        let first = nested_rows();
        let second = vec![ReportRow::fake("solo", 0, Duration::from_secs(2), 4)];
        let widths = ColumnWidths::measure(first.iter().chain(&second));

        let mut out = String::new();
        table(
            &mut out,
            [first.as_slice(), second.as_slice()].into_iter(),
            &widths,
        )
        .unwrap();

        let rule = "+-------------+------------+--------------+-------------------+";
        let header = "| Timer name  | Total time | Nr. of calls | Average time/call |";

        let expected = [
            rule,
            header,
            rule,
            "| main        |      300ms |            1 |             300ms |",
            "|   outer     |      300ms |            2 |             150ms |",
            "|     middle  |      240ms |            6 |              40ms |",
            "|       inner |      240ms |           24 |              10ms |",
            rule,
            rule,
            header,
            rule,
            "| solo        |         2s |            4 |             500ms |",
            rule,
        ];

        assert_eq!(out.lines().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn table_leaves_average_cell_blank_without_calls() {
        let rows = vec![
            ReportRow::fake("root", 0, Duration::from_millis(5), 1),
            ReportRow::fake("idle", 1, Duration::ZERO, 0),
        ];
        let widths = ColumnWidths::measure(&rows);

        let mut out = String::new();
        table(&mut out, [rows.as_slice()].into_iter(), &widths).unwrap();

        let idle_line = out.lines().nth(4).unwrap();
        assert_eq!(
            idle_line,
            "|   idle     |        0ns |            0 |                   |"
        );
    }
}
