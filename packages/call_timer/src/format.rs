use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Text layout used when rendering a [`Report`][crate::Report].
///
/// The format is a registry-wide setting (see [`Registry::set_format()`][crate::Registry::set_format])
/// rather than a per-call argument. All three layouts visit timers in the same order:
/// depth-first, each timer followed by its children in creation order.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum ReportFormat {
    /// A bordered grid with a header row. Each root timer gets its own table.
    Table,

    /// Indented lines of the form `name  total 10ms in 2 calls, avg 5ms`.
    #[default]
    PlainText,

    /// Semicolon-separated values with a single `Timer;Total;Calls;Average` header line.
    ///
    /// Names are not indented, so tree depth is only implied by row order.
    Csv,
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Table => "table",
            Self::PlainText => "plain",
            Self::Csv => "csv",
        })
    }
}

impl FromStr for ReportFormat {
    type Err = Error;

    /// Parses a format name, ignoring ASCII case.
    ///
    /// Accepts `table`, `plain` (also `plaintext` and `text`) and `csv`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if s.eq_ignore_ascii_case("table") {
            Ok(Self::Table)
        } else if ["plain", "plaintext", "text"]
            .iter()
            .any(|name| s.eq_ignore_ascii_case(name))
        {
            Ok(Self::PlainText)
        } else if s.eq_ignore_ascii_case("csv") {
            Ok(Self::Csv)
        } else {
            Err(Error::UnknownFormat {
                value: s.to_string(),
            })
        }
    }
}
