//! Renders the same timers in every report format.
//!
//! Pass a format name (`table`, `plain` or `csv`) to print only that format.
//!
//! Run with: `cargo run --example call_timer_formats -- table`.
#![expect(
    clippy::arithmetic_side_effects,
    reason = "this is example code that does not need production-level safety"
)]

use std::env;
use std::time::Duration;

use call_timer::{Registry, ReportFormat};

fn main() {
    let formats = match env::args().nth(1) {
        Some(name) => match name.parse::<ReportFormat>() {
            Ok(format) => vec![format],
            Err(error) => {
                eprintln!("{error}");
                return;
            }
        },
        None => vec![ReportFormat::Table, ReportFormat::PlainText, ReportFormat::Csv],
    };

    let registry = Registry::new();

    let request = registry.must_new_timer("request", None);
    let auth = registry.must_new_timer("auth", Some(&request));
    let query = registry.must_new_timer("query", Some(&request));
    let _cache = registry.must_new_timer("cache_lookup", Some(&query));
    let startup = registry.must_new_timer("startup", None);
    let _shutdown = registry.must_new_timer("shutdown", None);

    for millis in [12, 15, 9] {
        request.log_duration(Duration::from_millis(millis + 5));
        auth.log_duration(Duration::from_micros(800));
        query.log_duration(Duration::from_millis(millis));
    }
    startup.log_duration(Duration::from_secs(2));

    for format in formats {
        println!("== {format} ==");
        registry.set_format(format);
        registry.print_to_stdout();
        println!();
    }
}
