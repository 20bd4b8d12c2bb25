#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Manual call-time instrumentation with hierarchical reports.
//!
//! You create named timers, log elapsed time against them from anywhere in your code
//! (from as many threads as you like) and later print the total time, the number of calls
//! and the average time per call of every timer.
//!
//! The disadvantage is that you have to add the calls to your own code. The advantage is
//! that this works in situations where you do not have access to profilers or other
//! operating system level performance tools.
//!
//! The core functionality includes:
//! - [`Timer`] - Accumulates elapsed time and a call count under a unique name
//! - [`TimerSpan`] - Logs the time between its creation and drop against a timer
//! - [`Registry`] - Creates timers, enforces unique names and renders reports
//! - [`Report`] - A snapshot of timer statistics, rendered in a [`ReportFormat`]
//!
//! # Simple usage
//!
//! Timers are typically created once, at startup, in the process-wide [global registry](global()):
//!
//! ```
//! use std::sync::LazyLock;
//! use std::time::Instant;
//!
//! use call_timer::Timer;
//!
//! static CALLER: LazyLock<Timer> = LazyLock::new(|| call_timer::must_new_timer("caller", None));
//! static CALLEE: LazyLock<Timer> =
//!     LazyLock::new(|| call_timer::must_new_timer("callee", Some(&*CALLER)));
//!
//! fn caller() {
//!     let _span = CALLER.span();
//!     for _ in 0..3 {
//!         callee();
//!     }
//! }
//!
//! fn callee() {
//!     let start = Instant::now();
//!     std::hint::black_box((0..1000).sum::<u64>());
//!     CALLEE.log_since(start);
//! }
//!
//! caller();
//!
//! call_timer::report_all(&mut std::io::stdout()).unwrap();
//! ```
//!
//! This prints something like:
//!
//! ```text
//! caller   total 30.917µs in 1 calls, avg 30.917µs
//!   callee total  7.209µs in 3 calls, avg  2.403µs
//! ```
//!
//! # Timer trees
//!
//! A timer created with a parent is shown indented under that parent. The tree exists for
//! display only: nothing is subtracted from or added to a parent because it has children.
//! A root timer whose subtree has no logged time at all is left out of reports.
//!
//! # Report formats
//!
//! Reports can be rendered as an indented plain text listing (the default), as a bordered
//! table or as semicolon-separated values. The format is a registry-wide setting:
//!
//! ```
//! use std::time::Duration;
//!
//! use call_timer::{Registry, ReportFormat};
//!
//! let registry = Registry::new();
//! registry.set_format(ReportFormat::Csv);
//!
//! let timer = registry.new_timer("load", None).unwrap();
//! timer.log_duration(Duration::from_millis(20));
//! timer.log_duration(Duration::from_millis(40));
//!
//! let mut out = Vec::new();
//! registry.report_all(&mut out).unwrap();
//!
//! assert_eq!(
//!     String::from_utf8(out).unwrap(),
//!     "Timer;Total;Calls;Average\nload;60ms;2;30ms\n"
//! );
//! ```
//!
//! # Turning it off
//!
//! [`set_active(false)`](set_active) turns the instrumentation into no-ops: timers created
//! while inactive are inert, logging does nothing and reports are empty. Flip the switch
//! at startup, before timers are created, for the lowest overhead.
//!
//! # Threading
//!
//! All types are thread-safe. Every timer has its own lock, so logging against different
//! timers never contends. A report reads one timer at a time, so timers that are being
//! logged against while a report is collected may reflect slightly different instants.
//!
//! # Logging
//!
//! Timer registration and settings changes are logged at debug level via the `tracing`
//! crate. Logging against a timer never emits log events.

mod constants;
mod error;
mod format;
mod global;
mod layout;
mod registry;
mod registry_builder;
mod render;
mod report;
mod settings;
mod span;
mod timer;
mod timer_metrics;

pub(crate) use constants::*;
pub use error::Error;
pub(crate) use error::Result;
pub use format::ReportFormat;
pub use global::*;
pub use registry::Registry;
pub use registry_builder::RegistryBuilder;
pub use report::{Report, ReportRow};
pub use span::TimerSpan;
pub use timer::Timer;
