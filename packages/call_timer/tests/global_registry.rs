//! Integration test for the process-wide registry.
//!
//! This test is in a separate integration test binary to avoid polluting
//! the global registry used by other tests. Everything runs in one test function
//! because the registry is shared by all tests in the binary.

use std::time::Duration;

use call_timer::{Error, ReportFormat};

fn report_all_to_string() -> String {
    let mut out = Vec::new();
    call_timer::report_all(&mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn nested_timers_report_in_every_format() {
    assert!(call_timer::is_active());
    assert_eq!(call_timer::format(), ReportFormat::PlainText);

    let main = call_timer::must_new_timer("main", None);
    let outer = call_timer::must_new_timer("outer", Some(&main));
    let middle = call_timer::must_new_timer("middle", Some(&outer));
    let inner = call_timer::must_new_timer("inner", Some(&middle));
    let _unused = call_timer::must_new_timer("unused_root", None);

    // Nothing logged yet, so there is nothing to report.
    assert_eq!(report_all_to_string(), "");

    for _ in 0..24 {
        inner.log_duration(Duration::from_millis(10));
    }
    for _ in 0..6 {
        middle.log_duration(Duration::from_millis(40));
    }
    for _ in 0..2 {
        outer.log_duration(Duration::from_millis(150));
    }
    main.log_duration(Duration::from_millis(300));

    assert_eq!(
        report_all_to_string(),
        "main        total 300ms in  1 calls, avg 300ms\n\
         \x20 outer     total 300ms in  2 calls, avg 150ms\n\
         \x20   middle  total 240ms in  6 calls, avg  40ms\n\
         \x20     inner total 240ms in 24 calls, avg  10ms\n"
    );

    call_timer::set_format(ReportFormat::Csv);
    assert_eq!(
        report_all_to_string(),
        "Timer;Total;Calls;Average\n\
         main;300ms;1;300ms\n\
         outer;300ms;2;150ms\n\
         middle;240ms;6;40ms\n\
         inner;240ms;24;10ms\n"
    );

    call_timer::set_format(ReportFormat::Table);
    assert_eq!(
        report_all_to_string(),
        "+-------------+------------+--------------+-------------------+\n\
         | Timer name  | Total time | Nr. of calls | Average time/call |\n\
         +-------------+------------+--------------+-------------------+\n\
         | main        |      300ms |            1 |             300ms |\n\
         |   outer     |      300ms |            2 |             150ms |\n\
         |     middle  |      240ms |            6 |              40ms |\n\
         |       inner |      240ms |           24 |              10ms |\n\
         +-------------+------------+--------------+-------------------+\n"
    );

    // Reporting a subtree starts the indentation at the reported timer.
    call_timer::set_format(ReportFormat::PlainText);
    let mut out = Vec::new();
    middle.report(&mut out).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "middle  total 240ms in  6 calls, avg 40ms\n\
         \x20 inner total 240ms in 24 calls, avg 10ms\n"
    );

    // Names are unique across the whole process.
    assert!(matches!(
        call_timer::new_timer("inner", None),
        Err(Error::DuplicateName { .. })
    ));
    assert!(matches!(
        call_timer::new_timer("", Some(&main)),
        Err(Error::NameRequired)
    ));

    let global = call_timer::global();
    assert_eq!(global.len(), 5);
    assert_eq!(global.get("middle").unwrap().calls(), 6);

    // Deactivating silences reports and logging but keeps the data.
    call_timer::set_active(false);
    inner.log_duration(Duration::from_secs(1));
    assert_eq!(report_all_to_string(), "");
    assert!(call_timer::new_timer("late", None).unwrap().is_inert());

    call_timer::set_active(true);
    assert_eq!(inner.calls(), 24);
    assert!(report_all_to_string().starts_with("main "));
}
