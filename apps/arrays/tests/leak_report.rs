//! The end-of-run leak report stays quiet when nothing leaks.
//!
//! Kept to a single test so no other thread touches the global counters or
//! the log formatter while a window is open.

use arrays::leak::{self, TrackingAllocator};
use arrays::{logging, run_checked, run_demo};

#[global_allocator]
static GLOBAL: TrackingAllocator = TrackingAllocator::new();

const OUTPUT_CAPACITY: usize = 64 * 1024;

#[test]
fn leak_report_and_walkthrough_balance() {
    logging::init_with_filter("warn");

    // Every snapshot fails, so the global subscriber formats a warning for
    // each one inside the checked window.
    let mut out = Vec::with_capacity(OUTPUT_CAPACITY);
    let report = run_checked(&mut out, || Err(hal::MemoryError::NotSupported));

    assert!(report.result.is_ok());
    assert_eq!(report.exit_code(), 0);
    assert!(report.leak_free, "leak report fired on the degraded path");

    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.matches("memory status unavailable").count(), 3);

    // First pass pays for lazily initialized state; the second must be exact.
    run_demo(&mut Vec::new()).unwrap();
    let mut out = Vec::with_capacity(OUTPUT_CAPACITY);
    let before = leak::snapshot();
    run_demo(&mut out).unwrap();
    let after = leak::snapshot();

    assert!(
        after.is_balanced_since(&before),
        "outstanding={} live_bytes={}",
        after.outstanding_since(&before),
        after.live_bytes_since(&before)
    );
    assert!(out.starts_with(b"A:"));
}
