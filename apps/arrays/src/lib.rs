//! Arrays and memory walkthrough
//!
//! Shows three ways of initializing a fixed-size stack array, then allocates,
//! fills and releases a 1 MiB heap buffer while printing the available
//! page-file and virtual address-space figures around it.
//!
//! Platform abstraction follows the HAL pattern:
//! - Interface defined in hal/src/<module>/mod.rs
//! - Implementations in hal/src/<module>/<platform>.rs
//! - Selection via Cargo features (platform-linux, platform-windows)

pub mod buffer;
pub mod demo;
pub mod error;
pub mod leak;
pub mod logging;
pub mod report;
pub mod sequence;

use std::io::{self, Write};

use hal::{MemoryResult, MemoryStatus};
use tracing::{debug, error};

pub use demo::{run_demo, run_demo_with};
pub use error::{DemoError, DemoResult};

/// Outcome of one checked walkthrough.
#[derive(Debug)]
pub struct RunReport {
    pub result: DemoResult<()>,
    /// No allocation made during the walkthrough was left unreleased.
    pub leak_free: bool,
}

impl RunReport {
    pub fn exit_code(&self) -> i32 {
        match self.result {
            Ok(()) => 0,
            Err(_) => 1,
        }
    }
}

/// Run the walkthrough into `out` between two allocation snapshots.
///
/// The caller's `out` must already own any buffer it keeps across the run.
pub fn run_checked<W, Q>(out: &mut W, query: Q) -> RunReport
where
    W: Write,
    Q: FnMut() -> MemoryResult<MemoryStatus>,
{
    // The log formatter allocates its per-thread line buffer on first use.
    logging::warm_up();
    debug!("starting walkthrough");
    let baseline = leak::snapshot();

    let result = run_demo_with(out, query).and_then(|()| out.flush().map_err(DemoError::from));
    let leak_free = leak::report(&baseline);

    RunReport { result, leak_free }
}

/// Run the demo - portable entry point.
///
/// Returns the process exit status: 0 on success, 1 on a fatal error.
pub fn run() -> i32 {
    logging::init();

    let stdout = io::stdout();
    let report = {
        let mut out = stdout.lock();
        run_checked(&mut out, hal::query_memory_status)
    };

    if let Err(err) = &report.result {
        error!(error = %err, "demo failed");
    }
    report.exit_code()
}
