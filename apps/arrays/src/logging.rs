//! Diagnostics go to stderr so stdout only carries the walkthrough.

use std::io;

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn";
const WARM_UP_WIDTH: usize = 512;

/// Install the global subscriber. `RUST_LOG` overrides the default filter.
/// Calling this more than once is harmless.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    install(filter);
}

/// Install the global subscriber with fixed filter directives.
pub fn init_with_filter(directives: &str) {
    install(EnvFilter::new(directives));
}

fn install(filter: EnvFilter) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// Format one event into a discarded writer on the current thread.
///
/// The formatter keeps a per-thread line buffer for the rest of the process.
/// Doing this before a leak baseline keeps that buffer out of the window;
/// the padding leaves it room for any line the walkthrough logs.
pub fn warm_up() {
    let sink = tracing_subscriber::fmt().with_writer(io::sink).finish();
    tracing::subscriber::with_default(sink, || {
        tracing::warn!(
            padding = %format_args!("{:width$}", "", width = WARM_UP_WIDTH),
            "formatter ready"
        );
    });
}
