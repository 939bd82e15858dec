//! Tracing setup for the `extrack` binary and the test suites.
//!
//! The default filter comes from the number of `-v` flags; `RUST_LOG`
//! overrides it when set.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Filter directive for a `-v` count: none is `info`, one is `debug`,
/// anything more is `trace`.
pub fn level_for_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber for a `-v` count.
pub fn init_for_verbosity(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for_verbosity(verbose)));

    // A subscriber may already be installed when embedded; keep the first one.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_target(verbose > 0))
        .try_init();
}

/// Route debug output through the test harness so it shows on failure only.
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("debug"))
        .try_init();
}
