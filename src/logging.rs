//! Logging setup.
//!
//! The library only emits `tracing` events; installing a subscriber is up to
//! the binary (or a test).

use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global subscriber.
///
/// `RUST_LOG` takes precedence. Without it the level is `info`, or `debug`
/// when `verbose` is set. Logs go to stderr so that stdout carries only the
/// generated output.
///
/// # Example
/// ```no_run
/// u_timetable::logging::init(false);
/// ```
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Installs a `debug` subscriber for tests. Safe to call repeatedly.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}

fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "info"
    }
}
