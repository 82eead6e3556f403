use tracing_subscriber::EnvFilter;

use crate::config::Verbosity;

/// Directive for the requested verbosity
pub fn filter_directive(verbosity: Verbosity) -> &'static str {
    match verbosity {
        Verbosity::Info => "info",
        Verbosity::Debug => "debug",
    }
}

/// Install the global subscriber. Logs go to stderr; stdout carries workflow
/// commands only. `RUST_LOG`, when set, wins over `verbosity`.
pub fn init_logging(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(verbosity)));

    // try_init fails once a global subscriber exists
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
