use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

/// Logs go to stderr so stdout carries nothing but the report.
///
/// `RUST_LOG` takes precedence over the `--verbose` switch.
pub fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}
