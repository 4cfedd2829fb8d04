//! Logging initialization

use tracing_subscriber::EnvFilter;

/// Initialize logging based on debug flag
///
/// Logs go to stderr so resolved output on stdout stays machine-readable.
/// `--debug` forces the `debug` level, otherwise `RUST_LOG` is honoured and
/// falls back to `warn`.
pub fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(debug)
        .with_file(debug)
        .with_line_number(debug)
        .try_init();
}
