//! Logging initialization

use std::path::PathBuf;

/// Initialize debug logging, returning the log file path.
///
/// Debug logs go to a persisted temp file so stdout stays clean for command
/// output. Without `--debug`, logging stays disabled entirely.
pub fn init_logging(debug: bool) -> Option<PathBuf> {
    if !debug {
        return None;
    }

    let named = tempfile::Builder::new()
        .prefix("solsync-")
        .suffix(".log")
        .tempfile()
        .ok()?;
    let (file, path) = named.keep().ok()?;

    tracing_subscriber::fmt()
        .with_writer(file)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_ansi(false) // No ANSI codes in log file
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    Some(path)
}
