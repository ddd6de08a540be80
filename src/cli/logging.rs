//! Logging initialization

use std::path::PathBuf;

/// Initialize logging based on the debug flag.
/// Returns the log file path if debug logging is enabled.
///
/// Logging goes to a file rather than stderr so the tree output stays clean
/// for piping. The core only emits `tracing` events and never touches
/// subscriber state; this is the single place a subscriber is installed.
pub fn init_logging(debug: bool) -> Option<PathBuf> {
    if !debug {
        // Silent by default
        return None;
    }

    let log_file = tempfile::Builder::new()
        .prefix("podgraph-")
        .suffix(".log")
        .tempfile()
        .map(|f| {
            let path = f.path().to_path_buf();
            // Keep the file around after the handle drops; the OS temp dir
            // cleanup owns its lifetime from here
            std::mem::forget(f);
            path
        })
        .unwrap_or_else(|_| {
            std::env::temp_dir().join(format!("podgraph-{}.log", std::process::id()))
        });

    match std::fs::OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(&log_file)
    {
        Ok(file) => {
            tracing_subscriber::fmt()
                .with_writer(file)
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
                )
                .with_ansi(false)
                .with_target(true)
                .init();
            Some(log_file)
        }
        Err(_) => None,
    }
}
