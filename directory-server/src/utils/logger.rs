//! Logging Infrastructure
//!
//! Structured logging setup for the directory server binary. Tests
//! leave the subscriber uninitialized and capture via `cargo test`.

/// Initialize the logger
///
/// `level` accepts anything `tracing_subscriber::EnvFilter` parses
/// ("info", "directory_server=debug", ...). `RUST_LOG` wins when set.
pub fn init_logger(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}
