//! Logging configuration and initialization
//!
//! This module sets up the tracing subscriber for structured logging
//! throughout the application. Log lines go to stderr so the interactive
//! session on stdout is not interleaved with them.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Normalize a configured log level into an `EnvFilter` directive
///
/// Only the first word is considered so trailing comments in `.env` files are
/// ignored. Unknown levels fall back to "info"; "warning" and "critical" are
/// accepted as aliases for "warn" and "error".
pub fn normalize_level(log_level: &str) -> &'static str {
    let level = log_level
        .split_whitespace()
        .next()
        .unwrap_or("info")
        .to_lowercase();

    match level.as_str() {
        "trace" => "trace",
        "debug" => "debug",
        "info" => "info",
        "warn" | "warning" => "warn",
        "error" | "critical" => "error",
        _ => "info",
    }
}

/// Initialize the logging system with the specified level
///
/// `RUST_LOG` takes precedence over the configured level when it is set.
pub fn init_logging(log_level: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(normalize_level(log_level)));

    // try_init so a second call (tests, embedded use) is not fatal
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
