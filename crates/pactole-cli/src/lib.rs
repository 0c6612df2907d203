//! # pactole-cli
//!
//! The `pactole` binary and its building blocks.
//!
//! ## Run Sequence
//! 1. Parse arguments ([`cli`])
//! 2. Initialize tracing (stderr)
//! 3. Load configuration: defaults, TOML, environment, flags ([`config`])
//! 4. Load and filter each dataset ([`loader`])
//! 5. Solve with pactole-core
//! 6. Render text or JSON to stdout ([`report`])

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod loader;
pub mod report;

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset.
pub fn default_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn,pactole=info",
        1 => "warn,pactole=debug",
        _ => "warn,pactole=trace",
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages from every crate
/// - `RUST_LOG=pactole=trace` - Trace for pactole crates only
/// - Default: `warn,pactole=info`, raised by `-v`
///
/// Logs go to stderr so stdout only carries reports.
pub fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        assert_eq!(default_filter(0), "warn,pactole=info");
        assert_eq!(default_filter(1), "warn,pactole=debug");
        assert_eq!(default_filter(7), "warn,pactole=trace");
    }
}
