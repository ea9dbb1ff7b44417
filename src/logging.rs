//! Logging setup for the benchmark binary.
//!
//! Uses the `tracing` ecosystem. The filter comes from `RUST_LOG`
//! (e.g. "info", "matmul_lanes=debug") and defaults to `warn`, so a plain
//! run prints only the report. Log lines go to stderr.

use std::sync::OnceLock;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "warn";

static TRACING_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Install the global subscriber. Safe to call more than once; only the
/// first call does anything.
pub fn init() {
    TRACING_INITIALIZED.get_or_init(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

        // A subscriber installed elsewhere (e.g. by a test harness) wins.
        let _ = tracing_subscriber::registry().with(filter).with(layer).try_init();
    });
}
