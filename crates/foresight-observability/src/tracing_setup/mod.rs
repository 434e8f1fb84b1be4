//! Tracing setup: structured logging with span definitions and event types.

pub mod events;
pub mod spans;

use std::sync::Once;

use foresight_core::config::ObservabilityConfig;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the filter directives.
pub const LOG_ENV: &str = "FORESIGHT_LOG";

static INIT: Once = Once::new();

/// Initialize the subscriber with JSON output.
///
/// Respects `FORESIGHT_LOG` for filtering and defaults to `info`.
/// Only the first call in a process installs anything.
pub fn init_tracing() {
    init_from_config(&ObservabilityConfig::default());
}

/// Initialize from config. `FORESIGHT_LOG`, when set, wins over `log_level`.
pub fn init_from_config(config: &ObservabilityConfig) {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    install(filter, config.json);
}

/// Initialize with an explicit filter string (tests, embedding hosts).
pub fn init_tracing_with_filter(filter: &str) {
    install(EnvFilter::new(filter), true);
}

fn install(filter: EnvFilter, json: bool) {
    INIT.call_once(|| {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true);
        // A host may already own the global subscriber; keep theirs.
        let _ = if json {
            builder.json().try_init()
        } else {
            builder.try_init()
        };
    });
}
