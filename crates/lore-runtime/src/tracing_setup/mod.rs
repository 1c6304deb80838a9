//! Tracing setup: structured logging filtered by `LORE_LOG`.

pub mod events;

use tracing_subscriber::EnvFilter;

use lore_core::config::RuntimeConfig;

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "LORE_LOG";

/// Initialize the subscriber with JSON output, honouring `LORE_LOG`.
/// Defaults to `info`. Returns false when a subscriber was already installed.
pub fn init_tracing() -> bool {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .json()
        .try_init()
        .is_ok()
}

/// Initialize with a custom filter string (for testing or embedding).
pub fn init_tracing_with_filter(filter: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(true)
        .json()
        .try_init()
        .is_ok()
}

/// Initialize from runtime configuration. `LORE_LOG` still wins over
/// `log_level` when set.
pub fn init_from_config(config: &RuntimeConfig) -> bool {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    if config.json_logs {
        builder.json().try_init().is_ok()
    } else {
        builder.try_init().is_ok()
    }
}
