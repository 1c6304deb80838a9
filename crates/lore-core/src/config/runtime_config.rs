use serde::{Deserialize, Serialize};

use super::defaults;

/// Runtime (worker pool, limits, logging) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub max_concurrent_validations: usize,
    pub max_concurrent_synthesis: usize,
    /// Deadline applied to calls that do not carry their own.
    pub operation_timeout_ms: u64,
    pub log_level: String,
    pub json_logs: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            max_concurrent_validations: defaults::DEFAULT_MAX_CONCURRENT_VALIDATIONS,
            max_concurrent_synthesis: defaults::DEFAULT_MAX_CONCURRENT_SYNTHESIS,
            operation_timeout_ms: defaults::DEFAULT_OPERATION_TIMEOUT_MS,
            log_level: defaults::DEFAULT_LOG_LEVEL.to_string(),
            json_logs: defaults::DEFAULT_JSON_LOGS,
        }
    }
}
