//! Registry configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default history window per session
pub const DEFAULT_MAX_HISTORY: usize = 10;

const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 1800;

/// Tunables for the session registry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Maximum past states kept per session
    pub max_history: usize,
    /// Sessions idle longer than this are eligible for eviction
    pub idle_timeout_secs: u64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        RegistryConfig {
            max_history: DEFAULT_MAX_HISTORY,
            idle_timeout_secs: DEFAULT_IDLE_TIMEOUT_SECS,
        }
    }
}

impl RegistryConfig {
    /// Idle timeout as a duration
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }
}
