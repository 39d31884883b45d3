use std::time::Duration;

use serde::Deserialize;

/// Settings applied to every upstream HTTP call
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpstreamConfig {
    /// Per-call timeout in seconds
    ///
    /// Inference providers can take tens of seconds on cold models, so
    /// the default is generous.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl UpstreamConfig {
    /// Timeout as a Duration
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

const fn default_timeout_seconds() -> u64 {
    60
}
