use std::time::Duration;

use serde::Deserialize;

/// Generation dispatch policy
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerationConfig {
    /// Retry policy for the primary (fal) provider
    #[serde(default)]
    pub retry: RetryConfig,
}

/// Bounded retry with exponential backoff
///
/// Applies only to the primary generation provider; fallback providers
/// surface their first failure immediately.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RetryConfig {
    /// Total attempts, including the first
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Base backoff delay in milliseconds; attempt `n` waits `2^n * base`
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay_ms(),
        }
    }
}

impl RetryConfig {
    /// Backoff delay after the given attempt (1-based)
    ///
    /// Saturates instead of overflowing for absurdly large attempt
    /// counts; nothing sleeps that long anyway.
    pub const fn backoff_delay(&self, attempt: u32) -> Duration {
        let factor = match 2u64.checked_pow(attempt) {
            Some(factor) => factor,
            None => u64::MAX,
        };
        Duration::from_millis(factor.saturating_mul(self.base_delay_ms))
    }
}

const fn default_max_attempts() -> u32 {
    3
}

const fn default_base_delay_ms() -> u64 {
    500
}
