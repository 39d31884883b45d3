//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use prism_config::{Config, HealthConfig, ProviderCredentials, RetryConfig, ServerConfig};
use secrecy::SecretString;

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with minimal defaults
    pub fn new() -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    health: HealthConfig {
                        enabled: true,
                        ..HealthConfig::default()
                    },
                    ..ServerConfig::default()
                },
                ..Config::default()
            },
        }
    }

    fn credentials(base_url: &str) -> ProviderCredentials {
        ProviderCredentials {
            api_key: SecretString::from("test-key"),
            base_url: Some(base_url.to_owned()),
        }
    }

    /// Point the fal provider at a mock backend
    pub fn with_fal(mut self, base_url: &str) -> Self {
        self.config.providers.fal = Some(Self::credentials(base_url));
        self
    }

    /// Point the Replicate provider at a mock backend
    pub fn with_replicate(mut self, base_url: &str) -> Self {
        self.config.providers.replicate = Some(Self::credentials(base_url));
        self
    }

    /// Point the Hugging Face provider at a mock backend
    pub fn with_huggingface(mut self, base_url: &str) -> Self {
        self.config.providers.huggingface = Some(Self::credentials(base_url));
        self
    }

    /// Point the Bria provider at a mock backend
    pub fn with_bria(mut self, base_url: &str) -> Self {
        self.config.providers.bria = Some(Self::credentials(base_url));
        self
    }

    /// Point the remove.bg provider at a mock backend
    pub fn with_removebg(mut self, base_url: &str) -> Self {
        self.config.providers.removebg = Some(Self::credentials(base_url));
        self
    }

    /// Set the generation retry policy
    ///
    /// Tests use a tiny base delay so exhausted-retry cases finish fast
    pub fn with_retry(mut self, max_attempts: u32, base_delay_ms: u64) -> Self {
        self.config.generation.retry = RetryConfig {
            max_attempts,
            base_delay_ms,
        };
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
