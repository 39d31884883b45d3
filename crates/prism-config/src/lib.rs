#![allow(clippy::must_use_candidate)]

pub mod cors;
mod env;
pub mod generation;
pub mod health;
mod loader;
pub mod providers;
pub mod quality;
pub mod server;
pub mod upstream;

use serde::Deserialize;

pub use cors::{AnyOrArray, CorsConfig};
pub use generation::{GenerationConfig, RetryConfig};
pub use health::HealthConfig;
pub use providers::{ProviderCredentials, ProvidersConfig};
pub use quality::QualityConfig;
pub use server::ServerConfig;
pub use upstream::UpstreamConfig;

/// Top-level Prism configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Upstream provider credentials
    #[serde(default)]
    pub providers: ProvidersConfig,
    /// Generation dispatch policy
    #[serde(default)]
    pub generation: GenerationConfig,
    /// Quality heuristic thresholds
    #[serde(default)]
    pub quality: QualityConfig,
    /// Upstream HTTP call settings
    #[serde(default)]
    pub upstream: UpstreamConfig,
}
