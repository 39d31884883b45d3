use secrecy::SecretString;
use serde::Deserialize;

/// Credentials for every upstream service
///
/// A service left unset is simply unavailable: requests naming it fail
/// with a "not configured" error rather than an authentication failure
/// deep inside the call.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProvidersConfig {
    /// fal.ai (generation, BiRefNet/RMBG removal, Real-ESRGAN upscale)
    #[serde(default)]
    pub fal: Option<ProviderCredentials>,
    /// Replicate (flux-schnell, rembg, real-esrgan)
    #[serde(default)]
    pub replicate: Option<ProviderCredentials>,
    /// Hugging Face Inference (FLUX.1-dev, RMBG-2.0)
    #[serde(default)]
    pub huggingface: Option<ProviderCredentials>,
    /// Bria engine v2 (generation, editing tools)
    #[serde(default)]
    pub bria: Option<ProviderCredentials>,
    /// remove.bg
    #[serde(default)]
    pub removebg: Option<ProviderCredentials>,
}

/// API key and optional endpoint override for one upstream service
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderCredentials {
    /// API key, usually injected via `{{ env.VAR }}`
    pub api_key: SecretString,
    /// Base URL override, mainly for tests against mock upstreams
    #[serde(default)]
    pub base_url: Option<String>,
}
