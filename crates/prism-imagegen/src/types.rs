use serde::{Deserialize, Serialize};

use prism_core::ImageRef;

/// Maximum number of images a single request may ask for
const MAX_IMAGES: u32 = 4;

/// Image generation request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    /// Text description of the desired image
    pub prompt: String,
    /// Aspect ratio (e.g. "1:1", "16:9")
    #[serde(default = "default_aspect_ratio")]
    pub aspect_ratio: String,
    /// Target resolution tier (e.g. "1K", "2K")
    #[serde(default = "default_resolution")]
    pub resolution: String,
    /// Number of images to generate; providers that only ever return a
    /// single image ignore this
    #[serde(default = "default_num_images")]
    pub num_images: u32,
    /// Which upstream service handles the request
    #[serde(default)]
    pub provider: GenerationProvider,
    /// Optional seed for reproducible output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl GenerateRequest {
    /// Number of images clamped to the supported range
    pub const fn clamped_num_images(&self) -> u32 {
        if self.num_images == 0 {
            1
        } else if self.num_images > MAX_IMAGES {
            MAX_IMAGES
        } else {
            self.num_images
        }
    }
}

/// Default aspect ratio
fn default_aspect_ratio() -> String {
    "1:1".to_string()
}

/// Default resolution tier
fn default_resolution() -> String {
    "2K".to_string()
}

/// Default number of images
const fn default_num_images() -> u32 {
    1
}

/// Supported generation providers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum GenerationProvider {
    /// fal.ai nano-banana-pro (primary, retried on failure)
    #[default]
    #[serde(rename = "fal")]
    Fal,
    /// Replicate flux-schnell
    #[serde(rename = "replicate-flux-schnell")]
    ReplicateFluxSchnell,
    /// Hugging Face FLUX.1-dev
    #[serde(rename = "hf-flux")]
    HfFlux,
    /// Bria FIBO
    #[serde(rename = "bria")]
    Bria,
    /// Bria FIBO lite
    #[serde(rename = "bria-lite")]
    BriaLite,
}

impl GenerationProvider {
    /// Whether this provider gets the bounded-retry treatment
    ///
    /// Only the primary provider is retried; fallbacks fail fast.
    pub const fn is_primary(self) -> bool {
        matches!(self, Self::Fal)
    }
}

/// Image generation response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Generated images in request order
    pub images: Vec<ImageRef>,
}
