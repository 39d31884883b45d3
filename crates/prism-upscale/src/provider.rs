pub(crate) mod bria;
pub(crate) mod fal;
pub(crate) mod replicate;

use async_trait::async_trait;

use crate::error::Result;

/// Result of one upscale call before response assembly
///
/// Only fal reports output dimensions; the other providers leave them
/// unset and the dispatcher estimates from the source size.
pub(crate) struct UpscaleOutcome {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Trait for upscale provider adapters
#[async_trait]
pub(crate) trait UpscaleBackend: Send + Sync {
    /// Upscale the image by the given factor
    async fn upscale(&self, image_url: &str, scale: u32, face_enhance: bool)
    -> Result<UpscaleOutcome>;
}
