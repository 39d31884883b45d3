pub(crate) mod bria;
pub(crate) mod fal;
pub(crate) mod huggingface;
pub(crate) mod replicate;

use async_trait::async_trait;

use prism_core::ImageRef;

use crate::{error::Result, types::GenerateRequest};

/// Trait for image generation provider adapters
///
/// Each adapter translates the canonical request into its provider's
/// wire format and normalizes the response back to `ImageRef`s. No
/// retry or caching lives here; that is dispatch policy.
#[async_trait]
pub(crate) trait GenerationBackend: Send + Sync {
    /// Generate images for the given request
    async fn generate(&self, request: &GenerateRequest) -> Result<Vec<ImageRef>>;
}
