pub(crate) mod bria;
pub(crate) mod fal;
pub(crate) mod huggingface;
pub(crate) mod removebg;
pub(crate) mod replicate;

use async_trait::async_trait;

use crate::{error::Result, types::RemovalOptions};

/// Trait for background removal provider adapters
#[async_trait]
pub(crate) trait RemovalBackend: Send + Sync {
    /// Remove the background, returning the processed image as a URL
    /// or data URI
    async fn remove(&self, image_url: &str, options: &RemovalOptions) -> Result<String>;
}
