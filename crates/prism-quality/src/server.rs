use reqwest::Client;

use prism_config::QualityConfig;
use prism_core::fetch_image_bytes;

use crate::{
    error::{QualityError, Result},
    heuristic,
    metadata::extract_meta,
    types::QualityVerdict,
};

/// Quality check service
///
/// Fetches the original/processed pair in parallel, extracts metadata
/// off the async runtime, and evaluates the heuristic.
pub struct Server {
    client: Client,
    config: QualityConfig,
}

impl Server {
    pub const fn new(client: Client, config: QualityConfig) -> Self {
        Self { client, config }
    }

    /// Run the quality check for the given image pair
    pub async fn check(&self, original_url: &str, processed_url: &str) -> Result<QualityVerdict> {
        // Fan-out/fan-in: both fetches must finish before any decoding
        let (original_bytes, processed_bytes) = tokio::try_join!(
            fetch_image_bytes(&self.client, original_url),
            fetch_image_bytes(&self.client, processed_url),
        )
        .map_err(|e| QualityError::Fetch(e.to_string()))?;

        let (original, processed) = tokio::task::spawn_blocking(move || {
            let original = extract_meta(&original_bytes)?;
            let processed = extract_meta(&processed_bytes)?;
            Ok::<_, QualityError>((original, processed))
        })
        .await
        .map_err(|_| QualityError::TaskFailed)??;

        Ok(heuristic::evaluate(&original, &processed, &self.config))
    }
}
