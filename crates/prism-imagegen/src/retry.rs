use tokio_util::sync::CancellationToken;

use prism_config::RetryConfig;
use prism_core::ImageRef;

use crate::{
    error::{ImageGenError, Result},
    provider::GenerationBackend,
    types::GenerateRequest,
};

/// Call a backend with bounded retry and exponential backoff
///
/// Attempt `n` failing waits `2^n * base_delay` before the next try;
/// the final failure is surfaced as-is. Both the in-flight call and
/// the backoff sleep abort when the cancellation token fires.
pub(crate) async fn call_with_retry(
    backend: &dyn GenerationBackend,
    request: &GenerateRequest,
    retry: &RetryConfig,
    cancel: &CancellationToken,
) -> Result<Vec<ImageRef>> {
    let mut last_error = None;

    for attempt in 1..=retry.max_attempts {
        let result = tokio::select! {
            () = cancel.cancelled() => return Err(ImageGenError::Cancelled),
            result = backend.generate(request) => result,
        };

        match result {
            Ok(images) => return Ok(images),
            Err(err) => {
                tracing::warn!(attempt, error = %err, "generation attempt failed");
                last_error = Some(err);
            }
        }

        if attempt < retry.max_attempts {
            tokio::select! {
                () = cancel.cancelled() => return Err(ImageGenError::Cancelled),
                () = tokio::time::sleep(retry.backoff_delay(attempt)) => {}
            }
        }
    }

    Err(last_error.unwrap_or_else(|| ImageGenError::Upstream("Generation failed".to_string())))
}
