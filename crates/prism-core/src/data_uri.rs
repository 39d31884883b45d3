use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use thiserror::Error;

/// Failure while resolving an image payload to raw bytes
#[derive(Debug, Error)]
pub enum ImageFetchError {
    /// The data URI payload was not valid base64
    #[error("invalid base64 payload in data URI")]
    InvalidBase64,

    /// The remote fetch failed before a response arrived
    #[error("failed to fetch image: {0}")]
    Network(String),

    /// The remote server answered with a non-success status
    #[error("failed to fetch image: {0}")]
    Status(u16),
}

/// Strip the `data:image/<type>;base64,` prefix from a data URI
///
/// Several upstream APIs (Bria among them) accept raw base64 rather
/// than a full data URI. Plain URLs and already-stripped payloads are
/// returned unchanged, so the operation is idempotent.
pub fn strip_data_uri_prefix(input: &str) -> &str {
    if !input.starts_with("data:") {
        return input;
    }

    input
        .split_once(";base64,")
        .map_or(input, |(_, payload)| payload)
}

/// Encode raw image bytes as a PNG data URI
pub fn to_png_data_uri(bytes: &[u8]) -> String {
    format!("data:image/png;base64,{}", BASE64.encode(bytes))
}

/// Resolve an image payload (remote URL or data URI) to raw bytes
///
/// Data URIs are decoded locally; anything else is fetched over HTTP
/// with the supplied client.
pub async fn fetch_image_bytes(
    client: &reqwest::Client,
    url: &str,
) -> Result<Vec<u8>, ImageFetchError> {
    if url.starts_with("data:") {
        let payload = url.split_once(',').map_or(url, |(_, p)| p);
        return BASE64
            .decode(payload)
            .map_err(|_| ImageFetchError::InvalidBase64);
    }

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| ImageFetchError::Network(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ImageFetchError::Status(status.as_u16()));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| ImageFetchError::Network(e.to_string()))?;

    Ok(bytes.to_vec())
}
