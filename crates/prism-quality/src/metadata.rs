use image::GenericImageView;

use crate::{
    error::{QualityError, Result},
    types::ImageMeta,
};

/// Decode image bytes and extract the metadata the heuristic needs
///
/// A full decode is the only reliable way to learn the channel layout
/// across formats; callers run this on a blocking thread.
pub(crate) fn extract_meta(bytes: &[u8]) -> Result<ImageMeta> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| QualityError::Decode(format!("failed to decode image: {e}")))?;

    let (width, height) = decoded.dimensions();
    let color = decoded.color();

    Ok(ImageMeta {
        width,
        height,
        has_alpha: color.has_alpha(),
        channel_count: color.channel_count(),
        byte_length: bytes.len(),
    })
}
