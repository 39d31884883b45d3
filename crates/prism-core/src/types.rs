use serde::{Deserialize, Serialize};

/// A generated or processed image result
///
/// `url` is either a remote HTTPS URL or a self-contained
/// `data:image/...;base64,` URI. Width and height are `0` when the
/// provider does not report them.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ImageRef {
    /// Image location
    pub url: String,
    /// Pixel width, 0 when unknown
    pub width: u32,
    /// Pixel height, 0 when unknown
    pub height: u32,
}

/// Pixel dimensions of an image
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Total pixel count
    pub const fn pixels(self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Larger of the two dimensions
    pub const fn max_dimension(self) -> u32 {
        if self.width > self.height { self.width } else { self.height }
    }
}
