#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod data_uri;
mod error;
mod http_client;
mod types;

pub use data_uri::{ImageFetchError, fetch_image_bytes, strip_data_uri_prefix, to_png_data_uri};
pub use error::HttpError;
pub use http_client::http_client;
pub use types::{Dimensions, ImageRef};
