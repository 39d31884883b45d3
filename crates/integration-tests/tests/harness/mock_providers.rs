//! Mock upstream provider server for integration tests
//!
//! One server impersonates every upstream the gateway talks to: fal.ai,
//! Replicate, Hugging Face, Bria, and remove.bg. Pointing all provider
//! base URLs at the same mock keeps test setup to a single line.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

/// Mock provider backend that returns predictable responses
pub struct MockProviders {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockState>,
}

struct MockState {
    /// Requests seen by the fal generation endpoint
    fal_generate_count: AtomicU32,
    /// Number of fal generation requests to fail before succeeding
    fail_count: AtomicU32,
    /// When set, fal generation always fails with a safety message
    safety: bool,
    /// Last body received by the Bria gen_fill endpoint
    last_gen_fill_body: Mutex<Option<Value>>,
}

impl MockProviders {
    /// Start the mock server, returning immediately
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_inner(0, false).await
    }

    /// Start a mock whose fal generation fails the first `n` requests with 500
    pub async fn start_failing(n: u32) -> anyhow::Result<Self> {
        Self::start_inner(n, false).await
    }

    /// Start a mock whose fal generation is always rejected by the safety checker
    pub async fn start_with_safety_rejection() -> anyhow::Result<Self> {
        Self::start_inner(0, true).await
    }

    async fn start_inner(fail_count: u32, safety: bool) -> anyhow::Result<Self> {
        let state = Arc::new(MockState {
            fal_generate_count: AtomicU32::new(0),
            fail_count: AtomicU32::new(fail_count),
            safety,
            last_gen_fill_body: Mutex::new(None),
        });

        let app = Router::new()
            // fal.ai
            .route("/fal-ai/nano-banana-pro", routing::post(fal_generate))
            .route("/fal-ai/birefnet", routing::post(fal_birefnet))
            .route("/fal-ai/bria/rmbg", routing::post(fal_bria_rmbg))
            .route("/fal-ai/real-esrgan", routing::post(fal_upscale))
            // Replicate
            .route(
                "/models/black-forest-labs/flux-schnell/predictions",
                routing::post(replicate_flux),
            )
            .route("/models/cjwbw/rembg/predictions", routing::post(replicate_rembg))
            .route(
                "/models/nightmareai/real-esrgan/predictions",
                routing::post(replicate_upscale),
            )
            // Hugging Face
            .route("/models/black-forest-labs/FLUX.1-dev", routing::post(hf_flux))
            .route("/models/briaai/RMBG-2.0", routing::post(hf_rmbg))
            // Bria engine
            .route("/image/generate", routing::post(bria_generate))
            .route("/image/generate/lite", routing::post(bria_generate_lite))
            .route("/image/edit/remove_background", routing::post(bria_rmbg))
            .route("/image/edit/increase_resolution", routing::post(bria_upscale))
            .route("/image/edit/gen_fill", routing::post(bria_gen_fill))
            // remove.bg
            .route("/removebg", routing::post(removebg))
            // Test image host
            .route("/img/{spec}", routing::get(serve_image))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL for configuring the mock as every provider
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// URL of a generated test image
    ///
    /// Specs look like `rgba-800x800` (noisy RGBA), `rgb-300x300`
    /// (noisy opaque RGB), or `flat-640x640` (flat RGBA, compresses to
    /// almost nothing).
    pub fn image_url(&self, spec: &str) -> String {
        format!("http://{}/img/{spec}", self.addr)
    }

    /// Number of fal generation requests received
    pub fn fal_generate_count(&self) -> u32 {
        self.state.fal_generate_count.load(Ordering::SeqCst)
    }

    /// Body most recently received by the Bria gen_fill endpoint
    pub fn last_gen_fill_body(&self) -> Option<Value> {
        self.state.last_gen_fill_body.lock().unwrap().clone()
    }
}

impl Drop for MockProviders {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

// -- fal.ai handlers --

async fn fal_generate(State(state): State<Arc<MockState>>) -> Response {
    state.fal_generate_count.fetch_add(1, Ordering::SeqCst);

    if state.safety {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Image rejected by safety checker",
        )
            .into_response();
    }

    let failing = state
        .fail_count
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
        .is_ok();
    if failing {
        return (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response();
    }

    Json(json!({
        "images": [{"url": "https://cdn.test/fal.png", "width": 1024, "height": 1024}]
    }))
    .into_response()
}

async fn fal_birefnet() -> Json<Value> {
    Json(json!({"image": {"url": "https://cdn.test/birefnet.png"}}))
}

async fn fal_bria_rmbg() -> Json<Value> {
    Json(json!({"image": {"url": "https://cdn.test/fal-rmbg.png"}}))
}

async fn fal_upscale() -> Json<Value> {
    Json(json!({
        "image": {"url": "https://cdn.test/upscaled.png", "width": 2048, "height": 2048}
    }))
}

// -- Replicate handlers --

async fn replicate_flux() -> Json<Value> {
    Json(json!({"output": ["https://cdn.test/flux.png"]}))
}

async fn replicate_rembg() -> Json<Value> {
    Json(json!({"output": "https://cdn.test/replicate-rembg.png"}))
}

async fn replicate_upscale() -> Json<Value> {
    // nightmareai/real-esrgan reports no output dimensions
    Json(json!({"output": "https://cdn.test/replicate-upscale.png"}))
}

// -- Hugging Face handlers (return raw image bytes) --

async fn hf_flux() -> Response {
    png_response(png_bytes(64, 64, true, true))
}

async fn hf_rmbg() -> Response {
    png_response(png_bytes(64, 64, true, true))
}

// -- Bria handlers --

async fn bria_generate() -> Json<Value> {
    Json(json!({"result": {"image_url": "https://cdn.test/bria.png"}}))
}

async fn bria_generate_lite() -> Json<Value> {
    Json(json!({"result": {"image_url": "https://cdn.test/bria-lite.png"}}))
}

async fn bria_rmbg() -> Json<Value> {
    Json(json!({"result": {"image_url": "https://cdn.test/bria-rmbg.png"}}))
}

async fn bria_upscale() -> Json<Value> {
    Json(json!({"result": {"image_url": "https://cdn.test/bria-upscale.png"}}))
}

async fn bria_gen_fill(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> Json<Value> {
    *state.last_gen_fill_body.lock().unwrap() = Some(body);
    Json(json!({"result": {"image_url": "https://cdn.test/gen-fill.png"}}))
}

// -- remove.bg handler (returns cut-out image bytes) --

async fn removebg() -> Response {
    png_response(png_bytes(64, 64, true, true))
}

// -- Test image host --

async fn serve_image(Path(spec): Path<String>) -> Response {
    match parse_spec(&spec) {
        Some(bytes) => png_response(bytes),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

fn parse_spec(spec: &str) -> Option<Vec<u8>> {
    let (kind, dims) = spec.split_once('-')?;
    let (w, h) = dims.split_once('x')?;
    let width: u32 = w.parse().ok()?;
    let height: u32 = h.parse().ok()?;

    match kind {
        "rgba" => Some(png_bytes(width, height, true, true)),
        "rgb" => Some(png_bytes(width, height, false, true)),
        "flat" => Some(png_bytes(width, height, true, false)),
        _ => None,
    }
}

fn png_response(bytes: Vec<u8>) -> Response {
    ([(header::CONTENT_TYPE, "image/png")], bytes).into_response()
}

/// Encode a test PNG
///
/// Noisy pixels defeat PNG compression, so noisy images have a realistic
/// byte-per-pixel weight while flat images compress to almost nothing.
pub fn png_bytes(width: u32, height: u32, alpha: bool, noisy: bool) -> Vec<u8> {
    use image::{DynamicImage, ImageFormat, Rgb, Rgba, RgbImage, RgbaImage};

    let image = if alpha {
        let mut img = RgbaImage::new(width, height);
        if noisy {
            for (x, y, pixel) in img.enumerate_pixels_mut() {
                *pixel = Rgba(noise(x, y));
            }
        }
        DynamicImage::ImageRgba8(img)
    } else {
        let mut img = RgbImage::new(width, height);
        if noisy {
            for (x, y, pixel) in img.enumerate_pixels_mut() {
                let n = noise(x, y);
                *pixel = Rgb([n[0], n[1], n[2]]);
            }
        }
        DynamicImage::ImageRgb8(img)
    };

    let mut buf = std::io::Cursor::new(Vec::new());
    image
        .write_to(&mut buf, ImageFormat::Png)
        .expect("png encoding");
    buf.into_inner()
}

fn noise(x: u32, y: u32) -> [u8; 4] {
    let seed = x
        .wrapping_mul(2_654_435_761)
        .wrapping_add(y.wrapping_mul(40_503));
    [seed as u8, (seed >> 8) as u8, (seed >> 16) as u8, 255]
}
