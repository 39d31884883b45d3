mod harness;

use harness::config::ConfigBuilder;
use harness::mock_providers::MockProviders;
use harness::server::TestServer;
use serde_json::{Value, json};

#[tokio::test]
async fn missing_image_url_is_rejected() {
    let mock = MockProviders::start().await.unwrap();
    let config = ConfigBuilder::new().with_fal(&mock.base_url()).build();
    let server = TestServer::start(config).await.unwrap();

    let resp = server
        .client()
        .post(server.url("/api/upscale"))
        .json(&json!({"imageUrl": ""}))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "imageUrl is required");
}

#[tokio::test]
async fn unsupported_scale_is_rejected() {
    let mock = MockProviders::start().await.unwrap();
    let config = ConfigBuilder::new().with_fal(&mock.base_url()).build();
    let server = TestServer::start(config).await.unwrap();

    let resp = server
        .client()
        .post(server.url("/api/upscale"))
        .json(&json!({"imageUrl": "https://cdn.test/source.png", "targetScale": 3}))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "targetScale must be 2 or 4");
}

#[tokio::test]
async fn default_provider_reports_output_size() {
    let mock = MockProviders::start().await.unwrap();
    let config = ConfigBuilder::new().with_fal(&mock.base_url()).build();
    let server = TestServer::start(config).await.unwrap();

    let resp = server
        .client()
        .post(server.url("/api/upscale"))
        .json(&json!({
            "imageUrl": "https://cdn.test/source.png",
            "targetScale": 2,
            "originalWidth": 1024,
            "originalHeight": 1024
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["resultUrl"], "https://cdn.test/upscaled.png");
    assert_eq!(body["scaleApplied"], 2);
    // The fal mock reports real output dimensions
    assert_eq!(body["outputSize"]["width"], 2048);
    assert_eq!(body["originalSize"]["width"], 1024);
}

#[tokio::test]
async fn replicate_output_size_is_estimated() {
    let mock = MockProviders::start().await.unwrap();
    let config = ConfigBuilder::new()
        .with_replicate(&mock.base_url())
        .build();
    let server = TestServer::start(config).await.unwrap();

    let resp = server
        .client()
        .post(server.url("/api/upscale"))
        .json(&json!({
            "imageUrl": "https://cdn.test/source.png",
            "targetScale": 4,
            "provider": "replicate-esrgan",
            "originalWidth": 300,
            "originalHeight": 200
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["resultUrl"], "https://cdn.test/replicate-upscale.png");
    // Replicate reports no dimensions, so the output is original * scale
    assert_eq!(body["outputSize"]["width"], 1200);
    assert_eq!(body["outputSize"]["height"], 800);
}

#[tokio::test]
async fn bria_provider_upscales() {
    let mock = MockProviders::start().await.unwrap();
    let config = ConfigBuilder::new().with_bria(&mock.base_url()).build();
    let server = TestServer::start(config).await.unwrap();

    let resp = server
        .client()
        .post(server.url("/api/upscale"))
        .json(&json!({
            "imageUrl": "https://cdn.test/source.png",
            "targetScale": 4,
            "provider": "bria"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["resultUrl"], "https://cdn.test/bria-upscale.png");
    assert_eq!(body["scaleApplied"], 4);
}

#[tokio::test]
async fn unconfigured_provider_is_reported() {
    let mock = MockProviders::start().await.unwrap();
    let config = ConfigBuilder::new().with_fal(&mock.base_url()).build();
    let server = TestServer::start(config).await.unwrap();

    let resp = server
        .client()
        .post(server.url("/api/upscale"))
        .json(&json!({
            "imageUrl": "https://cdn.test/source.png",
            "provider": "bria"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 500);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Bria is not configured");
}
