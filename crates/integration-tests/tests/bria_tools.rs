mod harness;

use harness::config::ConfigBuilder;
use harness::mock_providers::MockProviders;
use harness::server::TestServer;
use serde_json::{Value, json};

#[tokio::test]
async fn unknown_action_lists_valid_actions() {
    let mock = MockProviders::start().await.unwrap();
    let config = ConfigBuilder::new().with_bria(&mock.base_url()).build();
    let server = TestServer::start(config).await.unwrap();

    let resp = server
        .client()
        .post(server.url("/api/bria"))
        .json(&json!({"action": "upscale"}))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);

    let body: Value = resp.json().await.unwrap();
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("Invalid action"));
    assert!(message.contains("gen_fill"));
}

#[tokio::test]
async fn missing_action_is_rejected() {
    let mock = MockProviders::start().await.unwrap();
    let config = ConfigBuilder::new().with_bria(&mock.base_url()).build();
    let server = TestServer::start(config).await.unwrap();

    let resp = server
        .client()
        .post(server.url("/api/bria"))
        .json(&json!({"image": "https://cdn.test/a.png"}))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn gen_fill_forwards_params_in_sync_mode() {
    let mock = MockProviders::start().await.unwrap();
    let config = ConfigBuilder::new().with_bria(&mock.base_url()).build();
    let server = TestServer::start(config).await.unwrap();

    let resp = server
        .client()
        .post(server.url("/api/bria"))
        .json(&json!({
            "action": "gen_fill",
            "image": "data:image/png;base64,AAAA",
            "mask": "data:image/png;base64,BBBB",
            "prompt": "a straw hat"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["action"], "gen_fill");
    assert_eq!(body["result"]["image_url"], "https://cdn.test/gen-fill.png");

    // The upstream must see sync mode and bare base64 payloads
    let forwarded = mock.last_gen_fill_body().unwrap();
    assert_eq!(forwarded["sync"], true);
    assert_eq!(forwarded["image"], "AAAA");
    assert_eq!(forwarded["mask"], "BBBB");
    assert_eq!(forwarded["prompt"], "a straw hat");
}

#[tokio::test]
async fn unconfigured_bria_is_reported() {
    let mock = MockProviders::start().await.unwrap();
    let config = ConfigBuilder::new().with_fal(&mock.base_url()).build();
    let server = TestServer::start(config).await.unwrap();

    let resp = server
        .client()
        .post(server.url("/api/bria"))
        .json(&json!({"action": "generate"}))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 500);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Bria is not configured");
}
