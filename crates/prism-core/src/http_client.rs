use std::time::Duration;

use http::{HeaderMap, HeaderValue, header};
use reqwest::Client;

/// Build the shared upstream HTTP client
///
/// One client per process keeps the connection pool warm across
/// provider calls. The timeout bounds every upstream request since the
/// inference APIs themselves enforce none.
pub fn http_client(timeout: Duration) -> Client {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));

    Client::builder()
        .timeout(timeout)
        .pool_idle_timeout(Some(Duration::from_secs(5)))
        .tcp_nodelay(true)
        .tcp_keepalive(Some(Duration::from_secs(60)))
        .default_headers(headers)
        .build()
        .expect("Failed to build default HTTP client")
}
