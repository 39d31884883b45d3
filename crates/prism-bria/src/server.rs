use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde_json::{Map, Value, json};

use prism_core::strip_data_uri_prefix;

use crate::{
    error::{BriaError, Result},
    types,
};

/// Default Bria engine base
const DEFAULT_BASE_URL: &str = "https://engine.prod.bria-api.com/v2";

/// Fields whose data-URI prefix Bria cannot handle
const IMAGE_FIELDS: &[&str] = &["image", "mask"];

/// Generic Bria tool proxy
pub struct Server {
    upstream: Option<Upstream>,
}

struct Upstream {
    client: Client,
    api_token: SecretString,
    base_url: String,
}

impl Server {
    /// Call a Bria endpoint with passthrough parameters
    ///
    /// Returns the `result` object from Bria's envelope, or the whole
    /// body when no envelope is present.
    pub async fn call(&self, action: Option<&str>, params: Map<String, Value>) -> Result<Value> {
        let path = action
            .and_then(types::action_path)
            .ok_or_else(|| {
                BriaError::InvalidRequest(format!("Invalid action. Valid: {}", types::valid_actions()))
            })?;

        let upstream = self.upstream.as_ref().ok_or(BriaError::NotConfigured)?;

        let body = prepare_body(params);
        let url = format!("{}{path}", upstream.base_url.trim_end_matches('/'));

        tracing::debug!(path, "sending bria tool request");

        let response = upstream
            .client
            .post(&url)
            .header("api_token", upstream.api_token.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| BriaError::Connection(e.to_string()))?;

        let status = response.status();

        if !status.is_success() {
            let message = response
                .json::<Value>()
                .await
                .ok()
                .and_then(|data| {
                    data.pointer("/error/message")
                        .or_else(|| data.get("message"))
                        .and_then(Value::as_str)
                        .map(ToOwned::to_owned)
                })
                .unwrap_or_else(|| format!("Bria API error {}", status.as_u16()));

            tracing::error!(%status, path, "bria tool API error");

            return Err(BriaError::Upstream(message));
        }

        let data: Value = response
            .json()
            .await
            .map_err(|e| BriaError::Upstream(format!("invalid Bria response: {e}")))?;

        Ok(match data.get("result") {
            Some(result) if !result.is_null() => result.clone(),
            _ => data,
        })
    }
}

/// Assemble the outbound body: passthrough params, forced sync mode,
/// data-URI prefixes stripped from image fields
fn prepare_body(mut params: Map<String, Value>) -> Map<String, Value> {
    params.insert("sync".to_string(), json!(true));

    for field in IMAGE_FIELDS {
        if let Some(Value::String(payload)) = params.get(*field)
            && payload.starts_with("data:")
        {
            let stripped = strip_data_uri_prefix(payload).to_string();
            params.insert((*field).to_string(), Value::String(stripped));
        }
    }

    params
}

/// Builder for constructing the Bria proxy from configuration
pub struct BriaServerBuilder<'a> {
    config: &'a prism_config::Config,
    client: Client,
}

impl<'a> BriaServerBuilder<'a> {
    pub const fn new(config: &'a prism_config::Config, client: Client) -> Self {
        Self { config, client }
    }

    pub fn build(self) -> Server {
        let upstream = self.config.providers.bria.as_ref().map(|creds| {
            tracing::debug!("Initializing bria tool proxy");
            Upstream {
                client: self.client,
                api_token: creds.api_key.clone(),
                base_url: creds
                    .base_url
                    .clone()
                    .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            }
        });

        Server { upstream }
    }
}
