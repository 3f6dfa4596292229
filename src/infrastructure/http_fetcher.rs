// reqwest-backed fetcher for panel endpoints
use crate::application::fetcher::Fetcher;
use crate::domain::error::LoadError;
use crate::domain::panel::Endpoint;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, USER_AGENT};
use serde_json::Value;

const AGENT: &str = concat!("public-api-dashboard/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch_json(&self, endpoint: &Endpoint) -> Result<Value, LoadError> {
        let result = self.get_json(&endpoint.url).await;
        if let Err(e) = &result {
            tracing::warn!(url = %endpoint.url, kind = e.kind(), "Fetch failed: {}", e);
        }
        result
    }
}

impl HttpFetcher {
    async fn get_json(&self, url: &str) -> Result<Value, LoadError> {
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, AGENT)
            .send()
            .await
            .map_err(|e| LoadError::Transport(format!("request to {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            // The status is known even if the error body never arrives in full
            let body = response.bytes().await.ok();
            return Err(LoadError::http(
                status.as_u16(),
                body.as_deref().and_then(error_message),
            ));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| LoadError::Transport(format!("reading body from {} failed: {}", url, e)))?;

        serde_json::from_slice(&body)
            .map_err(|e| LoadError::Transport(format!("invalid JSON from {}: {}", url, e)))
    }
}

/// Pull `message`, else `error`, out of a JSON error body.
fn error_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    ["message", "error"]
        .iter()
        .find_map(|key| match value.get(key)? {
            Value::String(text) if !text.is_empty() => Some(text.clone()),
            Value::Null => None,
            Value::String(_) => None,
            other => Some(other.to_string()),
        })
}
