// Fetcher trait for panel endpoints
use crate::domain::error::LoadError;
use crate::domain::panel::Endpoint;
use async_trait::async_trait;

#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Issue a single GET to the endpoint and parse the body as JSON.
    ///
    /// Non-2xx responses fail with `LoadError::Http`; network and JSON
    /// failures with `LoadError::Transport`. Never retries.
    async fn fetch_json(&self, endpoint: &Endpoint) -> Result<serde_json::Value, LoadError>;
}
