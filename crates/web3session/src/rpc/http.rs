/*
[INPUT]:  JSON-RPC endpoint URL and transport configuration
[OUTPUT]: Provider implementation speaking JSON-RPC 2.0 over HTTP POST
[POS]:    RPC layer - concrete transport for plain HTTP endpoints
[UPDATE]: When adding transport options or changing the wire envelope
*/

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::{Value, json};
use tracing::debug;

use crate::rpc::{Provider, Result, SessionError};

/// Transport configuration for [`HttpProvider`]
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// JSON-RPC 2.0 provider over HTTP POST
///
/// One request per call, sequential ids, no batching and no retries.
/// JSON-RPC error objects map to [`SessionError::Rpc`]; non-success
/// HTTP statuses map to [`SessionError::Api`].
#[derive(Debug)]
pub struct HttpProvider {
    http_client: Client,
    endpoint: Url,
    next_id: AtomicU64,
}

impl HttpProvider {
    /// Create a provider for `endpoint` with default transport settings
    pub fn new(endpoint: &str) -> Result<Self> {
        Self::with_config(endpoint, ProviderConfig::default())
    }

    /// Create a provider with explicit transport settings
    pub fn with_config(endpoint: &str, config: ProviderConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self {
            http_client,
            endpoint: Url::parse(endpoint)?,
            next_id: AtomicU64::new(1),
        })
    }

    /// The endpoint this provider talks to
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl Provider for HttpProvider {
    async fn request(&self, method: &str, params: Value) -> Result<Value> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });

        debug!(%method, id, "sending rpc request");

        let response = self
            .http_client
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(SessionError::api_error(status, detail));
        }

        let envelope: Value = response.json().await?;
        if let Some(error) = envelope.get("error") {
            let code = error
                .get("code")
                .and_then(Value::as_i64)
                .unwrap_or(-32603);
            let message = error
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown RPC error")
                .to_string();
            return Err(SessionError::Rpc { code, message });
        }

        envelope
            .get("result")
            .cloned()
            .ok_or_else(|| SessionError::InvalidResponse("missing result field".to_string()))
    }
}
