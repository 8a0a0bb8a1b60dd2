/*
[INPUT]:  JSON-RPC method names and parameter arrays
[OUTPUT]: JSON-RPC result values from an RPC-capable handle
[POS]:    RPC layer - provider abstraction every chain operation rides on
[UPDATE]: When the provider request contract changes
*/

use std::collections::HashMap;
use std::sync::{Mutex, RwLock};

use async_trait::async_trait;
use serde_json::Value;

use crate::rpc::{Result, SessionError};

/// An RPC-capable handle to the chain.
///
/// This is the minimal request interface the auth SDK and the wallet
/// plugin both hand out: one JSON-RPC call in, one result value out.
/// Implement it for your transport; [`HttpProvider`](crate::HttpProvider)
/// covers plain HTTP endpoints.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Perform a single request-response round trip.
    async fn request(&self, method: &str, params: Value) -> Result<Value>;
}

/// Mock provider with canned responses, for testing
///
/// Responses are keyed by method name; every call is recorded so tests
/// can assert on methods and parameter shapes. Unknown methods answer
/// with the standard "method not found" RPC error.
#[derive(Debug, Default)]
pub struct MockProvider {
    responses: RwLock<HashMap<String, Value>>,
    calls: Mutex<Vec<(String, Value)>>,
}

impl MockProvider {
    /// Create a mock provider with no canned responses
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a canned response for `method`
    pub fn with_response(self, method: &str, response: Value) -> Self {
        self.responses
            .write()
            .unwrap()
            .insert(method.to_string(), response);
        self
    }

    /// Replace the canned response for `method` after construction
    pub fn set_response(&self, method: &str, response: Value) {
        self.responses
            .write()
            .unwrap()
            .insert(method.to_string(), response);
    }

    /// All recorded calls, in order
    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of calls made to `method`
    pub fn call_count(&self, method: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(name, _)| name == method)
            .count()
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn request(&self, method: &str, params: Value) -> Result<Value> {
        self.calls
            .lock()
            .unwrap()
            .push((method.to_string(), params));

        let canned = self.responses.read().unwrap().get(method).cloned();
        canned.ok_or_else(|| {
            SessionError::rpc(-32601, format!("the method {method} is not available"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_mock_provider_returns_canned_response() {
        let provider = MockProvider::new().with_response("eth_chainId", json!("0xaa36a7"));

        let result = provider.request("eth_chainId", json!([])).await.unwrap();
        assert_eq!(result, json!("0xaa36a7"));
        assert_eq!(provider.call_count("eth_chainId"), 1);
    }

    #[tokio::test]
    async fn test_mock_provider_records_params() {
        let provider = MockProvider::new().with_response("eth_getBalance", json!("0x0"));

        provider
            .request("eth_getBalance", json!(["0xabc", "latest"]))
            .await
            .unwrap();

        let calls = provider.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1, json!(["0xabc", "latest"]));
    }

    #[tokio::test]
    async fn test_mock_provider_unknown_method() {
        let provider = MockProvider::new();
        let err = provider.request("eth_accounts", json!([])).await.unwrap_err();
        match err {
            SessionError::Rpc { code, .. } => assert_eq!(code, -32601),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
