/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for web3session tests

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde_json::json;
use web3session::{ChainConfig, MockProvider, SessionConfig};
use wiremock::MockServer;

/// Setup a mock HTTP server for testing
#[allow(dead_code)]
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// A session configuration against the Sepolia test network
pub fn test_config() -> SessionConfig {
    SessionConfig::new("test-client-id", ChainConfig::sepolia())
}

/// An unsigned but decodable JWT expiring one hour from now
#[allow(dead_code)]
pub fn test_jwt() -> String {
    let header = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&json!({"alg": "none"})).unwrap());
    let claims = json!({
        "iat": chrono::Utc::now().timestamp(),
        "exp": chrono::Utc::now().timestamp() + 3600,
        "iss": "test-auth",
        "aud": "test-client-id",
    });
    let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims).unwrap());
    format!("{header}.{payload}.signature")
}

/// A provider answering the standard wallet queries with fixed values
#[allow(dead_code)]
pub fn wallet_provider() -> MockProvider {
    MockProvider::new()
        .with_response("eth_chainId", json!("0xaa36a7"))
        .with_response(
            "eth_accounts",
            json!(["0xabc0000000000000000000000000000000000001"]),
        )
        .with_response("eth_getBalance", json!("0xde0b6b3a7640000"))
        .with_response("personal_sign", json!("0xsigned"))
        .with_response("eth_sendTransaction", json!("0xtxhash"))
        .with_response("eth_private_key", json!("deadbeef"))
}

/// The fixed account address served by [`wallet_provider`]
#[allow(dead_code)]
pub const TEST_ADDRESS: &str = "0xabc0000000000000000000000000000000000001";
