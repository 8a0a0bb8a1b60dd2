/*
[INPUT]:  Error sources (HTTP, JSON-RPC, SDK construction, readiness)
[OUTPUT]: Structured error types with classification helpers
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for the session kit
#[derive(Error, Debug)]
pub enum SessionError {
    /// HTTP transport failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint answered with a non-success HTTP status
    #[error("API error (status {code}): {message}")]
    Api { code: i32, message: String },

    /// JSON-RPC error object returned by the provider
    #[error("RPC error (code {code}): {message}")]
    Rpc { code: i64, message: String },

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Response shape did not match the wire contract
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Auth or plugin SDK reported a failure
    #[error("SDK error: {0}")]
    Sdk(String),

    /// A dependent object (client, provider, plugin) is not ready yet.
    /// Rendered to the display channel as "{0} not initialized yet".
    #[error("{0} not initialized yet")]
    NotReady(&'static str),
}

impl SessionError {
    /// Create an RPC error from a JSON-RPC error object's fields
    pub fn rpc(code: i64, message: impl Into<String>) -> Self {
        SessionError::Rpc {
            code,
            message: message.into(),
        }
    }

    /// Create an API error from status code and message
    pub fn api_error(status: StatusCode, message: impl Into<String>) -> Self {
        SessionError::Api {
            code: status.as_u16() as i32,
            message: message.into(),
        }
    }

    /// Check if the error is a readiness precondition failure.
    ///
    /// Precondition failures are reported to the display channel and
    /// never surface through the action methods.
    pub fn is_precondition(&self) -> bool {
        matches!(self, SessionError::NotReady(_))
    }

    /// Check if the error originated in the transport layer
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            SessionError::Http(_) | SessionError::Api { .. } | SessionError::UrlParse(_)
        )
    }
}

/// Result type alias for session operations
pub type Result<T> = std::result::Result<T, SessionError>;
