/*
[INPUT]:  SDK and provider wire payloads
[OUTPUT]: Typed Rust structs with serialization support
[POS]:    Data layer - user, token, transaction, and top-up models
[UPDATE]: When wire payload schemas change
*/

use base64::{
    Engine as _,
    engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::rpc::{Result, SessionError};

/// Profile of the logged-in user as reported by the auth SDK
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verifier_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_of_login: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregate_verifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dapp_share: Option<String>,
}

/// Registered claims carried by an [`IdToken`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdTokenClaims {
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub iat: Option<DateTime<Utc>>,
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub exp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
}

/// Compact JWT proving the user authenticated with the SDK
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdToken {
    pub id_token: String,
}

impl IdToken {
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            id_token: raw.into(),
        }
    }

    /// Decode the claims from the JWT payload segment.
    ///
    /// The signature is NOT verified here; verification belongs to the
    /// party consuming the token.
    pub fn claims(&self) -> Result<IdTokenClaims> {
        let payload_b64 = self.id_token.trim().split('.').nth(1).ok_or_else(|| {
            SessionError::InvalidResponse("id token is not a valid JWT".to_string())
        })?;

        let payload_bytes = URL_SAFE_NO_PAD
            .decode(payload_b64)
            .or_else(|_| URL_SAFE.decode(payload_b64))
            .map_err(|e| {
                SessionError::InvalidResponse(format!("invalid id token payload base64: {e}"))
            })?;

        Ok(serde_json::from_slice(&payload_bytes)?)
    }

    /// Whether the token's `exp` claim has passed.
    ///
    /// A token whose payload cannot be decoded counts as expired.
    pub fn is_expired(&self) -> bool {
        match self.claims() {
            Ok(claims) => claims.exp.map(|exp| Utc::now() > exp).unwrap_or(false),
            Err(_) => true,
        }
    }
}

/// A transaction handed to `eth_sendTransaction`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    pub from: String,
    pub to: String,
    /// Hex quantity in wei
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

impl TransactionRequest {
    /// A plain value transfer of `value_wei` from `from` to `to`
    pub fn transfer(from: &str, to: &str, value_wei: u128) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            value: format!("0x{value_wei:x}"),
            gas: None,
            gas_price: None,
            data: None,
        }
    }
}

/// Fiat on-ramp vendor behind the plugin's top-up flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RampProvider {
    Moonpay,
    Wyre,
    #[serde(rename = "rampnetwork")]
    RampNetwork,
    Xanpool,
    Mercuryo,
    Transak,
}

/// Caller-chosen top-up parameters; the receiving address is resolved
/// from the session at call time, never passed in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopUpParams {
    pub ramp: RampProvider,
    #[serde(with = "rust_decimal::serde::str")]
    pub fiat_value: Decimal,
    pub selected_currency: String,
    pub selected_crypto_currency: String,
    pub chain_network: String,
}

impl Default for TopUpParams {
    fn default() -> Self {
        Self {
            ramp: RampProvider::Moonpay,
            fiat_value: Decimal::from(100u64),
            selected_currency: "USD".to_string(),
            selected_crypto_currency: "ETH".to_string(),
            chain_network: "optimism_mainnet".to_string(),
        }
    }
}

impl TopUpParams {
    /// Fix the resolved receiving address into a wire request
    pub fn for_address(&self, address: &str) -> TopUpRequest {
        TopUpRequest {
            selected_address: address.to_string(),
            selected_currency: self.selected_currency.clone(),
            fiat_value: self.fiat_value,
            selected_crypto_currency: self.selected_crypto_currency.clone(),
            chain_network: self.chain_network.clone(),
        }
    }
}

/// The payload handed to the plugin's `initiate_topup`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopUpRequest {
    pub selected_address: String,
    pub selected_currency: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub fiat_value: Decimal,
    pub selected_crypto_currency: String,
    pub chain_network: String,
}
