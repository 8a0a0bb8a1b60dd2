/*
[INPUT]:  An RPC-capable provider handle
[OUTPUT]: Typed chain queries and signing/transaction requests
[POS]:    RPC layer - thin pass-through facade over the provider
[UPDATE]: When adding chain operations or changing result decoding
*/

use std::sync::Arc;

use rust_decimal::Decimal;
use serde_json::{Value, json};

use crate::rpc::{Provider, Result, SessionError};
use crate::types::TransactionRequest;

const WEI_SCALE: u32 = 18;

/// Thin facade over a [`Provider`].
///
/// Each method is a single request-response round trip; no retry, no
/// batching, no caching. Constructed per use, the way the demo app
/// builds one per button press.
pub struct EthRpc {
    provider: Arc<dyn Provider>,
}

impl EthRpc {
    pub fn new(provider: Arc<dyn Provider>) -> Self {
        Self { provider }
    }

    /// Chain id of the connected network
    ///
    /// `eth_chainId`
    pub async fn chain_id(&self) -> Result<u64> {
        let result = self.provider.request("eth_chainId", json!([])).await?;
        let quantity = expect_string(result, "eth_chainId")?;
        parse_quantity_u64(&quantity)
    }

    /// Addresses controlled by the connected wallet
    ///
    /// `eth_accounts`
    pub async fn accounts(&self) -> Result<Vec<String>> {
        let result = self.provider.request("eth_accounts", json!([])).await?;
        Ok(serde_json::from_value(result)?)
    }

    /// Latest balance of `address` in wei
    ///
    /// `eth_getBalance`
    pub async fn balance(&self, address: &str) -> Result<u128> {
        let result = self
            .provider
            .request("eth_getBalance", json!([address, "latest"]))
            .await?;
        let quantity = expect_string(result, "eth_getBalance")?;
        parse_quantity_u128(&quantity)
    }

    /// Latest balance of `address` in ether
    pub async fn balance_ether(&self, address: &str) -> Result<Decimal> {
        let wei = self.balance(address).await?;
        wei_to_ether(wei)
    }

    /// Sign `message` with the wallet key behind `from`
    ///
    /// `personal_sign`; the message goes over the wire hex-encoded.
    pub async fn sign_message(&self, from: &str, message: &str) -> Result<String> {
        let data = format!("0x{}", hex::encode(message.as_bytes()));
        let result = self
            .provider
            .request("personal_sign", json!([data, from]))
            .await?;
        expect_string(result, "personal_sign")
    }

    /// Submit a transaction, returning its hash
    ///
    /// `eth_sendTransaction`; no receipt polling.
    pub async fn send_transaction(&self, tx: &TransactionRequest) -> Result<String> {
        let result = self
            .provider
            .request("eth_sendTransaction", json!([tx]))
            .await?;
        expect_string(result, "eth_sendTransaction")
    }

    /// Export the private key backing the session
    ///
    /// `eth_private_key` is an auth-provider extension method, only
    /// answered by providers produced by the authentication SDK.
    pub async fn private_key(&self) -> Result<String> {
        let result = self.provider.request("eth_private_key", json!([])).await?;
        expect_string(result, "eth_private_key")
    }
}

fn expect_string(value: Value, method: &str) -> Result<String> {
    match value {
        Value::String(s) => Ok(s),
        other => Err(SessionError::InvalidResponse(format!(
            "{method} answered with a non-string result: {other}"
        ))),
    }
}

fn strip_quantity_prefix(quantity: &str) -> Result<&str> {
    let digits = quantity
        .strip_prefix("0x")
        .or_else(|| quantity.strip_prefix("0X"))
        .unwrap_or(quantity);
    if digits.is_empty() {
        return Err(SessionError::InvalidResponse(format!(
            "empty hex quantity: {quantity:?}"
        )));
    }
    Ok(digits)
}

fn parse_quantity_u64(quantity: &str) -> Result<u64> {
    let digits = strip_quantity_prefix(quantity)?;
    u64::from_str_radix(digits, 16).map_err(|err| {
        SessionError::InvalidResponse(format!("invalid hex quantity {quantity:?}: {err}"))
    })
}

fn parse_quantity_u128(quantity: &str) -> Result<u128> {
    let digits = strip_quantity_prefix(quantity)?;
    u128::from_str_radix(digits, 16).map_err(|err| {
        SessionError::InvalidResponse(format!("invalid hex quantity {quantity:?}: {err}"))
    })
}

/// Convert a wei amount to ether with 18 decimal places
pub fn wei_to_ether(wei: u128) -> Result<Decimal> {
    let mantissa = i128::try_from(wei).map_err(|_| {
        SessionError::InvalidResponse(format!("balance {wei} overflows the decimal range"))
    })?;
    let ether = Decimal::try_from_i128_with_scale(mantissa, WEI_SCALE).map_err(|err| {
        SessionError::InvalidResponse(format!("balance {wei} overflows the decimal range: {err}"))
    })?;
    Ok(ether.normalize())
}
