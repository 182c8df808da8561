use alloy::primitives::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ConnectorError;

/// Byte length of an `r || s || v` ECDSA signature.
pub const SIGNATURE_LEN: usize = 65;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RpcMethod {
    Accounts,
    ChainId,
    SignTypedDataV4,
    Call,
}

impl RpcMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            RpcMethod::Accounts => "eth_accounts",
            RpcMethod::ChainId => "eth_chainId",
            RpcMethod::SignTypedDataV4 => "eth_signTypedData_v4",
            RpcMethod::Call => "eth_call",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "eth_accounts" => Some(RpcMethod::Accounts),
            "eth_chainId" => Some(RpcMethod::ChainId),
            "eth_signTypedData_v4" => Some(RpcMethod::SignTypedDataV4),
            "eth_call" => Some(RpcMethod::Call),
            _ => None,
        }
    }
}

/// The active wallet connection as reported by the session layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionInfo {
    pub topic: String,
    pub peer_name: Option<String>,
    pub chain_hint: Option<String>,
}

impl SessionInfo {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            peer_name: None,
            chain_hint: None,
        }
    }
}

/// EIP-712 typed data built by the order SDK. Forwarded as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypedDataPayload(pub Value);

impl TypedDataPayload {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Wallets take the v4 payload as a JSON string.
    pub fn to_wire_string(&self) -> Result<String, ConnectorError> {
        serde_json::to_string(&self.0)
            .map_err(|e| ConnectorError::MalformedInput(format!("typed data serialize failed: {e}")))
    }
}

impl From<Value> for TypedDataPayload {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallRequest {
    pub to: String,
    pub data: String,
}

impl CallRequest {
    pub fn new(to: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            data: data.into(),
        }
    }
}

fn strip_hex_prefix(raw: &str) -> Option<&str> {
    raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X"))
}

pub fn validate_address(raw: &str) -> Result<(), ConnectorError> {
    let digits = strip_hex_prefix(raw)
        .ok_or_else(|| ConnectorError::MalformedInput(format!("address missing 0x prefix: {raw}")))?;
    if digits.len() != 40 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ConnectorError::MalformedInput(format!(
            "address must be 20 hex-encoded bytes: {raw}"
        )));
    }
    Ok(())
}

pub fn validate_call_data(raw: &str) -> Result<(), ConnectorError> {
    let digits = strip_hex_prefix(raw).ok_or_else(|| {
        ConnectorError::MalformedInput("call data missing 0x prefix".to_owned())
    })?;
    if digits.len() % 2 != 0 {
        return Err(ConnectorError::MalformedInput(
            "call data has odd number of hex digits".to_owned(),
        ));
    }
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ConnectorError::MalformedInput(
            "call data contains non-hex characters".to_owned(),
        ));
    }
    Ok(())
}

/// Converts a wallet chain id (`"0x1"` or `"1"`) to its integer value.
pub fn parse_chain_id(raw: &str) -> Result<u64, ConnectorError> {
    match strip_hex_prefix(raw) {
        Some(digits) => u64::from_str_radix(digits, 16)
            .map_err(|e| ConnectorError::MalformedInput(format!("invalid hex chain id: {e}"))),
        None => raw
            .parse()
            .map_err(|e| ConnectorError::MalformedInput(format!("invalid chain id: {e}"))),
    }
}

pub fn parse_signature(raw: &str) -> Result<Bytes, ConnectorError> {
    let sig: Bytes = raw
        .parse()
        .map_err(|e| ConnectorError::MalformedInput(format!("invalid signature hex: {e}")))?;
    if sig.len() != SIGNATURE_LEN {
        return Err(ConnectorError::MalformedInput(format!(
            "signature must be {SIGNATURE_LEN} bytes, got {}",
            sig.len()
        )));
    }
    Ok(sig)
}
