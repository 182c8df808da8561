use serde_json::Value;
use thiserror::Error;

/// EIP-1193 provider error codes the connector distinguishes.
pub const USER_REJECTED_CODE: i64 = 4001;
pub const UNAUTHORIZED_CODE: i64 = 4100;
pub const UNSUPPORTED_METHOD_CODE: i64 = 4200;
pub const DISCONNECTED_CODE: i64 = 4900;
pub const CHAIN_DISCONNECTED_CODE: i64 = 4901;

#[derive(Debug, Error)]
pub enum ConnectorError {
    #[error("provider unavailable: {0}")]
    ProviderUnavailable(String),
    #[error("user rejected request: {0}")]
    UserRejected(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("provider returned error {code}: {message}")]
    Rpc {
        code: i64,
        message: String,
        data: Option<Value>,
    },
    #[error("malformed input: {0}")]
    MalformedInput(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ProviderUnavailable,
    UserRejected,
    TransportFailure,
    MalformedInput,
}

impl ConnectorError {
    /// Maps a JSON-RPC error object reported by a wallet or node.
    pub fn from_rpc(code: i64, message: impl Into<String>, data: Option<Value>) -> Self {
        let message = message.into();
        match code {
            USER_REJECTED_CODE => Self::UserRejected(message),
            DISCONNECTED_CODE | CHAIN_DISCONNECTED_CODE => Self::ProviderUnavailable(message),
            _ => Self::Rpc {
                code,
                message,
                data,
            },
        }
    }

    /// Parses a `{"code", "message", "data"}` error object. Objects without a numeric code
    /// keep their text as a transport failure.
    pub fn from_rpc_value(err: &Value) -> Self {
        let message = err
            .get("message")
            .and_then(Value::as_str)
            .map(ToOwned::to_owned)
            .unwrap_or_else(|| err.to_string());
        match err.get("code").and_then(Value::as_i64) {
            Some(code) => Self::from_rpc(code, message, err.get("data").cloned()),
            None => Self::Transport(message),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ProviderUnavailable(_) => ErrorKind::ProviderUnavailable,
            Self::UserRejected(_) => ErrorKind::UserRejected,
            Self::Transport(_) | Self::Rpc { .. } => ErrorKind::TransportFailure,
            Self::MalformedInput(_) => ErrorKind::MalformedInput,
        }
    }

    /// Only transport-level failures may succeed on a plain retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
