//! Turns the session shapes a wallet-connection layer can hand out into one
//! [`RequestDispatcher`], so the connector never branches on adapter type.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use order_connector_core::{ConnectorError, RequestDispatcher};

use crate::{ConnectorConfig, DeterministicDispatcher, Eip1193ProxyDispatcher};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestArguments {
    pub method: String,
    pub params: Value,
}

/// Wagmi-style connector client: `request({ method, params })`.
pub trait Eip1193Client: Send + Sync {
    fn request(&self, args: RequestArguments) -> Result<Value, ConnectorError>;
}

/// Ethers-style provider: `send(method, params)` with positional params.
pub trait LegacySendProvider: Send + Sync {
    fn send(&self, method: &str, params: Vec<Value>) -> Result<Value, ConnectorError>;
}

#[derive(Clone)]
pub enum SessionProvider {
    Eip1193(Arc<dyn Eip1193Client>),
    LegacySend(Arc<dyn LegacySendProvider>),
}

impl SessionProvider {
    pub fn into_dispatcher(self) -> Arc<dyn RequestDispatcher> {
        match self {
            SessionProvider::Eip1193(client) => Arc::new(Eip1193ClientDispatcher { client }),
            SessionProvider::LegacySend(provider) => {
                Arc::new(LegacySendDispatcher { provider })
            }
        }
    }
}

struct Eip1193ClientDispatcher {
    client: Arc<dyn Eip1193Client>,
}

impl RequestDispatcher for Eip1193ClientDispatcher {
    fn request(&self, method: &str, params: Value) -> Result<Value, ConnectorError> {
        self.client.request(RequestArguments {
            method: method.to_owned(),
            params,
        })
    }
}

struct LegacySendDispatcher {
    provider: Arc<dyn LegacySendProvider>,
}

impl RequestDispatcher for LegacySendDispatcher {
    fn request(&self, method: &str, params: Value) -> Result<Value, ConnectorError> {
        let params = match params {
            Value::Array(items) => items,
            Value::Null => Vec::new(),
            other => vec![other],
        };
        self.provider.send(method, params)
    }
}

/// Picks the runtime dispatcher for a configuration.
///
/// A configured bridge URL always wins. Without one, development falls back to the
/// deterministic signer and production refuses to start.
pub fn dispatcher_from_config(
    config: &ConnectorConfig,
) -> Result<Arc<dyn RequestDispatcher>, ConnectorError> {
    if let Some(ref base_url) = config.eip1193_proxy_url {
        let timeout = Duration::from_millis(config.request_timeout_ms);
        return match Eip1193ProxyDispatcher::new(base_url.clone(), timeout) {
            Ok(proxy) => {
                info!(url = %base_url, "using eip1193 proxy provider");
                Ok(Arc::new(proxy))
            }
            Err(e) if config.strict_runtime_required() => Err(ConnectorError::ProviderUnavailable(
                format!("eip1193 proxy unavailable in production profile: {e}"),
            )),
            Err(e) => {
                warn!(error = %e, "eip1193 proxy init failed; using deterministic provider");
                Ok(Arc::new(DeterministicDispatcher::from_config(config)))
            }
        };
    }
    if config.strict_runtime_required() {
        return Err(ConnectorError::ProviderUnavailable(
            "eip1193 proxy URL not configured in production runtime profile".to_owned(),
        ));
    }
    info!("using deterministic development provider");
    Ok(Arc::new(DeterministicDispatcher::from_config(config)))
}
