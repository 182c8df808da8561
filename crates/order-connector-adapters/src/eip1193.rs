use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use order_connector_core::{ConnectorError, RequestDispatcher};

/// Forwards EIP-1193 requests as JSON-RPC POSTs to a wallet bridge (a relay in front of the
/// connected wallet, or a plain node endpoint for read-only use).
#[derive(Debug)]
pub struct Eip1193ProxyDispatcher {
    base_url: String,
    client: reqwest::blocking::Client,
    next_id: AtomicU64,
}

impl Eip1193ProxyDispatcher {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ConnectorError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                ConnectorError::Transport(format!("failed to initialize eip1193 proxy client: {e}"))
            })?;
        Ok(Self {
            base_url: base_url.into(),
            client,
            next_id: AtomicU64::new(1),
        })
    }
}

impl RequestDispatcher for Eip1193ProxyDispatcher {
    fn request(&self, method: &str, params: Value) -> Result<Value, ConnectorError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let payload = serde_json::json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });
        debug!(id, method, url = %self.base_url, "eip1193 proxy request");

        let response = self
            .client
            .post(&self.base_url)
            .json(&payload)
            .send()
            .map_err(|e| ConnectorError::Transport(format!("eip1193 proxy request failed: {e}")))?;
        let status = response.status();
        let body: Value = response
            .json()
            .map_err(|e| ConnectorError::Transport(format!("eip1193 proxy json decode failed: {e}")))?;

        // Wallet bridges report rejections as JSON-RPC errors, sometimes with a 4xx status.
        if let Some(err) = body.get("error") {
            return Err(ConnectorError::from_rpc_value(err));
        }
        if !status.is_success() {
            return Err(ConnectorError::Transport(format!(
                "eip1193 proxy status {status}: {body}"
            )));
        }
        body.get("result")
            .cloned()
            .ok_or_else(|| ConnectorError::Transport("eip1193 proxy missing result".to_owned()))
    }
}
