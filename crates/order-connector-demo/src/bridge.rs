//! Bridge between the command line and the connector crates.
//! This must remain the only front-end-facing boundary for provider operations.

use std::sync::Arc;
use std::time::Duration;

use eyre::{eyre, Result, WrapErr};
use tracing::warn;

use order_connector_adapters::{dispatcher_from_config, ConnectorConfig, WalletSessionManager};
use order_connector_core::{
    CallRequest, ConnectorError, OrderSigningProvider, ProviderConnector, RequestDispatcher,
    SessionInfo, TypedDataPayload,
};

type Connector = ProviderConnector<WalletSessionManager>;

/// Dispatchers may own a blocking HTTP client, which must be built and dropped off the async
/// runtime. `connect` and `disconnect` therefore run on the blocking pool, and `disconnect`
/// consumes the bridge.
pub struct DemoBridge {
    sessions: WalletSessionManager,
    connector: Arc<Connector>,
    prompt_timeout: Duration,
}

impl DemoBridge {
    pub async fn connect(config: &ConnectorConfig, prompt_timeout: Duration) -> Result<Self> {
        let config = config.clone();
        tokio::task::spawn_blocking(move || -> Result<Self> {
            let dispatcher = dispatcher_from_config(&config)?;
            let info = SessionInfo {
                topic: "order-connector-demo".to_owned(),
                peer_name: config.eip1193_proxy_url.clone(),
                chain_hint: None,
            };
            Self::with_dispatcher(info, dispatcher, prompt_timeout)
        })
        .await
        .wrap_err("wallet connect task failed")?
    }

    pub fn with_dispatcher(
        info: SessionInfo,
        dispatcher: Arc<dyn RequestDispatcher>,
        prompt_timeout: Duration,
    ) -> Result<Self> {
        let sessions = WalletSessionManager::new();
        sessions.connect(info, dispatcher)?;
        Ok(Self {
            connector: Arc::new(ProviderConnector::new(sessions.clone())),
            sessions,
            prompt_timeout,
        })
    }

    pub async fn disconnect(self) -> Result<()> {
        tokio::task::spawn_blocking(move || {
            let outcome = self.sessions.disconnect();
            drop(self);
            outcome
        })
        .await
        .wrap_err("wallet disconnect task failed")??;
        Ok(())
    }

    pub async fn accounts(&self) -> Result<Vec<String>> {
        self.run("eth_accounts", |c| c.get_accounts()).await
    }

    pub async fn chain_id(&self) -> Result<String> {
        self.run("eth_chainId", |c| c.get_chain_id()).await
    }

    pub async fn sign_typed_data(
        &self,
        signer: String,
        typed_data: TypedDataPayload,
    ) -> Result<String> {
        self.run("eth_signTypedData_v4", move |c| {
            c.sign_typed_data(&signer, &typed_data)
        })
        .await
    }

    pub async fn eth_call(&self, call: CallRequest) -> Result<String> {
        self.run("eth_call", move |c| c.eth_call(&call)).await
    }

    /// Runs a blocking connector call against the prompt timeout. On timeout the request is
    /// abandoned, not cancelled: a wallet prompt may still be open.
    async fn run<T, F>(&self, label: &'static str, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connector) -> Result<T, ConnectorError> + Send + 'static,
    {
        let connector = Arc::clone(&self.connector);
        let task = tokio::task::spawn_blocking(move || op(&connector));
        match tokio::time::timeout(self.prompt_timeout, task).await {
            Ok(joined) => Ok(joined.wrap_err_with(|| format!("{label} task failed"))??),
            Err(_) => {
                warn!(
                    method = label,
                    timeout = ?self.prompt_timeout,
                    "provider request timed out; pending wallet prompt discarded"
                );
                Err(eyre!("{label} timed out after {:?}", self.prompt_timeout))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use serde_json::{json, Value};
    use tiny_http::{Response, Server};

    use order_connector_adapters::DeterministicDispatcher;

    use super::*;

    struct SlowWallet;

    impl RequestDispatcher for SlowWallet {
        fn request(&self, _method: &str, _params: Value) -> Result<Value, ConnectorError> {
            std::thread::sleep(Duration::from_millis(300));
            Ok(json!("0x1"))
        }
    }

    /// JSON-RPC wallet bridge answering `eth_accounts` and `eth_chainId`.
    fn spawn_wallet_bridge() -> String {
        let server = Server::http("127.0.0.1:0").expect("start server");
        let addr = format!("http://{}", server.server_addr());
        std::thread::spawn(move || {
            for mut req in server.incoming_requests().take(8) {
                let mut body = String::new();
                let _ = req.as_reader().read_to_string(&mut body);
                let rpc: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
                let result = match rpc.get("method").and_then(Value::as_str) {
                    Some("eth_accounts") => json!(["0x1000000000000000000000000000000000000001"]),
                    Some("eth_chainId") => json!("0x89"),
                    _ => Value::Null,
                };
                let payload = json!({"jsonrpc": "2.0", "id": rpc.get("id"), "result": result});
                let _ = req.respond(Response::from_string(payload.to_string()));
            }
        });
        addr
    }

    #[tokio::test]
    async fn proxy_bridge_connects_and_disconnects_inside_the_runtime() {
        let config = ConnectorConfig {
            eip1193_proxy_url: Some(spawn_wallet_bridge()),
            ..ConnectorConfig::default()
        };
        let bridge = DemoBridge::connect(&config, Duration::from_secs(5))
            .await
            .expect("bridge");

        assert_eq!(
            bridge.accounts().await.expect("accounts"),
            vec!["0x1000000000000000000000000000000000000001".to_owned()]
        );
        assert_eq!(bridge.chain_id().await.expect("chain"), "0x89");
        bridge.disconnect().await.expect("disconnect");
    }

    #[tokio::test]
    async fn development_bridge_signs_with_first_account() {
        let bridge = DemoBridge::connect(&ConnectorConfig::default(), Duration::from_secs(5))
            .await
            .expect("bridge");
        let accounts = bridge.accounts().await.expect("accounts");
        let signer = accounts.first().cloned().expect("dev account");
        let typed = TypedDataPayload::new(json!({"primaryType": "Order", "message": {}}));

        let a = bridge
            .sign_typed_data(signer.clone(), typed.clone())
            .await
            .expect("sign");
        let b = bridge.sign_typed_data(signer, typed).await.expect("sign");
        assert_eq!(a, b);
        assert_eq!(bridge.chain_id().await.expect("chain"), "0x1");
    }

    #[tokio::test]
    async fn slow_wallet_times_out_on_the_caller_side() {
        let bridge = DemoBridge::with_dispatcher(
            SessionInfo::new("slow"),
            Arc::new(SlowWallet),
            Duration::from_millis(20),
        )
        .expect("bridge");
        let err = bridge.chain_id().await.expect_err("timeout");
        assert_eq!(err.to_string(), "eth_chainId timed out after 20ms");
    }

    #[tokio::test]
    async fn disconnected_bridge_reports_provider_unavailable() {
        let bridge = DemoBridge::with_dispatcher(
            SessionInfo::new("dev"),
            Arc::new(DeterministicDispatcher::new(vec![], "0x1")),
            Duration::from_secs(5),
        )
        .expect("bridge");
        assert!(bridge.accounts().await.expect("accounts").is_empty());

        bridge.sessions.disconnect().expect("disconnect");
        let err = bridge.accounts().await.expect_err("disconnected");
        let err = err
            .downcast_ref::<ConnectorError>()
            .expect("connector error");
        assert!(matches!(err, ConnectorError::ProviderUnavailable(_)));
    }
}
