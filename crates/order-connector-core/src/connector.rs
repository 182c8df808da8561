use std::sync::Arc;

use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::domain::{
    validate_address, validate_call_data, CallRequest, RpcMethod, SessionInfo, TypedDataPayload,
};
use crate::error::ConnectorError;
use crate::ports::{OrderSigningProvider, RequestDispatcher, WalletSession};

/// Adapts a [`WalletSession`] to the [`OrderSigningProvider`] contract.
///
/// The provider is looked up again for every call. Nothing obtained from the session is kept
/// between calls, so a reconnect or network switch is picked up by the next request.
#[derive(Debug, Clone)]
pub struct ProviderConnector<S> {
    session: S,
}

struct ActiveProvider {
    session: SessionInfo,
    dispatcher: Arc<dyn RequestDispatcher>,
}

impl<S: WalletSession> ProviderConnector<S> {
    pub fn new(session: S) -> Self {
        Self { session }
    }

    fn current_provider(&self) -> Result<ActiveProvider, ConnectorError> {
        let snapshot = self.session.snapshot()?.ok_or_else(|| {
            ConnectorError::ProviderUnavailable(
                "no active wallet session; connect a wallet first".to_owned(),
            )
        })?;
        let dispatcher = snapshot.dispatcher.ok_or_else(|| {
            ConnectorError::ProviderUnavailable(format!(
                "wallet session {} exposes no provider",
                snapshot.info.topic
            ))
        })?;
        Ok(ActiveProvider {
            session: snapshot.info,
            dispatcher,
        })
    }
}

impl ActiveProvider {
    fn request(&self, method: RpcMethod, params: Value) -> Result<Value, ConnectorError> {
        debug!(
            method = method.as_str(),
            topic = %self.session.topic,
            "dispatching provider request"
        );
        self.dispatcher
            .request(method.as_str(), params)
            .inspect_err(|e| {
                warn!(
                    method = method.as_str(),
                    topic = %self.session.topic,
                    error = %e,
                    "provider request failed"
                )
            })
    }
}

fn expect_string(method: RpcMethod, value: Value) -> Result<String, ConnectorError> {
    match value {
        Value::String(s) => Ok(s),
        other => Err(ConnectorError::Transport(format!(
            "{} result must be a string, got {other}",
            method.as_str()
        ))),
    }
}

impl<S: WalletSession> OrderSigningProvider for ProviderConnector<S> {
    fn get_accounts(&self) -> Result<Vec<String>, ConnectorError> {
        let provider = self.current_provider()?;
        let result = provider.request(RpcMethod::Accounts, json!([]))?;
        let items = match result {
            Value::Array(items) => items,
            other => {
                return Err(ConnectorError::Transport(format!(
                    "eth_accounts result must be an array, got {other}"
                )))
            }
        };
        items
            .into_iter()
            .map(|item| expect_string(RpcMethod::Accounts, item))
            .collect()
    }

    fn get_chain_id(&self) -> Result<String, ConnectorError> {
        let provider = self.current_provider()?;
        let result = provider.request(RpcMethod::ChainId, json!([]))?;
        expect_string(RpcMethod::ChainId, result)
    }

    fn sign_typed_data(
        &self,
        signer: &str,
        typed_data: &TypedDataPayload,
    ) -> Result<String, ConnectorError> {
        let provider = self.current_provider()?;
        validate_address(signer)?;
        let payload = typed_data.to_wire_string()?;
        let result = provider.request(RpcMethod::SignTypedDataV4, json!([signer, payload]))?;
        expect_string(RpcMethod::SignTypedDataV4, result)
    }

    fn eth_call(&self, call: &CallRequest) -> Result<String, ConnectorError> {
        let provider = self.current_provider()?;
        validate_address(&call.to)?;
        validate_call_data(&call.data)?;
        let params = json!([{ "to": call.to, "data": call.data }, "latest"]);
        let result = provider.request(RpcMethod::Call, params)?;
        expect_string(RpcMethod::Call, result)
    }
}
