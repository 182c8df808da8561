use std::sync::Arc;

use serde_json::Value;

use crate::domain::{CallRequest, SessionInfo, TypedDataPayload};
use crate::error::ConnectorError;

/// JSON-RPC style request function bound to a connected wallet.
pub trait RequestDispatcher: Send + Sync {
    fn request(&self, method: &str, params: Value) -> Result<Value, ConnectorError>;
}

/// Capability object exposed by a wallet-connection layer.
///
/// Both calls are expected to reflect the session as it is right now; the session layer may
/// swap its provider at any moment (reconnect, account or chain switch).
pub trait WalletSession: Send + Sync {
    fn active_session(&self) -> Result<Option<SessionInfo>, ConnectorError>;
    fn dispatcher(&self) -> Result<Option<Arc<dyn RequestDispatcher>>, ConnectorError>;

    /// Session details and provider read together. Implementations holding both behind one
    /// lock should override this so a concurrent swap can't pair one session with another's
    /// provider.
    fn snapshot(&self) -> Result<Option<SessionSnapshot>, ConnectorError> {
        let Some(info) = self.active_session()? else {
            return Ok(None);
        };
        Ok(Some(SessionSnapshot {
            info,
            dispatcher: self.dispatcher()?,
        }))
    }
}

/// One consistent view of the active session.
#[derive(Clone)]
pub struct SessionSnapshot {
    pub info: SessionInfo,
    pub dispatcher: Option<Arc<dyn RequestDispatcher>>,
}

/// The provider contract the limit-order SDK signs and reads through.
pub trait OrderSigningProvider {
    fn get_accounts(&self) -> Result<Vec<String>, ConnectorError>;
    fn get_chain_id(&self) -> Result<String, ConnectorError>;
    fn sign_typed_data(
        &self,
        signer: &str,
        typed_data: &TypedDataPayload,
    ) -> Result<String, ConnectorError>;
    fn eth_call(&self, call: &CallRequest) -> Result<String, ConnectorError>;
}

impl<T: WalletSession + ?Sized> WalletSession for Arc<T> {
    fn active_session(&self) -> Result<Option<SessionInfo>, ConnectorError> {
        (**self).active_session()
    }

    fn dispatcher(&self) -> Result<Option<Arc<dyn RequestDispatcher>>, ConnectorError> {
        (**self).dispatcher()
    }

    fn snapshot(&self) -> Result<Option<SessionSnapshot>, ConnectorError> {
        (**self).snapshot()
    }
}

impl<T: RequestDispatcher + ?Sized> RequestDispatcher for Arc<T> {
    fn request(&self, method: &str, params: Value) -> Result<Value, ConnectorError> {
        (**self).request(method, params)
    }
}
