#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde_json::Value;

use order_connector_core::{ConnectorError, RequestDispatcher, SessionInfo, WalletSession};

#[derive(Debug, Clone)]
pub enum StubReply {
    Ok(Value),
    Rpc(i64, String),
}

/// Dispatcher double that answers from a fixed table and records every invocation.
#[derive(Debug, Default)]
pub struct StubDispatcher {
    replies: HashMap<String, StubReply>,
    calls: Mutex<Vec<(String, Value)>>,
}

impl StubDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, method: &str, value: Value) -> Self {
        self.replies.insert(method.to_owned(), StubReply::Ok(value));
        self
    }

    pub fn fail(mut self, method: &str, code: i64, message: &str) -> Self {
        self.replies
            .insert(method.to_owned(), StubReply::Rpc(code, message.to_owned()));
        self
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("calls lock").len()
    }
}

impl RequestDispatcher for StubDispatcher {
    fn request(&self, method: &str, params: Value) -> Result<Value, ConnectorError> {
        self.calls
            .lock()
            .expect("calls lock")
            .push((method.to_owned(), params));
        match self.replies.get(method) {
            Some(StubReply::Ok(v)) => Ok(v.clone()),
            Some(StubReply::Rpc(code, message)) => {
                Err(ConnectorError::from_rpc(*code, message.clone(), None))
            }
            None => Err(ConnectorError::from_rpc(
                4200,
                format!("unsupported method {method}"),
                None,
            )),
        }
    }
}

#[derive(Default)]
struct StubSessionState {
    info: Option<SessionInfo>,
    dispatcher: Option<Arc<dyn RequestDispatcher>>,
}

/// Session double whose provider can be swapped between calls.
#[derive(Default)]
pub struct StubSession {
    state: Mutex<StubSessionState>,
}

impl StubSession {
    pub fn disconnected() -> Self {
        Self::default()
    }

    pub fn connected(dispatcher: Arc<dyn RequestDispatcher>) -> Self {
        let session = Self::default();
        session.set(Some(SessionInfo::new("stub-topic")), Some(dispatcher));
        session
    }

    pub fn set(
        &self,
        info: Option<SessionInfo>,
        dispatcher: Option<Arc<dyn RequestDispatcher>>,
    ) {
        let mut g = self.state.lock().expect("session lock");
        g.info = info;
        g.dispatcher = dispatcher;
    }
}

impl WalletSession for StubSession {
    fn active_session(&self) -> Result<Option<SessionInfo>, ConnectorError> {
        Ok(self.state.lock().expect("session lock").info.clone())
    }

    fn dispatcher(&self) -> Result<Option<Arc<dyn RequestDispatcher>>, ConnectorError> {
        Ok(self.state.lock().expect("session lock").dispatcher.clone())
    }
}

pub fn signer() -> String {
    "0x1000000000000000000000000000000000000001".to_owned()
}

pub fn limit_order_typed_data() -> Value {
    serde_json::json!({
        "primaryType": "Order",
        "domain": {
            "name": "1inch Limit Order Protocol",
            "version": "4",
            "chainId": 1,
            "verifyingContract": "0x111111125421ca6dc452d289314280a0f8842a65"
        },
        "types": {
            "EIP712Domain": [
                {"name": "name", "type": "string"},
                {"name": "version", "type": "string"},
                {"name": "chainId", "type": "uint256"},
                {"name": "verifyingContract", "type": "address"}
            ],
            "Order": [
                {"name": "salt", "type": "uint256"},
                {"name": "maker", "type": "address"},
                {"name": "receiver", "type": "address"},
                {"name": "makerAsset", "type": "address"},
                {"name": "takerAsset", "type": "address"},
                {"name": "makingAmount", "type": "uint256"},
                {"name": "takingAmount", "type": "uint256"},
                {"name": "makerTraits", "type": "uint256"}
            ]
        },
        "message": {
            "salt": "1",
            "maker": "0x1000000000000000000000000000000000000001",
            "receiver": "0x0000000000000000000000000000000000000000",
            "makerAsset": "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2",
            "takerAsset": "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48",
            "makingAmount": "1000000000000000000",
            "takingAmount": "2000000000",
            "makerTraits": "0"
        }
    })
}
