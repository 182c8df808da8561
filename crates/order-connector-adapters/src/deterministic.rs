use alloy::primitives::keccak256;
use serde_json::Value;

use order_connector_core::error::{UNAUTHORIZED_CODE, UNSUPPORTED_METHOD_CODE};
use order_connector_core::{ConnectorError, RequestDispatcher, RpcMethod, SIGNATURE_LEN};

use crate::ConnectorConfig;

/// Development stand-in for a wallet. Same request in, same answer out.
///
/// Signatures are keccak-derived filler with `v = 27`, not real ECDSA.
#[derive(Debug, Clone)]
pub struct DeterministicDispatcher {
    accounts: Vec<String>,
    chain_id: String,
}

impl DeterministicDispatcher {
    pub fn new(accounts: Vec<String>, chain_id: impl Into<String>) -> Self {
        Self {
            accounts,
            chain_id: chain_id.into(),
        }
    }

    pub fn from_config(config: &ConnectorConfig) -> Self {
        Self::new(config.dev_accounts.clone(), config.dev_chain_id.clone())
    }

    fn is_authorized(&self, signer: &str) -> bool {
        self.accounts.iter().any(|a| a.eq_ignore_ascii_case(signer))
    }

    fn signature(&self, method: &str, signer: &str, payload: &str) -> String {
        let mut seed = Vec::new();
        seed.extend_from_slice(method.as_bytes());
        seed.extend_from_slice(signer.to_ascii_lowercase().as_bytes());
        seed.extend_from_slice(payload.as_bytes());
        let hash = keccak256(seed);
        let mut sig = Vec::with_capacity(SIGNATURE_LEN);
        sig.extend_from_slice(hash.as_slice());
        sig.extend_from_slice(keccak256(hash).as_slice());
        sig.push(27);
        format!("0x{}", alloy::hex::encode(sig))
    }
}

fn str_param<'a>(params: &'a Value, path: &[&str], index: usize) -> Result<&'a str, ConnectorError> {
    let mut item = params.get(index);
    for key in path {
        item = item.and_then(|v| v.get(*key));
    }
    item.and_then(Value::as_str).ok_or_else(|| {
        ConnectorError::from_rpc(-32602, format!("invalid params: expected string at {index}"), None)
    })
}

impl RequestDispatcher for DeterministicDispatcher {
    fn request(&self, method: &str, params: Value) -> Result<Value, ConnectorError> {
        match RpcMethod::from_name(method) {
            Some(RpcMethod::Accounts) => Ok(Value::from(self.accounts.clone())),
            Some(RpcMethod::ChainId) => Ok(Value::from(self.chain_id.clone())),
            Some(RpcMethod::SignTypedDataV4) => {
                let signer = str_param(&params, &[], 0)?;
                let payload = str_param(&params, &[], 1)?;
                if !self.is_authorized(signer) {
                    return Err(ConnectorError::from_rpc(
                        UNAUTHORIZED_CODE,
                        format!("account {signer} has not been authorized"),
                        None,
                    ));
                }
                Ok(Value::from(self.signature(method, signer, payload)))
            }
            Some(RpcMethod::Call) => {
                let to = str_param(&params, &["to"], 0)?;
                let data = str_param(&params, &["data"], 0)?;
                let mut seed = Vec::new();
                seed.extend_from_slice(to.to_ascii_lowercase().as_bytes());
                seed.extend_from_slice(data.as_bytes());
                Ok(Value::from(format!("0x{}", alloy::hex::encode(keccak256(seed)))))
            }
            None => Err(ConnectorError::from_rpc(
                UNSUPPORTED_METHOD_CODE,
                format!("method {method} is not supported"),
                None,
            )),
        }
    }
}
