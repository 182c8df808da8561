#![allow(dead_code)]

use std::io::Read;
use std::sync::{Arc, Mutex};
use std::thread;

use serde_json::{json, Value};
use tiny_http::{Response, Server, StatusCode};

pub type RecordedCalls = Arc<Mutex<Vec<(String, Value)>>>;

/// Serves JSON-RPC over HTTP; `answer` maps (method, params) to (status, body).
pub fn spawn_mock_bridge<F>(calls: RecordedCalls, answer: F) -> String
where
    F: Fn(&str, &Value) -> (u16, Value) + Send + 'static,
{
    let server = Server::http("127.0.0.1:0").expect("start server");
    let addr = format!("http://{}", server.server_addr());

    thread::spawn(move || {
        for _ in 0..32 {
            let mut req = match server.recv() {
                Ok(r) => r,
                Err(_) => break,
            };
            let mut body = String::new();
            if req.as_reader().read_to_string(&mut body).is_err() {
                let _ = req.respond(Response::from_string("").with_status_code(StatusCode(400)));
                continue;
            }
            let rpc: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
            let method = rpc
                .get("method")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_owned();
            let params = rpc.get("params").cloned().unwrap_or(Value::Null);
            if let Ok(mut g) = calls.lock() {
                g.push((method.clone(), params.clone()));
            }

            let (code, mut payload) = answer(&method, &params);
            if let Some(obj) = payload.as_object_mut() {
                obj.entry("jsonrpc").or_insert(json!("2.0"));
                obj.entry("id").or_insert(rpc.get("id").cloned().unwrap_or(Value::Null));
            }
            let response =
                Response::from_string(payload.to_string()).with_status_code(StatusCode(code));
            let _ = req.respond(response);
        }
    });

    addr
}

pub fn rpc_result(value: Value) -> (u16, Value) {
    (200, json!({ "result": value }))
}

pub fn rpc_error(code: i64, message: &str) -> (u16, Value) {
    (200, json!({ "error": { "code": code, "message": message } }))
}

pub fn owner() -> String {
    "0x1000000000000000000000000000000000000001".to_owned()
}

pub fn sample_typed_data() -> Value {
    json!({
        "primaryType": "Order",
        "domain": {
            "name": "1inch Limit Order Protocol",
            "version": "4",
            "chainId": 1,
            "verifyingContract": "0x111111125421ca6dc452d289314280a0f8842a65"
        },
        "types": {
            "Order": [
                {"name": "salt", "type": "uint256"},
                {"name": "maker", "type": "address"},
                {"name": "makingAmount", "type": "uint256"},
                {"name": "takingAmount", "type": "uint256"}
            ]
        },
        "message": {
            "salt": "42",
            "maker": "0x1000000000000000000000000000000000000001",
            "makingAmount": "1000000000000000000",
            "takingAmount": "2000000000"
        }
    })
}
