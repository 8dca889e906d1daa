// Copyright (C) 2015-2025 The Neo Project.
//
// mod.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Shared fixtures: a scripted node behind the transport trait, canned chain
//! responses, a deterministic signer and a local WebSocket server.

#![allow(dead_code)]

use async_trait::async_trait;
use futures::Future;
use neo_core::smart_contract::contract::{
    create_signature_redeem_script, signature_invocation_script, SIGNATURE_SIZE,
};
use neo_core::{ECPoint, UInt160, Witness};
use neo_rpc_client::models::{RpcError, RpcRequest, RpcResponse};
use neo_rpc_client::transport::RequestIdGenerator;
use neo_rpc_client::{ClientResult, RpcClient, RpcClientConfig, RpcTransport, TransactionSigner};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::WebSocketStream;

pub const NETWORK: u32 = 860_833_102;
pub const FEE_PER_BYTE: i64 = 1000;
pub const EXEC_FEE_FACTOR: i64 = 30;
pub const ATTRIBUTE_FEE: i64 = 0;
pub const NOTARY_ASSISTED_FEE: i64 = 10_000_000;
pub const MAX_NOT_VALID_BEFORE_DELTA: i64 = 140;
pub const BLOCK_COUNT: u32 = 1000;
pub const VALIDATOR_KEYS: [&str; 2] = [
    "03009b7540e10f2562e5fd8fac9eaec25166a58b26e412348ff5a86927bfac22a2",
    "02486fd15702c4490a26703112a5cc1d0923fd697a33406bd5a1c00e0013b09a70",
];
pub const POLICY_HASH: &str = "0xcc5e4edd9f5f8dba8bb65734541df7a1c081c67b";
pub const NOTARY_HASH: &str = "0xc1e14f19c3e60d0b9244d06dd7ba9b113135ec3b";
pub const GAS_HASH: &str = "0xd2a4cff31913016155e38e474a2c06d08be276cf";

type Handler = dyn Fn(&str, &[Value]) -> Result<Value, RpcError> + Send + Sync;

/// A node that answers from a closure and records every call.
pub struct MockTransport {
    handler: Box<Handler>,
    calls: Mutex<Vec<(String, Vec<Value>)>>,
    ids: RequestIdGenerator,
}

impl MockTransport {
    pub fn new<F>(handler: F) -> Arc<Self>
    where
        F: Fn(&str, &[Value]) -> Result<Value, RpcError> + Send + Sync + 'static,
    {
        Arc::new(Self {
            handler: Box::new(handler),
            calls: Mutex::new(Vec::new()),
            ids: RequestIdGenerator::new(),
        })
    }

    pub fn calls(&self) -> Vec<(String, Vec<Value>)> {
        self.calls.lock().clone()
    }

    pub fn methods(&self) -> Vec<String> {
        self.calls.lock().iter().map(|(m, _)| m.clone()).collect()
    }

    pub fn count(&self, method: &str) -> usize {
        self.calls.lock().iter().filter(|(m, _)| m == method).count()
    }

    pub fn clear(&self) {
        self.calls.lock().clear();
    }
}

#[async_trait]
impl RpcTransport for MockTransport {
    async fn issue(&self, request: RpcRequest) -> ClientResult<RpcResponse> {
        let id = self.ids.next();
        self.calls
            .lock()
            .push((request.method.clone(), request.params.clone()));
        Ok(match (self.handler)(&request.method, &request.params) {
            Ok(result) => RpcResponse::success(id, result),
            Err(error) => RpcResponse {
                error: Some(error),
                result: None,
                ..RpcResponse::success(id, Value::Null)
            },
        })
    }
}

pub fn client_with(transport: Arc<MockTransport>) -> RpcClient {
    RpcClient::with_transport(transport, RpcClientConfig::default())
}

/// A client whose handshake already ran; the call log starts empty.
pub async fn initialized_client(transport: Arc<MockTransport>) -> RpcClient {
    let client = client_with(transport.clone());
    client.init().await.expect("handshake");
    transport.clear();
    client
}

pub fn rpc_error(code: i64, message: &str) -> RpcError {
    RpcError {
        code,
        message: message.to_string(),
        data: None,
    }
}

pub fn version_json() -> Value {
    json!({
        "tcpport": 10333,
        "wsport": 10334,
        "nonce": 1234567890,
        "useragent": "/Neo:3.8.0/",
        "rpc": {"maxiteratorresultitems": 100, "sessionenabled": true},
        "protocol": {
            "addressversion": 53,
            "network": NETWORK,
            "validatorscount": 7,
            "msperblock": 15000,
            "maxtraceableblocks": 2102400,
            "maxvaliduntilblockincrement": 5760
        }
    })
}

fn native(id: i32, name: &str, hash: &str) -> Value {
    json!({
        "id": id,
        "updatecounter": 0,
        "hash": hash,
        "nef": {},
        "manifest": {"name": name, "abi": {}}
    })
}

pub fn native_contracts_json() -> Value {
    json!([
        native(-6, "GasToken", GAS_HASH),
        native(-7, "PolicyContract", POLICY_HASH),
        native(-10, "Notary", NOTARY_HASH),
    ])
}

pub fn int_item(value: i64) -> Value {
    json!({"type": "Integer", "value": value.to_string()})
}

pub fn bool_item(value: bool) -> Value {
    json!({"type": "Boolean", "value": value})
}

pub fn string_item(value: &str) -> Value {
    use base64::Engine as _;
    json!({
        "type": "ByteString",
        "value": base64::engine::general_purpose::STANDARD.encode(value)
    })
}

pub fn halt(stack: Vec<Value>, gas: i64) -> Value {
    json!({
        "script": "",
        "state": "HALT",
        "gasconsumed": gas.to_string(),
        "stack": stack
    })
}

pub fn fault(exception: &str) -> Value {
    json!({
        "script": "",
        "state": "FAULT",
        "gasconsumed": "0",
        "exception": exception,
        "stack": []
    })
}

fn integer_arg(params: &[Value]) -> Option<i64> {
    let value = params.get(2)?.get(0)?.get("value")?;
    match value {
        Value::String(text) => text.parse().ok(),
        other => other.as_i64(),
    }
}

/// Canned answers of a small private chain.
pub fn chain_response(method: &str, params: &[Value]) -> Result<Value, RpcError> {
    match method {
        "getversion" => Ok(version_json()),
        "getnativecontracts" => Ok(native_contracts_json()),
        "getblockcount" => Ok(json!(BLOCK_COUNT)),
        "getnextblockvalidators" => Ok(Value::Array(
            VALIDATOR_KEYS
                .iter()
                .map(|key| json!({"publickey": key, "votes": "0"}))
                .collect(),
        )),
        "invokescript" => Ok(halt(vec![], 1_007_390)),
        "invokefunction" => {
            let contract = params.first().and_then(Value::as_str).unwrap_or_default();
            let name = params.get(1).and_then(Value::as_str).unwrap_or_default();
            match (contract, name) {
                (POLICY_HASH, "getFeePerByte") => Ok(halt(vec![int_item(FEE_PER_BYTE)], 0)),
                (POLICY_HASH, "getExecFeeFactor") => Ok(halt(vec![int_item(EXEC_FEE_FACTOR)], 0)),
                (POLICY_HASH, "getAttributeFee") => {
                    // NotaryAssisted is 0x22
                    let fee = if integer_arg(params) == Some(0x22) {
                        NOTARY_ASSISTED_FEE
                    } else {
                        ATTRIBUTE_FEE
                    };
                    Ok(halt(vec![int_item(fee)], 0))
                }
                (NOTARY_HASH, "getMaxNotValidBeforeDelta") => {
                    Ok(halt(vec![int_item(MAX_NOT_VALID_BEFORE_DELTA)], 0))
                }
                _ => Err(rpc_error(-32602, "unknown contract method")),
            }
        }
        "sendrawtransaction" | "submitnotaryrequest" => Ok(json!({
            "hash": "0x8a05d8b1a8a0b4b2b3f1c1e4d3c0e9a7f2c6d1b0a9e8f7d6c5b4a3928170605f"
        })),
        _ => Err(rpc_error(-32601, "Method not found")),
    }
}

pub fn test_key(seed: u8) -> ECPoint {
    let mut bytes = [seed; 33];
    bytes[0] = 0x02;
    ECPoint::from_bytes(&bytes).expect("valid key encoding")
}

/// A single-signature account producing a fixed signature.
pub struct FakeSigner {
    key: ECPoint,
    pub signed: Mutex<Vec<Vec<u8>>>,
}

impl FakeSigner {
    pub fn new(seed: u8) -> Arc<Self> {
        Arc::new(Self {
            key: test_key(seed),
            signed: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl TransactionSigner for FakeSigner {
    fn script_hash(&self) -> UInt160 {
        UInt160::from_script(&self.verification_script())
    }

    fn verification_script(&self) -> Vec<u8> {
        create_signature_redeem_script(&self.key)
    }

    async fn sign(&self, sign_data: &[u8]) -> ClientResult<Witness> {
        self.signed.lock().push(sign_data.to_vec());
        Ok(Witness::new(
            signature_invocation_script(&[7u8; SIGNATURE_SIZE]),
            self.verification_script(),
        ))
    }
}

/// Serves one WebSocket connection with `serve` and returns the URL to dial.
pub async fn ws_server<F, Fut>(serve: F) -> String
where
    F: FnOnce(WebSocketStream<TcpStream>) -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let address = listener.local_addr().expect("local address");
    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.expect("accept");
        let socket = tokio_tungstenite::accept_async(stream)
            .await
            .expect("handshake");
        serve(socket).await;
    });
    format!("ws://{address}/ws")
}

/// The request in a text frame.
pub fn parse_request(text: &str) -> RpcRequest {
    serde_json::from_str(text).expect("request frame")
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
