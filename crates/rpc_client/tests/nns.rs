// Copyright (C) 2015-2025 The Neo Project.
//
// nns.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Name service helpers against a scripted node.

mod common;

use common::*;
use neo_core::UInt160;
use neo_rpc_client::{
    NnsApi, RecordState, RecordType, TransactionOptions, TransactionSigner, WitnessSource,
};
use serde_json::{json, Value};

const NNS_HASH: &str = "0x50ac1c37690cc2cfc594472833cf57505d5f46de";

fn record(name: &str, kind: i64, data: &str) -> Value {
    json!({
        "type": "Struct",
        "value": [string_item(name), int_item(kind), string_item(data)]
    })
}

fn nns_node(method: &str, params: &[Value]) -> Result<Value, neo_rpc_client::models::RpcError> {
    if method != "invokefunction" || params.first() != Some(&json!(NNS_HASH)) {
        return chain_response(method, params);
    }
    match params[1].as_str().unwrap_or_default() {
        "isAvailable" => Ok(halt(vec![bool_item(true)], 0)),
        "resolve" => Ok(halt(vec![string_item("10.0.0.1")], 0)),
        "getAllRecords" => Ok(halt(
            vec![json!({
                "type": "InteropInterface",
                "iterator": [record("neo.com", 1, "10.0.0.1"), record("neo.com", 16, "hello")],
                "truncated": false
            })],
            0,
        )),
        _ => Err(rpc_error(-32602, "unknown method")),
    }
}

fn nns(client: neo_rpc_client::RpcClient) -> NnsApi {
    NnsApi::new(client, UInt160::parse(NNS_HASH).unwrap())
}

#[tokio::test]
async fn test_register_label_length_boundary() {
    let transport = MockTransport::new(nns_node);
    let client = initialized_client(transport.clone()).await;
    let api = nns(client);
    let owner = FakeSigner::new(3);

    let long = format!("{}.com", "a".repeat(64));
    let err = api
        .register(&long, WitnessSource::Account(owner.clone()), TransactionOptions::default())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("invalid domain name format"), "{err}");
    assert!(transport.calls().is_empty());

    let ok = format!("{}.com", "a".repeat(63));
    let manager = api
        .register(&ok, WitnessSource::Account(owner.clone()), TransactionOptions::default())
        .await
        .unwrap();
    assert_eq!(manager.tx().script, api.register_script(&ok, &owner.script_hash()).unwrap());
    assert_eq!(transport.count("invokescript"), 1);
}

#[tokio::test]
async fn test_queries() {
    let transport = MockTransport::new(nns_node);
    let api = nns(client_with(transport));

    assert!(api.is_available("neo.com").await.unwrap());
    assert_eq!(api.resolve("neo.com", RecordType::A).await.unwrap(), "10.0.0.1");

    let mut records = api.get_all_records("neo.com").await.unwrap();
    let records = records.collect_remaining().await.unwrap();
    assert_eq!(
        records,
        vec![
            RecordState {
                name: "neo.com".into(),
                record_type: RecordType::A,
                data: "10.0.0.1".into(),
            },
            RecordState {
                name: "neo.com".into(),
                record_type: RecordType::TXT,
                data: "hello".into(),
            },
        ]
    );
}
