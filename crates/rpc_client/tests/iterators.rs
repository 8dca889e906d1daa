// Copyright (C) 2015-2025 The Neo Project.
//
// iterators.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Iterator results through node sessions and inline expansion.

mod common;

use common::*;
use neo_core::UInt160;
use neo_rpc_client::{ClientRpcError, Invoker, IteratorHandle, ResultIterator};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::sync::Arc;
use uuid::Uuid;

const TOKEN: &str = "0x0a0b0c0d0e0f000102030405060708090a0b0c0d";

fn session_result(session: Uuid, iterator: Uuid) -> Value {
    let mut result = halt(
        vec![json!({
            "type": "InteropInterface",
            "interface": "IIterator",
            "id": iterator.to_string()
        })],
        0,
    );
    result["session"] = json!(session.to_string());
    result
}

#[tokio::test]
async fn test_session_iterator_pages_and_terminates() {
    let session = Uuid::new_v4();
    let iterator = Uuid::new_v4();
    let remaining = Arc::new(Mutex::new((1..=5).collect::<Vec<i64>>()));
    let node_items = remaining.clone();
    let transport = MockTransport::new(move |method, params| match method {
        "invokefunction" => Ok(session_result(session, iterator)),
        "traverseiterator" => {
            assert_eq!(params[0], json!(session.to_string()));
            assert_eq!(params[1], json!(iterator.to_string()));
            let count = params[2].as_u64().unwrap_or_default() as usize;
            let mut items = node_items.lock();
            let take = count.min(items.len());
            Ok(Value::Array(items.drain(..take).map(int_item).collect()))
        }
        "terminatesession" => Ok(json!(true)),
        _ => chain_response(method, params),
    });
    let client = client_with(transport.clone());
    let contract = UInt160::parse(TOKEN).unwrap();

    let result = client
        .invoke_function(&contract, "tokens", &[], &[])
        .await
        .unwrap();
    let handle = IteratorHandle::from_result(&result).unwrap();
    let mut items: ResultIterator<i64> = ResultIterator::new(client, handle, 2);

    assert_eq!(items.next().await.unwrap(), Some(1));
    assert_eq!(transport.count("traverseiterator"), 1);
    assert_eq!(items.collect_remaining().await.unwrap(), vec![2, 3, 4, 5]);
    // The short third page marks the end; no further request is made.
    assert_eq!(items.next().await.unwrap(), None);
    assert_eq!(transport.count("traverseiterator"), 3);

    items.terminate().await.unwrap();
    assert_eq!(transport.count("terminatesession"), 1);
}

#[tokio::test]
async fn test_page_size_follows_node_limit() {
    let session = Uuid::new_v4();
    let iterator = Uuid::new_v4();
    let transport = MockTransport::new(move |method, params| match method {
        "getversion" => {
            let mut version = version_json();
            version["rpc"]["maxiteratorresultitems"] = json!(3);
            Ok(version)
        }
        "invokefunction" => Ok(session_result(session, iterator)),
        "traverseiterator" => Ok(json!([int_item(7)])),
        "terminatesession" => Ok(json!(true)),
        _ => chain_response(method, params),
    });
    let client = client_with(transport.clone());
    // Before the handshake only the configured size is known.
    assert_eq!(client.iterator_page_size(), client.config().max_iterator_items);

    client.init().await.unwrap();
    assert_eq!(client.iterator_page_size(), 3);
    let invoker = Invoker::new(client, vec![]);
    let mut items = invoker
        .call_iterator::<i64>(&UInt160::parse(TOKEN).unwrap(), "tokens", &[])
        .await
        .unwrap();
    assert_eq!(items.collect_remaining().await.unwrap(), vec![7]);

    let pages: Vec<_> = transport
        .calls()
        .into_iter()
        .filter(|(method, _)| method == "traverseiterator")
        .collect();
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].1[2], json!(3));
    items.terminate().await.unwrap();
}

#[tokio::test]
async fn test_inline_iterator_without_sessions() {
    let transport = MockTransport::new(|method, params| match method {
        "invokefunction" => Ok(halt(
            vec![json!({
                "type": "InteropInterface",
                "iterator": [string_item("a"), string_item("b")],
                "truncated": true
            })],
            0,
        )),
        _ => chain_response(method, params),
    });
    let client = client_with(transport.clone());
    let invoker = Invoker::new(client, vec![]);

    let mut items = invoker
        .call_iterator::<String>(&UInt160::parse(TOKEN).unwrap(), "names", &[])
        .await
        .unwrap();
    assert!(items.is_truncated());
    assert_eq!(items.collect_remaining().await.unwrap(), vec!["a", "b"]);
    items.terminate().await.unwrap();
    assert_eq!(transport.count("traverseiterator"), 0);
    assert_eq!(transport.count("terminatesession"), 0);
}

#[tokio::test]
async fn test_mismatched_item_is_an_error() {
    let session = Uuid::new_v4();
    let iterator = Uuid::new_v4();
    let transport = MockTransport::new(move |method, params| match method {
        "invokefunction" => Ok(session_result(session, iterator)),
        "traverseiterator" => Ok(json!([{"type": "Map", "value": []}])),
        "terminatesession" => Ok(json!(false)),
        _ => chain_response(method, params),
    });
    let invoker = Invoker::new(client_with(transport), vec![]);

    let mut items = invoker
        .call_iterator::<UInt160>(&UInt160::parse(TOKEN).unwrap(), "owners", &[])
        .await
        .unwrap();
    assert!(items.next().await.is_err());
    assert!(matches!(
        items.terminate().await,
        Err(ClientRpcError::Iterator { .. })
    ));
}

#[tokio::test]
async fn test_fault_is_not_an_iterator() {
    let transport = MockTransport::new(|method, params| match method {
        "invokefunction" => Ok(fault("method not found")),
        _ => chain_response(method, params),
    });
    let invoker = Invoker::new(client_with(transport), vec![]);
    let err = invoker
        .call_iterator::<i64>(&UInt160::parse(TOKEN).unwrap(), "missing", &[])
        .await
        .unwrap_err();
    assert!(err.to_string().contains("method not found"), "{err}");
}
