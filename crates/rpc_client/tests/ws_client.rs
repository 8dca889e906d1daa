// Copyright (C) 2015-2025 The Neo Project.
//
// ws_client.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! WebSocket client against a scripted in-process server.

mod common;

use common::{parse_request, ws_server};
use futures::{SinkExt, StreamExt};
use neo_rpc_client::models::{
    Event, EventId, ExecutionFilter, NotificationFilter, SubscriptionFilter,
};
use neo_vm::VMState;
use neo_rpc_client::{ClientRpcError, ConnectionState, RpcClientConfig, WsClient};
use serde_json::{json, Value};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::WebSocketStream;

type Socket = WebSocketStream<TcpStream>;

async fn next_request(socket: &mut Socket) -> Option<(u64, String, Vec<Value>)> {
    while let Some(Ok(message)) = socket.next().await {
        if let Message::Text(text) = message {
            let request = parse_request(&text);
            return Some((request.id, request.method, request.params));
        }
    }
    None
}

async fn reply(socket: &mut Socket, id: u64, result: Value) {
    let frame = json!({"jsonrpc": "2.0", "id": id, "result": result});
    socket
        .send(Message::Text(frame.to_string()))
        .await
        .expect("send reply");
}

async fn notify(socket: &mut Socket, event: &str, payload: Value) {
    let frame = json!({"jsonrpc": "2.0", "method": event, "params": [payload]});
    socket
        .send(Message::Text(frame.to_string()))
        .await
        .expect("send event");
}

fn notification_payload(name: &str) -> Value {
    json!({
        "container": "0x8a05d8b1a8a0b4b2b3f1c1e4d3c0e9a7f2c6d1b0a9e8f7d6c5b4a3928170605f",
        "contract": "0xd2a4cff31913016155e38e474a2c06d08be276cf",
        "eventname": name,
        "state": {"type": "Array", "value": []}
    })
}

fn config() -> RpcClientConfig {
    RpcClientConfig {
        request_timeout_ms: 2000,
        ..RpcClientConfig::default()
    }
}

/// Answers `subscribe`/`unsubscribe` until the client goes away.
async fn subscription_server(mut socket: Socket) {
    let mut next = 0;
    while let Some((id, method, params)) = next_request(&mut socket).await {
        match method.as_str() {
            "subscribe" => {
                next += 1;
                reply(&mut socket, id, json!(format!("sub-{next}"))).await;
            }
            "unsubscribe" => {
                let known = params[0].as_str().map_or(false, |s| s.starts_with("sub-"));
                reply(&mut socket, id, json!(known)).await;
            }
            _ => reply(&mut socket, id, Value::Null).await,
        }
    }
}

#[tokio::test]
async fn test_concurrent_requests_matched_by_id() {
    common::init_tracing();
    let url = ws_server(|mut socket| async move {
        let mut pending = Vec::new();
        for _ in 0..3 {
            pending.push(next_request(&mut socket).await.expect("request"));
        }
        // Answer in reverse order; each caller must still get its own height.
        for (id, _, params) in pending.into_iter().rev() {
            let height = params[0].as_u64().unwrap_or_default();
            reply(
                &mut socket,
                id,
                json!(format!("0x{:064x}", height)),
            )
            .await;
        }
        while next_request(&mut socket).await.is_some() {}
    })
    .await;

    let client = WsClient::connect(&url, config()).await.unwrap();
    let (a, b, c) = tokio::join!(
        client.get_block_hash(1),
        client.get_block_hash(2),
        client.get_block_hash(3)
    );
    assert_eq!(a.unwrap().to_string(), format!("0x{:064x}", 1));
    assert_eq!(b.unwrap().to_string(), format!("0x{:064x}", 2));
    assert_eq!(c.unwrap().to_string(), format!("0x{:064x}", 3));
    client.close().await;
}

#[tokio::test]
async fn test_pending_requests_fail_when_connection_drops() {
    let url = ws_server(|mut socket| async move {
        for _ in 0..3 {
            next_request(&mut socket).await.expect("request");
        }
        socket.close(None).await.ok();
    })
    .await;

    let client = WsClient::connect(&url, config()).await.unwrap();
    let (a, b, c) = tokio::join!(
        client.get_block_count(),
        client.get_block_count(),
        client.get_block_count()
    );
    for result in [a, b, c] {
        assert!(matches!(result, Err(ClientRpcError::ConnectionLost)), "{result:?}");
    }
    timeout(Duration::from_secs(2), client.done())
        .await
        .expect("teardown");
    assert_eq!(client.state(), ConnectionState::Closed);
    assert!(matches!(
        client.get_block_count().await,
        Err(ClientRpcError::ConnectionLost)
    ));
}

#[tokio::test]
async fn test_close_fails_outstanding_requests() {
    let url = ws_server(|mut socket| async move {
        // Never answers; keeps reading so the close handshake completes.
        while next_request(&mut socket).await.is_some() {}
    })
    .await;

    let client = WsClient::connect(&url, config()).await.unwrap();
    let outcome = timeout(Duration::from_secs(5), async {
        tokio::join!(
            client.get_block_count(),
            client.get_block_count(),
            client.get_block_count(),
            async {
                tokio::time::sleep(Duration::from_millis(100)).await;
                client.close().await;
            }
        )
    })
    .await
    .expect("requests resolve after close");
    for result in [outcome.0, outcome.1, outcome.2] {
        assert!(matches!(result, Err(ClientRpcError::ConnectionLost)), "{result:?}");
    }
    assert!(client.is_closed());
    assert_eq!(client.state(), ConnectionState::Closed);
}

#[tokio::test]
async fn test_request_timeout_then_late_reply_is_ignored() {
    let url = ws_server(|mut socket| async move {
        let (slow, _, _) = next_request(&mut socket).await.expect("request");
        let (fast, _, _) = next_request(&mut socket).await.expect("request");
        reply(&mut socket, slow, json!(1)).await;
        reply(&mut socket, fast, json!(2)).await;
        while next_request(&mut socket).await.is_some() {}
    })
    .await;

    let config = RpcClientConfig {
        request_timeout_ms: 200,
        ..RpcClientConfig::default()
    };
    let client = WsClient::connect(&url, config).await.unwrap();
    let slow = client.get_block_count().await;
    assert!(matches!(slow, Err(ClientRpcError::Timeout(_))), "{slow:?}");
    // The stale reply to the first request arrives first and is dropped.
    assert_eq!(client.get_block_count().await.unwrap(), 2);
    assert!(!client.is_closed());
    client.close().await;
}

#[tokio::test]
async fn test_subscribe_and_unsubscribe_all() {
    let url = ws_server(subscription_server).await;
    let client = WsClient::connect(&url, config()).await.unwrap();

    let blocks = client.subscribe_for_new_blocks(None).await.unwrap();
    let notifications = client
        .subscribe_for_execution_notifications(Some(NotificationFilter {
            contract: None,
            name: Some("Transfer".into()),
        }))
        .await
        .unwrap();
    assert_ne!(blocks, notifications);
    let tracked = client.subscriptions();
    assert_eq!(tracked.len(), 2);
    assert!(tracked
        .iter()
        .any(|s| s.id == notifications && s.event == EventId::NotificationFromExecution));

    client.unsubscribe_all().await.unwrap();
    assert!(client.subscriptions().is_empty());
    assert!(matches!(
        client.unsubscribe(&blocks).await,
        Err(ClientRpcError::UnknownSubscription(_))
    ));
    client.close().await;
}

#[tokio::test]
async fn test_invalid_filter_sends_nothing() {
    let url = ws_server(|mut socket| async move {
        // Only the follow-up request may reach the server.
        let (id, method, _) = next_request(&mut socket).await.expect("request");
        assert_eq!(method, "getblockcount");
        reply(&mut socket, id, json!(7)).await;
        while next_request(&mut socket).await.is_some() {}
    })
    .await;
    let client = WsClient::connect(&url, config()).await.unwrap();

    let long_name = NotificationFilter {
        contract: None,
        name: Some("x".repeat(33)),
    };
    assert!(matches!(
        client
            .subscribe(EventId::NotificationFromExecution, Some(SubscriptionFilter::Notification(long_name)))
            .await,
        Err(ClientRpcError::InvalidFilter(_))
    ));
    let wrong_kind = SubscriptionFilter::Notification(NotificationFilter::default());
    assert!(matches!(
        client.subscribe(EventId::BlockAdded, Some(wrong_kind)).await,
        Err(ClientRpcError::InvalidFilter(_))
    ));
    let pending_state = SubscriptionFilter::Execution(ExecutionFilter {
        state: Some(VMState::NONE),
        container: None,
    });
    assert!(matches!(
        client.subscribe(EventId::TransactionExecuted, Some(pending_state)).await,
        Err(ClientRpcError::InvalidFilter(_))
    ));
    assert!(matches!(
        client.subscribe(EventId::EventMissed, None).await,
        Err(ClientRpcError::InvalidFilter(_))
    ));
    assert!(client.subscriptions().is_empty());
    assert_eq!(client.get_block_count().await.unwrap(), 7);
    client.close().await;
}

#[tokio::test]
async fn test_slow_consumer_gets_event_missed() {
    let url = ws_server(|mut socket| async move {
        let (id, _, _) = next_request(&mut socket).await.expect("subscribe");
        reply(&mut socket, id, json!("sub-1")).await;
        for i in 0..5 {
            notify(&mut socket, "notification_from_execution", notification_payload(&format!("e{i}"))).await;
        }
        // A response must still get through while the feed is full.
        let (id, _, _) = next_request(&mut socket).await.expect("getblockcount");
        reply(&mut socket, id, json!(42)).await;
        let (id, _, _) = next_request(&mut socket).await.expect("getblockcount");
        notify(&mut socket, "notification_from_execution", notification_payload("late")).await;
        reply(&mut socket, id, json!(43)).await;
        while next_request(&mut socket).await.is_some() {}
    })
    .await;

    let config = RpcClientConfig {
        notification_buffer: 2,
        ..config()
    };
    let client = WsClient::connect(&url, config).await.unwrap();
    let mut events = client.notifications().expect("event channel");
    client
        .subscribe_for_execution_notifications(None)
        .await
        .unwrap();
    assert_eq!(client.get_block_count().await.unwrap(), 42);

    let name = |event: Event| match event {
        Event::NotificationFromExecution(n) => n.notification.event_name,
        Event::EventMissed => "missed".to_string(),
        other => panic!("unexpected {other:?}"),
    };
    assert_eq!(name(events.recv().await.unwrap()), "e0");
    assert_eq!(name(events.recv().await.unwrap()), "e1");

    // The buffer has room again; the next event is preceded by the marker.
    assert_eq!(client.get_block_count().await.unwrap(), 43);
    assert_eq!(name(events.recv().await.unwrap()), "missed");
    assert_eq!(name(events.recv().await.unwrap()), "late");
    client.close().await;
}

#[tokio::test]
async fn test_disconnect_ends_feed_and_clears_subscriptions() {
    let url = ws_server(|mut socket| async move {
        let (id, _, _) = next_request(&mut socket).await.expect("subscribe");
        reply(&mut socket, id, json!("sub-1")).await;
        notify(&mut socket, "block_added", json!({
            "hash": "0x8a05d8b1a8a0b4b2b3f1c1e4d3c0e9a7f2c6d1b0a9e8f7d6c5b4a3928170605f",
            "size": 700,
            "version": 0,
            "previousblockhash": "0x8a05d8b1a8a0b4b2b3f1c1e4d3c0e9a7f2c6d1b0a9e8f7d6c5b4a3928170605e",
            "merkleroot": "0x0000000000000000000000000000000000000000000000000000000000000000",
            "time": 1700000000000u64,
            "nonce": "7A2B8C9D0E1F2A3B",
            "index": 1001,
            "primary": 0,
            "nextconsensus": "NVg7LjbMbjZahNAswS1ksHjANMDNxLi8uS",
            "witnesses": [],
            "tx": []
        }))
        .await;
        socket.close(None).await.ok();
    })
    .await;

    let client = WsClient::connect(&url, config()).await.unwrap();
    let mut events = client.notifications().expect("event channel");
    // Confirmed before the drop, so the ID comes back even though the
    // connection ends right after.
    assert_eq!(client.subscribe_for_new_blocks(None).await.unwrap(), "sub-1");

    let first = timeout(Duration::from_secs(2), events.recv()).await.unwrap();
    assert!(matches!(first, Some(Event::BlockAdded(_))), "{first:?}");
    let end = timeout(Duration::from_secs(2), events.recv()).await.unwrap();
    assert!(end.is_none());
    assert!(client.subscriptions().is_empty());
    assert!(client.is_closed());
}
