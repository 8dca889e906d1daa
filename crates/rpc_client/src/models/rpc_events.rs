// Copyright (C) 2015-2025 The Neo Project.
//
// rpc_events.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! WebSocket push notifications.

use super::rpc_application_log::RpcExecution;
use super::rpc_block::{RpcBlock, RpcHeader, RpcTransaction};
use super::rpc_invoke_result::RpcNotification;
use crate::error::{ClientRpcError, ClientResult};
use neo_core::{UInt256, Witness};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Event kinds a node pushes over a WebSocket connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventId {
    BlockAdded,
    HeaderOfAddedBlock,
    TransactionAdded,
    NotificationFromExecution,
    TransactionExecuted,
    NotaryRequestEvent,
    /// The server dropped events for this connection; not subscribable.
    EventMissed,
}

impl EventId {
    pub const ALL: [EventId; 7] = [
        EventId::BlockAdded,
        EventId::HeaderOfAddedBlock,
        EventId::TransactionAdded,
        EventId::NotificationFromExecution,
        EventId::TransactionExecuted,
        EventId::NotaryRequestEvent,
        EventId::EventMissed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EventId::BlockAdded => "block_added",
            EventId::HeaderOfAddedBlock => "header_of_added_block",
            EventId::TransactionAdded => "transaction_added",
            EventId::NotificationFromExecution => "notification_from_execution",
            EventId::TransactionExecuted => "transaction_executed",
            EventId::NotaryRequestEvent => "notary_request_event",
            EventId::EventMissed => "event_missed",
        }
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventId {
    type Err = ClientRpcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| ClientRpcError::transport(format!("unknown event {s}")))
    }
}

/// A notification together with the transaction or block that raised it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationEvent {
    pub container: UInt256,
    #[serde(flatten)]
    pub notification: RpcNotification,
}

/// An execution result pushed after a transaction or block trigger ran.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationExecution {
    pub container: UInt256,
    #[serde(flatten)]
    pub execution: RpcExecution,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotaryRequestEventType {
    Added,
    Removed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcNotaryRequest {
    #[serde(rename = "maintx")]
    pub main_transaction: RpcTransaction,
    #[serde(rename = "fallbacktx")]
    pub fallback_transaction: RpcTransaction,
    pub witness: Witness,
}

/// A notary request entering or leaving the node's notary pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotaryRequestEvent {
    #[serde(rename = "type")]
    pub kind: NotaryRequestEventType,
    #[serde(rename = "notaryrequest")]
    pub request: RpcNotaryRequest,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    BlockAdded(Box<RpcBlock>),
    HeaderOfAddedBlock(RpcHeader),
    TransactionAdded(Box<RpcTransaction>),
    NotificationFromExecution(NotificationEvent),
    TransactionExecuted(ApplicationExecution),
    NotaryRequest(Box<NotaryRequestEvent>),
    /// Events were dropped, by the server or because the consumer fell behind.
    EventMissed,
}

impl Event {
    pub fn id(&self) -> EventId {
        match self {
            Event::BlockAdded(_) => EventId::BlockAdded,
            Event::HeaderOfAddedBlock(_) => EventId::HeaderOfAddedBlock,
            Event::TransactionAdded(_) => EventId::TransactionAdded,
            Event::NotificationFromExecution(_) => EventId::NotificationFromExecution,
            Event::TransactionExecuted(_) => EventId::TransactionExecuted,
            Event::NotaryRequest(_) => EventId::NotaryRequestEvent,
            Event::EventMissed => EventId::EventMissed,
        }
    }

    /// Decodes the `params` of a notification frame: a one-element array, or
    /// an empty one for `event_missed`.
    pub fn decode(id: EventId, params: Value) -> ClientResult<Event> {
        if id == EventId::EventMissed {
            return Ok(Event::EventMissed);
        }
        let payload = match params {
            Value::Array(mut items) if items.len() == 1 => items.remove(0),
            other => {
                return Err(ClientRpcError::decode(
                    id.as_str(),
                    format!("expected a one-element params array, found {other}"),
                ))
            }
        };
        let decode_err = |e: serde_json::Error| ClientRpcError::decode(id.as_str(), e);
        Ok(match id {
            EventId::BlockAdded => Event::BlockAdded(Box::new(
                serde_json::from_value(payload).map_err(decode_err)?,
            )),
            EventId::HeaderOfAddedBlock => {
                Event::HeaderOfAddedBlock(serde_json::from_value(payload).map_err(decode_err)?)
            }
            EventId::TransactionAdded => Event::TransactionAdded(Box::new(
                serde_json::from_value(payload).map_err(decode_err)?,
            )),
            EventId::NotificationFromExecution => Event::NotificationFromExecution(
                serde_json::from_value(payload).map_err(decode_err)?,
            ),
            EventId::TransactionExecuted => {
                Event::TransactionExecuted(serde_json::from_value(payload).map_err(decode_err)?)
            }
            EventId::NotaryRequestEvent => Event::NotaryRequest(Box::new(
                serde_json::from_value(payload).map_err(decode_err)?,
            )),
            EventId::EventMissed => Event::EventMissed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_names() {
        for id in EventId::ALL {
            assert_eq!(id.as_str().parse::<EventId>().unwrap(), id);
            assert_eq!(serde_json::to_value(id).unwrap(), json!(id.as_str()));
        }
        assert!("block_removed".parse::<EventId>().is_err());
    }

    #[test]
    fn test_decode_notification() {
        let params = json!([{
            "container": "0x3b2ac8c6b5a9b3dd0f6d80bf4c91f3c0b7f1f3e3d2f1e2c3b4a5968778695a4b",
            "contract": "0xd2a4cff31913016155e38e474a2c06d08be276cf",
            "eventname": "Transfer",
            "state": {"type": "Array", "value": []}
        }]);
        match Event::decode(EventId::NotificationFromExecution, params).unwrap() {
            Event::NotificationFromExecution(event) => {
                assert_eq!(event.notification.event_name, "Transfer")
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_decode_execution() {
        let params = json!([{
            "container": "0x3b2ac8c6b5a9b3dd0f6d80bf4c91f3c0b7f1f3e3d2f1e2c3b4a5968778695a4b",
            "trigger": "Application",
            "vmstate": "FAULT",
            "exception": "oops",
            "gasconsumed": "1",
            "stack": [],
            "notifications": []
        }]);
        let event = Event::decode(EventId::TransactionExecuted, params).unwrap();
        assert_eq!(event.id(), EventId::TransactionExecuted);
    }

    #[test]
    fn test_malformed_payload() {
        assert!(Event::decode(EventId::BlockAdded, json!([])).is_err());
        assert!(Event::decode(EventId::BlockAdded, json!([{"hash": 1}])).is_err());
        assert_eq!(
            Event::decode(EventId::EventMissed, json!([])).unwrap(),
            Event::EventMissed
        );
    }
}
