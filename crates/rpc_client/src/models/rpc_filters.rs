// Copyright (C) 2015-2025 The Neo Project.
//
// rpc_filters.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Subscription filters.

use super::rpc_events::{EventId, NotaryRequestEventType};
use crate::error::{ClientRpcError, ClientResult};
use neo_core::{UInt160, UInt256};
use neo_vm::VMState;
use serde::{Deserialize, Serialize};

/// Longest event name a notification filter may carry, in bytes.
pub const MAX_EVENT_NAME_LENGTH: usize = 32;

/// Filters `block_added` and `header_of_added_block` by primary index and height range.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BlockFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<u8>,
    /// Inclusive lower height bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub since: Option<u32>,
    /// Inclusive upper height bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub till: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TxFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender: Option<UInt160>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signer: Option<UInt160>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NotificationFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract: Option<UInt160>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExecutionFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<VMState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<UInt256>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NotaryRequestFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender: Option<UInt160>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signer: Option<UInt160>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<NotaryRequestEventType>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SubscriptionFilter {
    Block(BlockFilter),
    Transaction(TxFilter),
    Notification(NotificationFilter),
    Execution(ExecutionFilter),
    NotaryRequest(NotaryRequestFilter),
}

impl SubscriptionFilter {
    /// Checks that the filter fits `event` and that its fields are acceptable to a node.
    pub fn validate_for(&self, event: EventId) -> ClientResult<()> {
        let fits = matches!(
            (self, event),
            (
                SubscriptionFilter::Block(_),
                EventId::BlockAdded | EventId::HeaderOfAddedBlock
            ) | (SubscriptionFilter::Transaction(_), EventId::TransactionAdded)
                | (
                    SubscriptionFilter::Notification(_),
                    EventId::NotificationFromExecution
                )
                | (SubscriptionFilter::Execution(_), EventId::TransactionExecuted)
                | (SubscriptionFilter::NotaryRequest(_), EventId::NotaryRequestEvent)
        );
        if !fits {
            return Err(ClientRpcError::InvalidFilter(format!(
                "{} filter does not apply to {event}",
                self.kind_name()
            )));
        }
        match self {
            SubscriptionFilter::Notification(NotificationFilter {
                name: Some(name), ..
            }) if name.len() > MAX_EVENT_NAME_LENGTH => Err(ClientRpcError::InvalidFilter(
                format!("event name {name:?} exceeds {MAX_EVENT_NAME_LENGTH} bytes"),
            )),
            SubscriptionFilter::Execution(ExecutionFilter {
                state: Some(state), ..
            }) if !matches!(state, VMState::HALT | VMState::FAULT) => Err(
                ClientRpcError::InvalidFilter(format!("execution state must be HALT or FAULT, got {state}")),
            ),
            SubscriptionFilter::Block(BlockFilter {
                since: Some(since),
                till: Some(till),
                ..
            }) if since > till => Err(ClientRpcError::InvalidFilter(format!(
                "block range {since}..={till} is empty"
            ))),
            _ => Ok(()),
        }
    }

    fn kind_name(&self) -> &'static str {
        match self {
            SubscriptionFilter::Block(_) => "block",
            SubscriptionFilter::Transaction(_) => "transaction",
            SubscriptionFilter::Notification(_) => "notification",
            SubscriptionFilter::Execution(_) => "execution",
            SubscriptionFilter::NotaryRequest(_) => "notary request",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_filter_json_omits_unset() {
        let filter = SubscriptionFilter::Block(BlockFilter {
            primary: Some(2),
            ..Default::default()
        });
        assert_eq!(serde_json::to_value(&filter).unwrap(), json!({"primary": 2}));

        let filter = SubscriptionFilter::NotaryRequest(NotaryRequestFilter {
            kind: Some(NotaryRequestEventType::Added),
            ..Default::default()
        });
        assert_eq!(serde_json::to_value(&filter).unwrap(), json!({"type": "added"}));
    }

    #[test]
    fn test_execution_state_must_be_final() {
        let filter = SubscriptionFilter::Execution(ExecutionFilter {
            state: Some(VMState::BREAK),
            container: None,
        });
        assert!(matches!(
            filter.validate_for(EventId::TransactionExecuted),
            Err(ClientRpcError::InvalidFilter(_))
        ));
        let filter = SubscriptionFilter::Execution(ExecutionFilter {
            state: Some(VMState::FAULT),
            container: None,
        });
        assert!(filter.validate_for(EventId::TransactionExecuted).is_ok());
    }

    #[test]
    fn test_name_length() {
        let named = |name: &str| {
            SubscriptionFilter::Notification(NotificationFilter {
                contract: None,
                name: Some(name.to_string()),
            })
        };
        let event = EventId::NotificationFromExecution;
        assert!(named(&"a".repeat(32)).validate_for(event).is_ok());
        assert!(named(&"a".repeat(33)).validate_for(event).is_err());
    }

    #[test]
    fn test_filter_kind_mismatch() {
        let filter = SubscriptionFilter::Transaction(TxFilter::default());
        assert!(filter.validate_for(EventId::BlockAdded).is_err());
        assert!(filter.validate_for(EventId::TransactionAdded).is_ok());
    }
}
