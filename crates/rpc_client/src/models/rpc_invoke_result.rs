// Copyright (C) 2015-2025 The Neo Project.
//
// rpc_invoke_result.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Results of test invocations.

use super::common::{base64_bytes, i64_string};
use super::rpc_stack_item::StackItem;
use crate::error::{ClientRpcError, ClientResult};
use neo_core::UInt160;
use neo_vm::VMState;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// A contract event raised during execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcNotification {
    pub contract: UInt160,
    #[serde(rename = "eventname")]
    pub event_name: String,
    pub state: StackItem,
}

/// Result of `invokescript`, `invokefunction` and `invokecontractverify`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcInvokeResult {
    /// The script that was executed.
    #[serde(with = "base64_bytes")]
    pub script: Vec<u8>,

    pub state: VMState,

    #[serde(rename = "gasconsumed", with = "i64_string")]
    pub gas_consumed: i64,

    /// Fault text, set when `state` is FAULT.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exception: Option<String>,

    #[serde(default)]
    pub notifications: Vec<RpcNotification>,

    /// Result stack; a node that cannot serialize it reports an error string
    /// instead, which decodes as an empty stack.
    #[serde(default, deserialize_with = "lenient_stack")]
    pub stack: Vec<StackItem>,

    /// Session holding the iterators on `stack`, when sessions are enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<Uuid>,

    /// A signed transaction the node built for the invocation, if requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx: Option<String>,
}

fn lenient_stack<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<StackItem>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .iter()
            .map(|item| StackItem::from_json(item).map_err(serde::de::Error::custom))
            .collect(),
        _ => Ok(Vec::new()),
    }
}

impl RpcInvokeResult {
    /// Fails with the fault text unless the VM halted.
    pub fn ensure_halt(&self) -> ClientResult<()> {
        if self.state.is_halt() {
            return Ok(());
        }
        Err(ClientRpcError::Fault {
            exception: self
                .exception
                .clone()
                .unwrap_or_else(|| format!("VM state {}", self.state)),
        })
    }

    /// The one item a well-behaved call leaves on the stack.
    pub fn single_item(&self) -> ClientResult<&StackItem> {
        match self.stack.as_slice() {
            [item] => Ok(item),
            other => Err(ClientRpcError::decode(
                "invocation result",
                format!("expected 1 stack item, found {}", other.len()),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_halt() {
        let result: RpcInvokeResult = serde_json::from_value(json!({
            "script": "EMAfDAhkZWNpbWFscw==",
            "state": "HALT",
            "gasconsumed": "984060",
            "exception": null,
            "notifications": [],
            "stack": [{"type": "Integer", "value": "8"}]
        }))
        .unwrap();
        assert!(result.ensure_halt().is_ok());
        assert_eq!(result.gas_consumed, 984060);
        assert_eq!(result.single_item().unwrap().as_i64().unwrap(), 8);
    }

    #[test]
    fn test_fault_carries_exception() {
        let result: RpcInvokeResult = serde_json::from_value(json!({
            "script": "",
            "state": "FAULT",
            "gasconsumed": "0",
            "exception": "ASSERT is executed with false result.",
            "stack": "error: recursive reference"
        }))
        .unwrap();
        assert!(result.stack.is_empty());
        match result.ensure_halt() {
            Err(ClientRpcError::Fault { exception }) => {
                assert_eq!(exception, "ASSERT is executed with false result.")
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
