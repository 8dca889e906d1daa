// Copyright (C) 2015-2025 The Neo Project.
//
// rpc_application_log.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! `getapplicationlog` results.

use super::common::i64_string;
use super::rpc_invoke_result::RpcNotification;
use super::rpc_stack_item::StackItem;
use neo_core::UInt256;
use neo_vm::VMState;
use serde::{Deserialize, Serialize};

/// One execution of a transaction script or block trigger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcExecution {
    pub trigger: String,
    #[serde(rename = "vmstate")]
    pub vm_state: VMState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exception: Option<String>,
    #[serde(rename = "gasconsumed", with = "i64_string")]
    pub gas_consumed: i64,
    #[serde(default)]
    pub stack: Vec<StackItem>,
    #[serde(default)]
    pub notifications: Vec<RpcNotification>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcApplicationLog {
    #[serde(rename = "txid", default, skip_serializing_if = "Option::is_none")]
    pub tx_id: Option<UInt256>,
    #[serde(rename = "blockhash", default, skip_serializing_if = "Option::is_none")]
    pub block_hash: Option<UInt256>,
    pub executions: Vec<RpcExecution>,
}

impl RpcApplicationLog {
    /// The execution of an application trigger, which every transaction log has exactly one of.
    pub fn application_execution(&self) -> Option<&RpcExecution> {
        self.executions
            .iter()
            .find(|execution| execution.trigger.eq_ignore_ascii_case("Application"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_transaction_log() {
        let log: RpcApplicationLog = serde_json::from_value(json!({
            "txid": "0x3b2ac8c6b5a9b3dd0f6d80bf4c91f3c0b7f1f3e3d2f1e2c3b4a5968778695a4b",
            "executions": [{
                "trigger": "Application",
                "vmstate": "HALT",
                "gasconsumed": "9977780",
                "stack": [],
                "notifications": [{
                    "contract": "0xd2a4cff31913016155e38e474a2c06d08be276cf",
                    "eventname": "Transfer",
                    "state": {"type": "Array", "value": [{"type": "Any"}]}
                }]
            }]
        }))
        .unwrap();
        let execution = log.application_execution().unwrap();
        assert_eq!(execution.gas_consumed, 9977780);
        assert_eq!(execution.notifications[0].event_name, "Transfer");
        assert!(log.block_hash.is_none());
    }
}
