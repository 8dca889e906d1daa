// Copyright (C) 2015-2025 The Neo Project.
//
// rpc_contract_state.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Deployed and native contract descriptions.

use neo_core::UInt160;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The part of a manifest the client reads; the rest is kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcContractManifest {
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Result of `getcontractstate` and the entries of `getnativecontracts`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcContractState {
    pub id: i32,
    #[serde(rename = "updatecounter", default)]
    pub update_counter: u16,
    pub hash: UInt160,
    #[serde(default)]
    pub nef: Value,
    pub manifest: RpcContractManifest,
}

impl RpcContractState {
    pub fn name(&self) -> &str {
        &self.manifest.name
    }

    /// Native contracts have negative IDs.
    pub fn is_native(&self) -> bool {
        self.id < 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_native_contract() {
        let state: RpcContractState = serde_json::from_value(json!({
            "id": -7,
            "hash": "0xcc5e4edd9f5f8dba8bb65734541df7a1c081c67b",
            "nef": {"magic": 860243278},
            "manifest": {"name": "PolicyContract", "groups": [], "abi": {}}
        }))
        .unwrap();
        assert!(state.is_native());
        assert_eq!(state.name(), "PolicyContract");
        assert!(state.manifest.extra.contains_key("abi"));
    }
}
