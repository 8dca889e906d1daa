// Copyright (C) 2015-2025 The Neo Project.
//
// rpc_version.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! `getversion` results.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcProtocol {
    #[serde(rename = "addressversion")]
    pub address_version: u8,
    /// Network magic.
    pub network: u32,
    #[serde(rename = "msperblock")]
    pub ms_per_block: u32,
    #[serde(rename = "maxtraceableblocks")]
    pub max_traceable_blocks: u32,
    #[serde(rename = "maxvaliduntilblockincrement")]
    pub max_valid_until_block_increment: u32,
    #[serde(rename = "maxtransactionsperblock", default)]
    pub max_transactions_per_block: u32,
    #[serde(rename = "memorypoolmaxtransactions", default)]
    pub memory_pool_max_transactions: u32,
    #[serde(rename = "validatorscount", default)]
    pub validators_count: u8,
}

/// RPC server settings reported alongside the protocol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RpcServerSettings {
    #[serde(rename = "maxiteratorresultitems", default)]
    pub max_iterator_result_items: usize,
    #[serde(rename = "sessionenabled", default)]
    pub session_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcVersion {
    #[serde(rename = "tcpport", default)]
    pub tcp_port: u16,
    #[serde(rename = "wsport", default)]
    pub ws_port: u16,
    pub nonce: u32,
    #[serde(rename = "useragent")]
    pub user_agent: String,
    pub protocol: RpcProtocol,
    #[serde(default)]
    pub rpc: RpcServerSettings,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_version() {
        let version: RpcVersion = serde_json::from_value(json!({
            "tcpport": 10333,
            "wsport": 10334,
            "nonce": 1234567890,
            "useragent": "/Neo:3.6.0/",
            "rpc": {"maxiteratorresultitems": 100, "sessionenabled": true},
            "protocol": {
                "addressversion": 53,
                "network": 860833102,
                "validatorscount": 7,
                "msperblock": 15000,
                "maxtraceableblocks": 2102400,
                "maxvaliduntilblockincrement": 5760,
                "maxtransactionsperblock": 512,
                "memorypoolmaxtransactions": 50000,
                "initialgasdistribution": 5200000000000000u64
            }
        }))
        .unwrap();
        assert_eq!(version.protocol.network, 860833102);
        assert_eq!(version.protocol.address_version, 0x35);
        assert!(version.rpc.session_enabled);
    }
}
