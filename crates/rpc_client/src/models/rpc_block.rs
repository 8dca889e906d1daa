// Copyright (C) 2015-2025 The Neo Project.
//
// rpc_block.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Blocks, headers and transactions in their RPC JSON form.

use super::common::{base64_bytes, i64_string};
use neo_core::{Signer, Transaction, TransactionAttribute, UInt256, Witness};
use neo_vm::VMState;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcHeader {
    pub hash: UInt256,
    pub size: u32,
    pub version: u32,
    #[serde(rename = "previousblockhash")]
    pub previous_block_hash: UInt256,
    #[serde(rename = "merkleroot")]
    pub merkle_root: UInt256,
    pub time: u64,
    /// Hex-encoded 64-bit nonce.
    pub nonce: String,
    pub index: u32,
    pub primary: u8,
    /// Address of the next consensus multisignature account.
    #[serde(rename = "nextconsensus")]
    pub next_consensus: String,
    #[serde(default)]
    pub witnesses: Vec<Witness>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmations: Option<u32>,
    #[serde(rename = "nextblockhash", default, skip_serializing_if = "Option::is_none")]
    pub next_block_hash: Option<UInt256>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcBlock {
    #[serde(flatten)]
    pub header: RpcHeader,
    #[serde(default)]
    pub tx: Vec<RpcTransaction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcTransaction {
    pub hash: UInt256,
    pub size: u32,
    pub version: u8,
    pub nonce: u32,
    /// Sender address.
    pub sender: String,
    #[serde(rename = "sysfee", with = "i64_string")]
    pub system_fee: i64,
    #[serde(rename = "netfee", with = "i64_string")]
    pub network_fee: i64,
    #[serde(rename = "validuntilblock")]
    pub valid_until_block: u32,
    pub signers: Vec<Signer>,
    #[serde(default)]
    pub attributes: Vec<TransactionAttribute>,
    #[serde(with = "base64_bytes")]
    pub script: Vec<u8>,
    #[serde(default)]
    pub witnesses: Vec<Witness>,
    #[serde(rename = "blockhash", default, skip_serializing_if = "Option::is_none")]
    pub block_hash: Option<UInt256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmations: Option<u32>,
    #[serde(rename = "blocktime", default, skip_serializing_if = "Option::is_none")]
    pub block_time: Option<u64>,
    #[serde(rename = "vmstate", default, skip_serializing_if = "Option::is_none")]
    pub vm_state: Option<VMState>,
}

impl RpcTransaction {
    /// Rebuilds the wire transaction; its hash matches `hash` for a well-formed entry.
    pub fn to_transaction(&self) -> Transaction {
        Transaction {
            version: self.version,
            nonce: self.nonce,
            system_fee: self.system_fee,
            network_fee: self.network_fee,
            valid_until_block: self.valid_until_block,
            signers: self.signers.clone(),
            attributes: self.attributes.clone(),
            script: self.script.clone(),
            witnesses: self.witnesses.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use neo_core::UInt160;
    use serde_json::json;

    #[test]
    fn test_transaction_roundtrip_hash() {
        let tx = Transaction {
            nonce: 42,
            system_fee: 100,
            network_fee: 200,
            valid_until_block: 1000,
            signers: vec![Signer::called_by_entry(UInt160::from([1u8; 20]))],
            script: vec![0x11, 0x40],
            ..Default::default()
        };
        let json = json!({
            "hash": tx.hash().to_string(),
            "size": 60,
            "version": 0,
            "nonce": 42,
            "sender": "NKuyBkoGdZZSLyPbJEetheRhMjeznFZszf",
            "sysfee": "100",
            "netfee": "200",
            "validuntilblock": 1000,
            "signers": [{"account": UInt160::from([1u8; 20]).to_string(), "scopes": "CalledByEntry"}],
            "attributes": [],
            "script": "EUA=",
            "witnesses": []
        });
        let decoded: RpcTransaction = serde_json::from_value(json).unwrap();
        assert_eq!(decoded.to_transaction().hash(), decoded.hash);
    }
}
