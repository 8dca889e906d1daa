// Copyright (C) 2015-2025 The Neo Project.
//
// client.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use super::RpcClient;
use crate::error::{ClientRpcError, ClientResult};
use crate::models::common::{encode_base64, i64_string};
use crate::models::{
    RpcApplicationLog, RpcContractState, RpcInvokeResult, RpcValidator, RpcVersion, StackItem,
};
use neo_core::{
    ContractParameter, ECPoint, P2PNotaryRequest, Serializable, Signer, Transaction, UInt160,
    UInt256,
};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

#[derive(Deserialize)]
struct HashResult {
    hash: UInt256,
}

#[derive(Deserialize)]
struct NetworkFeeResult {
    #[serde(rename = "networkfee", with = "i64_string")]
    network_fee: i64,
}

fn signers_json(signers: &[Signer]) -> ClientResult<Value> {
    Ok(serde_json::to_value(signers)?)
}

fn parameters_json(params: &[ContractParameter]) -> Value {
    Value::Array(params.iter().map(ContractParameter::to_json).collect())
}

impl RpcClient {
    // Blockchain

    pub async fn get_version(&self) -> ClientResult<RpcVersion> {
        self.call("getversion", vec![]).await
    }

    /// Number of blocks in the chain, i.e. the height of the next block.
    pub async fn get_block_count(&self) -> ClientResult<u32> {
        self.call("getblockcount", vec![]).await
    }

    pub async fn get_best_block_hash(&self) -> ClientResult<UInt256> {
        self.call("getbestblockhash", vec![]).await
    }

    pub async fn get_block_hash(&self, index: u32) -> ClientResult<UInt256> {
        self.call("getblockhash", vec![json!(index)]).await
    }

    pub async fn get_next_block_validators(&self) -> ClientResult<Vec<RpcValidator>> {
        self.call("getnextblockvalidators", vec![]).await
    }

    pub async fn get_committee(&self) -> ClientResult<Vec<ECPoint>> {
        self.call("getcommittee", vec![]).await
    }

    pub async fn get_native_contracts(&self) -> ClientResult<Vec<RpcContractState>> {
        self.call("getnativecontracts", vec![]).await
    }

    pub async fn get_contract_state(&self, hash: &UInt160) -> ClientResult<RpcContractState> {
        self.call("getcontractstate", vec![json!(hash.to_string())])
            .await
    }

    /// Native contracts can be looked up by name.
    pub async fn get_contract_state_by_name(&self, name: &str) -> ClientResult<RpcContractState> {
        self.call("getcontractstate", vec![json!(name)]).await
    }

    pub async fn get_contract_state_by_id(&self, id: i32) -> ClientResult<RpcContractState> {
        self.call("getcontractstate", vec![json!(id)]).await
    }

    /// Execution log of a transaction or block, optionally for one trigger only.
    pub async fn get_application_log(
        &self,
        hash: &UInt256,
        trigger: Option<&str>,
    ) -> ClientResult<RpcApplicationLog> {
        let mut params = vec![json!(hash.to_string())];
        if let Some(trigger) = trigger {
            params.push(json!(trigger));
        }
        self.call("getapplicationlog", params).await
    }

    pub async fn get_transaction_height(&self, hash: &UInt256) -> ClientResult<u32> {
        self.call("gettransactionheight", vec![json!(hash.to_string())])
            .await
    }

    // Test invocations

    pub async fn invoke_script(
        &self,
        script: &[u8],
        signers: &[Signer],
    ) -> ClientResult<RpcInvokeResult> {
        let mut params = vec![json!(encode_base64(script))];
        if !signers.is_empty() {
            params.push(signers_json(signers)?);
        }
        self.call("invokescript", params).await
    }

    pub async fn invoke_function(
        &self,
        contract: &UInt160,
        method: &str,
        args: &[ContractParameter],
        signers: &[Signer],
    ) -> ClientResult<RpcInvokeResult> {
        let mut params = vec![
            json!(contract.to_string()),
            json!(method),
            parameters_json(args),
        ];
        if !signers.is_empty() {
            params.push(signers_json(signers)?);
        }
        self.call("invokefunction", params).await
    }

    /// Runs the `verify` method of a deployed contract used as a witness.
    pub async fn invoke_contract_verify(
        &self,
        contract: &UInt160,
        args: &[ContractParameter],
        signers: &[Signer],
    ) -> ClientResult<RpcInvokeResult> {
        let params = vec![
            json!(contract.to_string()),
            parameters_json(args),
            signers_json(signers)?,
        ];
        self.call("invokecontractverify", params).await
    }

    // Iterator sessions

    /// Up to `count` further items of a session iterator.
    pub async fn traverse_iterator(
        &self,
        session: Uuid,
        iterator: Uuid,
        count: usize,
    ) -> ClientResult<Vec<StackItem>> {
        if count == 0 {
            return Err(ClientRpcError::InvalidArgument(
                "iterator page size must be positive".to_string(),
            ));
        }
        self.call(
            "traverseiterator",
            vec![
                json!(session.to_string()),
                json!(iterator.to_string()),
                json!(count),
            ],
        )
        .await
    }

    /// Releases a session; false when the node no longer knows it.
    pub async fn terminate_session(&self, session: Uuid) -> ClientResult<bool> {
        self.call("terminatesession", vec![json!(session.to_string())])
            .await
    }

    // Relaying

    pub async fn send_raw_transaction(&self, tx: &Transaction) -> ClientResult<UInt256> {
        let result: HashResult = self
            .call(
                "sendrawtransaction",
                vec![json!(encode_base64(&tx.to_array()))],
            )
            .await?;
        Ok(result.hash)
    }

    pub async fn submit_p2p_notary_request(
        &self,
        request: &P2PNotaryRequest,
    ) -> ClientResult<UInt256> {
        let result: HashResult = self
            .call(
                "submitnotaryrequest",
                vec![json!(encode_base64(&request.to_array()))],
            )
            .await?;
        Ok(result.hash)
    }

    /// The node's own network fee estimate for `tx`.
    pub async fn calculate_network_fee(&self, tx: &Transaction) -> ClientResult<i64> {
        let result: NetworkFeeResult = self
            .call(
                "calculatenetworkfee",
                vec![json!(encode_base64(&tx.to_array()))],
            )
            .await?;
        Ok(result.network_fee)
    }
}
