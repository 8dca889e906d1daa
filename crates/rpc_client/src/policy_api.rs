// Copyright (C) 2015-2025 The Neo Project.
//
// policy_api.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Reads of the native Policy contract.

use crate::error::ClientResult;
use crate::models::RpcInvokeResult;
use crate::rpc_client::{native, RpcClient};
use crate::unwrap;
use neo_core::{ContractParameter, TransactionAttributeType, UInt160};
use num_bigint::BigInt;

/// Fee parameters and blocked accounts, as currently set on chain.
#[derive(Debug, Clone)]
pub struct PolicyApi {
    client: RpcClient,
}

impl PolicyApi {
    pub fn new(client: RpcClient) -> Self {
        Self { client }
    }

    async fn invoke(
        &self,
        method: &str,
        params: &[ContractParameter],
    ) -> ClientResult<RpcInvokeResult> {
        let policy = self.client.get_native_contract_hash(native::POLICY).await?;
        self.client
            .invoke_function(&policy, method, params, &[])
            .await
    }

    /// Network fee per transaction byte, in GAS fractions.
    pub async fn get_fee_per_byte(&self) -> ClientResult<i64> {
        unwrap::int64(self.invoke("getFeePerByte", &[]).await)
            .map_err(|e| e.with_context("getFeePerByte"))
    }

    /// Multiplier applied to opcode prices.
    pub async fn get_exec_fee_factor(&self) -> ClientResult<i64> {
        unwrap::int64(self.invoke("getExecFeeFactor", &[]).await)
            .map_err(|e| e.with_context("getExecFeeFactor"))
    }

    pub async fn get_storage_price(&self) -> ClientResult<i64> {
        unwrap::int64(self.invoke("getStoragePrice", &[]).await)
            .map_err(|e| e.with_context("getStoragePrice"))
    }

    /// Base network fee of one attribute of `attribute_type`.
    pub async fn get_attribute_fee(&self, attribute_type: TransactionAttributeType) -> ClientResult<i64> {
        let kind = ContractParameter::Integer(BigInt::from(attribute_type as u8));
        unwrap::int64(self.invoke("getAttributeFee", &[kind]).await)
            .map_err(|e| e.with_context(format!("getAttributeFee({attribute_type:?})")))
    }

    pub async fn is_blocked(&self, account: &UInt160) -> ClientResult<bool> {
        unwrap::boolean(
            self.invoke("isBlocked", &[ContractParameter::Hash160(*account)])
                .await,
        )
        .map_err(|e| e.with_context("isBlocked"))
    }
}
