// Copyright (C) 2015-2025 The Neo Project.
//
// notary.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Notary service helpers: fees, fallback transactions and P2P requests.
//!
//! A main transaction that needs several parties' signatures is relayed to
//! the notary nodes together with a fallback paid by one party. The fallback
//! becomes valid `valid_for` blocks before the main transaction expires and
//! conflicts with it, so exactly one of the two can land.

use crate::error::{ClientRpcError, ClientResult};
use crate::policy_api::PolicyApi;
use crate::rpc_client::{native, RpcClient};
use crate::transaction_manager::{calculate_network_fee, make_witnesses, TransactionSigner, WitnessSource};
use crate::transaction_manager_factory::Cosigner;
use crate::unwrap;
use neo_core::{
    P2PNotaryRequest, Signer, Transaction, TransactionAttribute, TransactionAttributeType, UInt256,
    Witness, WitnessScope,
};
use neo_vm::OpCode;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct NotaryApi {
    client: RpcClient,
}

impl NotaryApi {
    pub fn new(client: RpcClient) -> Self {
        Self { client }
    }

    /// Largest distance between a fallback's `NotValidBefore` and the
    /// current height that the Notary contract accepts.
    pub async fn get_max_not_valid_before_delta(&self) -> ClientResult<u32> {
        let notary = self.client.get_native_contract_hash(native::NOTARY).await?;
        let delta = unwrap::int64(
            self.client
                .invoke_function(&notary, "getMaxNotValidBeforeDelta", &[], &[])
                .await,
        )
        .map_err(|e| e.with_context("getMaxNotValidBeforeDelta"))?;
        u32::try_from(delta).map_err(|_| {
            ClientRpcError::decode("getMaxNotValidBeforeDelta", format!("{delta} out of range"))
        })
    }

    /// Network fee of a `NotaryAssisted` attribute for `n_keys` signing keys.
    pub async fn calculate_notary_fee(&self, n_keys: u8) -> ClientResult<i64> {
        let fee_per_key = PolicyApi::new(self.client.clone())
            .get_attribute_fee(TransactionAttributeType::NotaryAssisted)
            .await?;
        Ok((i64::from(n_keys) + 1) * fee_per_key)
    }

    /// The Notary contract as a cosigner of a main transaction.
    pub async fn notary_cosigner(&self) -> ClientResult<Cosigner> {
        let notary = self.client.get_native_contract_hash(native::NOTARY).await?;
        Ok(Cosigner::new(
            Signer::new(notary, WitnessScope::None),
            WitnessSource::NotaryService,
        ))
    }

    /// A signed fallback for `main`, paid for by `account`.
    ///
    /// `script` defaults to a single `RET`. The fallback shares the main
    /// transaction's `ValidUntilBlock`.
    pub async fn make_fallback_transaction(
        &self,
        main: &Transaction,
        account: Arc<dyn TransactionSigner>,
        valid_for: u32,
        script: Option<Vec<u8>>,
    ) -> ClientResult<Transaction> {
        let network = self.client.network_magic()?;
        let max_delta = self.get_max_not_valid_before_delta().await?;
        if valid_for > max_delta {
            return Err(ClientRpcError::InvalidArgument(format!(
                "fallback validity {valid_for} exceeds the notary limit {max_delta}"
            )));
        }
        if valid_for >= main.valid_until_block {
            return Err(ClientRpcError::InvalidArgument(format!(
                "fallback validity {valid_for} reaches past main transaction height {}",
                main.valid_until_block
            )));
        }

        let notary = self.client.get_native_contract_hash(native::NOTARY).await?;
        let signers = vec![
            Signer::new(notary, WitnessScope::None),
            Signer::new(account.script_hash(), WitnessScope::None),
        ];
        let mut tx = Transaction::new(script.unwrap_or_else(|| vec![OpCode::RET as u8]), signers);
        tx.valid_until_block = main.valid_until_block;
        tx.attributes = vec![
            TransactionAttribute::NotValidBefore {
                height: main.valid_until_block - valid_for,
            },
            TransactionAttribute::Conflicts { hash: main.hash() },
            TransactionAttribute::NotaryAssisted { n_keys: 0 },
        ];

        let result = self
            .client
            .invoke_script(&tx.script, &tx.signers)
            .await
            .map_err(|e| e.into_fee("fallback system fee"))?;
        result
            .ensure_halt()
            .map_err(|e| e.into_fee("fallback system fee"))?;
        tx.system_fee = result.gas_consumed;

        let sources = [WitnessSource::NotaryService, WitnessSource::Account(account)];
        tx.network_fee = calculate_network_fee(&self.client, &tx, &sources).await?;
        tx.validate()?;
        tx.witnesses = make_witnesses(&tx, &sources, network).await?;
        debug!(
            main = %main.hash(),
            fallback = %tx.hash(),
            not_valid_before = main.valid_until_block - valid_for,
            "fallback transaction built"
        );
        Ok(tx)
    }

    /// Relays `main` with its `fallback`, the request signed by `account`.
    pub async fn submit_fallback(
        &self,
        main: Transaction,
        fallback: Transaction,
        account: &dyn TransactionSigner,
    ) -> ClientResult<UInt256> {
        let network = self.client.network_magic()?;
        let mut request = P2PNotaryRequest {
            main_transaction: main,
            fallback_transaction: fallback,
            witness: Witness::default(),
        };
        request.witness = account.sign(&request.sign_data(network)).await?;
        let hash = self.client.submit_p2p_notary_request(&request).await?;
        info!(%hash, "notary request submitted");
        Ok(hash)
    }
}
