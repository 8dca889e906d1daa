// Copyright (C) 2015-2025 The Neo Project.
//
// transaction_manager.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Fee calculation, signing and relaying of a drafted transaction.

use crate::error::{ClientRpcError, ClientResult};
use crate::policy_api::PolicyApi;
use crate::rpc_client::RpcClient;
use async_trait::async_trait;
use neo_core::io::{get_var_bytes_size, get_var_size};
use neo_core::notary_request::dummy_notary_witness;
use neo_core::{
    fee, ContractParameter, Serializable, Transaction, TransactionAttribute, UInt160, UInt256,
    Witness,
};
use neo_vm::{OpCode, ScriptBuilder};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// Produces witnesses for one account. Keys stay with the implementor.
#[async_trait]
pub trait TransactionSigner: Send + Sync {
    fn script_hash(&self) -> UInt160;

    /// The account's verification script; fees are computed from it.
    fn verification_script(&self) -> Vec<u8>;

    /// A complete witness over `sign_data`.
    async fn sign(&self, sign_data: &[u8]) -> ClientResult<Witness>;
}

/// How the witness of one transaction signer is obtained.
#[derive(Clone)]
pub enum WitnessSource {
    /// A standard (signature or multisignature) account.
    Account(Arc<dyn TransactionSigner>),
    /// A deployed contract whose `verify` method is called with `args`.
    Contract {
        hash: UInt160,
        args: Vec<ContractParameter>,
    },
    /// The Notary contract; the notary nodes complete the witness later.
    NotaryService,
}

impl WitnessSource {
    /// The signer account this source stands for, when it is intrinsic.
    pub fn account(&self) -> Option<UInt160> {
        match self {
            WitnessSource::Account(signer) => Some(signer.script_hash()),
            WitnessSource::Contract { hash, .. } => Some(*hash),
            WitnessSource::NotaryService => None,
        }
    }
}

impl fmt::Debug for WitnessSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WitnessSource::Account(signer) => {
                f.debug_tuple("Account").field(&signer.script_hash()).finish()
            }
            WitnessSource::Contract { hash, args } => f
                .debug_struct("Contract")
                .field("hash", hash)
                .field("args", &args.len())
                .finish(),
            WitnessSource::NotaryService => f.write_str("NotaryService"),
        }
    }
}

/// Invocation script pushing `args` for a contract's `verify`.
pub fn contract_invocation_script(args: &[ContractParameter]) -> ClientResult<Vec<u8>> {
    let mut sb = ScriptBuilder::new();
    for arg in args.iter().rev() {
        arg.emit(&mut sb)?;
    }
    Ok(sb.to_array()?)
}

/// Network fee of `tx` whose signers are witnessed by `sources`, in order.
///
/// The fee covers every witness (closed-form for standard accounts, a
/// `verify` run for contracts, a dummy witness for the Notary), the
/// attribute fees set in the Policy contract and the transaction size.
/// Fee-per-byte and the exec-fee factor are read once per call.
pub async fn calculate_network_fee(
    client: &RpcClient,
    tx: &Transaction,
    sources: &[WitnessSource],
) -> ClientResult<i64> {
    if sources.len() != tx.signers.len() {
        return Err(ClientRpcError::InvalidArgument(format!(
            "{} witness sources for {} signers",
            sources.len(),
            tx.signers.len()
        )));
    }
    let policy = PolicyApi::new(client.clone());
    let fee_per_byte = policy
        .get_fee_per_byte()
        .await
        .map_err(|e| e.into_fee("fee per byte"))?;
    let exec_fee_factor = policy
        .get_exec_fee_factor()
        .await
        .map_err(|e| e.into_fee("exec fee factor"))?;

    let mut size = tx.unsigned_size() + get_var_size(tx.signers.len());
    let mut network_fee = 0i64;
    for (index, (signer, source)) in tx.signers.iter().zip(sources).enumerate() {
        let context = || format!("signer {index} ({})", signer.account);
        match source {
            WitnessSource::Account(account) => {
                let script = account.verification_script();
                let (witness_fee, witness_size) = fee::calculate(exec_fee_factor, &script)
                    .ok_or_else(|| {
                        ClientRpcError::fee(context(), "unsupported verification script")
                    })?;
                network_fee += witness_fee;
                size += witness_size;
            }
            WitnessSource::Contract { hash, args } => {
                let result = client
                    .invoke_contract_verify(hash, args, &tx.signers)
                    .await
                    .map_err(|e| e.into_fee(context()))?;
                result.ensure_halt().map_err(|e| e.into_fee(context()))?;
                let verified = match result.stack.as_slice() {
                    [item] => item.as_bool().unwrap_or(false),
                    _ => false,
                };
                if !verified {
                    return Err(ClientRpcError::fee(
                        context(),
                        "contract verification did not return true",
                    ));
                }
                network_fee += result.gas_consumed;
                // The witness is sized as it will be sent: the invocation
                // script pushing `args` plus a one-byte empty verification
                // script. Two empty placeholders give the same size only when
                // `args` is empty.
                size += get_var_bytes_size(&contract_invocation_script(args)?) + 1;
            }
            WitnessSource::NotaryService => {
                network_fee += fee::opcode_cost(exec_fee_factor, &[OpCode::PUSHDATA1]);
                size += dummy_notary_witness().size();
            }
        }
    }

    for attribute in &tx.attributes {
        let base = policy
            .get_attribute_fee(attribute.attribute_type())
            .await
            .map_err(|e| e.into_fee("attribute fee"))?;
        network_fee += match attribute {
            TransactionAttribute::NotaryAssisted { n_keys } => (i64::from(*n_keys) + 1) * base,
            TransactionAttribute::Conflicts { .. } => base * tx.signers.len() as i64,
            _ => base,
        };
    }

    network_fee += size as i64 * fee_per_byte;
    debug!(size, fee_per_byte, network_fee, "network fee calculated");
    Ok(network_fee)
}

/// Witnesses for `tx` in signer order.
pub async fn make_witnesses(
    tx: &Transaction,
    sources: &[WitnessSource],
    network: u32,
) -> ClientResult<Vec<Witness>> {
    let sign_data = tx.sign_data(network);
    let mut witnesses = Vec::with_capacity(sources.len());
    for source in sources {
        witnesses.push(match source {
            WitnessSource::Account(account) => account.sign(&sign_data).await?,
            WitnessSource::Contract { args, .. } => {
                Witness::new(contract_invocation_script(args)?, Vec::new())
            }
            WitnessSource::NotaryService => dummy_notary_witness(),
        });
    }
    Ok(witnesses)
}

/// A transaction with all fees set, ready to be signed and relayed.
///
/// Created by [`TransactionManagerFactory`](crate::TransactionManagerFactory).
#[derive(Debug, Clone)]
pub struct TransactionManager {
    client: RpcClient,
    tx: Transaction,
    sources: Vec<WitnessSource>,
}

impl TransactionManager {
    pub(crate) fn new(client: RpcClient, tx: Transaction, sources: Vec<WitnessSource>) -> Self {
        Self {
            client,
            tx,
            sources,
        }
    }

    pub fn tx(&self) -> &Transaction {
        &self.tx
    }

    pub fn into_tx(self) -> Transaction {
        self.tx
    }

    pub fn witness_sources(&self) -> &[WitnessSource] {
        &self.sources
    }

    /// Network fee of the current draft, without extras.
    pub async fn calculate_network_fee(&self) -> ClientResult<i64> {
        calculate_network_fee(&self.client, &self.tx, &self.sources).await
    }

    /// Adds every witness. Changing the draft afterwards invalidates them.
    pub async fn sign(&mut self) -> ClientResult<&Transaction> {
        let network = self.client.network_magic()?;
        self.tx.witnesses = make_witnesses(&self.tx, &self.sources, network).await?;
        Ok(&self.tx)
    }

    pub async fn send(&self) -> ClientResult<UInt256> {
        if self.tx.witnesses.len() != self.tx.signers.len() {
            return Err(ClientRpcError::InvalidArgument(
                "transaction is not signed".to_string(),
            ));
        }
        let hash = self.client.send_raw_transaction(&self.tx).await?;
        info!(%hash, "transaction relayed");
        Ok(hash)
    }

    pub async fn sign_and_send(&mut self) -> ClientResult<UInt256> {
        self.sign().await?;
        self.send().await
    }
}
