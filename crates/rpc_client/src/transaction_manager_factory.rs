// Copyright (C) 2015-2025 The Neo Project.
//
// transaction_manager_factory.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Drafting transactions with their system fee, validity window and network fee.

use crate::error::{ClientRpcError, ClientResult};
use crate::rpc_client::RpcClient;
use crate::transaction_manager::{calculate_network_fee, TransactionManager, WitnessSource};
use neo_core::{Signer, Transaction, TransactionAttribute, UInt160};
use tracing::debug;

/// A signer besides the sender, with the source of its witness.
#[derive(Debug, Clone)]
pub struct Cosigner {
    pub signer: Signer,
    pub witness: WitnessSource,
}

impl Cosigner {
    pub fn new(signer: Signer, witness: WitnessSource) -> Self {
        Self { signer, witness }
    }
}

/// Overrides applied while drafting.
#[derive(Debug, Clone, Default)]
pub struct TransactionOptions {
    /// Used instead of the test-invocation result when set.
    pub system_fee: Option<i64>,
    pub extra_system_fee: i64,
    pub extra_network_fee: i64,
    /// Used instead of the computed validity window when set.
    pub valid_until_block: Option<u32>,
    pub attributes: Vec<TransactionAttribute>,
    pub nonce: Option<u32>,
}

/// Signers in wire order: the sender first with `CalledByEntry`, then the
/// cosigners as given. A cosigner for the sender account replaces the
/// default sender entry and keeps its own scopes.
pub fn normalize_signers(sender: UInt160, cosigners: &[Signer]) -> Vec<Signer> {
    let mut signers = Vec::with_capacity(cosigners.len() + 1);
    signers.push(
        cosigners
            .iter()
            .find(|s| s.account == sender)
            .cloned()
            .unwrap_or_else(|| Signer::called_by_entry(sender)),
    );
    signers.extend(cosigners.iter().filter(|s| s.account != sender).cloned());
    signers
}

/// Turns scripts into fee-complete [`TransactionManager`]s.
#[derive(Debug, Clone)]
pub struct TransactionManagerFactory {
    client: RpcClient,
}

impl TransactionManagerFactory {
    pub fn new(client: RpcClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &RpcClient {
        &self.client
    }

    /// Drafts a transaction running `script`, paid for by `sender`.
    ///
    /// The system fee comes from a test invocation with the final signer
    /// list; a FAULT there stops the draft before any other node call.
    pub async fn make_transaction(
        &self,
        script: Vec<u8>,
        sender: WitnessSource,
        cosigners: Vec<Cosigner>,
        options: TransactionOptions,
    ) -> ClientResult<TransactionManager> {
        self.client.network_parameters()?;
        let sender_account = sender.account().ok_or_else(|| {
            ClientRpcError::InvalidArgument("the notary service cannot send".to_string())
        })?;

        let cosigner_list: Vec<Signer> = cosigners.iter().map(|c| c.signer.clone()).collect();
        let signers = normalize_signers(sender_account, &cosigner_list);
        let sources: Vec<WitnessSource> = std::iter::once(sender)
            .chain(
                cosigners
                    .into_iter()
                    .filter(|c| c.signer.account != sender_account)
                    .map(|c| c.witness),
            )
            .collect();

        let mut tx = Transaction::new(script, signers);
        if let Some(nonce) = options.nonce {
            tx.nonce = nonce;
        }
        tx.attributes = options.attributes;

        tx.system_fee = match options.system_fee {
            Some(fee) => fee,
            None => {
                let result = self
                    .client
                    .invoke_script(&tx.script, &tx.signers)
                    .await
                    .map_err(|e| e.into_fee("system fee"))?;
                result.ensure_halt().map_err(|e| e.into_fee("system fee"))?;
                result.gas_consumed
            }
        } + options.extra_system_fee;

        tx.valid_until_block = match options.valid_until_block {
            Some(height) => height,
            None => self
                .client
                .calculate_valid_until_block()
                .await
                .map_err(|e| e.into_fee("valid until block"))?,
        };

        tx.network_fee =
            calculate_network_fee(&self.client, &tx, &sources).await? + options.extra_network_fee;
        tx.validate()?;
        debug!(
            system_fee = tx.system_fee,
            network_fee = tx.network_fee,
            valid_until_block = tx.valid_until_block,
            signers = tx.signers.len(),
            "transaction drafted"
        );
        Ok(TransactionManager::new(self.client.clone(), tx, sources))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use neo_core::WitnessScope;

    fn account(seed: u8) -> UInt160 {
        UInt160::from([seed; 20])
    }

    #[test]
    fn test_sender_added_with_called_by_entry() {
        let cosigner = Signer::new(account(2), WitnessScope::Global);
        let signers = normalize_signers(account(1), &[cosigner.clone()]);
        assert_eq!(signers, vec![Signer::called_by_entry(account(1)), cosigner]);
    }

    #[test]
    fn test_sender_cosigner_keeps_scope_and_moves_first() {
        let other = Signer::new(account(2), WitnessScope::CalledByEntry);
        let sender = Signer::new(account(1), WitnessScope::Global);
        let signers = normalize_signers(account(1), &[other.clone(), sender.clone()]);
        assert_eq!(signers, vec![sender, other]);
    }

    #[test]
    fn test_no_cosigners() {
        assert_eq!(
            normalize_signers(account(9), &[]),
            vec![Signer::called_by_entry(account(9))]
        );
    }
}
