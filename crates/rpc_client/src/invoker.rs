// Copyright (C) 2015-2025 The Neo Project.
//
// invoker.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Test invocations on behalf of a fixed signer set.

use crate::error::{ClientRpcError, ClientResult};
use crate::iterator::{create_call_and_unwrap_iterator_script, IteratorHandle, ResultIterator};
use crate::models::{RpcInvokeResult, StackItem};
use crate::rpc_client::RpcClient;
use crate::unwrap::FromStackItem;
use neo_core::{ContractParameter, Signer, UInt160};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct Invoker {
    client: RpcClient,
    signers: Vec<Signer>,
}

impl Invoker {
    pub fn new(client: RpcClient, signers: Vec<Signer>) -> Self {
        Self { client, signers }
    }

    pub fn client(&self) -> &RpcClient {
        &self.client
    }

    pub fn signers(&self) -> &[Signer] {
        &self.signers
    }

    pub async fn call(
        &self,
        contract: &UInt160,
        method: &str,
        params: &[ContractParameter],
    ) -> ClientResult<RpcInvokeResult> {
        self.client
            .invoke_function(contract, method, params, &self.signers)
            .await
    }

    pub async fn run(&self, script: &[u8]) -> ClientResult<RpcInvokeResult> {
        self.client.invoke_script(script, &self.signers).await
    }

    /// Calls a method returning an iterator and drains up to `max_items` of
    /// it inside the VM; the result holds one array.
    pub async fn call_and_expand_iterator(
        &self,
        contract: &UInt160,
        method: &str,
        max_items: usize,
        params: &[ContractParameter],
    ) -> ClientResult<RpcInvokeResult> {
        let script =
            create_call_and_unwrap_iterator_script(contract, method, Some(max_items), params)?;
        self.run(&script).await
    }

    /// Calls a method returning an iterator and streams its items, through a
    /// session when the node keeps one or from the inline expansion otherwise.
    pub async fn call_iterator<T: FromStackItem>(
        &self,
        contract: &UInt160,
        method: &str,
        params: &[ContractParameter],
    ) -> ClientResult<ResultIterator<T>> {
        let result = self.call(contract, method, params).await?;
        let handle = IteratorHandle::from_result(&result)
            .map_err(|e| e.with_context(format!("{method} on {contract}")))?;
        Ok(ResultIterator::new(
            self.client.clone(),
            handle,
            self.client.iterator_page_size(),
        ))
    }

    pub async fn traverse_iterator(
        &self,
        session: Uuid,
        iterator: Uuid,
        count: usize,
    ) -> ClientResult<Vec<StackItem>> {
        self.client.traverse_iterator(session, iterator, count).await
    }

    pub async fn terminate_session(&self, session: Uuid) -> ClientResult<()> {
        if self.client.terminate_session(session).await? {
            Ok(())
        } else {
            Err(ClientRpcError::iterator(format!(
                "session {session} was not terminated"
            )))
        }
    }
}
