// Copyright (C) 2015-2025 The Neo Project.
//
// unwrap.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Typed results from test invocations.
//!
//! Each helper accepts the outcome of an invocation call directly, checks
//! that the VM halted with exactly one item on the stack and converts it:
//!
//! ```no_run
//! # async fn demo(client: neo_rpc_client::RpcClient, token: neo_core::UInt160) -> neo_rpc_client::ClientResult<()> {
//! use neo_rpc_client::unwrap;
//! let decimals = unwrap::int64(client.invoke_function(&token, "decimals", &[], &[]).await)?;
//! # Ok(())
//! # }
//! ```

use crate::error::{ClientRpcError, ClientResult};
use crate::iterator::IteratorHandle;
use crate::models::{RpcInvokeResult, StackItem};
use neo_core::{ECPoint, UInt160, UInt256};
use num_bigint::BigInt;
use uuid::Uuid;

/// Conversion from a single stack item.
pub trait FromStackItem: Sized {
    fn from_stack_item(item: StackItem) -> ClientResult<Self>;
}

impl FromStackItem for StackItem {
    fn from_stack_item(item: StackItem) -> ClientResult<Self> {
        Ok(item)
    }
}

impl FromStackItem for bool {
    fn from_stack_item(item: StackItem) -> ClientResult<Self> {
        item.as_bool()
    }
}

impl FromStackItem for i64 {
    fn from_stack_item(item: StackItem) -> ClientResult<Self> {
        item.as_i64()
    }
}

impl FromStackItem for BigInt {
    fn from_stack_item(item: StackItem) -> ClientResult<Self> {
        item.as_big_int()
    }
}

impl FromStackItem for String {
    fn from_stack_item(item: StackItem) -> ClientResult<Self> {
        item.as_utf8_string()
    }
}

impl FromStackItem for Vec<u8> {
    fn from_stack_item(item: StackItem) -> ClientResult<Self> {
        match item {
            StackItem::ByteString(bytes) | StackItem::Buffer(bytes) => Ok(bytes),
            other => other.as_bytes(),
        }
    }
}

impl FromStackItem for UInt160 {
    fn from_stack_item(item: StackItem) -> ClientResult<Self> {
        UInt160::from_bytes(&item.as_bytes()?)
            .map_err(|e| ClientRpcError::decode("stack item", e))
    }
}

impl FromStackItem for UInt256 {
    fn from_stack_item(item: StackItem) -> ClientResult<Self> {
        UInt256::from_bytes(&item.as_bytes()?)
            .map_err(|e| ClientRpcError::decode("stack item", e))
    }
}

impl FromStackItem for ECPoint {
    fn from_stack_item(item: StackItem) -> ClientResult<Self> {
        ECPoint::from_bytes(&item.as_bytes()?).map_err(|e| ClientRpcError::decode("stack item", e))
    }
}

/// The single item left by a halted invocation.
pub fn item(result: ClientResult<RpcInvokeResult>) -> ClientResult<StackItem> {
    let result = result?;
    result.ensure_halt()?;
    result.single_item().cloned()
}

pub fn boolean(result: ClientResult<RpcInvokeResult>) -> ClientResult<bool> {
    item(result)?.as_bool()
}

pub fn int64(result: ClientResult<RpcInvokeResult>) -> ClientResult<i64> {
    item(result)?.as_i64()
}

pub fn big_int(result: ClientResult<RpcInvokeResult>) -> ClientResult<BigInt> {
    item(result)?.as_big_int()
}

pub fn utf8_string(result: ClientResult<RpcInvokeResult>) -> ClientResult<String> {
    item(result)?.as_utf8_string()
}

pub fn bytes(result: ClientResult<RpcInvokeResult>) -> ClientResult<Vec<u8>> {
    Vec::<u8>::from_stack_item(item(result)?)
}

pub fn uint160(result: ClientResult<RpcInvokeResult>) -> ClientResult<UInt160> {
    UInt160::from_stack_item(item(result)?)
}

/// Elements of an array result, each converted to `T`.
pub fn array<T: FromStackItem>(result: ClientResult<RpcInvokeResult>) -> ClientResult<Vec<T>> {
    item(result)?
        .into_array()?
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            T::from_stack_item(item).map_err(|e| e.with_context(format!("item {index}")))
        })
        .collect()
}

/// The session iterator of a result: `(session, iterator)`.
///
/// Fails when the node expanded the iterator inline; use
/// [`IteratorHandle::from_result`] to accept both forms.
pub fn session_iterator(result: ClientResult<RpcInvokeResult>) -> ClientResult<(Uuid, Uuid)> {
    let result = result?;
    result.ensure_halt()?;
    match IteratorHandle::from_result(&result)? {
        IteratorHandle::Session { session, iterator } => Ok((session, iterator)),
        IteratorHandle::Inline { .. } => Err(ClientRpcError::iterator(
            "sessions are disabled on the node, the iterator was expanded inline",
        )),
    }
}
