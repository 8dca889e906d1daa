// Copyright (C) 2015-2025 The Neo Project.
//
// iterator.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Iterators returned by test invocations.
//!
//! A node with sessions enabled keeps the iterator alive and the client pages
//! through it with `traverseiterator`, releasing it with `terminatesession`.
//! Without sessions the node expands the iterator inline, possibly truncated.
//! For the latter case [`create_call_and_unwrap_iterator_script`] builds a
//! script that drains the iterator into an array inside the VM.

use crate::error::{ClientRpcError, ClientResult};
use crate::models::{InteropValue, RpcInvokeResult, StackItem};
use crate::rpc_client::RpcClient;
use crate::unwrap::FromStackItem;
use neo_core::smart_contract::emit_app_call;
use neo_core::{ContractParameter, UInt160};
use neo_vm::interop::{SYSTEM_ITERATOR_NEXT, SYSTEM_ITERATOR_VALUE};
use neo_vm::{CallFlags, OpCode, ScriptBuilder};
use std::collections::VecDeque;
use std::marker::PhantomData;
use tracing::trace;
use uuid::Uuid;

/// Where the items of an iterator live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IteratorHandle {
    /// Held by the node until the session is terminated.
    Session { session: Uuid, iterator: Uuid },
    /// Already expanded; nothing to release.
    Inline {
        values: Vec<StackItem>,
        truncated: bool,
    },
}

impl IteratorHandle {
    /// The iterator left as the single item of a halted invocation.
    pub fn from_result(result: &RpcInvokeResult) -> ClientResult<Self> {
        result.ensure_halt()?;
        let item = result.single_item()?;
        Self::from_item(item, result.session)
    }

    pub fn from_item(item: &StackItem, session: Option<Uuid>) -> ClientResult<Self> {
        match item.as_interop().map_err(|e| ClientRpcError::iterator(e.to_string()))? {
            InteropValue::Iterator(iterator) => {
                let session = session.ok_or_else(|| {
                    ClientRpcError::iterator("iterator without a session in the result")
                })?;
                Ok(IteratorHandle::Session {
                    session,
                    iterator: *iterator,
                })
            }
            InteropValue::Inline { values, truncated } => Ok(IteratorHandle::Inline {
                values: values.clone(),
                truncated: *truncated,
            }),
            InteropValue::Opaque => Err(ClientRpcError::iterator(
                "interop interface is not an iterator",
            )),
        }
    }
}

#[derive(Debug)]
enum Source {
    Session {
        session: Uuid,
        iterator: Uuid,
        buffered: VecDeque<StackItem>,
        exhausted: bool,
    },
    Inline {
        values: VecDeque<StackItem>,
        truncated: bool,
    },
}

/// A forward-only stream of decoded iterator items.
///
/// Items are fetched a page at a time. A session iterator should be
/// [`terminate`](ResultIterator::terminate)d once the caller is done with it.
#[derive(Debug)]
pub struct ResultIterator<T> {
    client: RpcClient,
    source: Source,
    page_size: usize,
    position: usize,
    _item: PhantomData<fn() -> T>,
}

impl<T: FromStackItem> ResultIterator<T> {
    pub fn new(client: RpcClient, handle: IteratorHandle, page_size: usize) -> Self {
        let source = match handle {
            IteratorHandle::Session { session, iterator } => Source::Session {
                session,
                iterator,
                buffered: VecDeque::new(),
                exhausted: false,
            },
            IteratorHandle::Inline { values, truncated } => Source::Inline {
                values: values.into(),
                truncated,
            },
        };
        Self {
            client,
            source,
            page_size: page_size.max(1),
            position: 0,
            _item: PhantomData,
        }
    }

    /// True when the node cut an inline expansion short.
    pub fn is_truncated(&self) -> bool {
        matches!(self.source, Source::Inline { truncated: true, .. })
    }

    pub async fn next(&mut self) -> ClientResult<Option<T>> {
        let item = match &mut self.source {
            Source::Inline { values, .. } => values.pop_front(),
            Source::Session {
                session,
                iterator,
                buffered,
                exhausted,
            } => {
                if buffered.is_empty() && !*exhausted {
                    let page = self
                        .client
                        .traverse_iterator(*session, *iterator, self.page_size)
                        .await?;
                    trace!(session = %session, items = page.len(), "iterator page");
                    *exhausted = page.len() < self.page_size;
                    buffered.extend(page);
                }
                buffered.pop_front()
            }
        };
        let Some(item) = item else {
            return Ok(None);
        };
        let index = self.position;
        self.position += 1;
        T::from_stack_item(item)
            .map(Some)
            .map_err(|e| e.with_context(format!("iterator item {index}")))
    }

    /// Drains the iterator.
    pub async fn collect_remaining(&mut self) -> ClientResult<Vec<T>> {
        let mut items = Vec::new();
        while let Some(item) = self.next().await? {
            items.push(item);
        }
        Ok(items)
    }

    /// Releases the node session; a no-op for inline iterators.
    pub async fn terminate(self) -> ClientResult<()> {
        match self.source {
            Source::Inline { .. } => Ok(()),
            Source::Session { session, .. } => {
                if self.client.terminate_session(session).await? {
                    Ok(())
                } else {
                    Err(ClientRpcError::iterator(format!(
                        "session {session} was not terminated"
                    )))
                }
            }
        }
    }
}

/// A script that calls `method` and returns the items of the iterator it
/// yields as one array, at most `max_items` of them when bounded.
pub fn create_call_and_unwrap_iterator_script(
    contract: &UInt160,
    method: &str,
    max_items: Option<usize>,
    params: &[ContractParameter],
) -> ClientResult<Vec<u8>> {
    let mut sb = ScriptBuilder::new();
    if let Some(max) = max_items {
        let max = i64::try_from(max)
            .map_err(|_| ClientRpcError::InvalidArgument(format!("item bound {max} too large")))?;
        sb.emit_push_int(max);
    }
    emit_app_call(&mut sb, contract, method, CallFlags::ALL, params)?;
    sb.emit_opcode(OpCode::NEWARRAY0);

    let next = sb.new_label();
    let end = sb.new_label();
    // [max] iterator array
    sb.mark_label(next)?;
    sb.emit_opcode(OpCode::OVER);
    sb.emit_syscall(&SYSTEM_ITERATOR_NEXT);
    sb.emit_jump_to(OpCode::JMPIFNOT, end)?;
    sb.emit_opcode(OpCode::DUP)
        .emit_opcode(OpCode::PUSH2)
        .emit_opcode(OpCode::PICK);
    sb.emit_syscall(&SYSTEM_ITERATOR_VALUE);
    sb.emit_opcode(OpCode::APPEND);
    if max_items.is_some() {
        sb.emit_opcode(OpCode::DUP)
            .emit_opcode(OpCode::SIZE)
            .emit_opcode(OpCode::PUSH3)
            .emit_opcode(OpCode::PICK)
            .emit_opcode(OpCode::GE);
        sb.emit_jump_to(OpCode::JMPIF, end)?;
    }
    sb.emit_jump_to(OpCode::JMP, next)?;
    sb.mark_label(end)?;
    sb.emit_opcode(OpCode::NIP);
    if max_items.is_some() {
        sb.emit_opcode(OpCode::NIP);
    }
    Ok(sb.to_array()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use neo_core::smart_contract::create_call_script;

    #[test]
    fn test_unbounded_script_layout() {
        let contract = UInt160::from([5u8; 20]);
        let script = create_call_and_unwrap_iterator_script(&contract, "tokens", None, &[]).unwrap();
        let call = create_call_script(&contract, "tokens", &[]).unwrap();
        assert_eq!(&script[..call.len()], call.as_slice());

        let next = SYSTEM_ITERATOR_NEXT.hash().to_le_bytes();
        let value = SYSTEM_ITERATOR_VALUE.hash().to_le_bytes();
        let mut tail = vec![OpCode::NEWARRAY0 as u8, OpCode::OVER as u8, OpCode::SYSCALL as u8];
        tail.extend_from_slice(&next);
        // JMPIFNOT over DUP PUSH2 PICK SYSCALL(5) APPEND JMP(2) to NIP
        tail.extend_from_slice(&[OpCode::JMPIFNOT as u8, 13]);
        tail.extend_from_slice(&[OpCode::DUP as u8, OpCode::PUSH2 as u8, OpCode::PICK as u8]);
        tail.push(OpCode::SYSCALL as u8);
        tail.extend_from_slice(&value);
        tail.push(OpCode::APPEND as u8);
        // back to OVER: JMP sits 17 bytes after it
        tail.extend_from_slice(&[OpCode::JMP as u8, (-17i8) as u8]);
        tail.push(OpCode::NIP as u8);
        assert_eq!(&script[call.len()..], tail.as_slice());
    }

    #[test]
    fn test_bounded_script_ends_with_two_nips() {
        let contract = UInt160::from([5u8; 20]);
        let script =
            create_call_and_unwrap_iterator_script(&contract, "tokens", Some(10), &[]).unwrap();
        assert_eq!(script[0], OpCode::PUSH10 as u8);
        assert_eq!(&script[script.len() - 2..], &[OpCode::NIP as u8, OpCode::NIP as u8]);
        assert!(script
            .windows(5)
            .any(|w| w == [OpCode::DUP as u8, OpCode::SIZE as u8, OpCode::PUSH3 as u8, OpCode::PICK as u8, OpCode::GE as u8]));
    }

    #[test]
    fn test_handle_from_item() {
        let id = Uuid::new_v4();
        let session = Uuid::new_v4();
        let item = StackItem::InteropInterface(InteropValue::Iterator(id));
        assert_eq!(
            IteratorHandle::from_item(&item, Some(session)).unwrap(),
            IteratorHandle::Session {
                session,
                iterator: id
            }
        );
        assert!(IteratorHandle::from_item(&item, None).is_err());
        assert!(IteratorHandle::from_item(&StackItem::from(1i64), None).is_err());
        let opaque = StackItem::InteropInterface(InteropValue::Opaque);
        assert!(matches!(
            IteratorHandle::from_item(&opaque, None),
            Err(ClientRpcError::Iterator { .. })
        ));
    }
}
