// Copyright (C) 2015-2025 The Neo Project.
//
// mod.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Request transports.
//!
//! Everything above this module talks to a node through [`RpcTransport::issue`],
//! so the same client code runs over one-shot HTTP requests or a persistent
//! WebSocket connection.

mod http;
mod ws;

pub use http::HttpTransport;
pub use ws::{ConnectionState, WsTransport};

use crate::error::ClientResult;
use crate::models::{RpcRequest, RpcResponse};
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};

#[async_trait]
pub trait RpcTransport: Send + Sync {
    /// Sends `request` and waits for the reply carrying the same ID.
    ///
    /// The transport assigns the ID; whatever `request.id` holds is replaced.
    /// A node error object is returned inside the response, not as `Err`.
    async fn issue(&self, request: RpcRequest) -> ClientResult<RpcResponse>;
}

/// Monotonic request IDs, owned by one transport instance and never reused.
#[derive(Debug)]
pub struct RequestIdGenerator(AtomicU64);

impl RequestIdGenerator {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// A generator whose first ID is `first`, for deterministic tests.
    pub fn starting_at(first: u64) -> Self {
        Self(AtomicU64::new(first))
    }

    pub fn next(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for RequestIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn test_ids_are_sequential() {
        let ids = RequestIdGenerator::starting_at(41);
        assert_eq!(ids.next(), 41);
        assert_eq!(ids.next(), 42);
    }

    #[test]
    fn test_ids_unique_across_threads() {
        let ids = Arc::new(RequestIdGenerator::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let ids = ids.clone();
                std::thread::spawn(move || (0..250).map(|_| ids.next()).collect::<Vec<_>>())
            })
            .collect();
        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id));
            }
        }
        assert_eq!(seen.len(), 1000);
    }
}
