// Copyright (C) 2015-2025 The Neo Project.
//
// cache.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Per-client caches: network parameters, native contract hashes and the
//! validator count used for validity windows.

use crate::models::{RpcContractState, RpcVersion};
use neo_core::UInt160;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Blocks a cached validator count stays valid for.
pub const VALIDATOR_COUNT_TTL_BLOCKS: u32 = 100;

/// What the handshake learns about the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkParameters {
    pub network: u32,
    pub address_version: u8,
    pub ms_per_block: u32,
    pub max_valid_until_block_increment: u32,
    pub max_traceable_blocks: u32,
    pub session_enabled: bool,
    pub max_iterator_result_items: usize,
}

impl From<&RpcVersion> for NetworkParameters {
    fn from(version: &RpcVersion) -> Self {
        Self {
            network: version.protocol.network,
            address_version: version.protocol.address_version,
            ms_per_block: version.protocol.ms_per_block,
            max_valid_until_block_increment: version.protocol.max_valid_until_block_increment,
            max_traceable_blocks: version.protocol.max_traceable_blocks,
            session_enabled: version.rpc.session_enabled,
            max_iterator_result_items: version.rpc.max_iterator_result_items,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ValidatorCount {
    count: u32,
    expires_at: u32,
}

/// Entries are replaced whole under their lock, so readers never see a partial update.
#[derive(Debug, Default)]
pub struct ClientCache {
    network: RwLock<Option<NetworkParameters>>,
    natives: RwLock<HashMap<String, UInt160>>,
    validators: RwLock<Option<ValidatorCount>>,
}

impl ClientCache {
    pub fn network(&self) -> Option<NetworkParameters> {
        self.network.read().clone()
    }

    pub fn set_network(&self, parameters: NetworkParameters) {
        *self.network.write() = Some(parameters);
    }

    /// Native hashes are keyed by lowercased contract name.
    pub fn native_hash(&self, name: &str) -> Option<UInt160> {
        self.natives.read().get(&name.to_lowercase()).copied()
    }

    pub fn insert_native(&self, name: &str, hash: UInt160) {
        self.natives.write().insert(name.to_lowercase(), hash);
    }

    pub fn set_natives(&self, contracts: &[RpcContractState]) {
        let mut natives = self.natives.write();
        for contract in contracts {
            natives.insert(contract.name().to_lowercase(), contract.hash);
        }
    }

    /// The cached count, if it is still valid at `block_count`.
    pub fn validator_count(&self, block_count: u32) -> Option<u32> {
        self.validators
            .read()
            .filter(|entry| block_count < entry.expires_at)
            .map(|entry| entry.count)
    }

    pub fn set_validator_count(&self, count: u32, block_count: u32) {
        *self.validators.write() = Some(ValidatorCount {
            count,
            expires_at: block_count.saturating_add(VALIDATOR_COUNT_TTL_BLOCKS),
        });
    }
}
