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

//! The transport-agnostic JSON-RPC client.

mod builder;
mod client;
mod hooks;

pub use builder::RpcClientBuilder;
pub use hooks::{RpcClientHooks, RpcRequestOutcome};

use crate::cache::{ClientCache, NetworkParameters};
use crate::config::RpcClientConfig;
use crate::error::{ClientRpcError, ClientResult};
use crate::models::{RpcRequest, RpcResponse};
use crate::transport::{HttpTransport, RpcTransport};
use neo_core::UInt160;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Native contract names as reported by `getnativecontracts`.
pub mod native {
    pub const POLICY: &str = "PolicyContract";
    pub const NOTARY: &str = "Notary";
    pub const NEO: &str = "NeoToken";
    pub const GAS: &str = "GasToken";
    pub const LEDGER: &str = "LedgerContract";
    pub const ORACLE: &str = "OracleContract";
    pub const ROLE_MANAGEMENT: &str = "RoleManagement";
    pub const MANAGEMENT: &str = "ContractManagement";
}

/// A Neo N3 RPC client. Cloning is cheap and clones share the transport and caches.
#[derive(Clone)]
pub struct RpcClient {
    transport: Arc<dyn RpcTransport>,
    cache: Arc<ClientCache>,
    hooks: RpcClientHooks,
    config: RpcClientConfig,
}

impl RpcClient {
    pub fn builder(endpoint: impl Into<String>) -> RpcClientBuilder {
        RpcClientBuilder::new(endpoint)
    }

    /// An HTTP client with the default configuration.
    pub fn new(endpoint: &str) -> ClientResult<Self> {
        let config = RpcClientConfig::default();
        let transport = HttpTransport::new(endpoint, config.clone())?;
        Ok(Self::with_transport(Arc::new(transport), config))
    }

    pub fn with_transport(transport: Arc<dyn RpcTransport>, config: RpcClientConfig) -> Self {
        Self {
            transport,
            cache: Arc::new(ClientCache::default()),
            hooks: RpcClientHooks::default(),
            config,
        }
    }

    #[must_use]
    pub fn with_hooks(mut self, hooks: RpcClientHooks) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn config(&self) -> &RpcClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &Arc<dyn RpcTransport> {
        &self.transport
    }

    /// Issues `request` and reports its outcome to the hooks. A node error is
    /// returned inside the response.
    pub async fn send(&self, request: RpcRequest) -> ClientResult<RpcResponse> {
        let method = request.method.clone();
        let start = Instant::now();
        let result = self.transport.issue(request).await;
        let error_code = match &result {
            Ok(response) => response.error.as_ref().map(|e| e.code),
            Err(err) => Some(err.code()),
        };
        self.hooks.notify(RpcRequestOutcome {
            method,
            elapsed: start.elapsed(),
            success: error_code.is_none(),
            timeout: self.config.request_timeout(),
            error_code,
        });
        result
    }

    /// Calls `method` and decodes its result.
    pub async fn call<T: DeserializeOwned>(&self, method: &str, params: Vec<Value>) -> ClientResult<T> {
        let response = self.send(RpcRequest::new(method, params)).await?;
        response.into_result(method)
    }

    /// Performs the handshake: `getversion` and `getnativecontracts`.
    ///
    /// Fee calculation and transaction signing need the network parameters
    /// and fail with [`ClientRpcError::NotInitialized`] until this succeeds.
    pub async fn init(&self) -> ClientResult<NetworkParameters> {
        let version = self.get_version().await?;
        let natives = self.get_native_contracts().await?;
        let parameters = NetworkParameters::from(&version);
        self.cache.set_natives(&natives);
        self.cache.set_network(parameters.clone());
        info!(
            network = parameters.network,
            natives = natives.len(),
            user_agent = %version.user_agent,
            "RPC client initialized"
        );
        Ok(parameters)
    }

    pub fn network_parameters(&self) -> ClientResult<NetworkParameters> {
        self.cache.network().ok_or(ClientRpcError::NotInitialized)
    }

    /// Iterator page size: the configured size, bounded by the node's
    /// `maxiteratorresultitems` once the handshake has run.
    pub fn iterator_page_size(&self) -> usize {
        let configured = self.config.max_iterator_items;
        match self.cache.network() {
            Some(parameters) if parameters.max_iterator_result_items > 0 => {
                configured.min(parameters.max_iterator_result_items)
            }
            _ => configured,
        }
    }

    pub fn network_magic(&self) -> ClientResult<u32> {
        Ok(self.network_parameters()?.network)
    }

    pub fn address_version(&self) -> ClientResult<u8> {
        Ok(self.network_parameters()?.address_version)
    }

    /// Resolves a native contract by name, asking the node on a cache miss.
    /// Fails with [`ClientRpcError::NotInitialized`] before [`RpcClient::init`].
    pub async fn get_native_contract_hash(&self, name: &str) -> ClientResult<UInt160> {
        self.network_parameters()?;
        if let Some(hash) = self.cache.native_hash(name) {
            return Ok(hash);
        }
        let state = self.get_contract_state_by_name(name).await?;
        debug!(name, hash = %state.hash, "resolved native contract");
        self.cache.insert_native(name, state.hash);
        Ok(state.hash)
    }

    /// `blockCount + validatorCount + 1`, the furthest block a transaction
    /// built now can still be accepted in. The validator count is cached for
    /// 100 blocks.
    pub async fn calculate_valid_until_block(&self) -> ClientResult<u32> {
        let block_count = self.get_block_count().await?;
        let validators = match self.cache.validator_count(block_count) {
            Some(count) => count,
            None => {
                let count = self.get_next_block_validators().await?.len() as u32;
                debug!(count, block_count, "refreshed validator count");
                self.cache.set_validator_count(count, block_count);
                count
            }
        };
        Ok(block_count + validators + 1)
    }
}

impl std::fmt::Debug for RpcClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcClient")
            .field("config", &self.config)
            .field("network", &self.cache.network())
            .finish()
    }
}
