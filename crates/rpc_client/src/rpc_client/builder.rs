// Copyright (C) 2015-2025 The Neo Project.
//
// builder.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use super::{RpcClient, RpcClientHooks};
use crate::config::RpcClientConfig;
use crate::error::ClientResult;
use crate::transport::{HttpTransport, WsTransport};
use crate::ws_client::WsClient;
use std::sync::Arc;
use std::time::Duration;

/// Configures and creates an [`RpcClient`] over HTTP or a [`WsClient`].
#[derive(Debug, Clone)]
pub struct RpcClientBuilder {
    endpoint: String,
    config: RpcClientConfig,
    hooks: RpcClientHooks,
}

impl RpcClientBuilder {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            config: RpcClientConfig::default(),
            hooks: RpcClientHooks::default(),
        }
    }

    #[must_use]
    pub fn config(mut self, config: RpcClientConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn dial_timeout(mut self, timeout: Duration) -> Self {
        self.config.dial_timeout_ms = timeout.as_millis() as u64;
        self
    }

    #[must_use]
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout_ms = timeout.as_millis() as u64;
        self
    }

    #[must_use]
    pub fn notification_buffer(mut self, capacity: usize) -> Self {
        self.config.notification_buffer = capacity;
        self
    }

    #[must_use]
    pub fn hooks(mut self, hooks: RpcClientHooks) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn build(self) -> ClientResult<RpcClient> {
        let transport = HttpTransport::new(&self.endpoint, self.config.clone())?;
        Ok(RpcClient::with_transport(Arc::new(transport), self.config).with_hooks(self.hooks))
    }

    /// Dials the WebSocket endpoint.
    pub async fn build_ws(self) -> ClientResult<WsClient> {
        let transport = WsTransport::connect(&self.endpoint, self.config.clone()).await?;
        Ok(WsClient::from_transport(Arc::new(transport), self.config, self.hooks))
    }
}
