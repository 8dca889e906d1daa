// Copyright (C) 2015-2025 The Neo Project.
//
// http.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! One POST per request.

use super::{RequestIdGenerator, RpcTransport};
use crate::config::RpcClientConfig;
use crate::error::{ClientRpcError, ClientResult};
use crate::models::{RpcRequest, RpcResponse};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::sync::Arc;
use tracing::{debug, trace};
use url::Url;

/// JSON-RPC over HTTP through a pooled `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    endpoint: Url,
    client: Client,
    ids: Arc<RequestIdGenerator>,
    config: RpcClientConfig,
}

impl HttpTransport {
    pub fn new(endpoint: &str, config: RpcClientConfig) -> ClientResult<Self> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| ClientRpcError::InvalidArgument(format!("endpoint {endpoint}: {e}")))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(ClientRpcError::InvalidArgument(format!(
                "endpoint {endpoint} is not an HTTP URL"
            )));
        }
        config.validate()?;
        let client = Client::builder()
            .connect_timeout(config.dial_timeout())
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| ClientRpcError::transport(format!("HTTP client: {e}")))?;
        Ok(Self::with_client(client, endpoint, config))
    }

    /// Uses an existing client, whose own timeouts then apply.
    pub fn with_client(client: Client, endpoint: Url, config: RpcClientConfig) -> Self {
        Self {
            endpoint,
            client,
            ids: Arc::new(RequestIdGenerator::new()),
            config,
        }
    }

    /// Replaces the ID source, for tests that assert exact request bodies.
    pub fn with_id_generator(mut self, ids: RequestIdGenerator) -> Self {
        self.ids = Arc::new(ids);
        self
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn map_send_error(&self, err: reqwest::Error) -> ClientRpcError {
        if err.is_timeout() {
            ClientRpcError::Timeout(self.config.request_timeout())
        } else {
            ClientRpcError::transport(format!("HTTP request to {} failed: {err}", self.endpoint))
        }
    }
}

#[async_trait]
impl RpcTransport for HttpTransport {
    async fn issue(&self, request: RpcRequest) -> ClientResult<RpcResponse> {
        let request = request.with_id(self.ids.next());
        trace!(method = %request.method, id = request.id, "HTTP request");

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;
        let status = response.status();
        let body = response.bytes().await.map_err(|e| self.map_send_error(e))?;

        // A node error object outranks the HTTP status.
        match serde_json::from_slice::<RpcResponse>(&body) {
            Ok(envelope) if envelope.is_envelope() => Ok(envelope),
            _ if status != StatusCode::OK => {
                debug!(method = %request.method, %status, "HTTP error without RPC envelope");
                Err(ClientRpcError::transport(format!(
                    "HTTP {}/{}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("")
                )))
            }
            Ok(_) => Err(ClientRpcError::decode(
                request.method,
                "response has neither result nor error",
            )),
            Err(err) => Err(ClientRpcError::decode(request.method, err)),
        }
    }
}
