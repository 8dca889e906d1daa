// Copyright (C) 2015-2025 The Neo Project.
//
// ws_client.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! WebSocket client: every [`RpcClient`] call plus server-side subscriptions.

use crate::config::RpcClientConfig;
use crate::error::{ClientRpcError, ClientResult};
use crate::models::{
    BlockFilter, Event, EventId, ExecutionFilter, NotaryRequestFilter, NotificationFilter,
    SubscriptionFilter, TxFilter,
};
use crate::rpc_client::{RpcClient, RpcClientHooks};
use crate::subscriptions::Subscription;
use crate::transport::{ConnectionState, WsTransport};
use serde_json::{json, Value};
use std::ops::Deref;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// A client over one WebSocket connection.
///
/// Events of all subscriptions arrive on the single channel returned by
/// [`WsClient::notifications`]. When the connection drops the channel ends,
/// every subscription is forgotten and nothing is re-established.
#[derive(Debug)]
pub struct WsClient {
    client: RpcClient,
    transport: Arc<WsTransport>,
}

impl WsClient {
    pub async fn connect(endpoint: &str, config: RpcClientConfig) -> ClientResult<Self> {
        let transport = WsTransport::connect(endpoint, config.clone()).await?;
        Ok(Self::from_transport(
            Arc::new(transport),
            config,
            RpcClientHooks::default(),
        ))
    }

    pub fn from_transport(
        transport: Arc<WsTransport>,
        config: RpcClientConfig,
        hooks: RpcClientHooks,
    ) -> Self {
        let client = RpcClient::with_transport(transport.clone(), config).with_hooks(hooks);
        Self { client, transport }
    }

    pub fn rpc(&self) -> &RpcClient {
        &self.client
    }

    pub fn state(&self) -> ConnectionState {
        self.transport.state()
    }

    pub fn is_closed(&self) -> bool {
        self.transport.is_closed()
    }

    /// Resolves once the connection is gone, whichever side dropped it.
    pub async fn done(&self) {
        self.transport.done().await
    }

    /// The event channel; `None` once taken.
    pub fn notifications(&self) -> Option<mpsc::Receiver<Event>> {
        self.transport.take_notifications()
    }

    /// Tracked subscriptions.
    pub fn subscriptions(&self) -> Vec<Subscription> {
        self.transport.registry().snapshot()
    }

    /// Subscribes to `event`, optionally filtered; returns the server's subscription ID.
    pub async fn subscribe(
        &self,
        event: EventId,
        filter: Option<SubscriptionFilter>,
    ) -> ClientResult<String> {
        if event == EventId::EventMissed {
            return Err(ClientRpcError::InvalidFilter(
                "event_missed is not subscribable".to_string(),
            ));
        }
        let mut params = vec![json!(event.as_str())];
        if let Some(filter) = &filter {
            filter.validate_for(event)?;
            params.push(serde_json::to_value(filter)?);
        }

        let id: String = self.client.call("subscribe", params).await?;
        self.transport.track(Subscription {
            id: id.clone(),
            event,
            filter,
        });
        info!(%event, id = %id, "subscribed");
        Ok(id)
    }

    pub async fn subscribe_for_new_blocks(&self, filter: Option<BlockFilter>) -> ClientResult<String> {
        self.subscribe(EventId::BlockAdded, filter.map(SubscriptionFilter::Block))
            .await
    }

    pub async fn subscribe_for_new_headers(&self, filter: Option<BlockFilter>) -> ClientResult<String> {
        self.subscribe(
            EventId::HeaderOfAddedBlock,
            filter.map(SubscriptionFilter::Block),
        )
        .await
    }

    pub async fn subscribe_for_new_transactions(
        &self,
        filter: Option<TxFilter>,
    ) -> ClientResult<String> {
        self.subscribe(
            EventId::TransactionAdded,
            filter.map(SubscriptionFilter::Transaction),
        )
        .await
    }

    pub async fn subscribe_for_execution_notifications(
        &self,
        filter: Option<NotificationFilter>,
    ) -> ClientResult<String> {
        self.subscribe(
            EventId::NotificationFromExecution,
            filter.map(SubscriptionFilter::Notification),
        )
        .await
    }

    pub async fn subscribe_for_transaction_executions(
        &self,
        filter: Option<ExecutionFilter>,
    ) -> ClientResult<String> {
        self.subscribe(
            EventId::TransactionExecuted,
            filter.map(SubscriptionFilter::Execution),
        )
        .await
    }

    pub async fn subscribe_for_notary_requests(
        &self,
        filter: Option<NotaryRequestFilter>,
    ) -> ClientResult<String> {
        self.subscribe(
            EventId::NotaryRequestEvent,
            filter.map(SubscriptionFilter::NotaryRequest),
        )
        .await
    }

    /// Cancels a subscription; the ID is forgotten only once the node confirms.
    pub async fn unsubscribe(&self, id: &str) -> ClientResult<()> {
        if !self.transport.registry().contains(id) {
            return Err(ClientRpcError::UnknownSubscription(id.to_string()));
        }
        let removed: bool = self
            .client
            .call("unsubscribe", vec![Value::from(id)])
            .await?;
        if !removed {
            return Err(ClientRpcError::UnknownSubscription(id.to_string()));
        }
        self.transport.registry().remove(id);
        debug!(id, "unsubscribed");
        Ok(())
    }

    /// Cancels every tracked subscription, continuing past failures and
    /// returning the first one.
    pub async fn unsubscribe_all(&self) -> ClientResult<()> {
        let mut first_error = None;
        for subscription in self.transport.registry().snapshot() {
            if let Err(err) = self.unsubscribe(&subscription.id).await {
                warn!(id = %subscription.id, error = %err, "unsubscribe failed");
                first_error.get_or_insert(err);
            }
        }
        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Cancels subscriptions while the connection is still usable, then closes it.
    pub async fn close(&self) {
        if !self.transport.is_closed() {
            if let Err(err) = self.unsubscribe_all().await {
                debug!(error = %err, "closing with subscriptions left");
            }
        }
        self.transport.close().await;
    }
}

impl Deref for WsClient {
    type Target = RpcClient;

    fn deref(&self) -> &Self::Target {
        &self.client
    }
}
