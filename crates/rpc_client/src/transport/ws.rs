// Copyright (C) 2015-2025 The Neo Project.
//
// ws.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! JSON-RPC over a persistent WebSocket connection.
//!
//! A connection runs two tasks. The reader decodes frames, hands responses to
//! the waiting callers by ID and forwards notifications to the event channel.
//! The writer sends queued requests and keepalive pings and is the only task
//! that closes the socket. Whichever side fails first raises the close signal.
//! Closing is two-phase: the writer closes the socket, and only when the
//! reader's next read fails does it tear the connection down. Every pending
//! request then fails with [`ClientRpcError::ConnectionLost`], the
//! subscription registry is cleared and the event channel ends.

use super::{RequestIdGenerator, RpcTransport};
use crate::config::RpcClientConfig;
use crate::error::{ClientRpcError, ClientResult};
use crate::models::common::present;
use crate::models::{Event, EventId, RpcError, RpcRequest, RpcResponse};
use crate::subscriptions::{Subscription, SubscriptionRegistry};
use async_trait::async_trait;
use futures::{Sink, SinkExt, Stream, StreamExt};
use parking_lot::Mutex;
use serde::Deserialize;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::{interval_at, timeout, Instant};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::{Error as WsError, Message};
use tracing::{debug, info, trace, warn};
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Open,
    Closing,
    Closed,
}

#[derive(Debug, Default)]
struct PendingTable {
    waiting: HashMap<u64, oneshot::Sender<RpcResponse>>,
    /// Requests whose caller timed out; their late responses are dropped.
    abandoned: HashSet<u64>,
    closed: bool,
}

#[derive(Debug)]
struct Shared {
    pending: Mutex<PendingTable>,
    state: Mutex<ConnectionState>,
    registry: SubscriptionRegistry,
    close_tx: watch::Sender<bool>,
    done_tx: watch::Sender<bool>,
}

impl Shared {
    fn new() -> Self {
        Self {
            pending: Mutex::new(PendingTable::default()),
            state: Mutex::new(ConnectionState::Open),
            registry: SubscriptionRegistry::default(),
            close_tx: watch::channel(false).0,
            done_tx: watch::channel(false).0,
        }
    }

    fn register(&self, id: u64) -> ClientResult<oneshot::Receiver<RpcResponse>> {
        let mut pending = self.pending.lock();
        if pending.closed {
            return Err(ClientRpcError::ConnectionLost);
        }
        let (tx, rx) = oneshot::channel();
        pending.waiting.insert(id, tx);
        Ok(rx)
    }

    fn forget(&self, id: u64) {
        self.pending.lock().waiting.remove(&id);
    }

    fn abandon(&self, id: u64) {
        let mut pending = self.pending.lock();
        if pending.waiting.remove(&id).is_some() {
            pending.abandoned.insert(id);
        }
    }

    fn deliver(&self, response: RpcResponse) -> ClientResult<()> {
        let id = response
            .numeric_id()
            .ok_or_else(|| violation(format!("response ID {:?} is not numeric", response.id)))?;
        let mut pending = self.pending.lock();
        if let Some(waiter) = pending.waiting.remove(&id) {
            // The caller may have gone away; nothing to do then.
            let _ = waiter.send(response);
            return Ok(());
        }
        if pending.abandoned.remove(&id) {
            trace!(id, "dropping response to a timed-out request");
            return Ok(());
        }
        Err(violation(format!("response with unknown ID {id}")))
    }

    fn request_close(&self) {
        {
            let mut state = self.state.lock();
            if *state == ConnectionState::Open {
                *state = ConnectionState::Closing;
            }
        }
        self.close_tx.send_replace(true);
    }

    fn is_done(&self) -> bool {
        *self.done_tx.borrow()
    }

    fn teardown(&self) {
        let waiting = {
            let mut pending = self.pending.lock();
            pending.closed = true;
            pending.abandoned.clear();
            std::mem::take(&mut pending.waiting)
        };
        self.done_tx.send_replace(true);
        let failed = waiting.len();
        // Dropping the senders fails every waiter with ConnectionLost.
        drop(waiting);
        let dropped = self.registry.clear();
        *self.state.lock() = ConnectionState::Closed;
        debug!(failed, dropped, "websocket connection torn down");
    }
}

fn violation(message: impl std::fmt::Display) -> ClientRpcError {
    ClientRpcError::transport(format!("protocol violation: {message}"))
}

/// Resolves once `signal` is raised or its sender is gone.
async fn wait_raised(mut signal: watch::Receiver<bool>) {
    while !*signal.borrow_and_update() {
        if signal.changed().await.is_err() {
            return;
        }
    }
}

#[derive(Debug, Deserialize)]
struct Frame {
    #[serde(default)]
    jsonrpc: String,
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    method: Option<String>,
    #[serde(default)]
    params: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcError>,
}

#[derive(Debug)]
enum Incoming {
    Response(RpcResponse),
    Notification { event: EventId, params: Value },
}

impl Frame {
    fn classify(self) -> ClientResult<Incoming> {
        let Frame {
            jsonrpc,
            id,
            method,
            params,
            result,
            error,
        } = self;
        match (id, method) {
            (Some(id), _) if result.is_some() || error.is_some() => {
                Ok(Incoming::Response(RpcResponse {
                    jsonrpc,
                    id: Some(id),
                    result,
                    error,
                }))
            }
            (None, Some(method)) if !method.is_empty() => {
                let event = method
                    .parse::<EventId>()
                    .map_err(|_| violation(format!("unknown event {method}")))?;
                Ok(Incoming::Notification {
                    event,
                    params: params.unwrap_or_else(|| Value::Array(Vec::new())),
                })
            }
            _ => Err(violation("frame is neither a response nor a notification")),
        }
    }
}

/// Forwards events without ever blocking the reader.
struct NotificationFeed {
    sender: mpsc::Sender<Event>,
    missed: bool,
}

impl NotificationFeed {
    fn new(sender: mpsc::Sender<Event>) -> Self {
        Self {
            sender,
            missed: false,
        }
    }

    fn push(&mut self, event: Event) {
        if matches!(event, Event::EventMissed) {
            self.missed = true;
            self.flush_missed();
            return;
        }
        if !self.flush_missed() {
            return;
        }
        match self.sender.try_send(event) {
            Ok(()) | Err(TrySendError::Closed(_)) => {}
            Err(TrySendError::Full(event)) => {
                debug!(event = %event.id(), "notification buffer full, dropping event");
                self.missed = true;
            }
        }
    }

    /// Delivers a pending `EventMissed`; false while the buffer is still full.
    fn flush_missed(&mut self) -> bool {
        if !self.missed {
            return true;
        }
        match self.sender.try_send(Event::EventMissed) {
            Ok(()) | Err(TrySendError::Closed(_)) => {
                self.missed = false;
                true
            }
            Err(TrySendError::Full(_)) => false,
        }
    }
}

async fn read_loop<S>(
    mut source: S,
    shared: Arc<Shared>,
    mut feed: NotificationFeed,
    read_deadline: Duration,
) where
    S: Stream<Item = Result<Message, WsError>> + Unpin,
{
    // A client-side close reaches this loop only through the socket: the
    // writer closes it and the next read fails or returns the close frame.
    let reason = loop {
        let message = match timeout(read_deadline, source.next()).await {
            Err(_) => break format!("no frame received within {read_deadline:?}"),
            Ok(None) => break "stream ended".to_string(),
            Ok(Some(Err(err))) => break format!("read failed: {err}"),
            Ok(Some(Ok(message))) => message,
        };
        let text = match message {
            Message::Text(text) => text,
            Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => continue,
            Message::Close(frame) => break format!("closed by server: {frame:?}"),
            Message::Binary(_) => {
                warn!("unexpected binary frame");
                break "protocol violation: binary frame".to_string();
            }
        };
        if let Err(err) = dispatch(&shared, &text, &mut feed) {
            warn!(error = %err, "terminating websocket connection");
            break err.to_string();
        }
    };

    debug!(%reason, "websocket reader stopped");
    shared.request_close();
    shared.teardown();
    drop(feed);
}

fn dispatch(shared: &Shared, text: &str, feed: &mut NotificationFeed) -> ClientResult<()> {
    let frame: Frame =
        serde_json::from_str(text).map_err(|e| violation(format!("undecodable frame: {e}")))?;
    match frame.classify()? {
        Incoming::Response(response) => shared.deliver(response),
        Incoming::Notification { event, params } => {
            let event = Event::decode(event, params)?;
            trace!(event = %event.id(), "notification");
            feed.push(event);
            Ok(())
        }
    }
}

async fn write_loop<S>(
    mut sink: S,
    mut requests: mpsc::Receiver<Message>,
    shared: Arc<Shared>,
    ping_period: Duration,
    write_deadline: Duration,
) where
    S: Sink<Message, Error = WsError> + Unpin,
{
    let closing = wait_raised(shared.close_tx.subscribe());
    tokio::pin!(closing);
    let mut ping = interval_at(Instant::now() + ping_period, ping_period);

    let failure = loop {
        let message = tokio::select! {
            biased;
            _ = &mut closing => break None,
            request = requests.recv() => match request {
                Some(message) => message,
                None => break None,
            },
            _ = ping.tick() => Message::Ping(Vec::new()),
        };
        match timeout(write_deadline, sink.send(message)).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => break Some(format!("write failed: {err}")),
            Err(_) => break Some(format!("write blocked for {write_deadline:?}")),
        }
    };

    if let Some(failure) = failure {
        warn!(%failure, "websocket writer stopped");
    }
    shared.request_close();
    if let Ok(Err(err)) = timeout(write_deadline, sink.close()).await {
        trace!(error = %err, "closing websocket");
    }
}

/// A WebSocket connection to a node's `/ws` endpoint.
pub struct WsTransport {
    endpoint: Url,
    shared: Arc<Shared>,
    requests: mpsc::Sender<Message>,
    notifications: Mutex<Option<mpsc::Receiver<Event>>>,
    ids: RequestIdGenerator,
    config: RpcClientConfig,
}

impl WsTransport {
    pub async fn connect(endpoint: &str, config: RpcClientConfig) -> ClientResult<Self> {
        Self::connect_with_ids(endpoint, config, RequestIdGenerator::new()).await
    }

    pub async fn connect_with_ids(
        endpoint: &str,
        config: RpcClientConfig,
        ids: RequestIdGenerator,
    ) -> ClientResult<Self> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| ClientRpcError::InvalidArgument(format!("endpoint {endpoint}: {e}")))?;
        if !matches!(endpoint.scheme(), "ws" | "wss") {
            return Err(ClientRpcError::InvalidArgument(format!(
                "endpoint {endpoint} is not a WebSocket URL"
            )));
        }
        config.validate()?;

        let (stream, _) = timeout(config.dial_timeout(), connect_async(endpoint.as_str()))
            .await
            .map_err(|_| ClientRpcError::Timeout(config.dial_timeout()))?
            .map_err(|e| ClientRpcError::transport(format!("dial {endpoint}: {e}")))?;
        info!(%endpoint, "websocket connected");

        let (sink, source) = stream.split();
        let (request_tx, request_rx) = mpsc::channel(config.ws_request_queue);
        let (event_tx, event_rx) = mpsc::channel(config.notification_buffer);
        let shared = Arc::new(Shared::new());

        tokio::spawn(write_loop(
            sink,
            request_rx,
            shared.clone(),
            config.ws_ping_period(),
            config.ws_write_deadline(),
        ));
        tokio::spawn(read_loop(
            source,
            shared.clone(),
            NotificationFeed::new(event_tx),
            config.ws_read_deadline(),
        ));

        Ok(Self {
            endpoint,
            shared,
            requests: request_tx,
            notifications: Mutex::new(Some(event_rx)),
            ids,
            config,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn state(&self) -> ConnectionState {
        *self.shared.state.lock()
    }

    pub fn is_closed(&self) -> bool {
        self.shared.is_done()
    }

    /// The event channel; it can be taken once and ends when the connection does.
    pub fn take_notifications(&self) -> Option<mpsc::Receiver<Event>> {
        self.notifications.lock().take()
    }

    pub fn registry(&self) -> &SubscriptionRegistry {
        &self.shared.registry
    }

    /// Records a subscription the server confirmed. If the connection has
    /// already been torn down the entry is dropped again; the ended event
    /// channel reports that.
    pub(crate) fn track(&self, subscription: Subscription) {
        let id = subscription.id.clone();
        self.shared.registry.insert(subscription);
        if self.shared.is_done() {
            self.shared.registry.remove(&id);
        }
    }

    /// Resolves when the connection has been torn down.
    pub async fn done(&self) {
        wait_raised(self.shared.done_tx.subscribe()).await
    }

    /// Closes the connection and waits for the teardown; idempotent.
    pub async fn close(&self) {
        self.shared.request_close();
        self.done().await;
    }
}

impl Drop for WsTransport {
    fn drop(&mut self) {
        self.shared.request_close();
    }
}

impl std::fmt::Debug for WsTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WsTransport")
            .field("endpoint", &self.endpoint.as_str())
            .field("state", &self.state())
            .finish()
    }
}

#[async_trait]
impl RpcTransport for WsTransport {
    async fn issue(&self, request: RpcRequest) -> ClientResult<RpcResponse> {
        let id = self.ids.next();
        let request = request.with_id(id);
        let payload = serde_json::to_string(&request)?;
        let response = self.shared.register(id)?;
        let deadline = self.config.request_timeout();

        let outcome = timeout(deadline, async {
            if self.requests.send(Message::Text(payload)).await.is_err() {
                return Err(ClientRpcError::ConnectionLost);
            }
            response.await.map_err(|_| ClientRpcError::ConnectionLost)
        })
        .await;

        match outcome {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(err)) => {
                self.shared.forget(id);
                Err(err)
            }
            Err(_) => {
                debug!(method = %request.method, id, "websocket request timed out");
                self.shared.abandon(id);
                Err(ClientRpcError::Timeout(deadline))
            }
        }
    }
}
