// Copyright (C) 2015-2025 The Neo Project.
//
// lib.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! # Neo RPC Client
//!
//! A JSON-RPC 2.0 client for Neo N3 nodes.
//!
//! * [`RpcClient`] issues typed calls over HTTP; [`WsClient`] does the same
//!   over one WebSocket connection and adds server-side subscriptions with
//!   filters, delivered on a bounded event channel.
//! * [`TransactionManagerFactory`] drafts transactions: system fee from a test
//!   invocation, `ValidUntilBlock` from the validator count, network fee from
//!   the witnesses, attributes and size. [`TransactionManager`] signs and relays.
//! * [`NotaryApi`] builds fallback transactions and P2P notary requests.
//! * [`Invoker`] and [`ResultIterator`] read iterators through node sessions
//!   or, without sessions, through an in-VM unwrapping script.
//!
//! ```no_run
//! # async fn demo() -> neo_rpc_client::ClientResult<()> {
//! use neo_rpc_client::RpcClient;
//!
//! let client = RpcClient::builder("http://127.0.0.1:10332").build()?;
//! let network = client.init().await?;
//! println!("network {} at height {}", network.network, client.get_block_count().await?);
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod invoker;
pub mod iterator;
pub mod models;
pub mod nep17_api;
pub mod nns;
pub mod notary;
pub mod policy_api;
mod rpc_client;
pub mod subscriptions;
pub mod transaction_manager;
pub mod transaction_manager_factory;
pub mod transport;
pub mod unwrap;
mod ws_client;

pub use cache::NetworkParameters;
pub use config::RpcClientConfig;
pub use error::{ClientResult, ClientRpcError};
pub use invoker::Invoker;
pub use iterator::{create_call_and_unwrap_iterator_script, IteratorHandle, ResultIterator};
pub use nep17_api::{Nep17Api, TransferParams};
pub use nns::{NnsApi, RecordState, RecordType};
pub use notary::NotaryApi;
pub use policy_api::PolicyApi;
pub use rpc_client::{native, RpcClient, RpcClientBuilder, RpcClientHooks, RpcRequestOutcome};
pub use subscriptions::{Subscription, SubscriptionRegistry};
pub use transaction_manager::{TransactionManager, TransactionSigner, WitnessSource};
pub use transaction_manager_factory::{Cosigner, TransactionManagerFactory, TransactionOptions};
pub use transport::{ConnectionState, HttpTransport, RpcTransport, WsTransport};
pub use ws_client::WsClient;
