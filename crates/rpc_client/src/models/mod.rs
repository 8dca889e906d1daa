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

//! JSON models of requests, responses, results and events.

pub mod common;
mod rpc_application_log;
mod rpc_block;
mod rpc_contract_state;
mod rpc_events;
mod rpc_filters;
mod rpc_invoke_result;
mod rpc_request;
mod rpc_stack_item;
mod rpc_validator;
mod rpc_version;

pub use rpc_application_log::{RpcApplicationLog, RpcExecution};
pub use rpc_block::{RpcBlock, RpcHeader, RpcTransaction};
pub use rpc_contract_state::{RpcContractManifest, RpcContractState};
pub use rpc_events::{
    ApplicationExecution, Event, EventId, NotaryRequestEvent, NotaryRequestEventType,
    NotificationEvent, RpcNotaryRequest,
};
pub use rpc_filters::{
    BlockFilter, ExecutionFilter, NotaryRequestFilter, NotificationFilter, SubscriptionFilter,
    TxFilter, MAX_EVENT_NAME_LENGTH,
};
pub use rpc_invoke_result::{RpcInvokeResult, RpcNotification};
pub use rpc_request::{RpcError, RpcRequest, RpcResponse, JSONRPC_VERSION};
pub use rpc_stack_item::{InteropValue, StackItem};
pub use rpc_validator::RpcValidator;
pub use rpc_version::{RpcProtocol, RpcServerSettings, RpcVersion};
