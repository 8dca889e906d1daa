// Copyright (C) 2015-2025 The Neo Project.
//
// error.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Error type shared by every layer of the client.

use neo_core::CoreError;
use neo_vm::VmError;
use std::time::Duration;
use thiserror::Error;

/// JSON-RPC "internal error" code, reported for failures that never reached the node.
pub const INTERNAL_ERROR_CODE: i64 = -32603;

#[derive(Debug, Error)]
pub enum ClientRpcError {
    /// Dial failure, HTTP failure or a malformed frame.
    #[error("transport error: {message}")]
    Transport { message: String },

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("connection lost")]
    ConnectionLost,

    /// The node's error object, verbatim.
    #[error("RPC error {code}: {message}")]
    Protocol {
        code: i64,
        message: String,
        data: Option<String>,
    },

    #[error("{context}: cannot decode result: {message}")]
    Decode { context: String, message: String },

    /// The VM faulted while running a test invocation.
    #[error("execution faulted: {exception}")]
    Fault { exception: String },

    /// Raised while building a transaction, always before it is broadcast.
    #[error("{context}: {message}")]
    FeeCalculation { context: String, message: String },

    #[error("iterator: {message}")]
    Iterator { message: String },

    #[error("client is not initialized, call init first")]
    NotInitialized,

    #[error("invalid subscription filter: {0}")]
    InvalidFilter(String),

    #[error("unknown subscription {0}")]
    UnknownSubscription(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Vm(#[from] VmError),
}

impl ClientRpcError {
    pub fn transport(message: impl Into<String>) -> Self {
        ClientRpcError::Transport {
            message: message.into(),
        }
    }

    pub fn decode(context: impl Into<String>, message: impl ToString) -> Self {
        ClientRpcError::Decode {
            context: context.into(),
            message: message.to_string(),
        }
    }

    pub fn fee(context: impl Into<String>, message: impl ToString) -> Self {
        ClientRpcError::FeeCalculation {
            context: context.into(),
            message: message.to_string(),
        }
    }

    pub fn iterator(message: impl Into<String>) -> Self {
        ClientRpcError::Iterator {
            message: message.into(),
        }
    }

    /// Reclassifies an error raised during a transaction build step as a fee
    /// calculation failure, keeping the original text. Connection-level
    /// errors and [`ClientRpcError::NotInitialized`] keep their kind.
    pub fn into_fee(self, context: impl Into<String>) -> Self {
        match self {
            ClientRpcError::FeeCalculation { context: inner, message } => ClientRpcError::FeeCalculation {
                context: format!("{}: {inner}", context.into()),
                message,
            },
            err if err.is_transport_failure() || matches!(err, ClientRpcError::NotInitialized) => err,
            other => ClientRpcError::fee(context, other),
        }
    }

    /// The request never got an answer: dial, I/O, timeout or a dropped connection.
    pub fn is_transport_failure(&self) -> bool {
        matches!(
            self,
            ClientRpcError::Transport { .. } | ClientRpcError::Timeout(_) | ClientRpcError::ConnectionLost
        )
    }

    /// Prefixes the message of decode and iterator errors with `context`.
    pub fn with_context(self, context: impl std::fmt::Display) -> Self {
        match self {
            ClientRpcError::Decode { context: inner, message } => ClientRpcError::Decode {
                context: format!("{context}: {inner}"),
                message,
            },
            ClientRpcError::Iterator { message } => ClientRpcError::Iterator {
                message: format!("{context}: {message}"),
            },
            other => other,
        }
    }

    /// JSON-RPC error code, for reporting.
    pub fn code(&self) -> i64 {
        match self {
            ClientRpcError::Protocol { code, .. } => *code,
            _ => INTERNAL_ERROR_CODE,
        }
    }

    pub fn is_connection_lost(&self) -> bool {
        matches!(self, ClientRpcError::ConnectionLost)
    }
}

impl From<serde_json::Error> for ClientRpcError {
    fn from(err: serde_json::Error) -> Self {
        ClientRpcError::decode("JSON", err)
    }
}

pub type ClientResult<T> = Result<T, ClientRpcError>;
