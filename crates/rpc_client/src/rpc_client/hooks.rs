// Copyright (C) 2015-2025 The Neo Project.
//
// hooks.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Summary of one finished request, reported to [`RpcClientHooks`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpcRequestOutcome {
    pub method: String,
    pub elapsed: Duration,
    pub success: bool,
    pub timeout: Duration,
    /// Node error code, or the internal error code for local failures.
    pub error_code: Option<i64>,
}

type OutcomeCallback = Arc<dyn Fn(&RpcRequestOutcome) + Send + Sync>;

/// Observers for request outcomes, e.g. for metrics.
#[derive(Clone, Default)]
pub struct RpcClientHooks {
    on_request: Option<OutcomeCallback>,
}

impl RpcClientHooks {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn on_request<F>(mut self, callback: F) -> Self
    where
        F: Fn(&RpcRequestOutcome) + Send + Sync + 'static,
    {
        self.on_request = Some(Arc::new(callback));
        self
    }

    pub(crate) fn notify(&self, outcome: RpcRequestOutcome) {
        if let Some(callback) = &self.on_request {
            callback(&outcome);
        }
    }
}

impl fmt::Debug for RpcClientHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RpcClientHooks")
            .field("on_request", &self.on_request.is_some())
            .finish()
    }
}
