// Copyright (C) 2015-2025 The Neo Project.
//
// config.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Client configuration.

use crate::error::{ClientRpcError, ClientResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_DIAL_TIMEOUT_MS: u64 = 4_000;
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 4_000;
pub const DEFAULT_WS_READ_DEADLINE_MS: u64 = 60_000;
pub const DEFAULT_WS_WRITE_DEADLINE_MS: u64 = 15_000;
pub const DEFAULT_WS_REQUEST_QUEUE: usize = 128;
pub const DEFAULT_NOTIFICATION_BUFFER: usize = 100;
pub const DEFAULT_MAX_ITERATOR_ITEMS: usize = 100;

/// Timeouts and buffer sizes of both transports.
///
/// Every field has a default, so a TOML document only needs the values it
/// overrides:
///
/// ```toml
/// request_timeout_ms = 10000
/// notification_buffer = 1024
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RpcClientConfig {
    pub dial_timeout_ms: u64,
    pub request_timeout_ms: u64,
    /// No frame for this long terminates a WebSocket connection.
    pub ws_read_deadline_ms: u64,
    pub ws_write_deadline_ms: u64,
    pub ws_request_queue: usize,
    pub notification_buffer: usize,
    /// Page size for iterator traversal and the item bound of expanded iterators.
    pub max_iterator_items: usize,
}

impl Default for RpcClientConfig {
    fn default() -> Self {
        Self {
            dial_timeout_ms: DEFAULT_DIAL_TIMEOUT_MS,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            ws_read_deadline_ms: DEFAULT_WS_READ_DEADLINE_MS,
            ws_write_deadline_ms: DEFAULT_WS_WRITE_DEADLINE_MS,
            ws_request_queue: DEFAULT_WS_REQUEST_QUEUE,
            notification_buffer: DEFAULT_NOTIFICATION_BUFFER,
            max_iterator_items: DEFAULT_MAX_ITERATOR_ITEMS,
        }
    }
}

impl RpcClientConfig {
    pub fn from_toml_str(text: &str) -> ClientResult<Self> {
        let config: Self = toml::from_str(text)
            .map_err(|e| ClientRpcError::InvalidArgument(format!("client config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ClientResult<()> {
        let checks = [
            ("dial_timeout_ms", self.dial_timeout_ms as usize),
            ("request_timeout_ms", self.request_timeout_ms as usize),
            ("ws_read_deadline_ms", self.ws_read_deadline_ms as usize),
            ("ws_write_deadline_ms", self.ws_write_deadline_ms as usize),
            ("ws_request_queue", self.ws_request_queue),
            ("notification_buffer", self.notification_buffer),
            ("max_iterator_items", self.max_iterator_items),
        ];
        for (name, value) in checks {
            if value == 0 {
                return Err(ClientRpcError::InvalidArgument(format!(
                    "client config: {name} must be positive"
                )));
            }
        }
        Ok(())
    }

    pub fn dial_timeout(&self) -> Duration {
        Duration::from_millis(self.dial_timeout_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn ws_read_deadline(&self) -> Duration {
        Duration::from_millis(self.ws_read_deadline_ms)
    }

    /// Pings go out at half the read deadline so a healthy peer always answers in time.
    pub fn ws_ping_period(&self) -> Duration {
        self.ws_read_deadline() / 2
    }

    pub fn ws_write_deadline(&self) -> Duration {
        Duration::from_millis(self.ws_write_deadline_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RpcClientConfig::default();
        assert_eq!(config.dial_timeout(), Duration::from_secs(4));
        assert_eq!(config.request_timeout(), Duration::from_secs(4));
        assert_eq!(config.ws_ping_period(), Duration::from_secs(30));
    }

    #[test]
    fn test_partial_toml() {
        let config = RpcClientConfig::from_toml_str(
            "request_timeout_ms = 10000\nnotification_buffer = 8\n",
        )
        .unwrap();
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.notification_buffer, 8);
        assert_eq!(config.dial_timeout_ms, DEFAULT_DIAL_TIMEOUT_MS);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(RpcClientConfig::from_toml_str("ws_request_queue = 0").is_err());
        assert!(RpcClientConfig::from_toml_str("unknown_key = 1").is_err());
    }
}
