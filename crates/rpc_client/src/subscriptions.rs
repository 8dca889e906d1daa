// Copyright (C) 2015-2025 The Neo Project.
//
// subscriptions.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Server-side subscriptions tracked by a WebSocket connection.

use crate::models::{EventId, SubscriptionFilter};
use parking_lot::Mutex;
use std::collections::BTreeMap;

/// A live subscription: the server-assigned ID, what it listens to and how it is filtered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    pub id: String,
    pub event: EventId,
    pub filter: Option<SubscriptionFilter>,
}

#[derive(Debug, Default)]
pub struct SubscriptionRegistry {
    entries: Mutex<BTreeMap<String, Subscription>>,
}

impl SubscriptionRegistry {
    pub fn insert(&self, subscription: Subscription) {
        self.entries
            .lock()
            .insert(subscription.id.clone(), subscription);
    }

    pub fn remove(&self, id: &str) -> Option<Subscription> {
        self.entries.lock().remove(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.lock().contains_key(id)
    }

    pub fn snapshot(&self) -> Vec<Subscription> {
        self.entries.lock().values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Drops every entry; returns how many there were.
    pub fn clear(&self) -> usize {
        let mut entries = self.entries.lock();
        let count = entries.len();
        entries.clear();
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subscription(id: &str) -> Subscription {
        Subscription {
            id: id.to_string(),
            event: EventId::BlockAdded,
            filter: None,
        }
    }

    #[test]
    fn test_registry_lifecycle() {
        let registry = SubscriptionRegistry::default();
        registry.insert(subscription("2"));
        registry.insert(subscription("1"));
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.snapshot()[0].id, "1");
        assert!(registry.remove("2").is_some());
        assert!(registry.remove("2").is_none());
        assert_eq!(registry.clear(), 1);
        assert!(registry.is_empty());
    }
}
