//! # Watch Events
//!
//! Defines the notifications that flow through the shared bus: a typed
//! record was added to or deleted from the store.

use serde::{Deserialize, Serialize};
use shared_types::entities::{ObjectKey, Record};

/// A change notification for one record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WatchEvent {
    /// The record was created (or replaced) in the store.
    Added(Record),

    /// The record was removed from the store.
    Deleted(Record),
}

impl WatchEvent {
    /// The record this event is about.
    #[must_use]
    pub fn record(&self) -> &Record {
        match self {
            Self::Added(record) | Self::Deleted(record) => record,
        }
    }

    /// Short label for logs.
    #[must_use]
    pub fn action(&self) -> &'static str {
        match self {
            Self::Added(_) => "added",
            Self::Deleted(_) => "deleted",
        }
    }
}

/// Filter for subscribing to events about a subset of records.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Records of interest. `None` means every record.
    pub key: Option<ObjectKey>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter that accepts events for records covered by `key`.
    #[must_use]
    pub fn for_key(key: ObjectKey) -> Self {
        Self { key: Some(key) }
    }

    /// Check whether an event passes this filter.
    #[must_use]
    pub fn matches(&self, event: &WatchEvent) -> bool {
        match &self.key {
            Some(key) => key.covers(event.record()),
            None => true,
        }
    }
}
