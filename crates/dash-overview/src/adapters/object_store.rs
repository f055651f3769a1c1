//! In-Memory Object Store Adapter
//!
//! Implements the `ObjectStore` port over a map of records. Mutations are
//! published on a [`shared_bus::InMemoryEventBus`], which backs `watch`.
//! A watcher that lags behind the bus relists the store and emits the
//! difference against what it last delivered.

use crate::domain::StoreError;
use crate::ports::outbound::{ObjectStore, WatchHandler};
use async_trait::async_trait;
use parking_lot::RwLock;
use shared_bus::{EventFilter, EventPublisher, InMemoryEventBus, SubscriptionError, WatchEvent};
use shared_types::{ObjectKey, Record};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Identity of a stored record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct RecordId {
    namespace: String,
    name: String,
    api_version: String,
    kind: String,
}

impl RecordId {
    fn of(record: &Record) -> Self {
        Self {
            namespace: record.namespace().unwrap_or_default().to_string(),
            name: record.name().to_string(),
            api_version: record.api_version().to_string(),
            kind: record.kind().to_string(),
        }
    }
}

type Records = Arc<RwLock<HashMap<RecordId, Record>>>;

/// Records covered by `key`, ordered by namespace then name.
fn covered(records: &RwLock<HashMap<RecordId, Record>>, key: &ObjectKey) -> Vec<Record> {
    let records = records.read();
    let mut matching: Vec<(&RecordId, &Record)> =
        records.iter().filter(|(_, r)| key.covers(r)).collect();
    matching.sort_by(|a, b| a.0.cmp(b.0));
    matching.into_iter().map(|(_, r)| r.clone()).collect()
}

/// Records one watcher has been told about.
#[derive(Default)]
struct Delivered(BTreeMap<RecordId, Record>);

impl Delivered {
    fn add(&mut self, handler: &dyn WatchHandler, record: Record) {
        self.0.insert(RecordId::of(&record), record.clone());
        handler.on_add(record);
    }

    fn delete(&mut self, handler: &dyn WatchHandler, record: Record) {
        self.0.remove(&RecordId::of(&record));
        handler.on_delete(record);
    }

    /// Bring the watcher in line with `current`: deletes for records it no
    /// longer holds, then an add (replace) for every live record.
    fn resync(&mut self, handler: &dyn WatchHandler, current: Vec<Record>) {
        let live: HashSet<RecordId> = current.iter().map(RecordId::of).collect();
        let gone: Vec<Record> = self
            .0
            .iter()
            .filter(|(id, _)| !live.contains(*id))
            .map(|(_, r)| r.clone())
            .collect();
        for record in gone {
            self.delete(handler, record);
        }
        for record in current {
            self.add(handler, record);
        }
    }
}

/// In-memory record storage for tests and local runs.
pub struct InMemoryObjectStore {
    records: Records,
    /// Denied (verb, kind) pairs.
    denied: RwLock<HashSet<(String, String)>>,
    /// Kinds whose reads fail with a backend error.
    failing: RwLock<HashMap<String, String>>,
    latency: RwLock<Option<Duration>>,
    bus: Arc<InMemoryEventBus>,
}

impl InMemoryObjectStore {
    pub fn new() -> Self {
        Self::with_bus(Arc::new(InMemoryEventBus::new()))
    }

    pub fn with_bus(bus: Arc<InMemoryEventBus>) -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            denied: RwLock::new(HashSet::new()),
            failing: RwLock::new(HashMap::new()),
            latency: RwLock::new(None),
            bus,
        }
    }

    /// Insert or replace a record and notify watchers.
    pub async fn put(&self, record: Record) {
        let id = RecordId::of(&record);
        self.records.write().insert(id, record.clone());
        debug!(kind = %record.kind(), name = %record.name(), "Record stored");
        self.bus.publish(WatchEvent::Added(record)).await;
    }

    /// Remove a record and notify watchers. Returns the removed record.
    pub async fn remove(&self, record: &Record) -> Option<Record> {
        let removed = self.records.write().remove(&RecordId::of(record));
        if let Some(removed) = &removed {
            debug!(kind = %removed.kind(), name = %removed.name(), "Record removed");
            self.bus.publish(WatchEvent::Deleted(removed.clone())).await;
        }
        removed
    }

    /// Deny `verb` on every key of `kind`.
    pub fn deny(&self, verb: &str, kind: &str) {
        self.denied.write().insert((verb.to_string(), kind.to_string()));
    }

    pub fn allow(&self, verb: &str, kind: &str) {
        self.denied.write().remove(&(verb.to_string(), kind.to_string()));
    }

    /// Make reads of `kind` fail with a backend error.
    pub fn fail_reads(&self, kind: &str, message: &str) {
        self.failing
            .write()
            .insert(kind.to_string(), message.to_string());
    }

    /// Delay every read by `latency`.
    pub fn set_latency(&self, latency: Option<Duration>) {
        *self.latency.write() = latency;
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Common read preamble: cancellation, injected latency and failures.
    async fn before_read(&self, cancel: &CancellationToken, key: &ObjectKey) -> Result<(), StoreError> {
        if cancel.is_cancelled() {
            return Err(StoreError::Canceled);
        }

        let latency = *self.latency.read();
        if let Some(latency) = latency {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(StoreError::Canceled),
                _ = tokio::time::sleep(latency) => {}
            }
        }

        if let Some(message) = self.failing.read().get(&key.kind) {
            return Err(StoreError::Backend(message.clone()));
        }
        Ok(())
    }
}

impl Default for InMemoryObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn list(
        &self,
        cancel: &CancellationToken,
        key: &ObjectKey,
    ) -> Result<Vec<Record>, StoreError> {
        self.before_read(cancel, key).await?;
        Ok(covered(&self.records, key))
    }

    async fn get(&self, cancel: &CancellationToken, key: &ObjectKey) -> Result<Record, StoreError> {
        self.before_read(cancel, key).await?;
        if key.name.is_none() {
            return Err(StoreError::Backend(format!("get requires a name: {}", key)));
        }
        covered(&self.records, key)
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }

    fn has_access(&self, key: &ObjectKey, verb: &str) -> Result<(), StoreError> {
        if self
            .denied
            .read()
            .contains(&(verb.to_string(), key.kind.clone()))
        {
            return Err(StoreError::AccessDenied {
                key: key.to_string(),
                verb: verb.to_string(),
            });
        }
        Ok(())
    }

    async fn watch(
        &self,
        cancel: CancellationToken,
        key: ObjectKey,
        handler: Arc<dyn WatchHandler>,
    ) -> Result<(), StoreError> {
        if cancel.is_cancelled() {
            return Err(StoreError::Canceled);
        }
        self.has_access(&key, "watch")?;

        // Subscribe before the replay so no change falls between the two.
        let mut subscription = self.bus.subscribe(EventFilter::for_key(key.clone()));
        let mut delivered = Delivered::default();
        for record in covered(&self.records, &key) {
            delivered.add(handler.as_ref(), record);
        }

        let records = Arc::clone(&self.records);
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => break,
                    event = subscription.recv() => match event {
                        Ok(WatchEvent::Added(record)) => delivered.add(handler.as_ref(), record),
                        Ok(WatchEvent::Deleted(record)) => delivered.delete(handler.as_ref(), record),
                        Err(SubscriptionError::Lagged(missed)) => {
                            warn!(key = %key, missed, "Watch lagged, relisting");
                            delivered.resync(handler.as_ref(), covered(&records, &key));
                        }
                        Err(SubscriptionError::Closed) => break,
                    },
                }
            }
            debug!(key = %key, "Watch stopped");
        });

        Ok(())
    }
}
