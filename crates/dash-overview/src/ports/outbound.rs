//! # Outbound Ports
//!
//! Collaborators the overview calls but never implements for production:
//! the object store, content renderers, link generation and plugin tabs.

use crate::domain::{PluginError, RenderError, StoreError};
use async_trait::async_trait;
use shared_types::{Component, ObjectKey, Record, ResourceKindDefinition};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Typed record storage.
///
/// `get` never returns an empty success: a missing record is
/// [`StoreError::NotFound`].
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// List records covered by `key`.
    async fn list(
        &self,
        cancel: &CancellationToken,
        key: &ObjectKey,
    ) -> Result<Vec<Record>, StoreError>;

    /// Fetch the single record named by `key`.
    async fn get(&self, cancel: &CancellationToken, key: &ObjectKey) -> Result<Record, StoreError>;

    /// Permission check; `Ok(())` means allowed.
    fn has_access(&self, key: &ObjectKey, verb: &str) -> Result<(), StoreError>;

    /// Deliver add/delete notifications for records covered by `key` to
    /// `handler` until `cancel` fires. Callbacks are delivered one at a time
    /// in change order; a watcher that misses changes is brought back in line
    /// with deletes for vanished records and adds for live ones.
    async fn watch(
        &self,
        cancel: CancellationToken,
        key: ObjectKey,
        handler: Arc<dyn WatchHandler>,
    ) -> Result<(), StoreError>;
}

/// Receiver of watch notifications.
pub trait WatchHandler: Send + Sync {
    fn on_add(&self, record: Record);
    fn on_delete(&self, record: Record);
}

/// Builds link components pointing at dashboard paths.
pub trait LinkGenerator: Send + Sync {
    /// Link to the list view of a resource kind.
    fn for_kind(&self, kind_name: &str, namespace: &str) -> Result<Component, RenderError>;

    /// Link to the detail view of one instance of a resource kind.
    fn for_object(&self, kind_name: &str, record: &Record) -> Result<Component, RenderError>;
}

/// Renders all instances of a kind into a table-like component.
pub trait ListPrinter: Send + Sync {
    fn print(
        &self,
        kind_name: &str,
        definition: &ResourceKindDefinition,
        records: &[Record],
        link: &dyn LinkGenerator,
    ) -> Result<Component, RenderError>;
}

/// Renders the summary panel of one instance.
#[async_trait]
pub trait SummaryPrinter: Send + Sync {
    async fn print(
        &self,
        cancel: &CancellationToken,
        definition: &ResourceKindDefinition,
        record: &Record,
    ) -> Result<Component, RenderError>;
}

/// Renders the relationship graph around one instance.
#[async_trait]
pub trait ResourceViewerPrinter: Send + Sync {
    async fn print(
        &self,
        cancel: &CancellationToken,
        record: &Record,
    ) -> Result<Component, RenderError>;
}

/// Renders the raw document view of one instance.
pub trait YamlPrinter: Send + Sync {
    fn print(&self, record: &Record) -> Result<Component, RenderError>;
}

/// A plugin-contributed tab.
#[derive(Debug, Clone, PartialEq)]
pub struct Tab {
    pub name: String,
    pub contents: Component,
}

/// Source of plugin-contributed tabs.
#[async_trait]
pub trait PluginManager: Send + Sync {
    async fn tabs(
        &self,
        cancel: &CancellationToken,
        record: &Record,
    ) -> Result<Vec<Tab>, PluginError>;
}
