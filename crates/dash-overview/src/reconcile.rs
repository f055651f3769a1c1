//! Reconciliation of resource-kind add/delete notifications.
//!
//! Each kind moves Absent -> Registered -> Absent. Adding registers the list
//! and detail routes before the section member so any member reachable from
//! the section also resolves by path; deleting runs in the reverse order.
//! Failures are logged and leave the kind absent; nothing is propagated.

use crate::describers::{Collaborators, DetailDescriber, ListDescriber};
use crate::domain::{detail_path, list_path, ReconcileError, SectionConfig};
use crate::ports::outbound::{ObjectStore, WatchHandler};
use crate::ports::Describer;
use crate::routing::RoutingTable;
use crate::section::SectionDescriber;
use parking_lot::Mutex;
use shared_types::{ObjectKey, Record};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// Keeps the routing table and the section in step with live kinds.
pub struct ReconciliationLoop {
    routes: Arc<RoutingTable>,
    section: Arc<SectionDescriber>,
    config: SectionConfig,
    collaborators: Collaborators,
    /// Serializes mutations so per-kind event order holds across threads.
    mutation: Mutex<()>,
}

impl ReconciliationLoop {
    pub fn new(
        routes: Arc<RoutingTable>,
        section: Arc<SectionDescriber>,
        config: SectionConfig,
        collaborators: Collaborators,
    ) -> Self {
        Self {
            routes,
            section,
            config,
            collaborators,
            mutation: Mutex::new(()),
        }
    }

    /// Register (or replace) the describers for `name`.
    pub fn add_kind(&self, name: &str) {
        if let Err(e) = self.try_add_kind(name) {
            warn!(kind = %name, error = %e, "Failed to add resource kind");
        }
    }

    fn try_add_kind(&self, name: &str) -> Result<(), ReconcileError> {
        let list = Arc::new(ListDescriber::new(name, &self.config, &self.collaborators)?);
        let detail = Arc::new(DetailDescriber::new(name, &self.config, &self.collaborators)?);

        let _guard = self.mutation.lock();
        let filters = Arc::clone(&list)
            .path_filters()
            .into_iter()
            .chain(detail.path_filters());
        for filter in filters {
            self.routes.register_filter(filter);
        }
        self.section.add(name, list);

        info!(kind = %name, "Resource kind added");
        Ok(())
    }

    /// Drop the describers for `name`. Unknown names are ignored.
    pub fn delete_kind(&self, name: &str) {
        let _guard = self.mutation.lock();
        let list_removed = self.routes.deregister(&list_path(&self.config.root, name));
        let detail_removed = self.routes.deregister(&detail_path(&self.config.root, name));
        let was_member = self.section.contains(name);
        self.section.remove(name);

        if list_removed || detail_removed || was_member {
            info!(kind = %name, "Resource kind deleted");
        }
    }

    /// Kinds currently registered, sorted.
    pub fn kinds(&self) -> Vec<String> {
        self.section.names()
    }

    /// Subscribe to add/delete notifications for `key` on `store`.
    ///
    /// A watch that cannot be started is logged; the loop then simply never
    /// receives events.
    pub async fn watch_kinds(
        self: Arc<Self>,
        store: Arc<dyn ObjectStore>,
        key: ObjectKey,
        cancel: CancellationToken,
    ) {
        let description = key.to_string();
        match store.watch(cancel, key, self).await {
            Ok(()) => info!(key = %description, "Watching resource kinds"),
            Err(e) => error!(key = %description, error = %e, "Failed to watch resource kinds"),
        }
    }
}

impl WatchHandler for ReconciliationLoop {
    fn on_add(&self, record: Record) {
        match record.name() {
            "" => warn!("Ignoring added resource kind without a name"),
            name => self.add_kind(name),
        }
    }

    fn on_delete(&self, record: Record) {
        match record.name() {
            "" => warn!("Ignoring deleted resource kind without a name"),
            name => self.delete_kind(name),
        }
    }
}
