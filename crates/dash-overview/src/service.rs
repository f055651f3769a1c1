//! Overview service wiring.
//!
//! Owns the routing table, the section and the reconciliation loop, and
//! serves path-based describe requests.

use crate::describers::{kind_names, Collaborators};
use crate::domain::{ConfigError, DescribeRequest, DescribeResult, OverviewConfig};
use crate::ports::Describer;
use crate::reconcile::ReconciliationLoop;
use crate::routing::RoutingTable;
use crate::section::SectionDescriber;
use shared_types::ContentResponse;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Entry point for describe requests.
pub struct OverviewService {
    config: OverviewConfig,
    collaborators: Collaborators,
    routes: Arc<RoutingTable>,
    section: Arc<SectionDescriber>,
    reconciler: Arc<ReconciliationLoop>,
}

impl OverviewService {
    /// Validate `config` and build the registries.
    pub fn new(config: OverviewConfig, collaborators: Collaborators) -> Result<Self, ConfigError> {
        config.validate()?;

        let collaborators = collaborators.with_definitions(config.watch.key());
        let routes = Arc::new(RoutingTable::new());
        let section = Arc::new(SectionDescriber::new(
            config.section.root.clone(),
            config.section.title.clone(),
        ));
        let reconciler = Arc::new(ReconciliationLoop::new(
            Arc::clone(&routes),
            Arc::clone(&section),
            config.section.clone(),
            collaborators.clone(),
        ));

        Ok(Self {
            config,
            collaborators,
            routes,
            section,
            reconciler,
        })
    }

    /// Register the section route and start watching resource kinds until
    /// `cancel` fires.
    pub async fn start(&self, cancel: CancellationToken) {
        for filter in Arc::clone(&self.section).path_filters() {
            self.routes.register_filter(filter);
        }

        info!(
            root = %self.config.section.root,
            title = %self.config.section.title,
            "Starting overview"
        );

        Arc::clone(&self.reconciler)
            .watch_kinds(
                Arc::clone(&self.collaborators.store),
                self.config.watch.key(),
                cancel,
            )
            .await;
    }

    /// Resolve `path` and run the describer serving it. Extracted path
    /// parameters are merged into the request fields.
    pub async fn describe_path(
        &self,
        path: &str,
        request: DescribeRequest,
    ) -> DescribeResult<ContentResponse> {
        let matched = self.routes.match_path(path)?;
        debug!(path = %path, pattern = %matched.pattern, "Route matched");

        let mut request = request.with_path(path);
        request.fields.extend(matched.params);
        matched.describer.describe(&request).await
    }

    /// Describe the whole section.
    pub async fn describe_section(&self, request: &DescribeRequest) -> DescribeResult<ContentResponse> {
        self.section.describe(request).await
    }

    /// Names of every resource kind known to the store.
    pub async fn kind_names(&self, request: &DescribeRequest) -> DescribeResult<Vec<String>> {
        kind_names(
            self.collaborators.store.as_ref(),
            &self.collaborators.definitions,
            request,
        )
        .await
    }

    pub fn config(&self) -> &OverviewConfig {
        &self.config
    }

    pub fn routes(&self) -> &Arc<RoutingTable> {
        &self.routes
    }

    pub fn section(&self) -> &Arc<SectionDescriber> {
        &self.section
    }

    pub fn reconciler(&self) -> &Arc<ReconciliationLoop> {
        &self.reconciler
    }
}
