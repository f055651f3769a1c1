//! # Dash Overview
//!
//! Live routing and aggregation for dynamically discovered resource kinds.
//!
//! **Architecture:** Hexagonal (Ports/Adapters)
//!
//! ## Purpose
//!
//! Resource kinds appear and disappear at runtime. For every live kind the
//! overview keeps:
//! - a list route `<root>/<kind>` and a detail route `<root>/<kind>/{name}`
//!   in the [`RoutingTable`]
//! - a member in the [`SectionDescriber`], which merges every member's list
//!   into one section view
//!
//! The [`ReconciliationLoop`] applies add/delete notifications to both
//! registries; requests read them concurrently through [`OverviewService`].
//!
//! ## Module Structure
//!
//! ```text
//! dash-overview/
//! ├── domain/       # Errors, config, request, path conventions
//! ├── ports/        # Describer trait + collaborator traits
//! ├── adapters/     # In-memory store, default printers, links, plugins
//! ├── describers/   # List and detail describers, kind lookups
//! ├── routing.rs    # Pattern registry
//! ├── section.rs    # Section aggregator
//! ├── reconcile.rs  # Add/delete reconciliation
//! └── service.rs    # Wiring
//! ```

#![warn(clippy::all)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod adapters;
pub mod describers;
pub mod domain;
pub mod ports;
pub mod reconcile;
pub mod routing;
pub mod section;
pub mod service;

#[cfg(test)]
mod test_support;

// Re-exports
pub use adapters::{
    InMemoryObjectStore, MetadataSummaryPrinter, NoPlugins, OwnerGraphPrinter,
    SectionLinkGenerator, SerdeYamlPrinter, StaticPlugins, TableListPrinter,
};
pub use describers::{
    kind_definition, kind_names, Collaborators, DetailDescriber, ListDescriber,
    RESOURCE_VIEWER_ACCESSOR, SUMMARY_ACCESSOR, YAML_ACCESSOR,
};
pub use domain::{
    detail_path, list_path, ConfigError, DescribeError, DescribeRequest, DescribeResult, ErrorKind,
    OverviewConfig, PluginError, ReconcileError, RenderError, RouteError, SectionConfig,
    StoreError, WatchConfig, NAME_PARAM,
};
pub use ports::{
    Describer, LinkGenerator, ListPrinter, ObjectStore, PathFilter, PluginManager,
    ResourceViewerPrinter, SummaryPrinter, Tab, WatchHandler, YamlPrinter,
};
pub use reconcile::ReconciliationLoop;
pub use routing::{PathPattern, RouteMatch, RoutingTable};
pub use section::SectionDescriber;
pub use service::OverviewService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
