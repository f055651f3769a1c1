//! Domain types for the overview.
//!
//! Errors, configuration, path conventions and the request type. No I/O.

pub mod config;
pub mod error;
pub mod paths;
pub mod request;

// Re-exports for convenience
pub use config::{ConfigError, OverviewConfig, SectionConfig, WatchConfig};
pub use error::{
    BoxError, DescribeError, DescribeResult, ErrorKind, PluginError, ReconcileError, RenderError,
    RouteError, StoreError,
};
pub use paths::{detail_path, list_path, validate_kind_name, NAME_PARAM, NAME_PLACEHOLDER};
pub use request::DescribeRequest;
