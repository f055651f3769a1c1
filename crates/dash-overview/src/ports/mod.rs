//! Ports (Hexagonal Architecture).
//!
//! - `inbound`: the `Describer` contract the overview exposes
//! - `outbound`: collaborators the overview depends on

pub mod inbound;
pub mod outbound;

pub use inbound::{Describer, PathFilter};
pub use outbound::{
    LinkGenerator, ListPrinter, ObjectStore, PluginManager, ResourceViewerPrinter, SummaryPrinter,
    Tab, WatchHandler, YamlPrinter,
};
