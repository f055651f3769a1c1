//! Adapters implementing the outbound ports.
//!
//! - `object_store`: in-memory records, access rules and bus-backed watch
//! - `printers`: default list, summary, graph and YAML renderers
//! - `link`: links under the section root
//! - `plugins`: plugin tab providers

pub mod link;
pub mod object_store;
pub mod plugins;
pub mod printers;

pub use link::SectionLinkGenerator;
pub use object_store::InMemoryObjectStore;
pub use plugins::{NoPlugins, StaticPlugins};
pub use printers::{MetadataSummaryPrinter, OwnerGraphPrinter, SerdeYamlPrinter, TableListPrinter};
