//! Per-kind describers and the collaborators they share.
//!
//! - `list`: all instances of one resource kind
//! - `detail`: one instance with summary, graph, document and plugin tabs
//! - `kinds`: resource-kind definition lookups

pub mod detail;
pub mod kinds;
pub mod list;

pub use detail::{DetailDescriber, RESOURCE_VIEWER_ACCESSOR, SUMMARY_ACCESSOR, YAML_ACCESSOR};
pub use kinds::{kind_definition, kind_names};
pub use list::ListDescriber;

use crate::adapters::{
    MetadataSummaryPrinter, NoPlugins, OwnerGraphPrinter, SectionLinkGenerator, SerdeYamlPrinter,
    TableListPrinter,
};
use crate::ports::outbound::{
    LinkGenerator, ListPrinter, ObjectStore, PluginManager, ResourceViewerPrinter, SummaryPrinter,
    YamlPrinter,
};
use shared_types::ObjectKey;
use std::sync::Arc;

/// Everything a describer calls out to.
#[derive(Clone)]
pub struct Collaborators {
    pub store: Arc<dyn ObjectStore>,
    /// Key under which resource-kind definitions are stored.
    pub definitions: ObjectKey,
    pub link: Arc<dyn LinkGenerator>,
    pub list_printer: Arc<dyn ListPrinter>,
    pub summary: Arc<dyn SummaryPrinter>,
    pub resource_viewer: Arc<dyn ResourceViewerPrinter>,
    pub yaml: Arc<dyn YamlPrinter>,
    pub plugins: Arc<dyn PluginManager>,
}

impl Collaborators {
    /// Default renderers over `store`, with links rooted at `section_root`.
    pub fn with_defaults(store: Arc<dyn ObjectStore>, section_root: &str) -> Self {
        Self {
            store,
            definitions: ObjectKey::kind_definitions(),
            link: Arc::new(SectionLinkGenerator::new(section_root)),
            list_printer: Arc::new(TableListPrinter),
            summary: Arc::new(MetadataSummaryPrinter),
            resource_viewer: Arc::new(OwnerGraphPrinter),
            yaml: Arc::new(SerdeYamlPrinter),
            plugins: Arc::new(NoPlugins),
        }
    }

    pub fn with_definitions(mut self, key: ObjectKey) -> Self {
        self.definitions = key;
        self
    }

    pub fn with_link(mut self, link: Arc<dyn LinkGenerator>) -> Self {
        self.link = link;
        self
    }

    pub fn with_list_printer(mut self, printer: Arc<dyn ListPrinter>) -> Self {
        self.list_printer = printer;
        self
    }

    pub fn with_plugins(mut self, plugins: Arc<dyn PluginManager>) -> Self {
        self.plugins = plugins;
        self
    }
}
