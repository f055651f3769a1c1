//! # Component Model
//!
//! The hierarchical content that describers produce.
//!
//! A [`Component`] pairs rendering metadata (title, accessor) with a
//! [`View`]. `View::List` is the only container; every other view is a leaf.

use serde::{Deserialize, Serialize};

/// Title made of text and link components.
pub type Title = Vec<Component>;

/// Build a title from plain text.
pub fn title_from_str(text: &str) -> Title {
    vec![Component::text(text)]
}

/// Rendering metadata attached to every component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub title: Title,
    /// Stable name consumers use to address a sub-section.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessor: Option<String>,
}

/// A renderable node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub metadata: Metadata,
    pub view: View,
}

/// Closed set of component shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "config", rename_all = "camelCase")]
pub enum View {
    List { items: Vec<Component> },
    Table(Table),
    Text { value: String },
    Link { text: String, href: String },
    Summary { sections: Vec<SummarySection> },
    ResourceGraph(ResourceGraph),
    Yaml { data: String },
}

/// Tabular view; cells are components so they can hold links.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<TableRow>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub placeholder: String,
}

/// One table row keyed by column name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub cells: Vec<(String, Component)>,
}

impl TableRow {
    pub fn cell(&self, column: &str) -> Option<&Component> {
        self.cells.iter().find(|(c, _)| c == column).map(|(_, v)| v)
    }
}

/// Header/content pair in a summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummarySection {
    pub header: String,
    pub content: Component,
}

/// Nodes and edges of a relationship graph. Layout is left to the frontend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub api_version: String,
    pub kind: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
}

impl Component {
    pub fn new(view: View) -> Self {
        Self {
            metadata: Metadata::default(),
            view,
        }
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::new(View::Text {
            value: value.into(),
        })
    }

    pub fn link(text: impl Into<String>, href: impl Into<String>) -> Self {
        Self::new(View::Link {
            text: text.into(),
            href: href.into(),
        })
    }

    /// A titled list. `items` may be empty; the list itself is still present.
    pub fn list(title: &str, items: Vec<Component>) -> Self {
        Self::new(View::List { items }).with_title(title_from_str(title))
    }

    pub fn table(title: &str, table: Table) -> Self {
        Self::new(View::Table(table)).with_title(title_from_str(title))
    }

    pub fn yaml(data: impl Into<String>) -> Self {
        Self::new(View::Yaml { data: data.into() }).with_title(title_from_str("YAML"))
    }

    pub fn with_title(mut self, title: Title) -> Self {
        self.metadata.title = title;
        self
    }

    /// Tag the component with a stable sub-section name.
    pub fn set_accessor(&mut self, accessor: impl Into<String>) {
        self.metadata.accessor = Some(accessor.into());
    }

    pub fn accessor(&self) -> Option<&str> {
        self.metadata.accessor.as_deref()
    }

    /// Children when this is a list; `None` for leaves.
    pub fn list_items(&self) -> Option<&[Component]> {
        match &self.view {
            View::List { items } => Some(items),
            _ => None,
        }
    }

    /// Append to a list component. Leaves are left untouched.
    pub fn push_item(&mut self, item: Component) {
        if let View::List { items } = &mut self.view {
            items.push(item);
        }
    }

    pub fn is_empty(&self) -> bool {
        match &self.view {
            View::List { items } => items.is_empty(),
            View::Table(table) => table.rows.is_empty(),
            View::Text { value } => value.is_empty(),
            View::Link { text, .. } => text.is_empty(),
            View::Summary { sections } => sections.is_empty(),
            View::ResourceGraph(graph) => graph.nodes.is_empty(),
            View::Yaml { data } => data.is_empty(),
        }
    }
}

/// Output of any describer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentResponse {
    pub title: Title,
    pub components: Vec<Component>,
}

impl ContentResponse {
    pub fn new(title: Title) -> Self {
        Self {
            title,
            components: Vec::new(),
        }
    }

    pub fn add(&mut self, component: Component) {
        self.components.push(component);
    }

    /// Find a component by accessor.
    pub fn component(&self, accessor: &str) -> Option<&Component> {
        self.components
            .iter()
            .find(|c| c.accessor() == Some(accessor))
    }

    pub fn accessors(&self) -> Vec<&str> {
        self.components.iter().filter_map(Component::accessor).collect()
    }
}
