//! Default content renderers.

use crate::domain::RenderError;
use crate::ports::outbound::{
    LinkGenerator, ListPrinter, ResourceViewerPrinter, SummaryPrinter, YamlPrinter,
};
use async_trait::async_trait;
use shared_types::{
    title_from_str, Component, GraphEdge, GraphNode, Record, ResourceGraph, ResourceKindDefinition,
    SummarySection, Table, TableRow, View,
};
use tokio_util::sync::CancellationToken;

/// Renders instances as a `Name` / `Labels` table.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableListPrinter;

impl TableListPrinter {
    pub const COLUMNS: [&'static str; 2] = ["Name", "Labels"];
}

impl ListPrinter for TableListPrinter {
    fn print(
        &self,
        kind_name: &str,
        definition: &ResourceKindDefinition,
        records: &[Record],
        link: &dyn LinkGenerator,
    ) -> Result<Component, RenderError> {
        let rows = records
            .iter()
            .map(|record| {
                Ok(TableRow {
                    cells: vec![
                        ("Name".to_string(), link.for_object(kind_name, record)?),
                        (
                            "Labels".to_string(),
                            Component::text(record.labels().to_string()),
                        ),
                    ],
                })
            })
            .collect::<Result<Vec<_>, RenderError>>()?;

        let table = Table {
            columns: Self::COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows,
            placeholder: format!("We couldn't find any {}!", definition.kind),
        };
        Ok(Component::table(&definition.kind, table))
    }
}

/// Renders identifying metadata as a summary panel.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetadataSummaryPrinter;

#[async_trait]
impl SummaryPrinter for MetadataSummaryPrinter {
    async fn print(
        &self,
        cancel: &CancellationToken,
        definition: &ResourceKindDefinition,
        record: &Record,
    ) -> Result<Component, RenderError> {
        if cancel.is_cancelled() {
            return Err(RenderError("summary canceled".into()));
        }

        let section = |header: &str, value: &str| SummarySection {
            header: header.to_string(),
            content: Component::text(value),
        };

        let sections = vec![
            section("Name", record.name()),
            section("Namespace", record.namespace().unwrap_or_default()),
            section("API Version", &definition.api_version()),
            section("Kind", &definition.kind),
            section("Labels", &record.labels().to_string()),
        ];

        Ok(Component::new(View::Summary { sections }).with_title(title_from_str("Summary")))
    }
}

/// Renders the record and its owners as a relationship graph.
#[derive(Debug, Clone, Copy, Default)]
pub struct OwnerGraphPrinter;

impl OwnerGraphPrinter {
    fn node_id(api_version: &str, kind: &str, name: &str) -> String {
        format!("{}/{}/{}", api_version, kind, name)
    }
}

#[async_trait]
impl ResourceViewerPrinter for OwnerGraphPrinter {
    async fn print(
        &self,
        cancel: &CancellationToken,
        record: &Record,
    ) -> Result<Component, RenderError> {
        if cancel.is_cancelled() {
            return Err(RenderError("resource viewer canceled".into()));
        }

        let root_id = Self::node_id(record.api_version(), record.kind(), record.name());
        let mut graph = ResourceGraph {
            nodes: vec![GraphNode {
                id: root_id.clone(),
                api_version: record.api_version().to_string(),
                kind: record.kind().to_string(),
                name: record.name().to_string(),
            }],
            edges: Vec::new(),
        };

        for owner in record.owner_references() {
            let id = Self::node_id(&owner.api_version, &owner.kind, &owner.name);
            graph.edges.push(GraphEdge {
                from: id.clone(),
                to: root_id.clone(),
            });
            graph.nodes.push(GraphNode {
                id,
                api_version: owner.api_version,
                kind: owner.kind,
                name: owner.name,
            });
        }

        Ok(Component::new(View::ResourceGraph(graph))
            .with_title(title_from_str("Resource Viewer")))
    }
}

/// Renders the raw document with `serde_yaml`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerdeYamlPrinter;

impl YamlPrinter for SerdeYamlPrinter {
    fn print(&self, record: &Record) -> Result<Component, RenderError> {
        let data = serde_yaml::to_string(record.value())
            .map_err(|e| RenderError(format!("yaml encoding of {}: {}", record.name(), e)))?;
        Ok(Component::yaml(data))
    }
}
