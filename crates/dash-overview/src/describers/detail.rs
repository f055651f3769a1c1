//! Detail describer: one instance of a resource kind.
//!
//! Stages run strictly in order because each needs the fetched record:
//! title link, summary, resource viewer, YAML, then plugin tabs. Any failure
//! aborts the call; partial responses are never returned.

use super::kinds::kind_definition;
use super::Collaborators;
use crate::domain::{
    detail_path, validate_kind_name, DescribeError, DescribeRequest, DescribeResult,
    ReconcileError, SectionConfig, NAME_PARAM,
};
use crate::ports::outbound::{
    LinkGenerator, ObjectStore, PluginManager, ResourceViewerPrinter, SummaryPrinter, YamlPrinter,
};
use crate::ports::{Describer, PathFilter};
use async_trait::async_trait;
use shared_types::{Component, ContentResponse, ObjectKey};
use std::sync::Arc;

/// Accessor of the summary component.
pub const SUMMARY_ACCESSOR: &str = "summary";
/// Accessor of the relationship graph component.
pub const RESOURCE_VIEWER_ACCESSOR: &str = "resourceViewer";
/// Accessor of the raw document component.
pub const YAML_ACCESSOR: &str = "yaml";

/// Renders one instance of the kind `name`, selected by the `name` field.
pub struct DetailDescriber {
    name: String,
    path: String,
    definitions: ObjectKey,
    store: Arc<dyn ObjectStore>,
    link: Arc<dyn LinkGenerator>,
    summary: Arc<dyn SummaryPrinter>,
    resource_viewer: Arc<dyn ResourceViewerPrinter>,
    yaml: Arc<dyn YamlPrinter>,
    plugins: Arc<dyn PluginManager>,
}

impl DetailDescriber {
    pub fn new(
        name: &str,
        section: &SectionConfig,
        collaborators: &Collaborators,
    ) -> Result<Self, ReconcileError> {
        validate_kind_name(name)?;
        Ok(Self {
            name: name.to_string(),
            path: detail_path(&section.root, name),
            definitions: collaborators.definitions.clone(),
            store: Arc::clone(&collaborators.store),
            link: Arc::clone(&collaborators.link),
            summary: Arc::clone(&collaborators.summary),
            resource_viewer: Arc::clone(&collaborators.resource_viewer),
            yaml: Arc::clone(&collaborators.yaml),
            plugins: Arc::clone(&collaborators.plugins),
        })
    }

    pub fn with_summary(mut self, printer: Arc<dyn SummaryPrinter>) -> Self {
        self.summary = printer;
        self
    }

    pub fn with_resource_viewer(mut self, printer: Arc<dyn ResourceViewerPrinter>) -> Self {
        self.resource_viewer = printer;
        self
    }

    pub fn with_yaml(mut self, printer: Arc<dyn YamlPrinter>) -> Self {
        self.yaml = printer;
        self
    }

    pub fn with_plugins(mut self, plugins: Arc<dyn PluginManager>) -> Self {
        self.plugins = plugins;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

fn tagged(mut component: Component, accessor: &str) -> Component {
    component.set_accessor(accessor);
    component
}

#[async_trait]
impl Describer for DetailDescriber {
    async fn describe(&self, request: &DescribeRequest) -> DescribeResult<ContentResponse> {
        request.ensure_active()?;

        let definition =
            kind_definition(self.store.as_ref(), &self.definitions, request, &self.name).await?;

        let instance = request
            .field(NAME_PARAM)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| {
                DescribeError::NotFound(format!("{}: request names no instance", self.name))
            })?;
        let context = format!("{}/{}", self.name, instance);

        let key = definition
            .instance_key()
            .in_namespace(&request.namespace)
            .named(instance);
        let record = request
            .guard(async {
                self.store
                    .get(&request.cancel, &key)
                    .await
                    .map_err(|e| DescribeError::from_store(format!("get {}", context), e))
            })
            .await?;

        let kind_link = self
            .link
            .for_kind(&self.name, &request.namespace)
            .map_err(|e| DescribeError::upstream(format!("title of {}", context), e))?;
        let mut response = ContentResponse::new(vec![kind_link, Component::text(instance)]);

        let summary = request
            .guard(async {
                self.summary
                    .print(&request.cancel, &definition, &record)
                    .await
                    .map_err(|e| DescribeError::upstream(format!("summary of {}", context), e))
            })
            .await?;
        response.add(tagged(summary, SUMMARY_ACCESSOR));

        let graph = request
            .guard(async {
                self.resource_viewer
                    .print(&request.cancel, &record)
                    .await
                    .map_err(|e| {
                        DescribeError::upstream(format!("resource viewer of {}", context), e)
                    })
            })
            .await?;
        response.add(tagged(graph, RESOURCE_VIEWER_ACCESSOR));

        let yaml = self
            .yaml
            .print(&record)
            .map_err(|e| DescribeError::upstream(format!("yaml of {}", context), e))?;
        response.add(tagged(yaml, YAML_ACCESSOR));

        let tabs = request
            .guard(async {
                self.plugins
                    .tabs(&request.cancel, &record)
                    .await
                    .map_err(|e| DescribeError::upstream(format!("plugin tabs of {}", context), e))
            })
            .await?;
        for tab in tabs {
            response.add(tagged(tab.contents, &tab.name));
        }

        Ok(response)
    }

    fn path_filters(self: Arc<Self>) -> Vec<PathFilter> {
        let pattern = self.path.clone();
        vec![PathFilter::new(pattern, self)]
    }
}
