//! List describer: every instance of one resource kind.

use super::kinds::kind_definition;
use super::Collaborators;
use crate::domain::{
    list_path, validate_kind_name, DescribeError, DescribeRequest, DescribeResult,
    ReconcileError, SectionConfig,
};
use crate::ports::outbound::{LinkGenerator, ListPrinter, ObjectStore};
use crate::ports::{Describer, PathFilter};
use async_trait::async_trait;
use shared_types::{title_from_str, Component, ContentResponse, ObjectKey};
use std::sync::Arc;
use tracing::debug;

/// Renders all instances of the kind `name` as a table.
///
/// A denied `list` access check renders an empty table rather than failing.
pub struct ListDescriber {
    name: String,
    path: String,
    title: String,
    definitions: ObjectKey,
    store: Arc<dyn ObjectStore>,
    link: Arc<dyn LinkGenerator>,
    printer: Arc<dyn ListPrinter>,
}

impl ListDescriber {
    pub fn new(
        name: &str,
        section: &SectionConfig,
        collaborators: &Collaborators,
    ) -> Result<Self, ReconcileError> {
        validate_kind_name(name)?;
        Ok(Self {
            name: name.to_string(),
            path: list_path(&section.root, name),
            title: format!("{} / {}", section.title, name),
            definitions: collaborators.definitions.clone(),
            store: Arc::clone(&collaborators.store),
            link: Arc::clone(&collaborators.link),
            printer: Arc::clone(&collaborators.list_printer),
        })
    }

    /// Replace the list printer.
    pub fn with_printer(mut self, printer: Arc<dyn ListPrinter>) -> Self {
        self.printer = printer;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

#[async_trait]
impl Describer for ListDescriber {
    async fn describe(&self, request: &DescribeRequest) -> DescribeResult<ContentResponse> {
        request.ensure_active()?;

        let definition =
            kind_definition(self.store.as_ref(), &self.definitions, request, &self.name).await?;

        let key = definition
            .instance_key()
            .in_namespace(&request.namespace)
            .with_selector(request.label_selector.clone());

        let records = match self.store.has_access(&key, "list") {
            Err(e) => {
                debug!(kind = %self.name, error = %e, "List access denied, rendering no instances");
                Vec::new()
            }
            Ok(()) => {
                request
                    .guard(async {
                        self.store.list(&request.cancel, &key).await.map_err(|e| {
                            DescribeError::from_store(format!("list {}", self.name), e)
                        })
                    })
                    .await?
            }
        };

        let table = self
            .printer
            .print(&self.name, &definition, &records, self.link.as_ref())
            .map_err(|e| DescribeError::upstream(format!("print list of {}", self.name), e))?;

        let mut response = ContentResponse::new(title_from_str(&self.title));
        response.add(Component::list(&self.title, vec![table]));
        Ok(response)
    }

    fn path_filters(self: Arc<Self>) -> Vec<PathFilter> {
        let pattern = self.path.clone();
        vec![PathFilter::new(pattern, self)]
    }
}
