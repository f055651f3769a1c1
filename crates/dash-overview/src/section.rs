//! Section describer: aggregates one member describer per resource kind.
//!
//! `describe` copies the member set under the lock, releases it, and only
//! then calls the members. Members run concurrently; their list items are
//! merged in lexicographic member-name order and any member failure fails
//! the whole call. When several members fail, the first in name order is
//! reported regardless of which finished first.

use crate::domain::{DescribeError, DescribeRequest, DescribeResult};
use crate::ports::{Describer, PathFilter};
use async_trait::async_trait;
use futures::future::join_all;
use parking_lot::Mutex;
use shared_types::{title_from_str, Component, ContentResponse, View};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Composite describer for one logical section of the dashboard.
pub struct SectionDescriber {
    path: String,
    title: String,
    members: Mutex<HashMap<String, Arc<dyn Describer>>>,
}

impl SectionDescriber {
    pub fn new(path: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            title: title.into(),
            members: Mutex::new(HashMap::new()),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Add or replace the member registered under `name`.
    pub fn add(&self, name: &str, describer: Arc<dyn Describer>) {
        let replaced = self
            .members
            .lock()
            .insert(name.to_string(), describer)
            .is_some();
        debug!(section = %self.path, member = %name, replaced, "Section member added");
    }

    /// Remove `name`; absent names are ignored.
    pub fn remove(&self, name: &str) {
        if self.members.lock().remove(name).is_some() {
            debug!(section = %self.path, member = %name, "Section member removed");
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.members.lock().contains_key(name)
    }

    /// Member names in lexicographic order.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.members.lock().keys().cloned().collect();
        names.sort();
        names
    }

    fn snapshot(&self) -> Vec<(String, Arc<dyn Describer>)> {
        let mut members: Vec<(String, Arc<dyn Describer>)> = self
            .members
            .lock()
            .iter()
            .map(|(name, describer)| (name.clone(), Arc::clone(describer)))
            .collect();
        members.sort_by(|a, b| a.0.cmp(&b.0));
        members
    }
}

#[async_trait]
impl Describer for SectionDescriber {
    async fn describe(&self, request: &DescribeRequest) -> DescribeResult<ContentResponse> {
        request.ensure_active()?;

        let members = self.snapshot();
        let responses = join_all(members.iter().map(|(name, describer)| async move {
            describer
                .describe(request)
                .await
                .map_err(|source| DescribeError::Aggregation {
                    member: name.clone(),
                    source: Box::new(source),
                })
        }))
        .await
        .into_iter()
        .collect::<DescribeResult<Vec<_>>>()?;

        let items: Vec<Component> = responses
            .into_iter()
            .flat_map(|response| response.components)
            .flat_map(|component| match component.view {
                View::List { items } => items,
                _ => Vec::new(),
            })
            .filter(|item| !item.is_empty())
            .collect();

        debug!(
            section = %self.path,
            members = members.len(),
            items = items.len(),
            "Section described"
        );

        let mut response = ContentResponse::new(title_from_str(&self.title));
        response.add(Component::list(&self.title, items));
        Ok(response)
    }

    fn path_filters(self: Arc<Self>) -> Vec<PathFilter> {
        let pattern = self.path.clone();
        vec![PathFilter::new(pattern, self)]
    }
}
