//! Describer doubles shared by unit tests.

use crate::adapters::InMemoryObjectStore;
use crate::describers::Collaborators;
use crate::domain::{DescribeError, DescribeRequest, DescribeResult};
use crate::ports::{Describer, PathFilter};
use async_trait::async_trait;
use shared_types::{title_from_str, Component, ContentResponse, Record, ResourceKindDefinition, View};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

pub const ROOT: &str = "/custom-resources";
pub const TITLE: &str = "Custom Resources";

pub fn widgets_definition() -> ResourceKindDefinition {
    ResourceKindDefinition {
        name: "widgets".into(),
        group: "example.com".into(),
        version: "v1".into(),
        kind: "Widget".into(),
    }
}

pub fn widget(namespace: &str, name: &str) -> Record {
    Record::build("example.com/v1", "Widget", Some(namespace), name)
}

/// Store holding the `widgets` definition and instance `w1` in `ns`.
pub async fn seeded_store() -> Arc<InMemoryObjectStore> {
    let store = Arc::new(InMemoryObjectStore::new());
    store.put(widgets_definition().to_record()).await;
    store.put(widget("ns", "w1")).await;
    store
}

pub fn collaborators(store: Arc<InMemoryObjectStore>) -> Collaborators {
    Collaborators::with_defaults(store, ROOT)
}

/// Returns one list holding a text item per configured entry.
pub struct StaticDescriber {
    label: String,
    items: Vec<String>,
}

impl StaticDescriber {
    pub fn new(label: &str, items: &[&str]) -> Self {
        Self {
            label: label.to_string(),
            items: items.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn response(&self) -> ContentResponse {
        let items = self.items.iter().map(Component::text).collect();
        let mut response = ContentResponse::new(title_from_str(&self.label));
        response.add(Component::list(&self.label, items));
        response
    }

    /// Label of a describer built by [`StaticDescriber::new`].
    pub fn label_of(describer: &Arc<dyn Describer>) -> String {
        let response = futures::executor::block_on(describer.describe(&DescribeRequest::default()))
            .expect("static describer never fails");
        title_text(&response)
    }
}

#[async_trait]
impl Describer for StaticDescriber {
    async fn describe(&self, _request: &DescribeRequest) -> DescribeResult<ContentResponse> {
        Ok(self.response())
    }

    fn path_filters(self: Arc<Self>) -> Vec<PathFilter> {
        vec![PathFilter::new(format!("/{}", self.label), self)]
    }
}

/// Always fails with `NotFound` naming its label, optionally after a delay.
pub struct FailingDescriber {
    label: String,
    delay: Option<Duration>,
}

impl FailingDescriber {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            delay: None,
        }
    }

    pub fn after(label: &str, delay: Duration) -> Self {
        Self {
            label: label.to_string(),
            delay: Some(delay),
        }
    }
}

#[async_trait]
impl Describer for FailingDescriber {
    async fn describe(&self, _request: &DescribeRequest) -> DescribeResult<ContentResponse> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        Err(DescribeError::NotFound(self.label.clone()))
    }

    fn path_filters(self: Arc<Self>) -> Vec<PathFilter> {
        Vec::new()
    }
}

/// Signals `started` on entry, then waits for `release` before answering.
pub struct GatedDescriber {
    inner: StaticDescriber,
    pub started: Arc<Notify>,
    pub release: Arc<Notify>,
}

impl GatedDescriber {
    pub fn new(label: &str, items: &[&str]) -> Self {
        Self {
            inner: StaticDescriber::new(label, items),
            started: Arc::new(Notify::new()),
            release: Arc::new(Notify::new()),
        }
    }
}

#[async_trait]
impl Describer for GatedDescriber {
    async fn describe(&self, _request: &DescribeRequest) -> DescribeResult<ContentResponse> {
        self.started.notify_one();
        self.release.notified().await;
        Ok(self.inner.response())
    }

    fn path_filters(self: Arc<Self>) -> Vec<PathFilter> {
        Vec::new()
    }
}

/// Concatenated text of a response title.
pub fn title_text(response: &ContentResponse) -> String {
    response
        .title
        .iter()
        .map(|c| match &c.view {
            View::Text { value } => value.as_str(),
            View::Link { text, .. } => text.as_str(),
            _ => "",
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Text values of the items of every list component in `response`.
pub fn item_texts(response: &ContentResponse) -> Vec<String> {
    response
        .components
        .iter()
        .filter_map(Component::list_items)
        .flatten()
        .filter_map(|c| match &c.view {
            View::Text { value } => Some(value.clone()),
            _ => None,
        })
        .collect()
}
