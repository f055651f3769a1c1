//! Describe requests.

use super::error::{DescribeError, DescribeResult};
use shared_types::LabelSet;
use std::collections::HashMap;
use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Input to any describer. Immutable for the duration of a call.
#[derive(Debug, Clone, Default)]
pub struct DescribeRequest {
    /// Path that was requested.
    pub path: String,
    /// Prefix under which the frontend mounted the dashboard.
    pub path_prefix: String,
    /// Namespace scope; empty means all namespaces.
    pub namespace: String,
    /// Route parameters plus caller-supplied fields.
    pub fields: HashMap<String, String>,
    pub label_selector: Option<LabelSet>,
    /// Caller context; canceling it aborts in-flight collaborator calls.
    pub cancel: CancellationToken,
}

impl DescribeRequest {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            ..Default::default()
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.path_prefix = prefix.into();
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn with_selector(mut self, selector: LabelSet) -> Self {
        self.label_selector = Some(selector);
        self
    }

    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Fail fast when the caller has already gone away.
    pub fn ensure_active(&self) -> DescribeResult<()> {
        if self.cancel.is_cancelled() {
            Err(DescribeError::Canceled)
        } else {
            Ok(())
        }
    }

    /// Run `fut` until it completes or the request is canceled.
    pub async fn guard<T, F>(&self, fut: F) -> DescribeResult<T>
    where
        F: Future<Output = DescribeResult<T>>,
    {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(DescribeError::Canceled),
            result = fut => result,
        }
    }
}
