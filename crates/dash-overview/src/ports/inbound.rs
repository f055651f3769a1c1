//! # Inbound Ports
//!
//! What the overview exposes: anything that turns a request into content.

use crate::domain::{DescribeRequest, DescribeResult};
use async_trait::async_trait;
use shared_types::ContentResponse;
use std::fmt;
use std::sync::Arc;

/// A handler that renders a request into a hierarchical content response.
#[async_trait]
pub trait Describer: Send + Sync + 'static {
    /// Produce content for `request`.
    async fn describe(&self, request: &DescribeRequest) -> DescribeResult<ContentResponse>;

    /// Route patterns this describer serves, each bound to the describer.
    fn path_filters(self: Arc<Self>) -> Vec<PathFilter>;
}

/// A route pattern bound to the describer that serves it.
#[derive(Clone)]
pub struct PathFilter {
    pub pattern: String,
    pub describer: Arc<dyn Describer>,
}

impl PathFilter {
    pub fn new(pattern: impl Into<String>, describer: Arc<dyn Describer>) -> Self {
        Self {
            pattern: pattern.into(),
            describer,
        }
    }
}

impl fmt::Debug for PathFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathFilter")
            .field("pattern", &self.pattern)
            .finish_non_exhaustive()
    }
}
