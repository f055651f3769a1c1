//! Link generation for section paths.
//!
//! Namespaces and instance names are percent-encoded; kind names are
//! validated path segments already.

use crate::domain::{list_path, RenderError};
use crate::ports::outbound::LinkGenerator;
use shared_types::{Component, Record};

/// Links to list and detail paths under a section root.
#[derive(Debug, Clone)]
pub struct SectionLinkGenerator {
    root: String,
}

impl SectionLinkGenerator {
    pub fn new(root: impl Into<String>) -> Self {
        Self { root: root.into() }
    }
}

impl LinkGenerator for SectionLinkGenerator {
    fn for_kind(&self, kind_name: &str, namespace: &str) -> Result<Component, RenderError> {
        if kind_name.is_empty() {
            return Err(RenderError("link to a kind without a name".into()));
        }
        let mut href = list_path(&self.root, kind_name);
        if !namespace.is_empty() {
            href = format!("{}?namespace={}", href, urlencoding::encode(namespace));
        }
        Ok(Component::link(kind_name, href))
    }

    fn for_object(&self, kind_name: &str, record: &Record) -> Result<Component, RenderError> {
        let name = record.name();
        if kind_name.is_empty() || name.is_empty() {
            return Err(RenderError(format!(
                "link to {}/{:?} needs both names",
                kind_name, name
            )));
        }
        let href = format!(
            "{}/{}",
            list_path(&self.root, kind_name),
            urlencoding::encode(name)
        );
        Ok(Component::link(name, href))
    }
}
