//! Path conventions for resource-kind routes.
//!
//! Both paths are derived from the kind name alone, so registration and
//! removal compute identical patterns without sharing state.

use super::error::ReconcileError;

/// Placeholder parameter carrying the instance name.
pub const NAME_PARAM: &str = "name";

/// Placeholder segment for the instance name in detail paths.
pub const NAME_PLACEHOLDER: &str = "{name}";

/// `<root>/<name>`
pub fn list_path(root: &str, name: &str) -> String {
    format!("{}/{}", root.trim_end_matches('/'), name)
}

/// `<root>/<name>/{name}`
pub fn detail_path(root: &str, name: &str) -> String {
    format!("{}/{}", list_path(root, name), NAME_PLACEHOLDER)
}

/// A kind name must be usable as a single literal path segment.
pub fn validate_kind_name(name: &str) -> Result<(), ReconcileError> {
    let reason = if name.is_empty() {
        Some("empty")
    } else if name.contains('/') {
        Some("contains '/'")
    } else if name.contains('{') || name.contains('}') {
        Some("contains placeholder braces")
    } else if name.chars().any(char::is_whitespace) {
        Some("contains whitespace")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(ReconcileError::InvalidKindName {
            name: name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}
