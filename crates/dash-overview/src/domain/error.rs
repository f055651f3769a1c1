//! Error taxonomy for describe operations.
//!
//! Collaborators report their own error types ([`StoreError`],
//! [`RenderError`], [`PluginError`]); describers fold them into
//! [`DescribeError`] with enough context to diagnose without a retry.

use shared_types::ConversionError;
use thiserror::Error;

/// Boxed source error carried by [`DescribeError::Upstream`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type for describe operations
pub type DescribeResult<T> = Result<T, DescribeError>;

/// Coarse classification of a [`DescribeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    AccessDenied,
    Conversion,
    Upstream,
    Canceled,
    Aggregation,
}

/// Errors surfaced by describers, the section composer and routing.
#[derive(Debug, Error)]
pub enum DescribeError {
    /// Unknown resource kind, missing instance or unrouted path.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The object store refused the operation.
    #[error("Access denied: {0}")]
    AccessDenied(String),

    /// A record could not be converted to the expected type.
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// A collaborator call failed.
    #[error("{context}: {source}")]
    Upstream {
        /// Which kind/name/operation was in flight
        context: String,
        #[source]
        source: BoxError,
    },

    /// The caller's context was canceled mid-call.
    #[error("Describe canceled")]
    Canceled,

    /// A section member failed, aborting the merge.
    #[error("Section member {member} failed: {source}")]
    Aggregation {
        member: String,
        #[source]
        source: Box<DescribeError>,
    },
}

impl DescribeError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::AccessDenied(_) => ErrorKind::AccessDenied,
            Self::Conversion(_) => ErrorKind::Conversion,
            Self::Upstream { .. } => ErrorKind::Upstream,
            Self::Canceled => ErrorKind::Canceled,
            Self::Aggregation { .. } => ErrorKind::Aggregation,
        }
    }

    /// Wrap a collaborator failure.
    pub fn upstream(
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Upstream {
            context: context.into(),
            source: Box::new(source),
        }
    }

    /// Fold an object-store failure, keeping its classification.
    pub fn from_store(context: impl Into<String>, err: StoreError) -> Self {
        let context = context.into();
        match err {
            StoreError::NotFound(key) => Self::NotFound(format!("{}: {}", context, key)),
            StoreError::AccessDenied { key, verb } => {
                Self::AccessDenied(format!("{}: {} on {}", context, verb, key))
            }
            StoreError::Canceled => Self::Canceled,
            other @ StoreError::Backend(_) => Self::upstream(context, other),
        }
    }

    /// Unwrap aggregation layers down to the member's own error.
    pub fn root(&self) -> &DescribeError {
        match self {
            Self::Aggregation { source, .. } => source.root(),
            other => other,
        }
    }
}

impl From<RouteError> for DescribeError {
    fn from(err: RouteError) -> Self {
        Self::NotFound(err.to_string())
    }
}

/// Errors returned by the object store port.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No record exists for the key.
    #[error("record not found: {0}")]
    NotFound(String),

    /// The caller may not perform `verb` on the key.
    #[error("access denied: {verb} on {key}")]
    AccessDenied { key: String, verb: String },

    /// The caller's context was canceled.
    #[error("operation canceled")]
    Canceled,

    /// Any other backend failure.
    #[error("store backend error: {0}")]
    Backend(String),
}

/// Routing lookup failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("no route matches path {0}")]
    NotFound(String),
}

/// Describer construction failed during reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconcileError {
    #[error("invalid resource kind name {name:?}: {reason}")]
    InvalidKindName { name: String, reason: &'static str },
}

/// A content renderer failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("render failed: {0}")]
pub struct RenderError(pub String);

/// The plugin tab provider failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("plugin failed: {0}")]
pub struct PluginError(pub String);

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_store_not_found_keeps_kind() {
        let err = DescribeError::from_store(
            "get widgets/w1",
            StoreError::NotFound("example.com/v1/Widget name=w1".into()),
        );
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.to_string().contains("widgets/w1"));
    }

    #[test]
    fn test_store_canceled_maps_to_canceled() {
        let err = DescribeError::from_store("list widgets", StoreError::Canceled);
        assert_eq!(err.kind(), ErrorKind::Canceled);
    }

    #[test]
    fn test_backend_failure_is_upstream_with_source() {
        let err = DescribeError::from_store("list widgets", StoreError::Backend("boom".into()));
        assert_eq!(err.kind(), ErrorKind::Upstream);
        assert!(err.to_string().starts_with("list widgets"));
        assert!(err.source().unwrap().to_string().contains("boom"));
    }

    #[test]
    fn test_aggregation_root() {
        let inner = DescribeError::upstream("render", RenderError("bad".into()));
        let err = DescribeError::Aggregation {
            member: "widgets".into(),
            source: Box::new(inner),
        };
        assert_eq!(err.kind(), ErrorKind::Aggregation);
        assert_eq!(err.root().kind(), ErrorKind::Upstream);
        assert!(err.to_string().contains("widgets"));
    }

    #[test]
    fn test_route_error_is_not_found() {
        let err: DescribeError = RouteError::NotFound("/nope".into()).into();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.to_string().contains("/nope"));
    }

    #[test]
    fn test_conversion_error_converts() {
        let err: DescribeError = ConversionError::MissingField {
            field: "spec.group",
            record: "widgets".into(),
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::Conversion);
    }
}
