//! # Error Types
//!
//! Errors raised while interpreting records.

use thiserror::Error;

/// A record could not be converted into a typed entity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// A required field is absent or has the wrong type.
    #[error("Conversion failed: {record} is missing {field}")]
    MissingField { field: &'static str, record: String },

    /// The record is not the expected kind.
    #[error("Conversion failed: expected kind {expected}, got {got}")]
    UnexpectedKind { expected: String, got: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_message() {
        let err = ConversionError::MissingField {
            field: "spec.group",
            record: "widgets".into(),
        };
        assert!(err.to_string().contains("spec.group"));
        assert!(err.to_string().contains("widgets"));
    }
}
