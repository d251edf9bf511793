//! Error types for receipt document validation

use thiserror::Error;

/// Validation error types
///
/// Every variant carries the path of the offending node, in the form
/// `$[1].children[0]`, so API error messages point at the exact node
/// that failed rather than the whole submission.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A node is not a JSON object
    #[error("{path}: value must be an object")]
    MalformedNode { path: String },

    /// A node has no `$type` field
    #[error("{path}: missing $type field")]
    MissingDiscriminator { path: String },

    /// `$type` is not one of the known node kinds
    #[error(
        "{path}: invalid $type: {found}. Must be one of: alignment, line, text, cut, newline, qr-code"
    )]
    UnknownVariant { path: String, found: String },

    /// A declared field is present but violates its type/enum/range constraint
    #[error("{path}: {field} {constraint}")]
    FieldConstraintViolation {
        path: String,
        field: &'static str,
        constraint: &'static str,
    },

    /// A container node's `children` field is absent or not an array
    #[error("{path}: children must be an array")]
    InvalidChildren { path: String },

    /// Node nesting exceeds the validation depth bound
    #[error("{path}: nesting exceeds maximum depth of {limit}")]
    DepthLimitExceeded { path: String, limit: usize },
}

impl ValidationError {
    /// Path of the node that failed
    pub fn path(&self) -> &str {
        match self {
            Self::MalformedNode { path }
            | Self::MissingDiscriminator { path }
            | Self::UnknownVariant { path, .. }
            | Self::FieldConstraintViolation { path, .. }
            | Self::InvalidChildren { path }
            | Self::DepthLimitExceeded { path, .. } => path,
        }
    }
}

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;
