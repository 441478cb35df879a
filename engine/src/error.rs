//! Error types for the serialization engine.

use crate::{FieldName, FormatVersion, TypeName};
use thiserror::Error;

/// All possible errors from the serialization engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    // Metadata errors
    #[error("no precompiled metadata registered for type: {0}")]
    MissingTypeMetadata(TypeName),

    #[error("field '{field}' has type {field_type}, which has no text encoding")]
    UnsupportedFieldType { field: FieldName, field_type: String },

    // Record shape errors
    #[error("type mismatch for field '{field}': expected {expected}, got {got}")]
    TypeMismatch {
        field: FieldName,
        expected: String,
        got: String,
    },

    #[error("type {type_name} declares {expected} fields, record supplied {actual}")]
    FieldCountMismatch {
        type_name: TypeName,
        expected: usize,
        actual: usize,
    },

    // Context persistence errors
    #[error("invalid serializer context: {0}")]
    InvalidContext(String),

    #[error("unsupported context format version: {found} (max supported: {supported})")]
    ContextVersionTooNew {
        found: FormatVersion,
        supported: FormatVersion,
    },

    // Writer errors
    #[error("encoding failed: {0}")]
    Encoding(String),
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
