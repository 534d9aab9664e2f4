//! Error types for the interactive session and export delivery

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::{FieldId, FieldType};

/// Errors reported back to the user while editing; none of them end the session
#[derive(Debug, Error)]
pub enum SessionError {
    /// No field with this id exists in the forest
    #[error("Field not found: {0}")]
    UnknownField(FieldId),

    /// Type exists but the active profile does not offer it
    #[error("Field type {0} is not available in the active profile")]
    TypeNotAllowed(FieldType),

    /// Children can only be added under nested fields
    #[error("Field {id} is of type {field_type}; only Nested fields can hold children")]
    NotNested { id: FieldId, field_type: FieldType },

    #[error("Field {0} is Nested; add child fields instead of a value")]
    ValueOnNested(FieldId),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors raised by an export sink while delivering a document
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for session operations
pub type SessionResult<T> = Result<T, SessionError>;

/// Result type alias for export delivery
pub type ExportResult<T> = Result<T, ExportError>;
