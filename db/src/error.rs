//! Error types for storage and record operations.
//!
//! Provides a unified error type covering I/O, serialization, configuration,
//! and the record-level failures raised by the engine.

use flatfile_core::{ErrorKind, SchemaError, ValidationError};
use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML configuration parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// The table is not defined in the catalog.
    #[error("table \"{0}\" does not exist")]
    TableNotFound(String),

    /// Insert supplied the wrong number of values.
    #[error("wrong number of values: expected {expected}, received {received}")]
    ArityMismatch { expected: usize, received: usize },

    /// The largest stored ID leaves no room for another record.
    #[error("cannot assign a new ID after {0}")]
    IdExhausted(i64),

    /// A value failed type validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A schema operation failed.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl StoreError {
    /// Classifies the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::IoError(_) => ErrorKind::Io,
            Self::JsonError(_) => ErrorKind::StorageCorruption,
            Self::YamlError(_) => ErrorKind::MalformedInput,
            Self::TableNotFound(_) => ErrorKind::NotFound,
            Self::ArityMismatch { .. } => ErrorKind::ArityMismatch,
            Self::IdExhausted(_) => ErrorKind::Conflict,
            Self::Validation(err) => err.kind(),
            Self::Schema(err) => err.kind(),
        }
    }
}

/// Convenience alias for results with [`StoreError`].
pub type Result<T> = std::result::Result<T, StoreError>;
