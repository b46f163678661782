//! Error types for document and schema loading.

use thiserror::Error;

/// Errors raised while reading a GATE document or annotation schema.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The source could not be read.
    #[error("failed to load {path}: {message}")]
    Load { path: String, message: String },

    /// The source was read but is not a well-formed document.
    #[error("parse error: {message}")]
    Parse { message: String },
}

impl DocumentError {
    pub(crate) fn parse(message: impl Into<String>) -> Self {
        DocumentError::Parse {
            message: message.into(),
        }
    }
}

impl From<roxmltree::Error> for DocumentError {
    fn from(err: roxmltree::Error) -> Self {
        DocumentError::parse(err.to_string())
    }
}

/// An annotation type was looked up that the schema does not declare.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("annotation type `{annotation_type}` is not declared in the schema")]
pub struct SchemaLookupError {
    pub annotation_type: String,
}

/// Result type for document operations.
pub type DocumentResult<T> = Result<T, DocumentError>;
