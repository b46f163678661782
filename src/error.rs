//! Error types for alignment and agreement scoring.

use gate_agreement_document::{DocumentError, SchemaLookupError};
use thiserror::Error;

/// Errors raised while aligning annotation sets or computing agreement.
#[derive(Debug, Error)]
pub enum AgreementError {
    /// The document or schema could not be loaded.
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// The annotation type is not declared in a strict schema.
    #[error(transparent)]
    SchemaLookup(#[from] SchemaLookupError),

    /// No annotation of one annotator overlapped any annotation of the other.
    #[error("no `{annotation_type}` annotations overlap between the two annotators")]
    AlignmentEmpty { annotation_type: String },

    /// The two value columns of a comparison set differ in length.
    #[error(
        "comparison set `{attribute}` has {annotator1} values for annotator 1 \
         but {annotator2} for annotator 2"
    )]
    LengthMismatch {
        attribute: String,
        annotator1: usize,
        annotator2: usize,
    },

    /// The weighting name is not one the kappa coefficient knows.
    #[error("unsupported weighting scheme {0:?}: expected none, linear or quadratic")]
    UnsupportedWeighting(String),

    /// A weighted comparison met a value without a leading ordinal rank.
    #[error("attribute `{attribute}`: {value:?} does not start with an ordinal rank")]
    MalformedOrdinalLabel {
        attribute: String,
        value: Option<String>,
    },

    /// The run configuration is unreadable or inconsistent.
    #[error("invalid configuration {path}: {message}")]
    Config { path: String, message: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for agreement operations.
pub type AgreementResult<T> = Result<T, AgreementError>;
