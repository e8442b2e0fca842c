//! Error types for the PhilosoApp core.

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in the core.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Reading or writing the durable store failed.
    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),

    /// A document could not be serialized or parsed.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A document parsed but did not have the expected shape.
    #[error("invalid document: {0}")]
    InvalidDocument(String),

    /// The content catalog violates a structural rule.
    #[error("invalid content: {0}")]
    InvalidContent(String),

    /// Unknown unit identifier.
    #[error("unknown unit: {0}")]
    UnknownUnit(String),

    /// Unknown module identifier.
    #[error("unknown module: {0}")]
    UnknownModule(String),
}
