//! Error types for core document operations.

use thiserror::Error;

/// Result type for core operations.
pub type StudioResult<T> = Result<T, StudioError>;

/// Errors that can occur in core operations.
///
/// Note that edit operations referencing an unknown element ID are not
/// errors: they resolve as no-ops by design.
#[derive(Debug, Error)]
pub enum StudioError {
    /// Document serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A payload that parsed but violates document rules.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
}
