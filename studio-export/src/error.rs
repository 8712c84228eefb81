//! Error types for export operations.

use thiserror::Error;

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Errors that can occur while exporting a document.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The requested format is not one this exporter produces.
    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),

    /// Building or parsing the SVG intermediate failed.
    #[error("SVG rendering failed: {0}")]
    Svg(String),

    /// Encoding the rasterized output failed.
    #[error("Encoding failed: {0}")]
    Encode(String),
}
