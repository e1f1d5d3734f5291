//! Error types for HTML export

use thiserror::Error;

/// Errors that can occur during export
#[derive(Debug, Error)]
pub enum ExportError {
    /// IO error while writing the document or an image
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Options file could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Font size mapping must hold seven ascending thresholds
    #[error("Invalid font size mapping: {0}")]
    InvalidFontSizeMapping(String),

    /// An image sink refused an image
    #[error("Image sink error: {0}")]
    ImageSink(String),
}

/// Result type for export operations
pub type ExportResult<T> = std::result::Result<T, ExportError>;
