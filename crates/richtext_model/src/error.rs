//! Error types for rich text model operations

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Style is not a list style: {0}")]
    NotAListStyle(String),

    #[error("List level out of range: {0} (expected 0-9)")]
    LevelOutOfRange(usize),

    #[error("Style sheet not found: {0}")]
    SheetNotFound(usize),

    #[error("Style sheet cannot be linked to itself: {0}")]
    SelfLink(usize),

    #[error("Invalid colour: {0}")]
    InvalidColour(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
