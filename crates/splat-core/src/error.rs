//! Error types for splat

use thiserror::Error;

/// Result type alias using splat's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in splat operations
#[derive(Error, Debug)]
pub enum Error {
    /// Two buffers that must share a grid have different dimensions
    #[error("Dimension mismatch: expected {expected:?}, found {found:?}")]
    DimensionMismatch {
        expected: (u32, u32),
        found: (u32, u32),
    },

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Image encoding error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Scene (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
