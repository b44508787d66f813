//! Error types for the emergency QR pipeline

use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while turning a form into a rendered QR card
#[derive(Error, Debug)]
pub enum Error {
    /// Required form fields are missing or malformed
    #[error("{0}")]
    Validation(String),

    /// The QR encoding capability is not available in this build
    #[error("QR encoder unavailable: {0}")]
    EncoderUnavailable(String),

    /// The encoder was available but failed to produce a matrix
    #[error("QR encoding failed: {0}")]
    EncodingFailure(String),

    /// Failed to paint or encode the raster surface
    #[error("Rendering failed: {0}")]
    RenderError(String),

    /// Failed to export a rendered code (download or print)
    #[error("Export failed: {0}")]
    ExportError(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::RenderError(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ConfigError(err.to_string())
    }
}
