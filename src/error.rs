use thiserror::Error;

/// Errors raised by the TMDB catalog client
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No API key has been configured yet
    #[error("No TMDB API key configured")]
    MissingApiKey,

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("Catalog returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The request future was aborted before it completed
    #[error("Lookup was abandoned")]
    Aborted,
}

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors that can occur while exporting the board as an image
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Screenshot did not cover the tier board")]
    EmptyCapture,

    #[error("Failed to encode PNG: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Failed to write export: {0}")]
    Io(#[from] std::io::Error),

    /// The host platform refused to offer the download
    #[error("Download failed: {0}")]
    Platform(String),
}

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;
