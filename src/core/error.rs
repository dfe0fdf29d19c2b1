use thiserror::Error;

use crate::download::error::DownloadError;

/// Centralized error types for the application
///
/// Uses `thiserror` for automatic error conversion and display formatting.
///
/// # Example
///
/// ```no_run
/// use clipdeck::core::error::AppError;
///
/// fn handle_error(err: AppError) {
///     eprintln!("Error: {}", err);
/// }
/// ```
#[derive(Error, Debug)]
pub enum AppError {
    /// Catalog, planning and collaborator errors
    #[error("{0}")]
    Download(#[from] DownloadError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// URL parsing errors
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input rejected before any collaborator runs
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// The wrapped download error, if any
    pub fn as_download(&self) -> Option<&DownloadError> {
        match self {
            AppError::Download(err) => Some(err),
            _ => None,
        }
    }
}
