use std::fmt;

use crate::download::planner::MediaMode;

/// Structured error type for catalog building, planning and download operations.
///
/// Every variant carries a human-readable cause so the calling layer can
/// render a message without inspecting the collaborator that failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadError {
    /// Metadata extraction failed (failed run, unsupported URL, unparseable document)
    Extraction(String),
    /// The requested format identifier is absent from a fresh extraction
    FormatNotFound(String),
    /// No options of the requested mode could be derived
    EmptyCatalog(MediaMode),
    /// Transfer, merge or transcode failure reported by the executor
    Transfer(String),
    /// Transient network failure reported by the executor
    Network(String),
    /// A collaborator call did not complete in time
    Timeout(String),
    /// The produced artifact could not be located after the download
    OutputNotFound(String),
}

impl fmt::Display for DownloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownloadError::Extraction(msg) => write!(f, "Error fetching info: {}", msg),
            DownloadError::FormatNotFound(id) => write!(f, "Selected format not found: {}", id),
            DownloadError::EmptyCatalog(MediaMode::Audio) => write!(f, "No audio-only formats found for this URL"),
            DownloadError::EmptyCatalog(MediaMode::Video) => write!(f, "No video formats found for this URL"),
            DownloadError::Transfer(msg) => write!(f, "Download error: {}", msg),
            DownloadError::Network(msg) => write!(f, "Network error: {}", msg),
            DownloadError::Timeout(msg) => write!(f, "Timed out: {}", msg),
            DownloadError::OutputNotFound(msg) => write!(f, "Downloaded file not found: {}", msg),
        }
    }
}

impl std::error::Error for DownloadError {}

impl DownloadError {
    /// Returns subcategory for logs
    pub fn subcategory(&self) -> &'static str {
        match self {
            DownloadError::Extraction(_) => "extraction",
            DownloadError::FormatNotFound(_) => "format_not_found",
            DownloadError::EmptyCatalog(_) => "empty_catalog",
            DownloadError::Transfer(_) => "transfer",
            DownloadError::Network(_) => "network",
            DownloadError::Timeout(_) => "timeout",
            DownloadError::OutputNotFound(_) => "output_not_found",
        }
    }

    /// Returns the inner message
    pub fn message(&self) -> String {
        match self {
            DownloadError::Extraction(msg)
            | DownloadError::FormatNotFound(msg)
            | DownloadError::Transfer(msg)
            | DownloadError::Network(msg)
            | DownloadError::Timeout(msg)
            | DownloadError::OutputNotFound(msg) => msg.clone(),
            DownloadError::EmptyCatalog(mode) => mode.to_string(),
        }
    }

    /// Errors the user can fix by choosing differently (another format, another mode).
    pub fn is_user_correctable(&self) -> bool {
        matches!(self, DownloadError::FormatNotFound(_) | DownloadError::EmptyCatalog(_))
    }
}
