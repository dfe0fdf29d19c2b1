//! Collaborator seams around the core.
//!
//! The catalog builder and planner are pure; everything that touches the
//! network or spawns processes sits behind these two traits so the pipeline
//! can run against yt-dlp in production and an in-memory double in tests.
//!
//! Built-in backend:
//! - `YtDlpSource`: metadata extraction and download via the yt-dlp binary

pub mod ytdlp;

use async_trait::async_trait;
use std::path::PathBuf;
use url::Url;

use crate::download::error::DownloadError;
use crate::download::metadata::MediaInfo;
use crate::download::planner::DownloadPlan;

/// Turns a source URL into media attributes plus raw representations.
#[async_trait]
pub trait MetadataExtractor: Send + Sync {
    /// Human-readable name for logs
    fn name(&self) -> &str;

    /// Single-item extraction; fails with [`DownloadError::Extraction`].
    async fn extract(&self, url: &Url) -> Result<MediaInfo, DownloadError>;
}

/// Carries out a download plan.
#[async_trait]
pub trait DownloadExecutor: Send + Sync {
    /// Human-readable name for logs
    fn name(&self) -> &str;

    /// Downloads (and merges/transcodes as directed) into `output_template`,
    /// returning the path of the primary produced file.
    ///
    /// `output_template` is unique per request and may contain yt-dlp
    /// placeholders such as `%(title)s` and `%(ext)s`.
    async fn execute(&self, url: &Url, plan: &DownloadPlan, output_template: &str) -> Result<PathBuf, DownloadError>;
}
