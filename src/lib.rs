//! Clipdeck - browse and download the formats a media URL offers
//!
//! Given a URL, yt-dlp metadata is turned into a catalog of video qualities
//! (one per height) and audio bitrates, and a chosen entry is turned into a
//! concrete download plan: progressive passthrough, video+audio merge, or
//! audio extraction to mp3.
//!
//! # Module Structure
//!
//! - `core`: configuration, errors, logging, retry and formatting helpers
//! - `download`: catalog building, planning, collaborators and the pipeline
//! - `cli`: command line definition for the `clipdeck` binary

pub mod cli;
pub mod core;
pub mod download;

// Re-export commonly used types for convenience
pub use core::{AppConfig, AppError, AppResult};
pub use download::{DownloadError, DownloadPipeline, FormatCatalog, MediaMode};
