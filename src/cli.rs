use clap::{Parser, Subcommand};
use url::Url;

use crate::core::error::{AppError, AppResult};
use crate::download::planner::MediaMode;

#[derive(Parser)]
#[command(name = "clipdeck")]
#[command(author, version, about = "Browse and download the formats a media URL offers", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show media details and the available formats
    Formats {
        /// Media page URL
        url: String,

        /// Which catalog to list (video or audio)
        #[arg(short, long, default_value_t = MediaMode::Video)]
        mode: MediaMode,
    },

    /// Download one format and print the produced file path
    Download {
        /// Media page URL
        url: String,

        /// video or audio
        #[arg(short, long)]
        mode: MediaMode,

        /// Format id as listed by `formats`
        #[arg(short, long)]
        format_id: String,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Parses a media page URL; only http(s) links are handed to the extractor.
pub fn parse_media_url(raw: &str) -> AppResult<Url> {
    let url = Url::parse(raw.trim())?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(AppError::Validation(format!("unsupported URL scheme '{}': {}", other, raw))),
    }
}

/// Follow-up advice for errors the user can fix by choosing differently.
pub fn error_hint(err: &AppError) -> Option<&'static str> {
    match err.as_download() {
        Some(e) if e.is_user_correctable() => {
            Some("Run `clipdeck formats <URL> --mode <video|audio>` to see the format ids available for that mode.")
        }
        _ => None,
    }
}
