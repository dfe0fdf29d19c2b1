//! Process configuration.
//!
//! Read once at startup and passed explicitly to the collaborators and the
//! pipeline; nothing below `main` consults the environment.
//!
//! | field                | env var                 | default                       |
//! |----------------------|-------------------------|-------------------------------|
//! | `ytdlp_bin`          | `YTDL_BIN`              | `yt-dlp`                      |
//! | `download_dir`       | `DOWNLOAD_FOLDER`       | `<tmp>/clipdeck_downloads`    |
//! | `log_file`           | `LOG_FILE_PATH`         | unset (console only)          |
//! | `log_level`          | `LOG_LEVEL`             | `info`                        |
//! | `extract_timeout`    | `YTDLP_TIMEOUT_SECS`    | 240                           |
//! | `download_timeout`   | `DOWNLOAD_TIMEOUT_SECS` | 1800                          |
//! | `download_retries`   | `DOWNLOAD_MAX_RETRIES`  | 1                             |
//! | `audio_quality_kbps` | `AUDIO_QUALITY_KBPS`    | 192                           |
//! | `cookies_file`       | `YTDL_COOKIES_FILE`     | unset                         |

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use log::LevelFilter;

use crate::core::error::{AppError, AppResult};
use crate::download::planner::DEFAULT_AUDIO_QUALITY_KBPS;

/// Timeout for yt-dlp metadata commands (in seconds)
pub const YTDLP_TIMEOUT_SECS: u64 = 240;

/// Timeout for a full download including merge/transcode (in seconds)
pub const DOWNLOAD_TIMEOUT_SECS: u64 = 1800;

/// Retries after the first failed download attempt
pub const DOWNLOAD_MAX_RETRIES: u32 = 1;

const DOWNLOAD_DIR_NAME: &str = "clipdeck_downloads";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub ytdlp_bin: String,
    pub download_dir: PathBuf,
    pub log_file: Option<PathBuf>,
    pub log_level: LevelFilter,
    pub extract_timeout: Duration,
    pub download_timeout: Duration,
    pub download_retries: u32,
    pub audio_quality_kbps: u32,
    pub cookies_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ytdlp_bin: "yt-dlp".to_string(),
            download_dir: env::temp_dir().join(DOWNLOAD_DIR_NAME),
            log_file: None,
            log_level: LevelFilter::Info,
            extract_timeout: Duration::from_secs(YTDLP_TIMEOUT_SECS),
            download_timeout: Duration::from_secs(DOWNLOAD_TIMEOUT_SECS),
            download_retries: DOWNLOAD_MAX_RETRIES,
            audio_quality_kbps: DEFAULT_AUDIO_QUALITY_KBPS,
            cookies_file: None,
        }
    }
}

fn expand_path(value: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(value).into_owned())
}

fn parse_var<T: FromStr>(key: &str, value: &str) -> AppResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| AppError::Config(format!("{} has invalid value '{}'", key, value)))
}

impl AppConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads configuration through `lookup`; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(bin) = get("YTDL_BIN") {
            config.ytdlp_bin = bin;
        }
        if let Some(dir) = get("DOWNLOAD_FOLDER") {
            config.download_dir = expand_path(&dir);
        }
        config.log_file = get("LOG_FILE_PATH").map(|p| expand_path(&p));
        if let Some(level) = get("LOG_LEVEL") {
            config.log_level = parse_var("LOG_LEVEL", &level)?;
        }
        if let Some(secs) = get("YTDLP_TIMEOUT_SECS") {
            config.extract_timeout = Duration::from_secs(parse_var("YTDLP_TIMEOUT_SECS", &secs)?);
        }
        if let Some(secs) = get("DOWNLOAD_TIMEOUT_SECS") {
            config.download_timeout = Duration::from_secs(parse_var("DOWNLOAD_TIMEOUT_SECS", &secs)?);
        }
        if let Some(retries) = get("DOWNLOAD_MAX_RETRIES") {
            config.download_retries = parse_var("DOWNLOAD_MAX_RETRIES", &retries)?;
        }
        if let Some(quality) = get("AUDIO_QUALITY_KBPS") {
            config.audio_quality_kbps = parse_var("AUDIO_QUALITY_KBPS", &quality)?;
        }
        config.cookies_file = get("YTDL_COOKIES_FILE").map(|p| expand_path(&p));

        Ok(config)
    }

    /// Creates the download directory if it doesn't exist yet.
    pub fn ensure_download_dir(&self) -> AppResult<()> {
        std::fs::create_dir_all(&self.download_dir)?;
        Ok(())
    }
}
