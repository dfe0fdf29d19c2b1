//! YtDlpSource, the process-backed collaborator.
//!
//! Extraction runs `yt-dlp --dump-single-json`; downloads run yt-dlp with the
//! plan's arguments and `--print after_move:filepath` so the final path (after
//! merge or transcode) comes back on stdout.

use async_trait::async_trait;
use std::path::PathBuf;
use std::process::{Output, Stdio};
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use url::Url;

use crate::core::config::AppConfig;
use crate::download::error::DownloadError;
use crate::download::metadata::MediaInfo;
use crate::download::planner::DownloadPlan;
use crate::download::source::{DownloadExecutor, MetadataExtractor};
use crate::download::ytdlp_errors::{extraction_error, transfer_error};

/// yt-dlp invoked as a subprocess.
#[derive(Debug, Clone)]
pub struct YtDlpSource {
    bin: String,
    cookies_file: Option<PathBuf>,
    extract_timeout: Duration,
    download_timeout: Duration,
}

impl YtDlpSource {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            bin: config.ytdlp_bin.clone(),
            cookies_file: config.cookies_file.clone(),
            extract_timeout: config.extract_timeout,
            download_timeout: config.download_timeout,
        }
    }

    fn add_cookies_args(&self, args: &mut Vec<String>) {
        match self.cookies_file {
            Some(ref cookies) if cookies.exists() => {
                args.push("--cookies".to_string());
                args.push(cookies.to_string_lossy().into_owned());
            }
            Some(ref cookies) => {
                log::debug!("Cookies file {} missing, running without cookies", cookies.display());
            }
            None => {}
        }
    }

    fn metadata_args(&self, url: &Url) -> Vec<String> {
        let mut args = vec![
            "--dump-single-json".to_string(),
            "--no-playlist".to_string(),
            "--no-warnings".to_string(),
        ];
        self.add_cookies_args(&mut args);
        args.push(url.to_string());
        args
    }

    fn download_args(&self, url: &Url, plan: &DownloadPlan, output_template: &str) -> Vec<String> {
        let mut args = plan.ytdlp_args();
        args.extend([
            "-o".to_string(),
            output_template.to_string(),
            "--no-simulate".to_string(),
            "--print".to_string(),
            "after_move:filepath".to_string(),
            "--no-warnings".to_string(),
            "--no-progress".to_string(),
        ]);
        self.add_cookies_args(&mut args);
        args.push(url.to_string());
        args
    }

    /// Runs yt-dlp with `args`, killing it if `limit` elapses.
    async fn run(&self, args: &[String], limit: Duration) -> Result<Output, DownloadError> {
        log::debug!("Running {} {}", self.bin, args.join(" "));

        let child = Command::new(&self.bin)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output();

        match timeout(limit, child).await {
            Ok(Ok(output)) => Ok(output),
            Ok(Err(e)) => {
                log::error!("Failed to spawn {}: {}", self.bin, e);
                Err(DownloadError::Transfer(format!("failed to run {}: {}", self.bin, e)))
            }
            Err(_) => {
                log::error!("{} timed out after {:?}, killing", self.bin, limit);
                Err(DownloadError::Timeout(format!("{} did not finish within {:?}", self.bin, limit)))
            }
        }
    }
}

/// Last non-empty stdout line, which `--print after_move:filepath` writes.
fn printed_path(stdout: &str) -> Option<PathBuf> {
    stdout
        .lines()
        .map(str::trim)
        .rev()
        .find(|l| !l.is_empty())
        .map(PathBuf::from)
}

#[async_trait]
impl MetadataExtractor for YtDlpSource {
    fn name(&self) -> &str {
        "yt-dlp"
    }

    async fn extract(&self, url: &Url) -> Result<MediaInfo, DownloadError> {
        let args = self.metadata_args(url);
        let output = match self.run(&args, self.extract_timeout).await {
            Ok(output) => output,
            // Spawn failures and timeouts are extraction failures here
            Err(DownloadError::Timeout(cause)) | Err(DownloadError::Transfer(cause)) => {
                return Err(DownloadError::Extraction(cause))
            }
            Err(e) => return Err(e),
        };

        if !output.status.success() {
            return Err(extraction_error(&String::from_utf8_lossy(&output.stderr)));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let info = MediaInfo::from_json(&stdout).map_err(|e| {
            log::warn!("yt-dlp returned unparseable metadata for {}: {}", url, e);
            DownloadError::Extraction(format!("invalid metadata document: {}", e))
        })?;

        if info.formats.is_empty() {
            log::warn!("yt-dlp returned no formats for {}", url);
            return Err(DownloadError::Extraction("no retrievable formats".to_string()));
        }

        log::info!(
            "Extracted '{}' from {} with {} formats",
            info.title.as_deref().unwrap_or("untitled"),
            url,
            info.formats.len()
        );
        Ok(info)
    }
}

#[async_trait]
impl DownloadExecutor for YtDlpSource {
    fn name(&self) -> &str {
        "yt-dlp"
    }

    async fn execute(&self, url: &Url, plan: &DownloadPlan, output_template: &str) -> Result<PathBuf, DownloadError> {
        let args = self.download_args(url, plan, output_template);
        let output = self.run(&args, self.download_timeout).await?;

        if !output.status.success() {
            return Err(transfer_error(&String::from_utf8_lossy(&output.stderr)));
        }

        printed_path(&String::from_utf8_lossy(&output.stdout)).ok_or_else(|| {
            DownloadError::OutputNotFound(format!("yt-dlp reported no output file for {}", output_template))
        })
    }
}
