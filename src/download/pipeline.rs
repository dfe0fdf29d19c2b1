//! Request-scoped orchestration.
//!
//! Two entry points:
//! - `browse()`: extract → build catalog
//! - `download()`: re-extract → plan → execute (with retry) → resolve artifact
//!
//! Metadata is fetched again at download time; nothing is cached between the
//! two calls.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use url::Url;
use uuid::Uuid;

use crate::core::config::AppConfig;
use crate::core::retry::{retry, RetryConfig};
use crate::download::catalog::{build_catalog, FormatCatalog};
use crate::download::error::DownloadError;
use crate::download::metadata::{MediaInfo, MediaSummary};
use crate::download::planner::{resolve_output, DownloadPlan, DownloadPlanner, MediaMode};
use crate::download::source::{DownloadExecutor, MetadataExtractor};

/// What the user sees before choosing a format.
#[derive(Debug, Clone)]
pub struct Browse {
    pub info: MediaInfo,
    pub summary: MediaSummary,
    pub catalog: FormatCatalog,
}

/// A finished download.
#[derive(Debug, Clone)]
pub struct DownloadOutput {
    pub path: PathBuf,
    pub plan: DownloadPlan,
    pub attempts: u32,
    /// Time spent in the executor, retries and backoff included
    pub elapsed: Duration,
}

pub struct DownloadPipeline {
    extractor: Arc<dyn MetadataExtractor>,
    executor: Arc<dyn DownloadExecutor>,
    planner: DownloadPlanner,
    retry_config: RetryConfig,
    download_dir: PathBuf,
}

impl DownloadPipeline {
    pub fn new(
        extractor: Arc<dyn MetadataExtractor>,
        executor: Arc<dyn DownloadExecutor>,
        planner: DownloadPlanner,
        retry_config: RetryConfig,
        download_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            extractor,
            executor,
            planner,
            retry_config,
            download_dir: download_dir.into(),
        }
    }

    /// Pipeline with planner and retry policy taken from `config`.
    pub fn from_config(
        config: &AppConfig,
        extractor: Arc<dyn MetadataExtractor>,
        executor: Arc<dyn DownloadExecutor>,
    ) -> Self {
        Self::new(
            extractor,
            executor,
            DownloadPlanner::new(config.audio_quality_kbps),
            RetryConfig::for_downloads(config.download_retries),
            config.download_dir.clone(),
        )
    }

    pub async fn browse(&self, url: &Url) -> Result<Browse, DownloadError> {
        log::info!("Browsing {} via {}", url, self.extractor.name());
        let info = self.extractor.extract(url).await.inspect_err(|e| {
            log::warn!("Extraction of {} failed [{}]: {}", url, e.subcategory(), e.message())
        })?;
        let catalog = build_catalog(&info.formats, info.duration_secs());

        Ok(Browse {
            summary: info.summary(),
            catalog,
            info,
        })
    }

    /// Downloads `format_id` in `mode`, returning the resolved artifact.
    pub async fn download(&self, url: &Url, mode: MediaMode, format_id: &str) -> Result<DownloadOutput, DownloadError> {
        let info = self.extractor.extract(url).await?;
        let plan = self.planner.plan(mode, &info.formats, format_id)?;
        let template = self.output_template();

        log::info!(
            "Downloading {} ({}) via {} into {}",
            url,
            plan.format_selector,
            self.executor.name(),
            template
        );

        let outcome = retry(&self.retry_config, || self.executor.execute(url, &plan, &template)).await;
        let attempts = outcome.attempts;
        let elapsed = outcome.total_duration;
        let produced = outcome.into_result().inspect_err(|e| {
            log::error!(
                "Download of {} failed after {} attempt(s) [{}]: {}",
                url,
                attempts,
                e.subcategory(),
                e.message()
            )
        })?;

        let path = resolve_output(mode, &produced)?;
        log::info!("Download finished in {:?}: {}", elapsed, path.display());

        Ok(DownloadOutput {
            path,
            plan,
            attempts,
            elapsed,
        })
    }

    /// `<download_dir>/<uuid>_%(title)s.%(ext)s`, unique per request.
    fn output_template(&self) -> String {
        self.download_dir
            .join(format!("{}_%(title)s.%(ext)s", Uuid::new_v4()))
            .to_string_lossy()
            .into_owned()
    }
}
