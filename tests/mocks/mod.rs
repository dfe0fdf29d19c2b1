//! In-memory collaborators for pipeline tests
//!
//! The extractor serves a fixed `MediaInfo`; the executor writes a file into
//! the directory named by the output template instead of running yt-dlp.

#![allow(dead_code)]

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use url::Url;

use clipdeck::download::{DownloadError, DownloadExecutor, DownloadPlan, MediaInfo, MetadataExtractor};

pub struct MockExtractor {
    info: Result<MediaInfo, DownloadError>,
    calls: AtomicU32,
}

impl MockExtractor {
    pub fn new(info: MediaInfo) -> Self {
        Self {
            info: Ok(info),
            calls: AtomicU32::new(0),
        }
    }

    pub fn failing(error: DownloadError) -> Self {
        Self {
            info: Err(error),
            calls: AtomicU32::new(0),
        }
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MetadataExtractor for MockExtractor {
    fn name(&self) -> &str {
        "mock-extractor"
    }

    async fn extract(&self, _url: &Url) -> Result<MediaInfo, DownloadError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.info.clone()
    }
}

/// How the mock executor behaves on each call.
#[derive(Debug, Clone)]
pub struct MockExecutorConfig {
    /// Title substituted for `%(title)s`
    pub title: String,
    /// Extension reported back as the produced file
    pub reported_ext: String,
    /// Extension actually written to disk; `None` writes nothing
    pub written_ext: Option<String>,
    /// Errors returned by the first calls, in order
    pub failures: Vec<DownloadError>,
}

impl Default for MockExecutorConfig {
    fn default() -> Self {
        Self {
            title: "Demo Clip".to_string(),
            reported_ext: "mp4".to_string(),
            written_ext: Some("mp4".to_string()),
            failures: Vec::new(),
        }
    }
}

impl MockExecutorConfig {
    /// yt-dlp reporting `reported` while `written` lands on disk
    pub fn producing(reported: &str, written: Option<&str>) -> Self {
        Self {
            reported_ext: reported.to_string(),
            written_ext: written.map(str::to_string),
            ..Self::default()
        }
    }

    pub fn with_failures(mut self, failures: Vec<DownloadError>) -> Self {
        self.failures = failures;
        self
    }
}

pub struct MockExecutor {
    config: MockExecutorConfig,
    calls: AtomicU32,
    plans: Mutex<Vec<DownloadPlan>>,
    templates: Mutex<Vec<String>>,
}

impl MockExecutor {
    pub fn new(config: MockExecutorConfig) -> Self {
        Self {
            config,
            calls: AtomicU32::new(0),
            plans: Mutex::new(Vec::new()),
            templates: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn plans(&self) -> Vec<DownloadPlan> {
        self.plans.lock().unwrap().clone()
    }

    pub fn templates(&self) -> Vec<String> {
        self.templates.lock().unwrap().clone()
    }

    fn render(&self, template: &str, ext: &str) -> PathBuf {
        PathBuf::from(
            template
                .replace("%(title)s", &self.config.title)
                .replace("%(ext)s", ext),
        )
    }
}

#[async_trait]
impl DownloadExecutor for MockExecutor {
    fn name(&self) -> &str {
        "mock-executor"
    }

    async fn execute(&self, _url: &Url, plan: &DownloadPlan, output_template: &str) -> Result<PathBuf, DownloadError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) as usize;
        self.plans.lock().unwrap().push(plan.clone());
        self.templates.lock().unwrap().push(output_template.to_string());

        if let Some(error) = self.config.failures.get(call) {
            return Err(error.clone());
        }

        if let Some(ref ext) = self.config.written_ext {
            let path = self.render(output_template, ext);
            std::fs::write(&path, b"media").map_err(|e| DownloadError::Transfer(e.to_string()))?;
        }

        Ok(self.render(output_template, &self.config.reported_ext))
    }
}
