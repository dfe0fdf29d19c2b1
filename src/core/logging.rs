//! Logging initialization
//!
//! Console output always; a log file when `LOG_FILE_PATH` is configured.

use anyhow::Result;
use simplelog::{ColorChoice, CombinedLogger, Config, SharedLogger, TermLogger, TerminalMode, WriteLogger};
use std::fs::File;

use crate::core::config::AppConfig;

/// Initialize logger for console and (optionally) file output
///
/// # Returns
/// * `Ok(())` - Logger initialized successfully
/// * `Err(anyhow::Error)` - Log file couldn't be created or a logger is already set
pub fn init_logger(config: &AppConfig) -> Result<()> {
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        config.log_level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];

    if let Some(ref path) = config.log_file {
        let log_file =
            File::create(path).map_err(|e| anyhow::anyhow!("Failed to create log file {}: {}", path.display(), e))?;
        loggers.push(WriteLogger::new(config.log_level, Config::default(), log_file));
    }

    CombinedLogger::init(loggers).map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;

    Ok(())
}

/// Logs the effective configuration at startup
pub fn log_configuration(config: &AppConfig) {
    log::info!("yt-dlp binary: {}", config.ytdlp_bin);
    log::info!("Download folder: {}", config.download_dir.display());
    log::info!(
        "Timeouts: extract {}s, download {}s, retries {}",
        config.extract_timeout.as_secs(),
        config.download_timeout.as_secs(),
        config.download_retries
    );

    match config.cookies_file {
        Some(ref cookies) if cookies.exists() => log::info!("Cookies file: {}", cookies.display()),
        Some(ref cookies) => log::warn!("Cookies file {} not found, continuing without it", cookies.display()),
        None => log::debug!("No cookies file configured"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_logger_creates_log_file() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig {
            log_file: Some(dir.path().join("app.log")),
            ..AppConfig::default()
        };

        // Another test may have installed a logger already; the file is created either way
        let _ = init_logger(&config);
        assert!(dir.path().join("app.log").exists());
    }

    #[test]
    fn test_init_logger_bad_path() {
        let config = AppConfig {
            log_file: Some("/nonexistent-dir/for/sure/app.log".into()),
            ..AppConfig::default()
        };
        assert!(init_logger(&config).is_err());
    }
}
