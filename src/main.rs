use anyhow::Result;
use dotenvy::dotenv;
use std::sync::Arc;
use url::Url;

use clipdeck::cli::{error_hint, parse_media_url, Cli, Commands};
use clipdeck::core::logging::{init_logger, log_configuration};
use clipdeck::core::{AppConfig, AppError, AppResult};
use clipdeck::download::{DownloadPipeline, MediaMode, YtDlpSource};

/// Entry point for the `clipdeck` command line
///
/// # Errors
/// Returns an error if configuration is invalid or the requested operation fails.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    // Load environment variables from .env if present
    let _ = dotenv();

    let config = AppConfig::from_env()?;
    init_logger(&config)?;
    log_configuration(&config);

    if let Err(err) = run(cli, &config).await {
        if let Some(hint) = error_hint(&err) {
            eprintln!("{}", hint);
        }
        return Err(err.into());
    }

    Ok(())
}

async fn run(cli: Cli, config: &AppConfig) -> AppResult<()> {
    let source = Arc::new(YtDlpSource::new(config));
    let pipeline = DownloadPipeline::from_config(config, source.clone(), source);

    match cli.command {
        Commands::Formats { url, mode } => {
            let url = parse_media_url(&url)?;
            print_formats(&pipeline, &url, mode).await?;
        }
        Commands::Download { url, mode, format_id } => {
            let url = parse_media_url(&url)?;
            config.ensure_download_dir()?;

            let output = pipeline.download(&url, mode, &format_id).await?;
            println!("{}", output.path.display());
        }
    }

    Ok(())
}

async fn print_formats(pipeline: &DownloadPipeline, url: &Url, mode: MediaMode) -> AppResult<()> {
    let browse = pipeline.browse(url).await.map_err(AppError::from)?;
    let summary = &browse.summary;

    println!("{}", summary.title);
    println!("Channel:     {} ({} subscribers)", summary.channel, summary.subscribers);
    println!("Duration:    {}", summary.duration);
    println!("Views/Likes: {} / {}", summary.views, summary.likes);
    if let Some(ref thumbnail) = summary.thumbnail {
        println!("Thumbnail:   {}", thumbnail);
    }
    println!();

    let entries = browse.catalog.ensure_options(mode)?;
    println!("{:<12} {:<10} {}", "FORMAT", "QUALITY", "SIZE");
    for entry in entries {
        println!("{:<12} {:<10} {}", entry.format_id, entry.quality, entry.size);
    }

    Ok(())
}
