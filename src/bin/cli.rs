//! Navi CLI
//!
//! Crawls recently edited Notion pages and prints what changed.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::TimeDelta;
use clap::{Parser, Subcommand};
use navi::{
    error::{AppError, Result},
    models::Config,
    pipeline::Crawler,
    render::{ForestRenderer, render_pages},
    source::NotionClient,
};

/// Navi - Recent Notion Edits Crawler
#[derive(Parser, Debug)]
#[command(
    name = "navi",
    version,
    about = "Collects recently edited Notion content as plain text"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "navi.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl pages edited within the lookback window
    Crawl {
        /// Lookback window in days (default: crawl.lookback_days)
        #[arg(short, long)]
        days: Option<i64>,

        /// Write the rendering to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate the configuration file
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load_or_default(&cli.config);
    log::debug!("Loaded configuration from {}", cli.config.display());

    match cli.command {
        Command::Crawl { days, output } => {
            config.validate()?;

            let days = days.unwrap_or(config.crawl.lookback_days);
            if days <= 0 {
                return Err(AppError::validation("--days must be positive"));
            }
            let lookback = TimeDelta::try_days(days)
                .ok_or_else(|| AppError::validation(format!("--days {} is out of range", days)))?;

            let client = NotionClient::from_env(&config.notion)?;
            let renderer = ForestRenderer::new(config.crawl.block_separator.clone());
            let crawler = Crawler::new(Arc::new(client), Arc::new(config));

            log::info!("Crawling pages edited in the last {} days...", days);
            let pages = match crawler.crawl_recent(lookback).await {
                Ok(pages) => pages,
                Err(e) if e.is_remote() => {
                    log::error!("Notion request failed, nothing was rendered: {}", e);
                    return Err(e);
                }
                Err(e) => return Err(e),
            };
            let rendered = render_pages(&pages, &renderer);

            match output {
                Some(path) => {
                    std::fs::write(&path, &rendered)?;
                    log::info!("Wrote {} pages to {}", pages.len(), path.display());
                }
                None => println!("{}", rendered),
            }
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK ({})", cli.config.display());
        }
    }

    Ok(())
}
