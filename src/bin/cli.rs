//! listing-check CLI
//!
//! Runs the listing check once and prints the report. Exits with status 1
//! when the listing breaks its contract or the run cannot complete.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use listing_check::{
    error::Result,
    models::{Config, Verdict},
    pipeline,
    report::{self, ReportFormat},
    source::{DirFetcher, HtmlListingSource, HttpFetcher, PageSelectors},
};

/// listing-check - Verify the date filter and price order of a car listing
#[derive(Parser, Debug)]
#[command(
    name = "listing-check",
    version,
    about = "Acceptance check for a paginated car listing"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "data/config.toml", global = true)]
    config: PathBuf,

    /// Override the listing search URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Override the minimum registration year
    #[arg(long, global = true)]
    min_year: Option<i32>,

    /// Replay saved pages (page-1.html, page-2.html, ...) instead of fetching
    #[arg(long, global = true)]
    pages_dir: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl the listing and check it (default)
    Check,

    /// Validate the configuration file
    Validate,
}

/// Initialize logging based on verbosity flag and configured level.
fn init_logging(verbose: bool, level: &str) {
    let level = if verbose { "debug" } else { level };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Apply command-line overrides to the loaded configuration.
fn apply_overrides(cli: &Cli, mut config: Config) -> Config {
    if let Some(base_url) = &cli.base_url {
        config.site.base_url = base_url.clone();
    }
    if let Some(min_year) = cli.min_year {
        config.site.min_year = min_year;
    }
    config
}

async fn check(cli: &Cli, config: &Config) -> Result<Verdict> {
    config.validate(cli.pages_dir.is_none())?;
    let selectors = PageSelectors::from_config(&config.selectors)?;

    match &cli.pages_dir {
        Some(dir) => {
            log::info!("Replaying saved pages from {}", dir.display());
            let source = HtmlListingSource::new(DirFetcher::new(dir), selectors);
            pipeline::run_check(config, source).await
        }
        None => {
            log::info!("Fetching listing from {}", config.site.base_url);
            let source = HtmlListingSource::new(HttpFetcher::new(config)?, selectors);
            pipeline::run_check(config, source).await
        }
    }
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Only the level is read before the logger exists; load failures are
    // reported by the full load below.
    let level = Config::load(&cli.config)
        .map(|config| config.logging.level)
        .unwrap_or_else(|_| "info".to_string());
    init_logging(cli.verbose, &level);

    let config = apply_overrides(&cli, Config::load_or_default(&cli.config));

    match cli.command.as_ref().unwrap_or(&Command::Check) {
        Command::Validate => {
            log::info!("Validating configuration...");
            match config.validate(cli.pages_dir.is_none()) {
                Ok(()) => {
                    log::info!("✓ Config OK");
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    log::error!("Config validation failed: {}", e);
                    ExitCode::FAILURE
                }
            }
        }

        Command::Check => {
            let format = if cli.json {
                ReportFormat::Json
            } else {
                ReportFormat::Text
            };

            let verdict = match check(&cli, &config).await {
                Ok(verdict) => verdict,
                Err(e) => {
                    log::error!("Check aborted: {}", e);
                    println!("{}", report::render_error(&e, format));
                    return ExitCode::FAILURE;
                }
            };

            match report::render(&verdict, format) {
                Ok(text) => println!("{text}"),
                Err(e) => {
                    log::error!("Failed to render report: {}", e);
                    return ExitCode::FAILURE;
                }
            }

            if verdict.is_passed() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
    }
}
