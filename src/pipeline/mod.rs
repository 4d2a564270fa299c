//! Pipeline entry points for listing checks.
//!
//! - `run_check`: Crawl a listing and return its verdict

pub mod crawl;

pub use crawl::CrawlController;

use crate::error::Result;
use crate::models::{Config, Verdict};
use crate::parse::FieldParser;
use crate::source::ListingSource;

/// Run the listing check against `source` with the configured cutoff and locale.
pub async fn run_check<S: ListingSource>(config: &Config, source: S) -> Result<Verdict> {
    let locale = config.locale.resolve()?;
    let cutoff = config.cutoff()?;

    log::info!(
        "Checking listing: registered from {cutoff}, prices non-increasing ({})",
        config.locale.number_format
    );

    let mut controller = CrawlController::new(source, FieldParser::new(locale), cutoff);
    Ok(controller.run().await?)
}
