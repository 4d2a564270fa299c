// src/pipeline/crawl.rs

//! Page-by-page crawl over a listing.
//!
//! The controller walks pages strictly forward:
//!
//! ```text
//! Start -> Fetching(1) -> Validating(1) -> Fetching(2) -> ... -> Done
//!                               \-> Done(Failed) on the first violation
//! ```
//!
//! The price watermark is the only state carried between pages. Fetch and
//! extraction failures abort the run as [`CrawlError`]; contract violations
//! end it with [`Verdict::Failed`].

use chrono::Utc;

use crate::error::CrawlError;
use crate::models::{CrawlState, CrawlSummary, PageResult, RawItem, RegistrationDate, Verdict};
use crate::parse::FieldParser;
use crate::services::{ItemExtractor, PageOutcome, PageValidator};
use crate::source::ListingSource;

/// Crawl phases.
enum Phase {
    Start,
    Fetching { page: u32 },
    Validating { page: u32, blocks: Vec<RawItem> },
    Done(Verdict),
}

/// Drives the crawl over a [`ListingSource`].
pub struct CrawlController<S> {
    source: S,
    extractor: ItemExtractor,
    validator: PageValidator,
    cutoff: RegistrationDate,
}

impl<S: ListingSource> CrawlController<S> {
    /// Create a controller checking items against `cutoff`.
    pub fn new(source: S, parser: FieldParser, cutoff: RegistrationDate) -> Self {
        Self {
            source,
            extractor: ItemExtractor::new(parser),
            validator: PageValidator::new(),
            cutoff,
        }
    }

    /// Run the crawl until the last page or the first failure.
    pub async fn run(&mut self) -> Result<Verdict, CrawlError> {
        let started_at = Utc::now();
        let mut state = CrawlState::new(self.cutoff);
        let mut last_page = 1;
        let mut total_items = 0;
        let mut items_checked = 0;
        let mut phase = Phase::Start;

        loop {
            phase = match phase {
                Phase::Start => {
                    // The landing page is checked even if the listing reports no pages.
                    last_page = self.source.total_pages().await?.max(1);
                    total_items = self.source.total_items().await?;
                    log::info!("Found {total_items} cars on {last_page} pages");
                    Phase::Fetching { page: 1 }
                }

                Phase::Fetching { page } => {
                    log::info!("Processing page #{page}:");
                    let blocks = self.source.fetch_page(page).await?;
                    log::debug!("Found {} results on the page #{page}", blocks.len());
                    Phase::Validating { page, blocks }
                }

                Phase::Validating { page, blocks } => {
                    let items = self
                        .extractor
                        .extract(&blocks)
                        .map_err(|source| CrawlError::Extraction { page, source })?;
                    let result = PageResult::new(page, items);

                    match self
                        .validator
                        .validate(&result, state.cutoff, state.watermark)
                    {
                        PageOutcome::Violated(violation) => {
                            log::error!("Validation failed: {violation}");
                            Phase::Done(Verdict::Failed(violation))
                        }
                        PageOutcome::Continue(watermark) => {
                            state.watermark = watermark;
                            items_checked += result.total_on_page;

                            if page < last_page {
                                Phase::Fetching { page: page + 1 }
                            } else {
                                if items_checked as u64 != total_items {
                                    log::warn!(
                                        "Checked {items_checked} cars but the listing announced {total_items}"
                                    );
                                }
                                log::info!("OK, validation is complete. No issues are found");
                                Phase::Done(Verdict::Passed(CrawlSummary {
                                    pages_checked: last_page,
                                    items_checked,
                                    total_items_reported: total_items,
                                    final_watermark: state.watermark,
                                    started_at,
                                    finished_at: Utc::now(),
                                }))
                            }
                        }
                    }
                }

                Phase::Done(verdict) => return Ok(verdict),
            };
        }
    }
}
