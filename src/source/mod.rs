//! Listing source abstractions.
//!
//! The crawl only needs three things from the site: how many pages there
//! are, how many items the listing announces, and the raw text blocks of a
//! given page. [`ListingSource`] is that boundary; [`HtmlListingSource`]
//! implements it over server-rendered HTML delivered by a [`PageFetcher`].

pub mod fetch;
pub mod html;

use async_trait::async_trait;

use crate::error::SourceError;
use crate::models::RawItem;

// Re-export for convenience
pub use fetch::{DirFetcher, HttpFetcher, PageFetcher};
pub use html::{HtmlListingSource, PageSelectors};

/// Trait for listing backends.
#[async_trait]
pub trait ListingSource: Send {
    /// Number of the last result page.
    async fn total_pages(&mut self) -> Result<u32, SourceError>;

    /// Item count announced by the listing.
    async fn total_items(&mut self) -> Result<u64, SourceError>;

    /// Raw item blocks of a page, in display order. Pages start at 1.
    async fn fetch_page(&mut self, page: u32) -> Result<Vec<RawItem>, SourceError>;
}
