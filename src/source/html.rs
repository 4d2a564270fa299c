//! HTML listing source.
//!
//! Reads the search-results markup with CSS selectors. The landing page
//! (page 1) is parsed once and serves both the page-level metadata and the
//! first page of items.

use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};

use crate::error::{Result, SourceError};
use crate::models::config::{ListingSelectors, parse_selector};
use crate::models::RawItem;
use crate::source::{ListingSource, PageFetcher};
use crate::utils::digits_only;

/// Compiled selectors for a listing page.
#[derive(Debug, Clone)]
pub struct PageSelectors {
    results: Selector,
    item: Selector,
    date: Selector,
    price: Selector,
    results_amount: Selector,
    pagination: Selector,
    last_page_offset: usize,
}

impl PageSelectors {
    /// Compile the configured selectors.
    pub fn from_config(config: &ListingSelectors) -> Result<Self> {
        Ok(Self {
            results: parse_selector(&config.results)?,
            item: parse_selector(&config.item)?,
            date: parse_selector(&config.date)?,
            price: parse_selector(&config.price)?,
            results_amount: parse_selector(&config.results_amount)?,
            pagination: parse_selector(&config.pagination)?,
            last_page_offset: config.last_page_offset,
        })
    }
}

/// Metadata read from the landing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingMeta {
    pub total_pages: u32,
    pub total_items: u64,
}

/// Visible text of an element with whitespace collapsed.
fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

fn results_container<'a>(
    document: &'a Html,
    selectors: &PageSelectors,
    page: u32,
) -> std::result::Result<ElementRef<'a>, SourceError> {
    document
        .select(&selectors.results)
        .next()
        .ok_or_else(|| SourceError::missing(page, "results container"))
}

/// Read the raw item blocks of a page, in document order.
pub fn parse_items(
    html: &str,
    page: u32,
    selectors: &PageSelectors,
) -> std::result::Result<Vec<RawItem>, SourceError> {
    let document = Html::parse_document(html);
    let results = results_container(&document, selectors, page)?;

    results
        .select(&selectors.item)
        .enumerate()
        .map(|(index, item)| -> std::result::Result<RawItem, SourceError> {
            let date = item.select(&selectors.date).next().ok_or_else(|| {
                SourceError::missing(page, format!("registration date of item {index}"))
            })?;
            let price = item
                .select(&selectors.price)
                .next()
                .ok_or_else(|| SourceError::missing(page, format!("price of item {index}")))?;
            Ok(RawItem::new(element_text(date), element_text(price)))
        })
        .collect()
}

/// Read the announced item count and the last page number.
///
/// A listing without a pagination list has a single page.
pub fn parse_meta(
    html: &str,
    page: u32,
    selectors: &PageSelectors,
) -> std::result::Result<ListingMeta, SourceError> {
    let document = Html::parse_document(html);

    let amount_text = document
        .select(&selectors.results_amount)
        .next()
        .map(element_text)
        .ok_or_else(|| SourceError::missing(page, "results amount"))?;
    let total_items = digits_only(&amount_text)
        .parse::<u64>()
        .map_err(|_| SourceError::Metadata {
            page,
            what: "results amount",
            text: amount_text.clone(),
        })?;

    let results = results_container(&document, selectors, page)?;
    let entries: Vec<ElementRef<'_>> = results.select(&selectors.pagination).collect();
    if entries.is_empty() {
        return Ok(ListingMeta {
            total_pages: 1,
            total_items,
        });
    }

    let last_page_text = entries
        .len()
        .checked_sub(1 + selectors.last_page_offset)
        .map(|index| element_text(entries[index]))
        .ok_or_else(|| SourceError::Metadata {
            page,
            what: "last page number",
            text: format!("{} pagination entries", entries.len()),
        })?;
    let total_pages = digits_only(&last_page_text)
        .parse::<u32>()
        .map_err(|_| SourceError::Metadata {
            page,
            what: "last page number",
            text: last_page_text.clone(),
        })?;

    Ok(ListingMeta {
        total_pages,
        total_items,
    })
}

/// [`ListingSource`] over HTML pages delivered by a [`PageFetcher`].
pub struct HtmlListingSource<F> {
    fetcher: F,
    selectors: PageSelectors,
    meta: Option<ListingMeta>,
    landing_items: Option<Vec<RawItem>>,
}

impl<F: PageFetcher> HtmlListingSource<F> {
    pub fn new(fetcher: F, selectors: PageSelectors) -> Self {
        Self {
            fetcher,
            selectors,
            meta: None,
            landing_items: None,
        }
    }

    /// Fetch and parse the landing page once.
    async fn meta(&mut self) -> std::result::Result<ListingMeta, SourceError> {
        if let Some(meta) = self.meta {
            return Ok(meta);
        }

        let html = self.fetcher.fetch(1).await?;
        let meta = parse_meta(&html, 1, &self.selectors)?;
        self.landing_items = Some(parse_items(&html, 1, &self.selectors)?);
        self.meta = Some(meta);
        Ok(meta)
    }
}

#[async_trait]
impl<F: PageFetcher> ListingSource for HtmlListingSource<F> {
    async fn total_pages(&mut self) -> std::result::Result<u32, SourceError> {
        Ok(self.meta().await?.total_pages)
    }

    async fn total_items(&mut self) -> std::result::Result<u64, SourceError> {
        Ok(self.meta().await?.total_items)
    }

    async fn fetch_page(&mut self, page: u32) -> std::result::Result<Vec<RawItem>, SourceError> {
        if page == 1 {
            if let Some(items) = self.landing_items.take() {
                return Ok(items);
            }
        }

        let html = self.fetcher.fetch(page).await?;
        parse_items(&html, page, &self.selectors)
    }
}
