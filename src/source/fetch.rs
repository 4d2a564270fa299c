//! Page transports.
//!
//! A [`PageFetcher`] returns the HTML of one listing page, either live over
//! HTTP or replayed from pages saved to disk.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{Result, SourceError};
use crate::models::{Config, SiteConfig};
use crate::utils::http;
use crate::utils::url::listing_url;

/// Trait for retrieving the HTML of a listing page.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, page: u32) -> std::result::Result<String, SourceError>;
}

/// Fetches listing pages from the live site.
pub struct HttpFetcher {
    client: reqwest::Client,
    site: SiteConfig,
    delay: Duration,
}

impl HttpFetcher {
    /// Create a fetcher from the site and crawler configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let client = http::create_async_client(&config.crawler)?;
        // Fail on a broken base URL before any request is made.
        listing_url(&config.site, 1)?;

        Ok(Self {
            client,
            site: config.site.clone(),
            delay: Duration::from_millis(config.crawler.request_delay_ms),
        })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, page: u32) -> std::result::Result<String, SourceError> {
        let url = listing_url(&self.site, page).map_err(|e| SourceError::fetch(page, e))?;

        if page > 1 && !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        log::debug!("GET {url}");
        http::fetch_text(&self.client, url.as_str())
            .await
            .map_err(|e| SourceError::fetch(page, e))
    }
}

/// Replays listing pages saved as `page-{n}.html` in a directory.
#[derive(Debug, Clone)]
pub struct DirFetcher {
    root_dir: PathBuf,
}

impl DirFetcher {
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    /// Path of the saved file for `page`.
    pub fn page_path(&self, page: u32) -> PathBuf {
        self.root_dir.join(format!("page-{page}.html"))
    }
}

#[async_trait]
impl PageFetcher for DirFetcher {
    async fn fetch(&self, page: u32) -> std::result::Result<String, SourceError> {
        let path = self.page_path(page);
        log::debug!("Reading {}", path.display());
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| SourceError::fetch(page, format!("{}: {e}", path.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_dir_fetcher_reads_page_file() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("page-2.html"), "<html>2</html>").unwrap();

        let fetcher = DirFetcher::new(tmp.path());
        assert_eq!(fetcher.fetch(2).await.unwrap(), "<html>2</html>");
    }

    #[tokio::test]
    async fn test_dir_fetcher_missing_page() {
        let tmp = TempDir::new().unwrap();
        let fetcher = DirFetcher::new(tmp.path());

        let err = fetcher.fetch(5).await.unwrap_err();
        assert!(matches!(err, SourceError::Fetch { page: 5, .. }));
    }

    #[test]
    fn test_http_fetcher_rejects_bad_base_url() {
        let mut config = Config::default();
        config.site.base_url = "not a url".to_string();
        assert!(HttpFetcher::new(&config).is_err());
    }
}
