//! Application configuration structures.

use std::fs;
use std::path::Path;

use scraper::Selector;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::locale::NumberLocale;
use crate::models::RegistrationDate;

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Listing location and filter parameters
    #[serde(default)]
    pub site: SiteConfig,

    /// HTTP behavior settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Number formatting used by prices
    #[serde(default)]
    pub locale: LocaleConfig,

    /// CSS selectors locating listing elements
    #[serde(default)]
    pub selectors: ListingSelectors,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {}: {}. Using defaults.",
                path.as_ref().display(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    ///
    /// `base_url` is only required when pages are fetched over HTTP.
    pub fn validate(&self, require_base_url: bool) -> Result<()> {
        if require_base_url && self.site.base_url.trim().is_empty() {
            return Err(AppError::validation("site.base_url is empty"));
        }
        if !(1900..=9999).contains(&self.site.min_year) {
            return Err(AppError::validation(format!(
                "site.min_year {} is out of range",
                self.site.min_year
            )));
        }
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::validation("crawler.user_agent is empty"));
        }
        if self.crawler.timeout_secs == 0 {
            return Err(AppError::validation("crawler.timeout_secs must be > 0"));
        }
        self.locale.resolve()?;
        self.selectors.validate()?;
        Ok(())
    }

    /// The earliest registration date the listing filter admits.
    pub fn cutoff(&self) -> Result<RegistrationDate> {
        RegistrationDate::start_of_year(self.site.min_year).ok_or_else(|| {
            AppError::config(format!("site.min_year {} is not a valid year", self.site.min_year))
        })
    }
}

/// Listing location and query parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Search page of the marketplace
    #[serde(default)]
    pub base_url: String,

    /// Minimum first-registration year requested from the listing
    #[serde(default = "defaults::min_year")]
    pub min_year: i32,

    #[serde(default = "defaults::sort_param")]
    pub sort_param: String,

    /// Sort order requested from the listing (highest price first)
    #[serde(default = "defaults::sort_value")]
    pub sort_value: String,

    #[serde(default = "defaults::year_param")]
    pub year_param: String,

    #[serde(default = "defaults::page_param")]
    pub page_param: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            min_year: defaults::min_year(),
            sort_param: defaults::sort_param(),
            sort_value: defaults::sort_value(),
            year_param: defaults::year_param(),
            page_param: defaults::page_param(),
        }
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Delay between page requests in milliseconds
    #[serde(default = "defaults::request_delay")]
    pub request_delay_ms: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            request_delay_ms: defaults::request_delay(),
        }
    }
}

/// Number locale selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocaleConfig {
    /// Locale tag, e.g. `de-DE`
    #[serde(default = "defaults::number_format")]
    pub number_format: String,

    /// Overrides the tag's grouping separator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grouping_separator: Option<char>,

    /// Overrides the tag's decimal separator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decimal_separator: Option<char>,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            number_format: defaults::number_format(),
            grouping_separator: None,
            decimal_separator: None,
        }
    }
}

impl LocaleConfig {
    /// Resolve the tag and overrides into concrete separators.
    pub fn resolve(&self) -> Result<NumberLocale> {
        let base = NumberLocale::from_tag(&self.number_format).ok_or_else(|| {
            AppError::validation(format!(
                "locale.number_format '{}' is not a known locale",
                self.number_format
            ))
        })?;
        let locale = NumberLocale::new(
            self.grouping_separator.unwrap_or(base.grouping_separator),
            self.decimal_separator.unwrap_or(base.decimal_separator),
        );

        if locale.grouping_separator == locale.decimal_separator {
            return Err(AppError::validation(
                "locale grouping and decimal separators must differ",
            ));
        }
        if locale.grouping_separator.is_ascii_digit() || locale.decimal_separator.is_ascii_digit()
        {
            return Err(AppError::validation("locale separators must not be digits"));
        }
        Ok(locale)
    }
}

/// CSS selectors for reading a listing page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingSelectors {
    /// Container of the search results
    #[serde(default = "defaults::results_selector")]
    pub results: String,

    /// Each item inside the results container
    #[serde(default = "defaults::item_selector")]
    pub item: String,

    /// Element holding the registration date within an item (first match)
    #[serde(default = "defaults::date_selector")]
    pub date: String,

    /// Element holding the price within an item
    #[serde(default = "defaults::price_selector")]
    pub price: String,

    /// Element announcing the total number of results
    #[serde(default = "defaults::results_amount_selector")]
    pub results_amount: String,

    /// Entries of the pagination list within the results container
    #[serde(default = "defaults::pagination_selector")]
    pub pagination: String,

    /// Position of the last page number counted back from the final entry
    #[serde(default = "defaults::last_page_offset")]
    pub last_page_offset: usize,
}

impl Default for ListingSelectors {
    fn default() -> Self {
        Self {
            results: defaults::results_selector(),
            item: defaults::item_selector(),
            date: defaults::date_selector(),
            price: defaults::price_selector(),
            results_amount: defaults::results_amount_selector(),
            pagination: defaults::pagination_selector(),
            last_page_offset: defaults::last_page_offset(),
        }
    }
}

impl ListingSelectors {
    /// Check that every selector parses.
    pub fn validate(&self) -> Result<()> {
        for s in [
            &self.results,
            &self.item,
            &self.date,
            &self.price,
            &self.results_amount,
            &self.pagination,
        ] {
            parse_selector(s)?;
        }
        Ok(())
    }
}

/// Parse a CSS selector, mapping failures into [`AppError::Selector`].
pub fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default log filter when `RUST_LOG` is unset
    #[serde(default = "defaults::log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
        }
    }
}

mod defaults {
    // Site defaults
    pub fn min_year() -> i32 {
        2015
    }
    pub fn sort_param() -> String {
        "sort".into()
    }
    pub fn sort_value() -> String {
        "PRICE_DESC".into()
    }
    pub fn year_param() -> String {
        "yearMin".into()
    }
    pub fn page_param() -> String {
        "page".into()
    }

    // Crawler defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; listing-check/0.1)".into()
    }
    pub fn timeout() -> u64 {
        10
    }
    pub fn request_delay() -> u64 {
        250
    }

    // Locale defaults
    pub fn number_format() -> String {
        "de-DE".into()
    }

    // Selector defaults
    pub fn results_selector() -> String {
        "div[data-qa-selector='results-found']".into()
    }
    pub fn item_selector() -> String {
        "div[data-qa-selector='ad-items'] a[data-qa-selector='ad']".into()
    }
    pub fn date_selector() -> String {
        "ul[data-qa-selector='spec-list'] li[data-qa-selector='spec']".into()
    }
    pub fn price_selector() -> String {
        "div[data-qa-selector='price']".into()
    }
    pub fn results_amount_selector() -> String {
        "div[data-qa-selector='results-amount']".into()
    }
    pub fn pagination_selector() -> String {
        "ul.pagination > li".into()
    }
    pub fn last_page_offset() -> usize {
        2
    }

    // Logging defaults
    pub fn log_level() -> String {
        "info".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http_config() -> Config {
        let mut config = Config::default();
        config.site.base_url = "https://cars.example.com/search/".to_string();
        config
    }

    #[test]
    fn validate_default_config_ok_without_http() {
        assert!(Config::default().validate(false).is_ok());
    }

    #[test]
    fn validate_requires_base_url_for_http() {
        assert!(Config::default().validate(true).is_err());
        assert!(http_config().validate(true).is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = http_config();
        config.crawler.user_agent = "  ".to_string();
        assert!(config.validate(true).is_err());
    }

    #[test]
    fn validate_rejects_bad_selector() {
        let mut config = http_config();
        config.selectors.price = "[[invalid".to_string();
        assert!(config.validate(true).is_err());
    }

    #[test]
    fn locale_overrides_apply() {
        let locale = LocaleConfig {
            number_format: "de-CH".to_string(),
            grouping_separator: Some(' '),
            decimal_separator: None,
        };
        assert_eq!(locale.resolve().unwrap(), NumberLocale::new(' ', '.'));
    }

    #[test]
    fn locale_rejects_equal_separators() {
        let locale = LocaleConfig {
            number_format: "de-DE".to_string(),
            grouping_separator: Some(','),
            decimal_separator: None,
        };
        assert!(locale.resolve().is_err());
    }

    #[test]
    fn cutoff_is_january_of_min_year() {
        let config = Config::default();
        assert_eq!(
            config.cutoff().unwrap(),
            RegistrationDate::start_of_year(2015).unwrap()
        );
    }

    #[test]
    fn load_or_default_reads_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[site]\nmin_year = 2019\n").unwrap();

        assert_eq!(Config::load_or_default(&path).site.min_year, 2019);
    }

    #[test]
    fn load_or_default_falls_back_on_missing_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let config = Config::load_or_default(tmp.path().join("absent.toml"));

        assert_eq!(config.site.min_year, 2015);
        assert!(config.site.base_url.is_empty());
    }

    #[test]
    fn load_or_default_falls_back_on_bad_toml() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[site\nmin_year = ").unwrap();

        assert_eq!(Config::load_or_default(&path).selectors.last_page_offset, 2);
    }

    #[test]
    fn parses_partial_toml() {
        let config: Config = toml::from_str(
            r#"
            [site]
            base_url = "https://cars.example.com/search/"
            min_year = 2018

            [locale]
            number_format = "en-US"
            "#,
        )
        .unwrap();
        assert_eq!(config.site.min_year, 2018);
        assert_eq!(config.site.sort_value, "PRICE_DESC");
        assert_eq!(config.locale.resolve().unwrap(), NumberLocale::US);
        assert_eq!(config.selectors.last_page_offset, 2);
    }
}
