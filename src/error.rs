// src/error.rs

//! Unified error handling for the listing check.
//!
//! Three failure families never mix:
//! - [`FieldError`] / [`ExtractionError`]: a date or price token could not be read
//! - [`SourceError`]: the listing collaborator could not deliver a page or its metadata
//! - invariant violations, which are not errors at all but a
//!   [`Verdict::Failed`](crate::models::Verdict::Failed)
//!
//! [`CrawlError`] is what aborts a run; [`AppError`] covers the surrounding
//! application (configuration, I/O, HTTP client setup).

use std::fmt;

use thiserror::Error;

/// Result type alias for application operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// CSS selector parsing failed
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// The crawl aborted before reaching a verdict
    #[error(transparent)]
    Crawl(#[from] CrawlError),
}

impl AppError {
    /// Create a selector parsing error.
    pub fn selector(selector: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

/// A single field token could not be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// The date residue is not shaped `MM/YYYY`
    #[error("cannot read registration date from {text:?} (residue {residue:?}, expected MM/YYYY)")]
    Date { text: String, residue: String },

    /// The price residue is not a number in the configured locale
    #[error("cannot read price from {text:?} (residue {residue:?})")]
    Price { text: String, residue: String },
}

/// Which field of an item failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    RegistrationDate,
    Price,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::RegistrationDate => f.write_str("registration date"),
            Field::Price => f.write_str("price"),
        }
    }
}

/// An item block on a page could not be turned into an [`Item`](crate::models::Item).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("item {item_index}: unreadable {field}: {source}")]
pub struct ExtractionError {
    pub item_index: usize,
    pub field: Field,
    #[source]
    pub source: FieldError,
}

/// Failure reported by the listing collaborator.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The page could not be retrieved
    #[error("failed to fetch page {page}: {message}")]
    Fetch { page: u32, message: String },

    /// The page was retrieved but an expected element is missing
    #[error("page {page}: missing {element}")]
    MissingElement { page: u32, element: String },

    /// A page-level scalar (item count, page number) is unreadable
    #[error("page {page}: unreadable {what} in {text:?}")]
    Metadata {
        page: u32,
        what: &'static str,
        text: String,
    },
}

impl SourceError {
    /// Create a fetch error for a page.
    pub fn fetch(page: u32, message: impl fmt::Display) -> Self {
        Self::Fetch {
            page,
            message: message.to_string(),
        }
    }

    /// Create a missing element error for a page.
    pub fn missing(page: u32, element: impl Into<String>) -> Self {
        Self::MissingElement {
            page,
            element: element.into(),
        }
    }
}

/// Fatal conditions that stop a crawl without an invariant verdict.
#[derive(Error, Debug)]
pub enum CrawlError {
    /// The listing collaborator failed
    #[error("listing source failure: {0}")]
    Source(#[from] SourceError),

    /// An item on a page could not be read
    #[error("page {page}, {source}")]
    Extraction {
        page: u32,
        #[source]
        source: ExtractionError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extraction_error_names_item_and_field() {
        let err = CrawlError::Extraction {
            page: 3,
            source: ExtractionError {
                item_index: 4,
                field: Field::Price,
                source: FieldError::Price {
                    text: "Preis auf Anfrage".to_string(),
                    residue: String::new(),
                },
            },
        };
        let message = err.to_string();
        assert!(message.starts_with("page 3, item 4: unreadable price"));
    }

    #[test]
    fn crawl_error_converts_into_app_error() {
        let err: AppError = CrawlError::from(SourceError::missing(1, "results container")).into();
        assert_eq!(
            err.to_string(),
            "listing source failure: page 1: missing results container"
        );
    }
}
