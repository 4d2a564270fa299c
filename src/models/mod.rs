// src/models/mod.rs

//! Domain models for the listing check.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

pub mod config;
mod item;
mod verdict;

// Re-export all public types
pub use config::{Config, CrawlerConfig, ListingSelectors, LocaleConfig, SiteConfig};
pub use item::{Item, PageResult, RawItem, RegistrationDate};
pub use verdict::{CrawlState, CrawlSummary, Verdict, Violation, ViolationReason, Watermark};
