// src/lib.rs

//! Listing check library
//!
//! Crawls a paginated car listing and verifies that every item honors the
//! registration-date filter and that prices never increase across pages.

pub mod error;
pub mod locale;
pub mod models;
pub mod parse;
pub mod pipeline;
pub mod report;
pub mod services;
pub mod source;
pub mod utils;
