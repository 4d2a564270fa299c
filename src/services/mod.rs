//! Service layer for the listing check.
//!
//! This module contains the per-page logic:
//! - Item parsing (`ItemExtractor`)
//! - Contract checks (`PageValidator`)

mod extractor;
mod validator;

pub use extractor::ItemExtractor;
pub use validator::{PageOutcome, PageValidator};
