//! Field parsing for rendered item text.
//!
//! Both parsers work by subtraction: everything that cannot belong to the
//! token is discarded, and only the residue is parsed. The surrounding markup
//! is not stable, but the token's own characters are not reused around it.

mod date;
mod price;

pub use date::parse_date;
pub use price::parse_price;

use crate::error::FieldError;
use crate::locale::NumberLocale;
use crate::models::RegistrationDate;

/// Parses item fields with a fixed number locale.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldParser {
    locale: NumberLocale,
}

impl FieldParser {
    pub fn new(locale: NumberLocale) -> Self {
        Self { locale }
    }

    pub fn parse_date(&self, text: &str) -> Result<RegistrationDate, FieldError> {
        parse_date(text)
    }

    pub fn parse_price(&self, text: &str) -> Result<u64, FieldError> {
        parse_price(text, &self.locale)
    }
}
