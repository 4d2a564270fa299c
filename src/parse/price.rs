// src/parse/price.rs

//! Price extraction.

use crate::error::FieldError;
use crate::locale::NumberLocale;

/// Read a whole-unit price out of arbitrary text.
///
/// Every character that is not a digit or one of the locale's separators is
/// dropped. Grouping separators in the integral part are ignored and any
/// fraction after the decimal separator is truncated.
pub fn parse_price(text: &str, locale: &NumberLocale) -> Result<u64, FieldError> {
    let residue: String = text.chars().filter(|ch| locale.is_number_char(*ch)).collect();

    let fail = || FieldError::Price {
        text: text.to_string(),
        residue: residue.clone(),
    };

    let (integral, fraction) = match residue.split_once(locale.decimal_separator) {
        Some((integral, fraction)) => (integral, fraction),
        None => (residue.as_str(), ""),
    };

    if fraction.chars().any(|ch| !ch.is_ascii_digit()) {
        return Err(fail());
    }

    let digits: String = integral
        .chars()
        .filter(|ch| *ch != locale.grouping_separator)
        .collect();
    if digits.is_empty() {
        return Err(fail());
    }

    digits.parse::<u64>().map_err(|_| fail())
}
