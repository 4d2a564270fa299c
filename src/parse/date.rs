// src/parse/date.rs

//! Registration date extraction.

use crate::error::FieldError;
use crate::models::RegistrationDate;

/// Read a `MM/YYYY` registration date out of arbitrary text.
///
/// Every character that is not an ASCII digit or `/` is dropped first; the
/// residue must then be exactly two month digits, a slash and four year digits.
pub fn parse_date(text: &str) -> Result<RegistrationDate, FieldError> {
    let residue: String = text
        .chars()
        .filter(|ch| ch.is_ascii_digit() || *ch == '/')
        .collect();

    let fail = || FieldError::Date {
        text: text.to_string(),
        residue: residue.clone(),
    };

    let (month, year) = residue.split_once('/').ok_or_else(fail)?;
    if month.len() != 2 || year.len() != 4 || year.contains('/') {
        return Err(fail());
    }

    // Only digits remain besides the single slash, so these cannot fail on content.
    let month: u32 = month.parse().map_err(|_| fail())?;
    let year: i32 = year.parse().map_err(|_| fail())?;

    RegistrationDate::new(year, month).ok_or_else(fail)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32) -> RegistrationDate {
        RegistrationDate::new(year, month).unwrap()
    }

    #[test]
    fn test_plain_token() {
        assert_eq!(parse_date("06/2016"), Ok(date(2016, 6)));
    }

    #[test]
    fn test_ignores_surrounding_noise() {
        assert_eq!(parse_date("EZ 06/2016"), Ok(date(2016, 6)));
        assert_eq!(parse_date("Erstzulassung:\n  11/2019 "), Ok(date(2019, 11)));
        assert_eq!(parse_date("first reg. — 03/2020 (approx.)"), Ok(date(2020, 3)));
    }

    #[test]
    fn test_rejects_wrong_shape() {
        assert!(parse_date("6/2016").is_err());
        assert!(parse_date("06/16").is_err());
        assert!(parse_date("062016").is_err());
        assert!(parse_date("06/2016/01").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn test_rejects_digits_in_noise() {
        // "150 PS" contributes digits to the residue, so the shape breaks
        assert!(parse_date("06/2016, 150 PS").is_err());
    }

    #[test]
    fn test_rejects_slash_from_markup() {
        // The closing tag adds a second slash to the residue
        let err = parse_date("<li>EZ: 01/2015</li>").unwrap_err();
        assert_eq!(
            err,
            FieldError::Date {
                text: "<li>EZ: 01/2015</li>".to_string(),
                residue: "01/2015/".to_string(),
            }
        );
    }

    #[test]
    fn test_rejects_month_out_of_range() {
        assert!(parse_date("13/2016").is_err());
        assert!(parse_date("00/2016").is_err());
    }

    #[test]
    fn test_error_carries_residue() {
        let err = parse_date("EZ 6/2016").unwrap_err();
        assert_eq!(
            err,
            FieldError::Date {
                text: "EZ 6/2016".to_string(),
                residue: "6/2016".to_string(),
            }
        );
    }
}
