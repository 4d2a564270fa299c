//! Listing item data structures.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};

/// A first-registration date with month precision.
///
/// Internally the first day of the month, so ordering compares year then month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RegistrationDate(NaiveDate);

impl RegistrationDate {
    /// Build a date from year and month (1-12).
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self)
    }

    /// January of the given year; the cutoff for a "from year" filter.
    pub fn start_of_year(year: i32) -> Option<Self> {
        Self::new(year, 1)
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// The month before this one.
    pub fn previous_month(&self) -> Option<Self> {
        match self.month() {
            1 => Self::new(self.year() - 1, 12),
            m => Self::new(self.year(), m - 1),
        }
    }
}

impl fmt::Display for RegistrationDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%m/%Y"))
    }
}

impl Serialize for RegistrationDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One listed car, as far as the checks are concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Item {
    pub registration_date: RegistrationDate,
    pub price: u64,
}

impl Item {
    pub fn new(registration_date: RegistrationDate, price: u64) -> Self {
        Self {
            registration_date,
            price,
        }
    }
}

/// The unparsed text of one item block, as located by the listing source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawItem {
    /// Text of the element holding the first-registration date
    pub date_text: String,

    /// Text of the element holding the price
    pub price_text: String,
}

impl RawItem {
    pub fn new(date_text: impl Into<String>, price_text: impl Into<String>) -> Self {
        Self {
            date_text: date_text.into(),
            price_text: price_text.into(),
        }
    }

    pub fn date_text(&self) -> &str {
        &self.date_text
    }

    pub fn price_text(&self) -> &str {
        &self.price_text
    }
}

/// The parsed items of one listing page, in page order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResult {
    pub page_number: u32,
    pub items: Vec<Item>,
    pub total_on_page: usize,
}

impl PageResult {
    pub fn new(page_number: u32, items: Vec<Item>) -> Self {
        let total_on_page = items.len();
        Self {
            page_number,
            items,
            total_on_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_ordering_is_year_then_month() {
        let a = RegistrationDate::new(2015, 12).unwrap();
        let b = RegistrationDate::new(2016, 1).unwrap();
        assert!(a < b);
        assert!(RegistrationDate::new(2016, 6).unwrap() > b);
    }

    #[test]
    fn test_date_display() {
        let date = RegistrationDate::new(2016, 6).unwrap();
        assert_eq!(date.to_string(), "06/2016");
    }

    #[test]
    fn test_previous_month_wraps_year() {
        let jan = RegistrationDate::start_of_year(2015).unwrap();
        assert_eq!(jan.previous_month(), RegistrationDate::new(2014, 12));
    }

    #[test]
    fn test_invalid_month_rejected() {
        assert!(RegistrationDate::new(2016, 0).is_none());
        assert!(RegistrationDate::new(2016, 13).is_none());
    }

    #[test]
    fn test_page_result_counts_items() {
        let date = RegistrationDate::new(2016, 6).unwrap();
        let page = PageResult::new(1, vec![Item::new(date, 100), Item::new(date, 90)]);
        assert_eq!(page.total_on_page, 2);
    }
}
