//! Crawl state and outcome types.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::RegistrationDate;

/// The lowest price seen so far in traversal order.
///
/// Starts unbounded; every later price must not exceed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Watermark(Option<u64>);

impl Watermark {
    /// A watermark that admits any price.
    pub const UNBOUNDED: Self = Self(None);

    pub fn at(price: u64) -> Self {
        Self(Some(price))
    }

    /// The current bound, `None` while unbounded.
    pub fn bound(&self) -> Option<u64> {
        self.0
    }

    /// Whether `price` keeps the listing non-increasing.
    pub fn admits(&self, price: u64) -> bool {
        self.0.is_none_or(|bound| price <= bound)
    }
}

impl fmt::Display for Watermark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(price) => write!(f, "{price}"),
            None => f.write_str("unbounded"),
        }
    }
}

/// State carried across pages for a whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlState {
    pub watermark: Watermark,
    pub cutoff: RegistrationDate,
}

impl CrawlState {
    pub fn new(cutoff: RegistrationDate) -> Self {
        Self {
            watermark: Watermark::UNBOUNDED,
            cutoff,
        }
    }
}

/// Why an item broke the listing contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum ViolationReason {
    /// The item was registered before the filter's cutoff
    DateBeforeCutoff {
        date: RegistrationDate,
        cutoff: RegistrationDate,
    },
    /// The item costs more than an item listed before it
    PriceIncreased { price: u64, previous_price: u64 },
}

impl fmt::Display for ViolationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DateBeforeCutoff { date, cutoff } => write!(
                f,
                "registration date {date} is earlier than {cutoff}"
            ),
            Self::PriceIncreased {
                price,
                previous_price,
            } => write!(
                f,
                "price {price} is higher than the previous price {previous_price}"
            ),
        }
    }
}

/// Location and cause of the first contract violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub page: u32,

    /// Zero-based position of the item on its page
    pub item_index: usize,

    #[serde(flatten)]
    pub reason: ViolationReason,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "page {}, item {}: {}",
            self.page, self.item_index, self.reason
        )
    }
}

/// Statistics of a run that reached the last page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrawlSummary {
    pub pages_checked: u32,
    pub items_checked: usize,

    /// Item count the listing announced on its first page
    pub total_items_reported: u64,

    pub final_watermark: Watermark,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Final outcome of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Verdict {
    Passed(CrawlSummary),
    Failed(Violation),
}

impl Verdict {
    pub fn is_passed(&self) -> bool {
        matches!(self, Verdict::Passed(_))
    }

    pub fn violation(&self) -> Option<&Violation> {
        match self {
            Verdict::Failed(violation) => Some(violation),
            Verdict::Passed(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unbounded_watermark_admits_everything() {
        assert!(Watermark::UNBOUNDED.admits(u64::MAX));
        assert_eq!(Watermark::UNBOUNDED.to_string(), "unbounded");
    }

    #[test]
    fn test_watermark_admits_equal_price() {
        let mark = Watermark::at(15_000);
        assert!(mark.admits(15_000));
        assert!(mark.admits(14_999));
        assert!(!mark.admits(15_001));
    }

    #[test]
    fn test_violation_display() {
        let violation = Violation {
            page: 2,
            item_index: 0,
            reason: ViolationReason::PriceIncreased {
                price: 16_000,
                previous_price: 15_000,
            },
        };
        assert_eq!(
            violation.to_string(),
            "page 2, item 0: price 16000 is higher than the previous price 15000"
        );
    }

    #[test]
    fn test_failed_verdict_serializes_flat() {
        let verdict = Verdict::Failed(Violation {
            page: 1,
            item_index: 3,
            reason: ViolationReason::DateBeforeCutoff {
                date: RegistrationDate::new(2014, 12).unwrap(),
                cutoff: RegistrationDate::start_of_year(2015).unwrap(),
            },
        });
        let json = serde_json::to_value(&verdict).unwrap();
        assert_eq!(json["outcome"], "failed");
        assert_eq!(json["page"], 1);
        assert_eq!(json["item_index"], 3);
        assert_eq!(json["reason"], "date_before_cutoff");
        assert_eq!(json["date"], "12/2014");
        assert_eq!(json["cutoff"], "01/2015");
    }
}
