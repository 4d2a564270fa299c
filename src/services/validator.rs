// src/services/validator.rs

//! Page validation service.
//!
//! Checks the date floor and the non-increasing price order for one page,
//! starting from the watermark left by the pages before it.

use crate::models::{PageResult, RegistrationDate, Violation, ViolationReason, Watermark};

/// Result of validating one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    /// Every item passed; carry this watermark into the next page
    Continue(Watermark),
    /// The first item that broke a contract
    Violated(Violation),
}

/// Applies the listing contracts to a page of items.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageValidator;

impl PageValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate `page` in item order against `cutoff` and the incoming watermark.
    ///
    /// Stops at the first violation. Equal consecutive prices and dates equal
    /// to the cutoff are accepted.
    pub fn validate(
        &self,
        page: &PageResult,
        cutoff: RegistrationDate,
        watermark: Watermark,
    ) -> PageOutcome {
        let mut watermark = watermark;

        for (item_index, item) in page.items.iter().enumerate() {
            log::debug!(
                "Item #{}-{}: date={}, price={}",
                page.page_number,
                item_index + 1,
                item.registration_date,
                item.price
            );

            if item.registration_date < cutoff {
                return PageOutcome::Violated(Violation {
                    page: page.page_number,
                    item_index,
                    reason: ViolationReason::DateBeforeCutoff {
                        date: item.registration_date,
                        cutoff,
                    },
                });
            }

            if !watermark.admits(item.price) {
                // An unbounded watermark admits every price, so a bound exists here.
                let previous_price = watermark.bound().unwrap_or(u64::MAX);
                return PageOutcome::Violated(Violation {
                    page: page.page_number,
                    item_index,
                    reason: ViolationReason::PriceIncreased {
                        price: item.price,
                        previous_price,
                    },
                });
            }

            watermark = Watermark::at(item.price);
        }

        PageOutcome::Continue(watermark)
    }
}
