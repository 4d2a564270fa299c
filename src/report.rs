// src/report.rs

//! Run report rendering.
//!
//! The report is the sole output artifact of a run: a short "no issues
//! found" summary on success, the violation location otherwise.

use std::fmt::Write;

use crate::error::{AppError, Result};
use crate::models::Verdict;

const BORDER_WIDTH: usize = 60;

/// Report output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// Render the verdict in the requested format.
pub fn render(verdict: &Verdict, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Text => Ok(render_text(verdict)),
        ReportFormat::Json => Ok(serde_json::to_string_pretty(verdict)?),
    }
}

fn header(out: &mut String, title: &str) {
    let border = "═".repeat(BORDER_WIDTH);
    let _ = writeln!(out, "{border}");
    let _ = writeln!(out, "  {title}");
    let _ = writeln!(out, "{border}");
}

fn sub_item(out: &mut String, key: &str, value: impl std::fmt::Display) {
    let _ = writeln!(out, "    {key}: {value}");
}

/// Render a human-readable report.
pub fn render_text(verdict: &Verdict) -> String {
    let mut out = String::new();

    match verdict {
        Verdict::Passed(summary) => {
            header(&mut out, "PASSED: no issues found");
            sub_item(&mut out, "Pages checked", summary.pages_checked);
            sub_item(&mut out, "Items checked", summary.items_checked);
            sub_item(&mut out, "Items announced", summary.total_items_reported);
            sub_item(&mut out, "Lowest price", summary.final_watermark);
            let elapsed = summary.finished_at - summary.started_at;
            sub_item(
                &mut out,
                "Duration",
                format!("{:.1}s", elapsed.num_milliseconds() as f64 / 1000.0),
            );
        }
        Verdict::Failed(violation) => {
            header(&mut out, "FAILED: listing contract violated");
            sub_item(&mut out, "Page", violation.page);
            sub_item(&mut out, "Item index", violation.item_index);
            sub_item(&mut out, "Reason", violation.reason);
        }
    }

    out
}

/// Render a run that ended without a verdict.
pub fn render_error(error: &AppError, format: ReportFormat) -> String {
    match format {
        ReportFormat::Text => {
            let mut out = String::new();
            header(&mut out, "ABORTED: check could not complete");
            sub_item(&mut out, "Error", error);
            out
        }
        ReportFormat::Json => serde_json::json!({
            "outcome": "aborted",
            "error": error.to_string(),
        })
        .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::models::{CrawlSummary, Violation, ViolationReason, Watermark};

    fn passed() -> Verdict {
        Verdict::Passed(CrawlSummary {
            pages_checked: 2,
            items_checked: 5,
            total_items_reported: 5,
            final_watermark: Watermark::at(15_000),
            started_at: Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
            finished_at: Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 3).unwrap(),
        })
    }

    #[test]
    fn test_text_report_for_pass() {
        let text = render_text(&passed());
        assert!(text.contains("PASSED: no issues found"));
        assert!(text.contains("Lowest price: 15000"));
        assert!(text.contains("Duration: 3.0s"));
    }

    #[test]
    fn test_text_report_for_failure() {
        let verdict = Verdict::Failed(Violation {
            page: 2,
            item_index: 0,
            reason: ViolationReason::PriceIncreased {
                price: 16_000,
                previous_price: 15_000,
            },
        });
        let text = render_text(&verdict);
        assert!(text.contains("Page: 2"));
        assert!(text.contains("Item index: 0"));
        assert!(text.contains("price 16000 is higher than the previous price 15000"));
    }

    #[test]
    fn test_error_report() {
        let error = AppError::config("site.base_url is empty");
        let json = render_error(&error, ReportFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["outcome"], "aborted");
        assert_eq!(value["error"], "Configuration error: site.base_url is empty");
        assert!(render_error(&error, ReportFormat::Text).contains("ABORTED"));
    }

    #[test]
    fn test_json_report() {
        let json = render(&passed(), ReportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["outcome"], "passed");
        assert_eq!(value["final_watermark"], 15_000);
    }
}
