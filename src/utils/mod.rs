//! Utility functions and helpers.

pub mod http;
pub mod url;

/// Keep only the ASCII digits of `text`.
pub fn digits_only(text: &str) -> String {
    text.chars().filter(char::is_ascii_digit).collect()
}
