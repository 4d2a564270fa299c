// src/locale.rs

//! Number formatting conventions used when reading prices.

/// Grouping and decimal separators of a number locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberLocale {
    pub grouping_separator: char,
    pub decimal_separator: char,
}

/// Locale tags with known separator conventions.
const KNOWN_LOCALES: &[(&str, char, char)] = &[
    ("de-DE", '.', ','),
    ("de-AT", '.', ','),
    ("de-CH", '\'', '.'),
    ("en-US", ',', '.'),
    ("en-GB", ',', '.'),
    ("fr-FR", '\u{202f}', ','),
    ("it-IT", '.', ','),
    ("nl-NL", '.', ','),
    ("es-ES", '.', ','),
];

impl NumberLocale {
    /// German conventions: `15.000,50`.
    pub const GERMANY: Self = Self {
        grouping_separator: '.',
        decimal_separator: ',',
    };

    /// US conventions: `15,000.50`.
    pub const US: Self = Self {
        grouping_separator: ',',
        decimal_separator: '.',
    };

    pub fn new(grouping_separator: char, decimal_separator: char) -> Self {
        Self {
            grouping_separator,
            decimal_separator,
        }
    }

    /// Look up a locale by tag such as `de-DE`. Matching ignores case and
    /// accepts `_` in place of `-`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let wanted = tag.trim().replace('_', "-");
        KNOWN_LOCALES
            .iter()
            .find(|(known, _, _)| known.eq_ignore_ascii_case(&wanted))
            .map(|&(_, grouping, decimal)| Self::new(grouping, decimal))
    }

    /// Whether `ch` can be part of a number in this locale.
    pub fn is_number_char(&self, ch: char) -> bool {
        ch.is_ascii_digit() || ch == self.grouping_separator || ch == self.decimal_separator
    }
}

impl Default for NumberLocale {
    fn default() -> Self {
        Self::GERMANY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tag() {
        assert_eq!(NumberLocale::from_tag("de-DE"), Some(NumberLocale::GERMANY));
        assert_eq!(NumberLocale::from_tag("en_us"), Some(NumberLocale::US));
        assert_eq!(NumberLocale::from_tag("xx-YY"), None);
    }

    #[test]
    fn test_is_number_char() {
        let de = NumberLocale::GERMANY;
        assert!(de.is_number_char('7'));
        assert!(de.is_number_char('.'));
        assert!(de.is_number_char(','));
        assert!(!de.is_number_char('€'));
        assert!(!de.is_number_char(' '));
    }
}
