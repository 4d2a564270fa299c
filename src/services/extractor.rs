// src/services/extractor.rs

//! Item extraction service.
//!
//! Turns the raw text blocks of one page into typed items, keeping page order.

use crate::error::{ExtractionError, Field};
use crate::models::{Item, RawItem};
use crate::parse::FieldParser;

/// Service for parsing raw item blocks into [`Item`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct ItemExtractor {
    parser: FieldParser,
}

impl ItemExtractor {
    /// Create a new extractor using the given field parser.
    pub fn new(parser: FieldParser) -> Self {
        Self { parser }
    }

    /// Parse every block in order, stopping at the first unreadable field.
    pub fn extract(&self, blocks: &[RawItem]) -> Result<Vec<Item>, ExtractionError> {
        blocks
            .iter()
            .enumerate()
            .map(|(item_index, block)| self.extract_one(item_index, block))
            .collect()
    }

    fn extract_one(&self, item_index: usize, block: &RawItem) -> Result<Item, ExtractionError> {
        let registration_date =
            self.parser
                .parse_date(block.date_text())
                .map_err(|source| ExtractionError {
                    item_index,
                    field: Field::RegistrationDate,
                    source,
                })?;

        let price = self
            .parser
            .parse_price(block.price_text())
            .map_err(|source| ExtractionError {
                item_index,
                field: Field::Price,
                source,
            })?;

        Ok(Item::new(registration_date, price))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RegistrationDate;

    #[test]
    fn test_extract_preserves_order() {
        let blocks = vec![
            RawItem::new("EZ 06/2016", "20.000 €"),
            RawItem::new("EZ 07/2017", "15.000 €"),
            RawItem::new("EZ 01/2015", "15.000 €"),
        ];
        let items = ItemExtractor::default().extract(&blocks).unwrap();

        let prices: Vec<u64> = items.iter().map(|i| i.price).collect();
        assert_eq!(prices, vec![20_000, 15_000, 15_000]);
        assert_eq!(
            items[1].registration_date,
            RegistrationDate::new(2017, 7).unwrap()
        );
    }

    #[test]
    fn test_extract_empty_page() {
        assert!(ItemExtractor::default().extract(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_extract_reports_bad_date() {
        let blocks = vec![
            RawItem::new("06/2016", "20.000 €"),
            RawItem::new("neu", "19.000 €"),
        ];
        let err = ItemExtractor::default().extract(&blocks).unwrap_err();
        assert_eq!(err.item_index, 1);
        assert_eq!(err.field, Field::RegistrationDate);
    }

    #[test]
    fn test_extract_reports_bad_price() {
        let blocks = vec![
            RawItem::new("06/2016", "20.000 €"),
            RawItem::new("06/2016", "19.000 €"),
            RawItem::new("06/2016", "Preis auf Anfrage"),
        ];
        let err = ItemExtractor::default().extract(&blocks).unwrap_err();
        assert_eq!(err.item_index, 2);
        assert_eq!(err.field, Field::Price);
    }
}
