//! Document number extraction.

use super::patterns::{NUMBER_BARE, NUMBER_LABELED};
use super::{ExtractionMatch, FieldExtractor};

/// Document reference extractor.
pub struct NumberExtractor;

impl NumberExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NumberExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for NumberExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results: Vec<Self::Output> = Vec::new();

        // Label-anchored references first.
        for caps in NUMBER_LABELED.captures_iter(text) {
            let number = normalize(&caps[1]);
            if results.iter().any(|r| r.value == number) {
                continue;
            }
            let full = caps.get(0).unwrap();
            results.push(
                ExtractionMatch::new(number, 0.95, full.as_str())
                    .with_position(full.start(), full.end()),
            );
        }

        // Bare codes with a known prefix.
        for caps in NUMBER_BARE.captures_iter(text) {
            let number = normalize(&caps[1]);
            if results.iter().any(|r| r.value == number) {
                continue;
            }
            let full = caps.get(0).unwrap();
            results.push(
                ExtractionMatch::new(number, 0.7, full.as_str())
                    .with_position(full.start(), full.end()),
            );
        }

        results
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_uppercase()
}

/// Extract the document reference, uppercased and trimmed.
pub fn extract_document_number(text: &str) -> Option<String> {
    NumberExtractor::new().extract(text).map(|m| m.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labeled_reference() {
        assert_eq!(
            extract_document_number("N° facture : 2024-117"),
            Some("2024-117".to_string())
        );
        assert_eq!(
            extract_document_number("Numéro de facture: abc/42"),
            Some("ABC/42".to_string())
        );
        assert_eq!(
            extract_document_number("Invoice #INV-2024-7"),
            Some("INV-2024-7".to_string())
        );
        assert_eq!(
            extract_document_number("Ref: ABC-123"),
            Some("ABC-123".to_string())
        );
    }

    #[test]
    fn test_bare_code_fallback() {
        assert_eq!(
            extract_document_number("Facture N° FAC-2024-001"),
            Some("FAC-2024-001".to_string())
        );
        assert_eq!(
            extract_document_number("dep 2024/14 du mois"),
            Some("DEP 2024/14".to_string())
        );
    }

    #[test]
    fn test_labeled_wins_over_bare_code() {
        let text = "FAC-9999-1\nRéférence: REF-1";
        assert_eq!(extract_document_number(text), Some("REF-1".to_string()));
    }

    #[test]
    fn test_no_reference() {
        assert_eq!(extract_document_number("ticket de caisse"), None);
    }

    #[test]
    fn test_extract_all_orders_labeled_first() {
        let extractor = NumberExtractor::new();
        let results = extractor.extract_all("FAC-9999-1 et ref: REF-1");
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].value, "REF-1");
        assert_eq!(results[1].value, "FAC-9999-1");
    }
}
