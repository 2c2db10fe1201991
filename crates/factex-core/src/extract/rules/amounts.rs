//! Net ("HT") amount extraction.

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;

use super::patterns::{AMOUNT_AFTER_HT, AMOUNT_AFTER_LABEL, AMOUNT_BEFORE_MARKER, AMOUNT_TOKEN};
use super::{ExtractionMatch, FieldExtractor};

/// Smallest value the blind fallback scan may select. Smaller tokens are
/// usually page numbers, quantities or unit prices.
pub const FALLBACK_FLOOR: u32 = 10;

/// Values at or above this are ignored by the fallback scan (phone numbers,
/// SIRET fragments).
pub const FALLBACK_CEILING: u32 = 1_000_000;

lazy_static! {
    /// Ordered label-anchored patterns. The first pattern whose first match
    /// normalizes to the floor or more wins; order encodes priority.
    pub static ref ANCHORED_AMOUNT_PATTERNS: Vec<&'static Regex> = vec![
        &*AMOUNT_AFTER_HT,
        &*AMOUNT_AFTER_LABEL,
        &*AMOUNT_BEFORE_MARKER,
    ];
}

/// Amount token extractor (blind scan over the whole text).
pub struct AmountExtractor;

impl AmountExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AmountExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for AmountExtractor {
    type Output = ExtractionMatch<Decimal>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results = Vec::new();

        for m in AMOUNT_TOKEN.find_iter(text) {
            if let Some(amount) = parse_french_amount(m.as_str()) {
                results.push(
                    ExtractionMatch::new(amount, 0.6, m.as_str())
                        .with_position(m.start(), m.end()),
                );
            }
        }

        results
    }
}

/// Extract the most plausible net amount with explicit plausibility bounds.
///
/// Label-anchored patterns are tried in order; the first whose first match
/// normalizes to `floor` or more is returned. Otherwise every amount-shaped
/// token in `[floor, ceiling)` is collected and the largest wins, which
/// favors the grand total over line items.
pub fn extract_net_amount_bounded(
    text: &str,
    floor: Decimal,
    ceiling: Decimal,
) -> Option<Decimal> {
    for pattern in ANCHORED_AMOUNT_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(text) {
            if let Some(amount) = parse_french_amount(&caps[1]) {
                if amount >= floor {
                    return Some(amount);
                }
            }
        }
    }

    AmountExtractor::new()
        .extract_all(text)
        .into_iter()
        .map(|m| m.value)
        .filter(|v| *v >= floor && *v < ceiling)
        .max()
}

/// Extract the most plausible net amount with the default bounds.
pub fn extract_net_amount(text: &str) -> Option<Decimal> {
    extract_net_amount_bounded(
        text,
        Decimal::from(FALLBACK_FLOOR),
        Decimal::from(FALLBACK_CEILING),
    )
}

/// Parse a French-formatted amount (e.g. "1 234,56" or "1234.56").
///
/// Interior whitespace (thousands grouping, including non-breaking spaces)
/// is stripped; both comma and period act as the decimal separator.
pub fn parse_french_amount(s: &str) -> Option<Decimal> {
    let cleaned: String = s
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    Decimal::from_str(&cleaned).ok()
}

/// Format an amount in French style (1 234,56).
pub fn format_french_amount(amount: Decimal) -> String {
    let s = format!("{:.2}", amount);
    let Some((integer_part, decimal_part)) = s.split_once('.') else {
        return s;
    };

    let chars: Vec<char> = integer_part.chars().collect();
    let mut formatted = String::new();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            formatted.push(' ');
        }
        formatted.push(*c);
    }

    format!("{},{}", formatted, decimal_part)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_french_amount() {
        assert_eq!(parse_french_amount("1 234,56"), Some(dec!(1234.56)));
        assert_eq!(parse_french_amount("1234,56"), Some(dec!(1234.56)));
        assert_eq!(parse_french_amount("1234.56"), Some(dec!(1234.56)));
        assert_eq!(parse_french_amount("12 345 678,90"), Some(dec!(12345678.90)));
        // OCR often emits non-breaking spaces as grouping.
        assert_eq!(parse_french_amount("1\u{a0}234,56"), Some(dec!(1234.56)));
    }

    #[test]
    fn test_format_french_amount() {
        assert_eq!(format_french_amount(dec!(1234.56)), "1 234,56");
        assert_eq!(format_french_amount(dec!(12345678.90)), "12 345 678,90");
        assert_eq!(format_french_amount(dec!(9.5)), "9,50");
    }

    #[test]
    fn test_anchored_ht_beats_larger_unlabeled_total() {
        let text = "HT: 50,00\nTTC: 60,00";
        assert_eq!(extract_net_amount(text), Some(dec!(50.00)));
    }

    #[test]
    fn test_anchored_below_floor_falls_to_next_pattern() {
        let text = "HT: 5,00 Montant: 25,00";
        assert_eq!(extract_net_amount(text), Some(dec!(25.00)));
    }

    #[test]
    fn test_marker_suffix_pattern() {
        assert_eq!(
            extract_net_amount("Forfait 19,99€ par mois"),
            Some(dec!(19.99))
        );
        assert_eq!(extract_net_amount("45,00 EUR au total"), Some(dec!(45.00)));
    }

    #[test]
    fn test_fallback_picks_largest_in_range() {
        let text = "12,00 999,99 45,00";
        assert_eq!(extract_net_amount(text), Some(dec!(999.99)));
    }

    #[test]
    fn test_fallback_respects_floor_and_ceiling() {
        assert_eq!(extract_net_amount("5,00 9,99 4,50"), None);
        assert_eq!(
            extract_net_amount("1 000 000,00 et 250,00"),
            Some(dec!(250.00))
        );
    }

    #[test]
    fn test_no_amount_at_all() {
        assert_eq!(extract_net_amount("aucun montant ici"), None);
        assert_eq!(extract_net_amount("42"), None);
    }

    #[test]
    fn test_extract_all_tokens() {
        let extractor = AmountExtractor::new();
        let results = extractor.extract_all("Prix: 100,00, Total: 1 234,56");
        assert_eq!(results.len(), 2);
        assert_eq!(results[1].value, dec!(1234.56));
    }
}
