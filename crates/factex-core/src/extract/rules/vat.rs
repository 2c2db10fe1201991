//! TVA rate extraction.

use std::collections::HashSet;

use crate::models::fields::VatRate;

use super::patterns::VAT_RATE;
use super::{ExtractionMatch, FieldExtractor};

/// TVA rate extractor.
pub struct VatRateExtractor;

impl VatRateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for VatRateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for VatRateExtractor {
    type Output = ExtractionMatch<VatRate>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results = Vec::new();
        let mut seen = HashSet::new();

        for caps in VAT_RATE.captures_iter(text) {
            if let Some(rate) = VatRate::from_label(&caps[1]) {
                if seen.insert(rate) {
                    let full = caps.get(0).unwrap();
                    results.push(
                        ExtractionMatch::new(rate, 0.9, full.as_str())
                            .with_position(full.start(), full.end()),
                    );
                }
            }
        }

        results
    }
}

/// Extract the applicable TVA rate, if a legal one is mentioned.
///
/// Only the first `TVA …` mention is consulted; the caller applies the 20%
/// default when nothing matches.
pub fn extract_vat_rate(text: &str) -> Option<VatRate> {
    VatRateExtractor::new().extract(text).map(|m| m.value)
}
