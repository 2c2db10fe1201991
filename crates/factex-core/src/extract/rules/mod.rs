//! Rule-based field extractors for French invoices and receipts.
//!
//! Each submodule extracts one field from the same immutable text. The six
//! extractors are independent pure functions with no ordering requirement
//! between them; priority between competing patterns within one field is
//! encoded in ordered tables, evaluated first-match-wins.

pub mod amounts;
pub mod categories;
pub mod dates;
pub mod names;
pub mod numbers;
pub mod patterns;
pub mod vat;

pub use amounts::{AmountExtractor, extract_net_amount, format_french_amount, parse_french_amount};
pub use categories::{CategoryClassifier, classify_category};
pub use dates::{DateExtractor, extract_issue_date};
pub use names::{NameExtractor, extract_counterparty};
pub use numbers::{NumberExtractor, extract_document_number};
pub use vat::{VatRateExtractor, extract_vat_rate};

/// Trait for single-field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text, if any pattern qualifies.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all candidate occurrences of the field, best first.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// A candidate produced by one pattern of an extractor.
#[derive(Debug, Clone)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,

    /// Confidence score (0.0 - 1.0); label-anchored patterns rank above
    /// blind scans.
    pub confidence: f32,

    /// Byte range in the source text.
    pub position: Option<(usize, usize)>,

    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, confidence: f32, source: impl Into<String>) -> Self {
        Self {
            value,
            confidence,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}
