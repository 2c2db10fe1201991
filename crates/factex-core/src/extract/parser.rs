//! Heuristic field-extraction engine.

use std::time::Instant;

use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::models::config::ExtractionConfig;
use crate::models::fields::{Category, ExtractedFields, VatRate};

use super::rules::{
    FieldExtractor,
    amounts::extract_net_amount_bounded,
    categories::CategoryClassifier,
    dates::DateExtractor,
    names::extract_counterparty,
    numbers::extract_document_number,
    vat::extract_vat_rate,
};

/// Result of one extraction run.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// The fully populated record.
    pub fields: ExtractedFields,

    /// Fields that fell back to their default.
    pub warnings: Vec<String>,

    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Trait for field parsers.
///
/// `parse` is total: any UTF-8 input, including the empty string, yields a
/// fully populated record. Absence of a match is normal, not an error.
pub trait FieldParser {
    /// Run all sub-extractors and assemble one record.
    fn parse(&self, text: &str) -> ExtractionResult;

    /// Assemble one record, discarding run metadata.
    fn extract_fields(&self, text: &str) -> ExtractedFields {
        self.parse(text).fields
    }
}

/// Heuristic parser over the six rule-based sub-extractors.
///
/// The six extractors have no data dependency on one another; they all read
/// the same immutable text and their outputs are assembled into one record.
pub struct HeuristicParser {
    classifier: CategoryClassifier,
    dates: DateExtractor,
    fallback_floor: Decimal,
    fallback_ceiling: Decimal,
    default_vat_rate: VatRate,
    default_category: Category,
    reference_date: Option<NaiveDate>,
}

impl HeuristicParser {
    /// Parser over the built-in French locale tables.
    pub fn new() -> Self {
        let config = ExtractionConfig::default();
        Self {
            classifier: CategoryClassifier::new(),
            dates: DateExtractor::new(),
            fallback_floor: Decimal::from(config.fallback_floor),
            fallback_ceiling: Decimal::from(config.fallback_ceiling),
            default_vat_rate: config.default_vat_rate,
            default_category: config.default_category,
            reference_date: None,
        }
    }

    /// Parser over custom locale tables.
    pub fn with_config(config: &ExtractionConfig) -> crate::Result<Self> {
        Ok(Self {
            classifier: CategoryClassifier::from_rules(&config.categories)?,
            dates: DateExtractor::with_months(config.months.clone())?,
            fallback_floor: Decimal::from(config.fallback_floor),
            fallback_ceiling: Decimal::from(config.fallback_ceiling),
            default_vat_rate: config.default_vat_rate,
            default_category: config.default_category,
            reference_date: None,
        })
    }

    /// Fix the run date used when no date pattern matches.
    ///
    /// Without this the wall-clock date of each call is used.
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    fn run_date(&self) -> String {
        self.reference_date
            .unwrap_or_else(|| Local::now().date_naive())
            .format("%Y-%m-%d")
            .to_string()
    }
}

impl Default for HeuristicParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldParser for HeuristicParser {
    fn parse(&self, text: &str) -> ExtractionResult {
        let start = Instant::now();
        let mut warnings = Vec::new();

        info!("extracting fields from {} characters of text", text.len());

        let name = extract_counterparty(text).unwrap_or_default();
        if name.is_empty() {
            warnings.push("no counterparty line found".to_string());
        }

        let number = extract_document_number(text).unwrap_or_default();
        if number.is_empty() {
            warnings.push("no document number found".to_string());
        }

        let date = match self.dates.extract(text) {
            Some(m) => m.value,
            None => {
                warnings.push("no date pattern matched, using the run date".to_string());
                self.run_date()
            }
        };

        let amount_ht = extract_net_amount_bounded(text, self.fallback_floor, self.fallback_ceiling);
        if amount_ht.is_none() {
            warnings.push("no qualifying amount found".to_string());
        }

        let vat_rate = extract_vat_rate(text).unwrap_or(self.default_vat_rate);

        let category = self
            .classifier
            .extract(text)
            .map(|m| m.value)
            .unwrap_or(self.default_category);

        let fields = ExtractedFields {
            name,
            number,
            date,
            amount_ht,
            vat_rate,
            category,
        };

        debug!(
            "extracted number={:?} date={} amount_ht={:?} vat_rate={} category={}",
            fields.number,
            fields.date,
            fields.amount_ht,
            f64::from(fields.vat_rate),
            fields.category
        );

        ExtractionResult {
            fields,
            warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}
