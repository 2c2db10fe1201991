//! Core library for French invoice and receipt field extraction.
//!
//! This crate provides:
//! - A heuristic field-extraction engine over noisy recognized text
//! - Rule-based extractors for amount, TVA rate, number, date, category, name
//! - French locale tables (month names, expense categories) as data
//! - An output record serializable as a flat key/value structure

pub mod error;
pub mod models;
pub mod extract;

pub use error::{FactexError, Result};
pub use models::config::{CategoryRule, ExtractionConfig};
pub use models::fields::{Category, ExtractedFields, VatRate};
pub use extract::{ExtractionResult, FieldParser, HeuristicParser, RAW_EXCERPT_CHARS};
