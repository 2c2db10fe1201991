//! Expense category classification.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::config::{CategoryRule, DEFAULT_CATEGORY_KEYWORDS};
use crate::models::fields::Category;

use super::{ExtractionMatch, FieldExtractor};

lazy_static! {
    /// Default compiled category table, in priority order.
    static ref DEFAULT_CATEGORY_RULES: Vec<(Category, Regex)> = DEFAULT_CATEGORY_KEYWORDS
        .iter()
        .map(|(category, keywords)| {
            (*category, Regex::new(&format!("(?i){}", keywords)).unwrap())
        })
        .collect();
}

/// Keyword-table classifier.
///
/// The table is ordered: the first category whose alternation matches
/// anywhere in the text wins. Matches are not scored or counted across
/// categories.
pub struct CategoryClassifier {
    rules: Vec<(Category, Regex)>,
}

impl CategoryClassifier {
    /// Classifier over the built-in keyword table.
    pub fn new() -> Self {
        Self {
            rules: DEFAULT_CATEGORY_RULES.clone(),
        }
    }

    /// Classifier over a custom ordered keyword table.
    pub fn from_rules(rules: &[CategoryRule]) -> crate::Result<Self> {
        let rules = rules
            .iter()
            .map(|rule| {
                Regex::new(&format!("(?i){}", rule.keywords))
                    .map(|pattern| (rule.category, pattern))
                    .map_err(|source| crate::FactexError::Pattern {
                        field: format!("category {}", rule.category),
                        source,
                    })
            })
            .collect::<crate::Result<Vec<_>>>()?;

        Ok(Self { rules })
    }

    /// The ordered (category, pattern) table.
    pub fn rules(&self) -> &[(Category, Regex)] {
        &self.rules
    }
}

impl Default for CategoryClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for CategoryClassifier {
    type Output = ExtractionMatch<Category>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.rules
            .iter()
            .filter_map(|(category, pattern)| {
                pattern.find(text).map(|m| {
                    ExtractionMatch::new(*category, 0.8, m.as_str())
                        .with_position(m.start(), m.end())
                })
            })
            .collect()
    }
}

/// Classify text against the built-in keyword table.
pub fn classify_category(text: &str) -> Option<Category> {
    CategoryClassifier::new().extract(text).map(|m| m.value)
}
