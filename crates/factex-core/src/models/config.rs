//! Configuration for the extraction engine.
//!
//! The locale tables live here as plain data. The category table is an
//! ordered list because the classifier is first-match-wins; the month table
//! is a map because lookup there is exact-match only.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::fields::{Category, VatRate};

/// Default category keyword table, in priority order.
pub const DEFAULT_CATEGORY_KEYWORDS: &[(Category, &str)] = &[
    (
        Category::Logiciel,
        "adobe|figma|notion|slack|github|office|microsoft|google|ovh|aws|heroku|logiciel|software|licence",
    ),
    (
        Category::Materiel,
        "fnac|amazon|apple|dell|lenovo|hp|ecran|clavier|souris|ordinateur|imprimante",
    ),
    (
        Category::Transport,
        "sncf|ratp|uber|billet|train|avion|taxi|transport|air.?france",
    ),
    (
        Category::Telephone,
        "sfr|orange|bouygues|free|mobile|forfait|telecom",
    ),
    (
        Category::Fournitures,
        "papier|fourniture|cartouche|toner|bureau",
    ),
    (
        Category::Loyer,
        "loyer|bail|location|immobilier|coworking",
    ),
];

/// Default French month table. Unaccented spellings are listed alongside the
/// accented ones because OCR frequently drops diacritics.
pub const FRENCH_MONTHS: &[(&str, u32)] = &[
    ("janvier", 1),
    ("février", 2),
    ("fevrier", 2),
    ("mars", 3),
    ("avril", 4),
    ("mai", 5),
    ("juin", 6),
    ("juillet", 7),
    ("août", 8),
    ("aout", 8),
    ("septembre", 9),
    ("octobre", 10),
    ("novembre", 11),
    ("décembre", 12),
    ("decembre", 12),
];

/// One entry of the ordered category table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRule {
    /// Category assigned when the keywords match.
    pub category: Category,

    /// Case-insensitive keyword/brand alternation (regex source).
    pub keywords: String,
}

/// Extraction engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Ordered category table; earlier entries win.
    pub categories: Vec<CategoryRule>,

    /// French month name (including unaccented variants) → month number.
    pub months: HashMap<String, u32>,

    /// Smallest amount the blind fallback scan may select.
    pub fallback_floor: u32,

    /// Amounts at or above this are ignored by the fallback scan.
    pub fallback_ceiling: u32,

    /// Rate used when no TVA mention parses.
    pub default_vat_rate: VatRate,

    /// Category used when no keyword entry matches.
    pub default_category: Category,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            categories: DEFAULT_CATEGORY_KEYWORDS
                .iter()
                .map(|(category, keywords)| CategoryRule {
                    category: *category,
                    keywords: (*keywords).to_string(),
                })
                .collect(),
            months: FRENCH_MONTHS
                .iter()
                .map(|(name, number)| ((*name).to_string(), *number))
                .collect(),
            fallback_floor: 10,
            fallback_ceiling: 1_000_000,
            default_vat_rate: VatRate::default(),
            default_category: Category::default(),
        }
    }
}

impl ExtractionConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| crate::FactexError::Config(e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| crate::FactexError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_category_order() {
        let config = ExtractionConfig::default();
        let order: Vec<Category> = config.categories.iter().map(|r| r.category).collect();
        assert_eq!(
            order,
            [
                Category::Logiciel,
                Category::Materiel,
                Category::Transport,
                Category::Telephone,
                Category::Fournitures,
                Category::Loyer,
            ]
        );
    }

    #[test]
    fn test_month_table_covers_unaccented_variants() {
        let config = ExtractionConfig::default();
        assert_eq!(config.months.get("février"), Some(&2));
        assert_eq!(config.months.get("fevrier"), Some(&2));
        assert_eq!(config.months.get("aout"), Some(&8));
        assert_eq!(config.months.get("decembre"), Some(&12));
    }

    #[test]
    fn test_config_roundtrip() {
        let config = ExtractionConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let back: ExtractionConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(back.categories.len(), config.categories.len());
        assert_eq!(back.categories[0].category, Category::Logiciel);
        assert_eq!(back.fallback_floor, 10);
        assert_eq!(back.fallback_ceiling, 1_000_000);
        assert_eq!(back.default_vat_rate, VatRate::Standard20);
    }
}
