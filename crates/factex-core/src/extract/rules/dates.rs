//! Issue date extraction.

use std::collections::HashMap;

use regex::Regex;

use crate::models::config::FRENCH_MONTHS;

use super::patterns::{DATE_DAY_FIRST, DATE_FRENCH_LONG, DATE_YEAR_FIRST};
use super::{ExtractionMatch, FieldExtractor};

/// The date forms understood by the extractor.
///
/// Forms are tried over the whole text in [`DATE_FORM_ORDER`]; textual
/// position does not participate in the priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateForm {
    /// `15 mars 2024`
    FrenchLong,
    /// `2024-03-15`, `2024/3/15`, `2024.03.15`
    YearFirst,
    /// `15-03-2024`, `15/3/2024`, `15.03.2024`, interpreted day-first
    DayFirst,
}

/// Priority order of the date forms.
pub const DATE_FORM_ORDER: [DateForm; 3] =
    [DateForm::FrenchLong, DateForm::YearFirst, DateForm::DayFirst];

/// Date extractor over a configurable month table.
pub struct DateExtractor {
    long_form: Regex,
    months: HashMap<String, u32>,
}

impl DateExtractor {
    /// Extractor over the built-in French month table.
    pub fn new() -> Self {
        Self {
            long_form: DATE_FRENCH_LONG.clone(),
            months: FRENCH_MONTHS
                .iter()
                .map(|(name, number)| ((*name).to_string(), *number))
                .collect(),
        }
    }

    /// Extractor over a custom month table.
    pub fn with_months(months: HashMap<String, u32>) -> crate::Result<Self> {
        let alternation = months
            .keys()
            .map(|name| regex::escape(name))
            .collect::<Vec<_>>()
            .join("|");
        let long_form = Regex::new(&format!(
            r"(?i)(\d{{1,2}})\s+({})\s+(20\d{{2}})",
            alternation
        ))
        .map_err(|source| crate::FactexError::Pattern {
            field: "date".to_string(),
            source,
        })?;

        Ok(Self { long_form, months })
    }

    fn pattern_for(&self, form: DateForm) -> &Regex {
        match form {
            DateForm::FrenchLong => &self.long_form,
            DateForm::YearFirst => &DATE_YEAR_FIRST,
            DateForm::DayFirst => &DATE_DAY_FIRST,
        }
    }

    /// Normalize one capture to ISO `YYYY-MM-DD`.
    ///
    /// Day and month are range-checked by the patterns; there is no calendar
    /// validation beyond that.
    fn capture_to_iso(&self, form: DateForm, caps: &regex::Captures<'_>) -> Option<String> {
        match form {
            DateForm::FrenchLong => {
                let day: u32 = caps[1].parse().ok()?;
                let month = *self.months.get(&caps[2].to_lowercase())?;
                Some(format!("{}-{:02}-{:02}", &caps[3], month, day))
            }
            DateForm::YearFirst => {
                let month: u32 = caps[2].parse().ok()?;
                let day: u32 = caps[3].parse().ok()?;
                Some(format!("{}-{:02}-{:02}", &caps[1], month, day))
            }
            DateForm::DayFirst => {
                let day: u32 = caps[1].parse().ok()?;
                let month: u32 = caps[2].parse().ok()?;
                Some(format!("{}-{:02}-{:02}", &caps[3], month, day))
            }
        }
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results: Vec<Self::Output> = Vec::new();

        for form in DATE_FORM_ORDER {
            for caps in self.pattern_for(form).captures_iter(text) {
                let Some(iso) = self.capture_to_iso(form, &caps) else {
                    continue;
                };
                if results.iter().any(|r| r.value == iso) {
                    continue;
                }
                let full = caps.get(0).unwrap();
                results.push(
                    ExtractionMatch::new(iso, 0.9, full.as_str())
                        .with_position(full.start(), full.end()),
                );
            }
        }

        results
    }
}

/// Extract the issue date as ISO `YYYY-MM-DD`, if any form matches.
///
/// The caller substitutes the run date when nothing does.
pub fn extract_issue_date(text: &str) -> Option<String> {
    DateExtractor::new().extract(text).map(|m| m.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_french_long_form() {
        assert_eq!(
            extract_issue_date("Paris, le 15 mars 2024"),
            Some("2024-03-15".to_string())
        );
        assert_eq!(
            extract_issue_date("5 Août 2023"),
            Some("2023-08-05".to_string())
        );
    }

    #[test]
    fn test_unaccented_month_variants() {
        assert_eq!(
            extract_issue_date("10 fevrier 2023"),
            Some("2023-02-10".to_string())
        );
        assert_eq!(
            extract_issue_date("1 decembre 2024"),
            Some("2024-12-01".to_string())
        );
    }

    #[test]
    fn test_year_first_form() {
        assert_eq!(
            extract_issue_date("émis le 2024-3-7"),
            Some("2024-03-07".to_string())
        );
        assert_eq!(
            extract_issue_date("2023/11/30"),
            Some("2023-11-30".to_string())
        );
    }

    #[test]
    fn test_day_first_form() {
        assert_eq!(
            extract_issue_date("05/03/2024"),
            Some("2024-03-05".to_string())
        );
        assert_eq!(
            extract_issue_date("31.12.2023"),
            Some("2023-12-31".to_string())
        );
    }

    #[test]
    fn test_form_priority_over_textual_position() {
        // The day-first date appears earlier, but the long form ranks higher.
        let text = "05/04/2024 règlement, émise le 10 mai 2024";
        assert_eq!(extract_issue_date(text), Some("2024-05-10".to_string()));
    }

    #[test]
    fn test_range_checks_without_calendar_validation() {
        // Month 13 never matches.
        assert_eq!(extract_issue_date("13/13/2024"), None);
        // February 31st passes: only ranges are checked.
        assert_eq!(
            extract_issue_date("31/02/2024"),
            Some("2024-02-31".to_string())
        );
    }

    #[test]
    fn test_no_date() {
        assert_eq!(extract_issue_date("aucune échéance"), None);
        assert_eq!(extract_issue_date(""), None);
    }

    #[test]
    fn test_custom_month_table() {
        let months: HashMap<String, u32> = [("brumaire".to_string(), 2)].into_iter().collect();
        let extractor = DateExtractor::with_months(months).unwrap();
        let result = extractor.extract("18 brumaire 2024").unwrap();
        assert_eq!(result.value, "2024-02-18");
    }
}
