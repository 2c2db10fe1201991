//! Counterparty name extraction.

use super::patterns::{HEADER_WORD, LETTER_RUN, NAME_RECIPIENT, NAME_SENDER};
use super::{ExtractionMatch, FieldExtractor};

/// How many leading lines the header scan considers.
pub const HEADER_SCAN_LINES: usize = 8;

/// Counterparty extractor.
pub struct NameExtractor;

impl NameExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NameExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for NameExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        for pattern in [&*NAME_RECIPIENT, &*NAME_SENDER] {
            if let Some(caps) = pattern.captures(text) {
                let candidate = caps[1].trim().to_string();
                if candidate.is_empty() {
                    // A matched label with nothing after it falls through to
                    // the header scan, not to the next label pattern.
                    break;
                }
                let full = caps.get(0).unwrap();
                return Some(
                    ExtractionMatch::new(candidate, 0.9, full.as_str())
                        .with_position(full.start(), full.end()),
                );
            }
        }

        header_line_candidate(text)
            .map(|line| ExtractionMatch::new(line.clone(), 0.5, line))
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results: Vec<Self::Output> = Vec::new();

        for pattern in [&*NAME_RECIPIENT, &*NAME_SENDER] {
            for caps in pattern.captures_iter(text) {
                let candidate = caps[1].trim().to_string();
                if candidate.is_empty() || results.iter().any(|r| r.value == candidate) {
                    continue;
                }
                let full = caps.get(0).unwrap();
                results.push(
                    ExtractionMatch::new(candidate, 0.9, full.as_str())
                        .with_position(full.start(), full.end()),
                );
            }
        }

        for line in text.lines().take(HEADER_SCAN_LINES).map(str::trim) {
            if is_plausible_name(line) && !results.iter().any(|r| r.value == line) {
                results.push(ExtractionMatch::new(line.to_string(), 0.5, line));
            }
        }

        results
    }
}

/// First leading line that looks like a name rather than boilerplate.
fn header_line_candidate(text: &str) -> Option<String> {
    text.lines()
        .take(HEADER_SCAN_LINES)
        .map(str::trim)
        .find(|line| is_plausible_name(line))
        .map(|line| line.to_string())
}

fn is_plausible_name(line: &str) -> bool {
    let chars = line.chars().count();
    chars > 3 && chars < 60 && LETTER_RUN.is_match(line) && !HEADER_WORD.is_match(line)
}

/// Extract a best-effort counterparty name.
pub fn extract_counterparty(text: &str) -> Option<String> {
    NameExtractor::new().extract(text).map(|m| m.value)
}
