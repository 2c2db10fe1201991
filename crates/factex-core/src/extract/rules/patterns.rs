//! Common regex patterns for French invoice extraction.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::config::FRENCH_MONTHS;

lazy_static! {
    // Net amount, label-anchored. A number directly after "HT" (optionally
    // preceded by "total"), after "montant"/"sous-total", or directly before
    // a currency/HT marker.
    pub static ref AMOUNT_AFTER_HT: Regex = Regex::new(
        r"(?i)(?:total\s*)?ht\s*[:\-]?\s*(\d[\d\s]*[.,]\d{2})"
    ).unwrap();

    pub static ref AMOUNT_AFTER_LABEL: Regex = Regex::new(
        r"(?i)(?:montant|sous[-\s]?total)\s*[:\-]?\s*(\d[\d\s]*[.,]\d{2})"
    ).unwrap();

    pub static ref AMOUNT_BEFORE_MARKER: Regex = Regex::new(
        r"(?i)(\d{1,3}(?:\s\d{3})*[.,]\d{2})\s*(?:€|eur|ht)"
    ).unwrap();

    // Blind scan fallback: space-grouped thousands, two decimals.
    pub static ref AMOUNT_TOKEN: Regex = Regex::new(
        r"\b\d{1,3}(?:\s\d{3})*[.,]\d{2}\b"
    ).unwrap();

    // TVA rate: label, short gap, one of the legal rate tokens.
    pub static ref VAT_RATE: Regex = Regex::new(
        r"(?i)tva\s*[:\-@]?\s*(20|10|5[,.]5|0)\s*%?"
    ).unwrap();

    // Document number, label-anchored: 3-21 word chars/hyphens/slashes
    // starting with a letter or digit.
    pub static ref NUMBER_LABELED: Regex = Regex::new(
        r"(?i)(?:n(?:um[ée]ro)?[°o]?\s*(?:de\s*)?facture|invoice\s*#?|ref\.?|référence)\s*[:\-]?\s*([A-Za-z0-9][\w\-/]{2,20})"
    ).unwrap();

    // Bare document code: known prefix, a digit, then digits/hyphens/slashes.
    pub static ref NUMBER_BARE: Regex = Regex::new(
        r"(?i)\b((?:FA|FAC|INV|F|DEP|FACT|AV)[-\s]?\d[\d\-/]{1,12})\b"
    ).unwrap();

    // Dates. The long French form is built from the month table.
    pub static ref DATE_FRENCH_LONG: Regex = Regex::new(&format!(
        r"(?i)(\d{{1,2}})\s+({})\s+(20\d{{2}})",
        month_alternation()
    )).unwrap();

    pub static ref DATE_YEAR_FIRST: Regex = Regex::new(
        r"\b(20\d{2})[/\-.](0?[1-9]|1[0-2])[/\-.](0?[1-9]|[12]\d|3[01])\b"
    ).unwrap();

    pub static ref DATE_DAY_FIRST: Regex = Regex::new(
        r"\b(0?[1-9]|[12]\d|3[01])[/\-.](0?[1-9]|1[0-2])[/\-.](20\d{2})\b"
    ).unwrap();

    // Counterparty labels: recipient forms, then sender forms.
    pub static ref NAME_RECIPIENT: Regex = Regex::new(
        r"(?i)(?:client|facturé\s*à|bill(?:ed)?\s*to|à\s*l.attention\s*de)\s*[:\-]?\s*(.+)"
    ).unwrap();

    pub static ref NAME_SENDER: Regex = Regex::new(
        r"(?i)(?:fournisseur|émetteur|société|de\s*la\s*part\s*de)\s*[:\-]?\s*(.+)"
    ).unwrap();

    // Header-line scan support: a run of three letters makes a line look
    // like a name; these words mark it as boilerplate instead.
    pub static ref LETTER_RUN: Regex = Regex::new(
        r"[A-Za-zÀ-ÿ]{3}"
    ).unwrap();

    pub static ref HEADER_WORD: Regex = Regex::new(
        r"(?i)facture|invoice|date|tva|total|montant"
    ).unwrap();
}

/// Build the month-name alternation for the long date form.
fn month_alternation() -> String {
    FRENCH_MONTHS
        .iter()
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join("|")
}
