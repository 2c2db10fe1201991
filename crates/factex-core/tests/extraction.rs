//! End-to-end extraction scenarios over the public API.

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

use factex_core::extract::{FieldParser, HeuristicParser, raw_excerpt};
use factex_core::models::fields::{Category, VatRate};

fn parser() -> HeuristicParser {
    HeuristicParser::new().with_reference_date(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
}

#[test]
fn full_receipt_scenario() {
    let text = "Total HT: 1 234,56 €\nTVA: 20%\nFacture N° FAC-2024-001\n15 mars 2024\nAdobe Creative Cloud";
    let fields = parser().extract_fields(text);

    assert_eq!(fields.amount_ht, Some(dec!(1234.56)));
    assert_eq!(fields.vat_rate, VatRate::Standard20);
    assert_eq!(fields.number, "FAC-2024-001");
    assert_eq!(fields.date, "2024-03-15");
    assert_eq!(fields.category, Category::Logiciel);
}

#[test]
fn totality_on_empty_input() {
    let fields = parser().extract_fields("");

    assert_eq!(fields.name, "");
    assert_eq!(fields.number, "");
    assert_eq!(fields.date, "2024-06-01");
    assert_eq!(fields.amount_ht, None);
    assert_eq!(fields.vat_rate, VatRate::Standard20);
    assert_eq!(fields.category, Category::Autre);
}

#[test]
fn totality_on_pure_noise() {
    let fields = parser().extract_fields("@@ ## !! 7 zz\n\u{fffd}\u{fffd}\n---");

    assert_eq!(fields.name, "");
    assert_eq!(fields.number, "");
    assert_eq!(fields.date, "2024-06-01");
    assert_eq!(fields.amount_ht, None);
    assert_eq!(fields.vat_rate, VatRate::Standard20);
    assert_eq!(fields.category, Category::Autre);
}

#[test]
fn determinism_on_identical_input() {
    let text = "Sous-total: 99,00\nréglé le 12/03/2024";
    let p = parser();

    let first = p.extract_fields(text);
    let second = p.extract_fields(text);

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn fallback_never_selects_below_floor() {
    let fields = parser().extract_fields("Ticket 5,00 puis 9,99 puis 4,50");
    assert_eq!(fields.amount_ht, None);
}

#[test]
fn fallback_never_selects_at_or_above_ceiling() {
    let fields = parser().extract_fields("Siret 1 000 000,00 - prix 250,00");
    assert_eq!(fields.amount_ht, Some(dec!(250.00)));
}

#[test]
fn bare_integer_is_not_an_amount() {
    let fields = parser().extract_fields("42");
    assert_eq!(fields.amount_ht, None);
}

#[test]
fn category_priority_ignores_position_and_count() {
    // Transport keywords appear first and twice; Logiciel still wins because
    // it precedes Transport in the table.
    let fields = parser().extract_fields("Uber taxi reçu, licence incluse");
    assert_eq!(fields.category, Category::Logiciel);
}

#[test]
fn sfr_receipt_is_telephone() {
    let fields = parser().extract_fields("SFR Mobile Forfait 19,99€ TVA 20%");

    assert_eq!(fields.category, Category::Telephone);
    assert_eq!(fields.vat_rate, VatRate::Standard20);
    assert_eq!(fields.amount_ht, Some(dec!(19.99)));
}

#[test]
fn run_date_when_no_date_matches() {
    let fields = parser().extract_fields("Montant: 120,00");
    assert_eq!(fields.date, "2024-06-01");
}

#[test]
fn day_first_date_is_interpreted_day_first() {
    let fields = parser().extract_fields("05/03/2024");
    assert_eq!(fields.date, "2024-03-05");
}

#[test]
fn record_serializes_with_contract_values() {
    let text = "Total HT: 1 234,56 €\nTVA: 5,5%\nFacture N° FAC-2024-001";
    let fields = parser().extract_fields(text);
    let value = serde_json::to_value(&fields).unwrap();

    assert_eq!(value["amount_ht"], serde_json::json!(1234.56));
    assert_eq!(value["vat_rate"], serde_json::json!(5.5));
    assert_eq!(value["number"], serde_json::json!("FAC-2024-001"));
    assert_eq!(value["category"], serde_json::json!("Autre"));
    assert_eq!(value["date"], serde_json::json!("2024-06-01"));
}

#[test]
fn raw_excerpt_truncates_to_five_hundred_chars() {
    let text = "é".repeat(600);
    let excerpt = raw_excerpt(&text);
    assert_eq!(excerpt.chars().count(), 500);

    assert_eq!(raw_excerpt("court"), "court");
}
