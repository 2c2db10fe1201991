//! Output record for one extraction run.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The six business fields recovered from one document text.
///
/// Created fresh per input and never mutated. Fields whose patterns found
/// nothing hold their documented defaults, so the record is always fully
/// populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedFields {
    /// Best-effort counterparty (client or supplier) line. Empty if none found.
    pub name: String,

    /// Document reference, uppercased and trimmed. Empty if none found.
    pub number: String,

    /// Issue date as ISO `YYYY-MM-DD`. Falls back to the run date.
    ///
    /// Kept as a string: matched day/month values are range-checked but not
    /// calendar-validated, so `2024-02-31` is a legal output.
    pub date: String,

    /// Net ("HT") amount. `None` when no qualifying numeric token exists.
    #[serde(with = "rust_decimal::serde::float_option")]
    pub amount_ht: Option<Decimal>,

    /// Applicable TVA rate. Defaults to the 20% standard rate.
    pub vat_rate: VatRate,

    /// Expense category. Defaults to `Autre`.
    pub category: Category,
}

/// French TVA rates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "f64", try_from = "f64")]
pub enum VatRate {
    /// Zero / exempt rate: 0%
    Zero,

    /// Reduced rate: 5.5%
    Reduced55,

    /// Intermediate rate: 10%
    Intermediate10,

    /// Standard rate: 20%
    #[default]
    Standard20,
}

impl VatRate {
    /// Get the rate as a percentage value (e.g. 5.5 for the reduced rate).
    pub fn as_decimal(&self) -> Decimal {
        match self {
            VatRate::Zero => Decimal::ZERO,
            VatRate::Reduced55 => Decimal::new(55, 1),
            VatRate::Intermediate10 => Decimal::from(10),
            VatRate::Standard20 => Decimal::from(20),
        }
    }

    /// Parse a rate from a matched token ("20", "10", "5,5", "5.5", "0").
    ///
    /// Only the four legal French rates are accepted; anything else is
    /// rejected so the caller keeps its default.
    pub fn from_label(s: &str) -> Option<Self> {
        let s = s.trim().trim_end_matches('%').replace(',', ".");

        match s.trim() {
            "20" => Some(VatRate::Standard20),
            "10" => Some(VatRate::Intermediate10),
            "5.5" => Some(VatRate::Reduced55),
            "0" => Some(VatRate::Zero),
            _ => None,
        }
    }

    /// Format for display.
    pub fn display(&self) -> String {
        match self {
            VatRate::Reduced55 => "5,5 %".to_string(),
            other => format!("{} %", f64::from(*other)),
        }
    }
}

impl From<VatRate> for f64 {
    fn from(rate: VatRate) -> f64 {
        match rate {
            VatRate::Zero => 0.0,
            VatRate::Reduced55 => 5.5,
            VatRate::Intermediate10 => 10.0,
            VatRate::Standard20 => 20.0,
        }
    }
}

impl TryFrom<f64> for VatRate {
    type Error = String;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        match value {
            v if v == 0.0 => Ok(VatRate::Zero),
            v if v == 5.5 => Ok(VatRate::Reduced55),
            v if v == 10.0 => Ok(VatRate::Intermediate10),
            v if v == 20.0 => Ok(VatRate::Standard20),
            v => Err(format!("not a French TVA rate: {v}")),
        }
    }
}

/// Fixed expense categories, in classifier priority order (`Autre` last).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Logiciel,

    #[serde(rename = "Matériel")]
    Materiel,

    Transport,

    #[serde(rename = "Téléphone")]
    Telephone,

    Fournitures,

    Loyer,

    #[default]
    Autre,
}

impl Category {
    /// The French label used in serialized records.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Logiciel => "Logiciel",
            Category::Materiel => "Matériel",
            Category::Transport => "Transport",
            Category::Telephone => "Téléphone",
            Category::Fournitures => "Fournitures",
            Category::Loyer => "Loyer",
            Category::Autre => "Autre",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
