//! Extract command - pull fields from one recognized-text file.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::Args;
use console::style;
use serde::Serialize;
use tracing::{debug, info};

use factex_core::extract::rules::amounts::format_french_amount;
use factex_core::extract::{FieldParser, HeuristicParser, raw_excerpt};
use factex_core::models::config::ExtractionConfig;
use factex_core::models::fields::ExtractedFields;

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input text file, or '-' for stdin
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Fixed run date (YYYY-MM-DD) used when no date is found
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Show fields that fell back to their default
    #[arg(long)]
    show_warnings: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output: fields plus the raw-text excerpt
    Json,
    /// Single-row CSV
    Csv,
    /// Human-readable summary
    Text,
}

/// JSON response shape: the record plus a diagnostic excerpt of the input.
#[derive(Serialize)]
struct ExtractResponse {
    fields: ExtractedFields,
    raw_text: String,
}

pub fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let parser = build_parser(config_path, args.date)?;

    let text = read_input(&args.input)?;
    info!(
        "read {} characters from {}",
        text.chars().count(),
        args.input.display()
    );

    let result = parser.parse(&text);
    debug!("extraction took {}ms", result.processing_time_ms);

    if args.show_warnings && !result.warnings.is_empty() {
        eprintln!("{}", style("Defaulted fields:").yellow());
        for warning in &result.warnings {
            eprintln!("  - {}", warning);
        }
    }

    let output = match args.format {
        OutputFormat::Json => format_json(&result.fields, &text)?,
        OutputFormat::Csv => format_csv(&result.fields)?,
        OutputFormat::Text => format_text(&result.fields),
    };

    match &args.output {
        Some(path) => {
            fs::write(path, &output)?;
            println!(
                "{} Output written to {}",
                style("✓").green(),
                path.display()
            );
        }
        None => println!("{}", output),
    }

    Ok(())
}

/// Build a parser from an optional config file and an optional fixed date.
pub(crate) fn build_parser(
    config_path: Option<&str>,
    date: Option<NaiveDate>,
) -> anyhow::Result<HeuristicParser> {
    let parser = match config_path {
        Some(path) => {
            let config = ExtractionConfig::from_file(Path::new(path))?;
            HeuristicParser::with_config(&config)?
        }
        None => HeuristicParser::new(),
    };

    Ok(match date {
        Some(date) => parser.with_reference_date(date),
        None => parser,
    })
}

pub(crate) fn read_input(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }

    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }

    Ok(fs::read_to_string(path)?)
}

/// The six record fields as CSV cells, in contract order.
pub(crate) fn csv_fields(fields: &ExtractedFields) -> [String; 6] {
    [
        fields.name.clone(),
        fields.number.clone(),
        fields.date.clone(),
        fields
            .amount_ht
            .map(|a| a.to_string())
            .unwrap_or_default(),
        f64::from(fields.vat_rate).to_string(),
        fields.category.to_string(),
    ]
}

fn format_json(fields: &ExtractedFields, text: &str) -> anyhow::Result<String> {
    let response = ExtractResponse {
        fields: fields.clone(),
        raw_text: raw_excerpt(text),
    };
    Ok(serde_json::to_string_pretty(&response)?)
}

fn format_csv(fields: &ExtractedFields) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["name", "number", "date", "amount_ht", "vat_rate", "category"])?;
    wtr.write_record(&csv_fields(fields))?;

    Ok(String::from_utf8(wtr.into_inner()?)?)
}

fn format_text(fields: &ExtractedFields) -> String {
    let amount = fields
        .amount_ht
        .map(|a| format!("{} €", format_french_amount(a)))
        .unwrap_or_else(|| "-".to_string());

    let mut output = String::new();
    output.push_str(&format!("Counterparty: {}\n", display_or_dash(&fields.name)));
    output.push_str(&format!("Number:       {}\n", display_or_dash(&fields.number)));
    output.push_str(&format!("Date:         {}\n", fields.date));
    output.push_str(&format!("Amount (HT):  {}\n", amount));
    output.push_str(&format!("TVA rate:     {}\n", fields.vat_rate.display()));
    output.push_str(&format!("Category:     {}\n", fields.category));
    output
}

fn display_or_dash(s: &str) -> &str {
    if s.is_empty() { "-" } else { s }
}
