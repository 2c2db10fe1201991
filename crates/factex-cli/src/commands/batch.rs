//! Batch command - extract fields from many recognized-text files.

use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::warn;

use factex_core::extract::FieldParser;
use factex_core::models::fields::ExtractedFields;

use super::extract::{build_parser, csv_fields};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern of input text files (e.g. "scans/*.txt")
    #[arg(required = true)]
    pattern: String,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    format: BatchFormat,

    /// Fixed run date (YYYY-MM-DD) used when no date is found
    #[arg(long)]
    date: Option<NaiveDate>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum BatchFormat {
    /// One CSV row per file
    Csv,
    /// One JSON object per line
    Jsonl,
}

#[derive(Serialize)]
struct BatchRow<'a> {
    file: String,
    #[serde(flatten)]
    fields: &'a ExtractedFields,
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let parser = build_parser(config_path, args.date)?;

    let paths: Vec<PathBuf> = glob::glob(&args.pattern)?
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                warn!("skipping unreadable path: {}", e);
                None
            }
        })
        .collect();

    if paths.is_empty() {
        anyhow::bail!("No files match pattern: {}", args.pattern);
    }

    let pb = ProgressBar::new(paths.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("##-"),
    );

    let mut rows = Vec::new();
    for path in &paths {
        pb.set_message(path.display().to_string());
        match fs::read_to_string(path) {
            Ok(text) => {
                let fields = parser.extract_fields(&text);
                rows.push((path.display().to_string(), fields));
            }
            Err(e) => warn!("skipping {}: {}", path.display(), e),
        }
        pb.inc(1);
    }
    pb.finish_with_message("Done");

    let output = match args.format {
        BatchFormat::Csv => format_batch_csv(&rows)?,
        BatchFormat::Jsonl => format_batch_jsonl(&rows)?,
    };

    match &args.output {
        Some(path) => {
            fs::write(path, &output)?;
            println!(
                "{} {} files -> {}",
                style("✓").green(),
                rows.len(),
                path.display()
            );
        }
        None => print!("{}", output),
    }

    Ok(())
}

fn format_batch_csv(rows: &[(String, ExtractedFields)]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record([
        "file", "name", "number", "date", "amount_ht", "vat_rate", "category",
    ])?;

    for (file, fields) in rows {
        let mut record = vec![file.clone()];
        record.extend(csv_fields(fields));
        wtr.write_record(&record)?;
    }

    Ok(String::from_utf8(wtr.into_inner()?)?)
}

fn format_batch_jsonl(rows: &[(String, ExtractedFields)]) -> anyhow::Result<String> {
    let mut output = String::new();
    for (file, fields) in rows {
        let row = BatchRow {
            file: file.clone(),
            fields,
        };
        output.push_str(&serde_json::to_string(&row)?);
        output.push('\n');
    }
    Ok(output)
}
