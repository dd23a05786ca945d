//! Loads bank export files into transaction records.
//!
//! Exports are header-less CSV files with five columns per row: date, amount and three columns
//! that are not used here. Blank lines are skipped.

use crate::model::TransactionRecord;
use crate::{utils, Result};
use anyhow::Context;
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

/// Reads the export at `path` and parses every row into a `TransactionRecord`.
pub async fn load_records(path: &Path) -> Result<Vec<TransactionRecord>> {
    let data = utils::read(path).await?;
    let rows =
        parse_csv(&data).with_context(|| format!("Unable to read CSV from {}", path.display()))?;
    let records = TransactionRecord::parse_rows(&rows)
        .with_context(|| format!("Bad transaction in {}", path.display()))?;
    debug!("Loaded {} transactions from {}", records.len(), path.display());
    Ok(records)
}

/// Splits CSV-formatted text into rows of fields. Rows may have differing lengths.
pub fn parse_csv(csv_data: &str) -> Result<Vec<Vec<String>>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(Cursor::new(csv_data.as_bytes()));

    let mut rows: Vec<Vec<String>> = Vec::new();
    for result in rdr.records() {
        let record = result?;
        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }
        rows.push(record.iter().map(|field| field.to_string()).collect());
    }
    Ok(rows)
}
