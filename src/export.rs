//! Per-site output files: CSV (UTF-8 with BOM) and an optional JSON dump.

use crate::models::ListingRecord;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;

/// Byte-order mark so spreadsheet tools pick UTF-8
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Union of field names across `records`, in first-seen order
pub fn columns(records: &[ListingRecord]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for record in records {
        for key in record.keys() {
            if !columns.iter().any(|column| column == key) {
                columns.push(key.to_string());
            }
        }
    }
    columns
}

/// Write `records` as CSV to `writer`, BOM first. Missing or null fields render empty.
pub fn write_csv_to<W: Write>(records: &[ListingRecord], mut writer: W) -> Result<(), ExportError> {
    writer.write_all(UTF8_BOM)?;

    let columns = columns(records);
    let mut csv = csv::Writer::from_writer(writer);
    if !columns.is_empty() {
        csv.write_record(&columns)?;
    }

    for record in records {
        let row = columns.iter().map(|column| {
            record
                .get(column)
                .map(|value| value.render())
                .unwrap_or_default()
        });
        csv.write_record(row)?;
    }

    csv.flush()?;
    Ok(())
}

pub fn write_csv(records: &[ListingRecord], path: &Path) -> Result<(), ExportError> {
    let file = File::create(path)?;
    write_csv_to(records, BufWriter::new(file))
}

pub fn write_json(records: &[ListingRecord], path: &Path) -> Result<(), ExportError> {
    let json = serde_json::to_string_pretty(records)?;
    std::fs::write(path, json)?;
    Ok(())
}
