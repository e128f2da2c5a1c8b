//! Output sinks for analysis results.
//!
//! Supports pretty-printing, JSON to stdout, and CSV writing/appending.

use anyhow::Result;
use serde::Serialize;
use tracing::debug;

use crate::dataset::{Dataset, Record};
use csv::WriterBuilder;
use std::fmt::Debug;
use std::fs::OpenOptions;
use std::path::Path;

/// Logs a result using Rust's debug pretty-print format.
pub fn print_pretty<T: Debug>(value: &T) {
    debug!("{:#?}", value);
}

/// Writes a result to stdout as pretty-printed JSON.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Writes a whole dataset to a CSV file with headers, replacing any
/// existing file. Missing fields and absent scores come out as empty cells.
pub fn write_csv(path: &str, dataset: &Dataset) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for record in dataset.iter() {
        writer.serialize(record)?;
    }
    writer.flush()?;

    debug!(path, rows = dataset.len(), "Dataset written to CSV");
    Ok(())
}

/// Appends a single [`Record`] as a row to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_record(path: &str, record: &Record) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, "Appending CSV record");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    writer.serialize(record)?;
    writer.flush()?;

    Ok(())
}
