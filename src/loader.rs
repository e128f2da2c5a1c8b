//! JSON loader for questionnaire response files.
//!
//! The expected shape is an array of objects with the keys `age`,
//! `timestamp`, `email`, `gender`, and `q1`..`q5`. Absent, null, and
//! type-mismatched fields are tolerated and land as missing values;
//! only a structurally wrong document is an error.

use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::dataset::{Dataset, Record};

/// Reads a JSON response file into a [`Dataset`].
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid JSON, or is
/// not an array of objects. Malformed field values are not errors.
pub fn load_dataset(path: impl AsRef<Path>) -> Result<Dataset> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let value: Value = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    dataset_from_value(&value)
}

/// Builds a [`Dataset`] from an already-parsed JSON document.
pub fn dataset_from_value(value: &Value) -> Result<Dataset> {
    let Value::Array(items) = value else {
        bail!("expected a JSON array of response objects");
    };

    let mut records = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let Value::Object(obj) = item else {
            bail!("row {i} is not a JSON object");
        };
        records.push(Record::from_json(obj));
    }

    debug!(rows = records.len(), "Dataset loaded");
    Ok(Dataset::new(records))
}
