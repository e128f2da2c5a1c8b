//! Data types for questionnaire responses.
//!
//! Raw JSON values are coerced into canonical field types at load time;
//! a value that cannot be coerced becomes missing (`None`), never an error.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The fixed set of accepted gender values. Anything else is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
    Fluid,
}

impl Gender {
    /// Parses an exact enumeration spelling; no normalization.
    pub fn parse(s: &str) -> Option<Gender> {
        match s {
            "Male" => Some(Gender::Male),
            "Female" => Some(Gender::Female),
            "Other" => Some(Gender::Other),
            "Fluid" => Some(Gender::Fluid),
            _ => None,
        }
    }
}

/// A single questionnaire submission.
///
/// Every field is optional before cleaning; the cleaner enforces presence
/// and validity by removing rows, not by repairing them. `score` is absent
/// until the scorer runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub age: Option<f64>,
    pub timestamp: Option<DateTime<Utc>>,
    pub email: Option<String>,
    pub gender: Option<Gender>,
    pub q1: Option<f64>,
    pub q2: Option<f64>,
    pub q3: Option<f64>,
    pub q4: Option<f64>,
    pub q5: Option<f64>,
    pub score: Option<u8>,
}

impl Record {
    /// Builds a record from one JSON object, coercing each field best-effort.
    pub fn from_json(obj: &Map<String, Value>) -> Record {
        Record {
            age: obj.get("age").and_then(coerce_number),
            timestamp: obj.get("timestamp").and_then(coerce_timestamp),
            email: obj
                .get("email")
                .and_then(Value::as_str)
                .map(str::to_owned),
            gender: obj
                .get("gender")
                .and_then(Value::as_str)
                .and_then(Gender::parse),
            q1: obj.get("q1").and_then(coerce_number),
            q2: obj.get("q2").and_then(coerce_number),
            q3: obj.get("q3").and_then(coerce_number),
            q4: obj.get("q4").and_then(coerce_number),
            q5: obj.get("q5").and_then(coerce_number),
            score: None,
        }
    }

    /// The five question answers in order, for fold-style processing.
    pub fn answers(&self) -> [Option<f64>; 5] {
        [self.q1, self.q2, self.q3, self.q4, self.q5]
    }

    /// Writes back one question answer by position (0-based).
    pub fn set_answer(&mut self, index: usize, value: Option<f64>) {
        match index {
            0 => self.q1 = value,
            1 => self.q2 = value,
            2 => self.q3 = value,
            3 => self.q4 = value,
            4 => self.q5 = value,
            _ => unreachable!("question index out of range: {index}"),
        }
    }
}

/// An ordered collection of records. Every pipeline operation takes a
/// dataset by reference and returns a fresh value; row order is preserved
/// throughout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Dataset {
        Dataset { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }
}

impl FromIterator<Record> for Dataset {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Dataset {
        Dataset {
            records: iter.into_iter().collect(),
        }
    }
}

/// Coerces a JSON value to a finite number. Accepts numbers and numeric
/// strings; everything else (null, bool, objects, NaN) is missing.
pub(crate) fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

/// Coerces a JSON value to a UTC timestamp. Accepts RFC 3339 strings,
/// `YYYY-MM-DD HH:MM:SS` strings, bare dates, and integer epoch seconds.
pub(crate) fn coerce_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_datetime(s.trim()),
        Value::Number(n) => n
            .as_i64()
            .and_then(|secs| Utc.timestamp_opt(secs, 0).single()),
        _ => None,
    }
}

fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?));
    }
    None
}
