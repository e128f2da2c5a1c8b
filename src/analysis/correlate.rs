//! Mean question scores grouped by gender and an age threshold.

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

use crate::analysis::utility::mean;
use crate::dataset::{Dataset, Gender};

/// Age above which a subject counts as "over" for grouping.
pub const AGE_THRESHOLD: f64 = 40.0;

/// Per-group mean of each question. A question that no group member
/// answered has an undefined mean (`None`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupMeans {
    pub gender: Gender,
    pub over_40: bool,
    pub q1: Option<f64>,
    pub q2: Option<f64>,
    pub q3: Option<f64>,
    pub q4: Option<f64>,
    pub q5: Option<f64>,
}

impl GroupMeans {
    pub fn means(&self) -> [Option<f64>; 5] {
        [self.q1, self.q2, self.q3, self.q4, self.q5]
    }
}

/// The correlation table: one row per populated (gender, age-group) pair,
/// in stable (gender, over_40) order. Groups with no members are absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationTable {
    pub groups: Vec<GroupMeans>,
}

impl CorrelationTable {
    pub fn get(&self, gender: Gender, over_40: bool) -> Option<&GroupMeans> {
        self.groups
            .iter()
            .find(|g| g.gender == gender && g.over_40 == over_40)
    }
}

/// Groups rows by (gender, age > 40) and computes the per-question means.
///
/// Rows with a missing age or gender have no group key and are excluded
/// entirely. Within a group each question's mean skips missing answers
/// independently; gender values are opaque keys, never special-cased.
pub fn correlate_gender_age(dataset: &Dataset) -> CorrelationTable {
    let mut series: BTreeMap<(Gender, bool), [Vec<f64>; 5]> = BTreeMap::new();
    let mut skipped = 0usize;

    for record in dataset.iter() {
        let (Some(age), Some(gender)) = (record.age, record.gender) else {
            skipped += 1;
            continue;
        };

        let columns = series.entry((gender, age > AGE_THRESHOLD)).or_default();
        for (column, answer) in columns.iter_mut().zip(record.answers()) {
            if let Some(value) = answer {
                column.push(value);
            }
        }
    }

    let groups = series
        .into_iter()
        .map(|((gender, over_40), columns)| {
            let column_mean = |c: &Vec<f64>| (!c.is_empty()).then(|| mean(c));
            GroupMeans {
                gender,
                over_40,
                q1: column_mean(&columns[0]),
                q2: column_mean(&columns[1]),
                q3: column_mean(&columns[2]),
                q4: column_mean(&columns[3]),
                q5: column_mean(&columns[4]),
            }
        })
        .collect();

    debug!(skipped, "Gender/age correlation computed");
    CorrelationTable { groups }
}
