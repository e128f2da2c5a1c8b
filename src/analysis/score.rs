//! Per-subject scoring with a missing-answer cutoff.

use tracing::debug;

use crate::analysis::utility::{mean_present, missing_count};
use crate::dataset::{Dataset, Record};

/// Default number of missing answers tolerated before a subject gets no score.
pub const DEFAULT_MAX_NANS_PER_SUB: usize = 1;

/// Scores every subject and returns a new dataset with the `score` field
/// set on each row.
///
/// The score is floor(mean of present answers), clamped to [0, 100]. A
/// subject with more than `maximal_nans_per_sub` missing answers gets an
/// explicit no-score (`None`), never zero; so does a subject with no
/// present answers at all.
pub fn score_subjects(dataset: &Dataset, maximal_nans_per_sub: usize) -> Dataset {
    let mut records = dataset.records().to_vec();
    let mut unscored = 0usize;

    for record in &mut records {
        record.score = score_record(record, maximal_nans_per_sub);
        if record.score.is_none() {
            unscored += 1;
        }
    }

    debug!(
        rows = records.len(),
        unscored, maximal_nans_per_sub, "Subjects scored"
    );
    Dataset::new(records)
}

fn score_record(record: &Record, maximal_nans_per_sub: usize) -> Option<u8> {
    let answers = record.answers();
    if missing_count(&answers) > maximal_nans_per_sub {
        return None;
    }
    // Explicit floor-then-clamp: truncation toward zero, not round-to-nearest.
    let mean = mean_present(&answers)?;
    Some(mean.floor().clamp(0.0, 100.0) as u8)
}
