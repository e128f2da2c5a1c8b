//! Missing-answer imputation from each subject's own mean.

use tracing::debug;

use crate::analysis::utility::mean_present;
use crate::dataset::Dataset;

/// Replaces each missing question answer with the mean of that subject's
/// own present answers.
///
/// A row with all five answers missing has an undefined mean and is left
/// untouched. Returns the updated dataset plus the ascending list of
/// original row indices that received at least one imputed value.
pub fn fill_missing_with_mean(dataset: &Dataset) -> (Dataset, Vec<usize>) {
    let mut records = dataset.records().to_vec();
    let mut filled_rows = Vec::new();

    for (idx, record) in records.iter_mut().enumerate() {
        let answers = record.answers();
        if answers.iter().all(Option::is_some) {
            continue;
        }
        let Some(row_mean) = mean_present(&answers) else {
            // All five missing: nothing to impute from.
            continue;
        };

        for (i, answer) in answers.iter().enumerate() {
            if answer.is_none() {
                record.set_answer(i, Some(row_mean));
            }
        }
        filled_rows.push(idx);
    }

    debug!(filled = filled_rows.len(), "Missing answers imputed");
    (Dataset::new(records), filled_rows)
}
