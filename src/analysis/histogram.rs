//! Age distribution over fixed ten-year bins.

use serde::Serialize;

use crate::dataset::Dataset;

/// Number of fixed-width age bins.
pub const AGE_BINS: usize = 10;

/// Width of each age bin.
pub const AGE_BIN_WIDTH: f64 = 10.0;

/// Per-bin counts plus the bin edge sequence 0,10,..,100.
///
/// Bins are inclusive-exclusive except the final bin, which also includes
/// age 100 exactly. Ages outside [0, 100] and missing ages are excluded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgeHistogram {
    pub counts: [u64; AGE_BINS],
    pub edges: [f64; AGE_BINS + 1],
}

/// Computes the age histogram of a dataset. Deterministic; missing and
/// out-of-range ages are skipped before binning.
pub fn age_distribution(dataset: &Dataset) -> AgeHistogram {
    let mut counts = [0u64; AGE_BINS];

    for age in dataset.iter().filter_map(|record| record.age) {
        if !(0.0..=100.0).contains(&age) {
            continue;
        }
        // Age 100 lands in the final bin rather than an eleventh one.
        let bin = ((age / AGE_BIN_WIDTH) as usize).min(AGE_BINS - 1);
        counts[bin] += 1;
    }

    let mut edges = [0.0; AGE_BINS + 1];
    for (i, edge) in edges.iter_mut().enumerate() {
        *edge = i as f64 * AGE_BIN_WIDTH;
    }

    AgeHistogram { counts, edges }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Record;

    fn dataset_with_ages(ages: &[Option<f64>]) -> Dataset {
        ages.iter()
            .map(|age| Record {
                age: *age,
                ..Record::default()
            })
            .collect()
    }

    #[test]
    fn test_reference_distribution() {
        let dataset = dataset_with_ages(&[Some(5.0), Some(15.0), Some(25.0), Some(35.0)]);
        let hist = age_distribution(&dataset);

        assert_eq!(hist.counts, [1, 1, 1, 1, 0, 0, 0, 0, 0, 0]);
        assert_eq!(
            hist.edges,
            [0.0, 10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0]
        );
    }

    #[test]
    fn test_missing_ages_are_excluded() {
        let dataset = dataset_with_ages(&[Some(42.0), None, None]);
        let hist = age_distribution(&dataset);
        assert_eq!(hist.counts.iter().sum::<u64>(), 1);
        assert_eq!(hist.counts[4], 1);
    }

    #[test]
    fn test_bin_edges_are_inclusive_exclusive() {
        let dataset = dataset_with_ages(&[Some(0.0), Some(9.9), Some(10.0), Some(19.9)]);
        let hist = age_distribution(&dataset);
        assert_eq!(hist.counts[0], 2);
        assert_eq!(hist.counts[1], 2);
    }

    #[test]
    fn test_age_100_falls_in_final_bin_and_above_is_excluded() {
        let dataset = dataset_with_ages(&[Some(100.0), Some(101.0), Some(-1.0)]);
        let hist = age_distribution(&dataset);
        assert_eq!(hist.counts[9], 1);
        assert_eq!(hist.counts.iter().sum::<u64>(), 1);
    }

    #[test]
    fn test_empty_dataset_yields_all_zero_counts() {
        let hist = age_distribution(&Dataset::default());
        assert_eq!(hist.counts, [0; 10]);
    }
}
