/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Mean over the present entries only, tracking the count explicitly.
/// Returns `None` when nothing is present, so an all-missing row can never
/// fabricate a value.
pub fn mean_present(values: &[Option<f64>]) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for v in values.iter().flatten() {
        sum += v;
        count += 1;
    }
    (count > 0).then(|| sum / count as f64)
}

/// Number of missing entries in the slice.
pub fn missing_count(values: &[Option<f64>]) -> usize {
    values.iter().filter(|v| v.is_none()).count()
}
