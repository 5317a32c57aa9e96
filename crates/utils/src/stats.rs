//! Order statistics and dispersion measures.
//!
//! All routines take the already-coerced sample and return `NaN` when the
//! statistic is undefined for it.

/// k-th largest value, `k` 1-based. Duplicates occupy distinct ranks.
pub fn kth_largest(values: &[f64], k: usize) -> f64 {
    if k == 0 || k > values.len() {
        return f64::NAN;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| b.total_cmp(a));
    sorted[k - 1]
}

/// k-th smallest value, `k` 1-based. Duplicates occupy distinct ranks.
pub fn kth_smallest(values: &[f64], k: usize) -> f64 {
    if k == 0 || k > values.len() {
        return f64::NAN;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted[k - 1]
}

pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Most frequent value. Ties go to the value that occurs first; a sample
/// with no repeated value has no mode.
pub fn mode(values: &[f64]) -> f64 {
    let mut best_value = f64::NAN;
    let mut best_count = 1usize;
    for (i, candidate) in values.iter().enumerate() {
        let count = 1 + values[i + 1..].iter().filter(|v| *v == candidate).count();
        if count > best_count {
            best_count = count;
            best_value = *candidate;
        }
    }
    best_value
}

/// Sum of squared deviations from the mean.
pub fn devsq(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    values.iter().map(|v| (v - mean) * (v - mean)).sum()
}

/// Sample variance; needs at least two values.
pub fn var(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    devsq(values) / (values.len() - 1) as f64
}

/// Sample standard deviation; needs at least two values.
pub fn stdev(values: &[f64]) -> f64 {
    var(values).sqrt()
}

/// Mean absolute deviation from the mean.
pub fn avedev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    values.iter().map(|v| (v - mean).abs()).sum::<f64>() / values.len() as f64
}
