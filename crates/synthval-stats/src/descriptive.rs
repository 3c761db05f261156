//! Descriptive statistics and rank helpers shared across the battery.

/// Arithmetic mean; 0.0 for an empty slice.
#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let n = values.len() as f64;
    values.iter().sum::<f64>() / n
}

/// Population variance (`ddof = 0`); 0.0 for fewer than 2 points.
#[must_use]
pub fn population_variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    #[allow(clippy::cast_precision_loss)]
    let n = values.len() as f64;
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / n
}

/// Population standard deviation; 0.0 for fewer than 2 points.
#[must_use]
pub fn population_std(values: &[f64]) -> f64 {
    population_variance(values).sqrt()
}

/// Sample variance (`ddof = 1`); 0.0 for fewer than 2 points.
#[must_use]
pub fn sample_variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    #[allow(clippy::cast_precision_loss)]
    let n = values.len() as f64;
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (n - 1.0)
}

/// Median of the values; 0.0 for an empty slice.
///
/// NaN-safe via `total_cmp`; callers feed finite data in practice.
#[must_use]
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
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

/// Sorted copy of the slice (ascending, `total_cmp`).
#[must_use]
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut out = values.to_vec();
    out.sort_by(f64::total_cmp);
    out
}

/// Midranks of the values (average rank for ties, 1-based).
///
/// Returned in the original element order.
#[must_use]
pub fn midranks(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut ranks = vec![0.0; n];
    let mut i = 0;
    while i < n {
        let mut j = i;
        while j + 1 < n && values[order[j + 1]] == values[order[i]] {
            j += 1;
        }
        // Positions i..=j hold tied values; all get the average rank.
        #[allow(clippy::cast_precision_loss)]
        let rank = (i + 1 + j + 1) as f64 / 2.0;
        for &index in &order[i..=j] {
            ranks[index] = rank;
        }
        i = j + 1;
    }
    ranks
}

/// Tie-group sizes of the values, for rank-variance corrections.
#[must_use]
pub fn tie_counts(values: &[f64]) -> Vec<usize> {
    let sorted = sorted(values);
    let mut counts = Vec::new();
    let mut i = 0;
    while i < sorted.len() {
        let mut j = i;
        while j + 1 < sorted.len() && sorted[j + 1] == sorted[i] {
            j += 1;
        }
        if j > i {
            counts.push(j - i + 1);
        }
        i = j + 1;
    }
    counts
}

/// Combined min..max spread of two samples; 0.0 when no data or no spread.
#[must_use]
pub fn combined_range(a: &[f64], b: &[f64]) -> f64 {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in a.iter().chain(b) {
        min = min.min(v);
        max = max.max(v);
    }
    if min.is_finite() && max.is_finite() {
        max - min
    } else {
        0.0
    }
}
