//! Summary-statistic comparison: mean, median, and standard deviation,
//! each reduced to a relative difference. The one test in the battery that
//! never errors: any input, including empty samples, degrades to a defined
//! score.

use synthval_core::{TestName, TestOutcome};

use crate::descriptive::{mean, median, population_std};
use crate::measure::Measurement;

/// Compares mean, median, and population standard deviation.
///
/// Each statistic contributes `|a - b| / max(|a|, |b|)` (0 when both sides
/// are 0); `match_score = 1 - average relative difference`. Two empty
/// samples have identical (all-zero) summaries and score a perfect match by
/// definition.
pub fn distribution_summary(synthetic: &[f64], real: &[f64]) -> TestOutcome<Measurement> {
    let synthetic_mean = mean(synthetic);
    let synthetic_median = median(synthetic);
    let synthetic_std = population_std(synthetic);
    let real_mean = mean(real);
    let real_median = median(real);
    let real_std = population_std(real);

    let differences = [
        relative_difference(synthetic_mean, real_mean),
        relative_difference(synthetic_median, real_median),
        relative_difference(synthetic_std, real_std),
    ];
    let average = differences.iter().sum::<f64>() / 3.0;

    Ok(
        Measurement::new(TestName::DistributionSummary, 1.0 - average.min(1.0))
            .with("synthetic_mean", synthetic_mean)
            .with("real_mean", real_mean)
            .with("synthetic_median", synthetic_median)
            .with("real_median", real_median)
            .with("synthetic_std", synthetic_std)
            .with("real_std", real_std)
            .with("mean_difference", (synthetic_mean - real_mean).abs())
            .with("median_difference", (synthetic_median - real_median).abs())
            .with("std_difference", (synthetic_std - real_std).abs()),
    )
}

fn relative_difference(a: f64, b: f64) -> f64 {
    let magnitude = a.abs().max(b.abs());
    if magnitude > 0.0 {
        (a - b).abs() / magnitude
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_samples_are_perfect() {
        let values = [42.0, 33.0, 18.0, 7.0];
        let measurement = distribution_summary(&values, &values).expect("scored");
        assert!((measurement.match_score - 1.0).abs() < 1.0e-12);
    }

    #[test]
    fn both_empty_is_a_perfect_match_by_definition() {
        let measurement = distribution_summary(&[], &[]).expect("scored");
        assert!((measurement.match_score - 1.0).abs() < 1.0e-12);
    }

    #[test]
    fn one_sided_empty_still_scores() {
        // Empty side degrades to all-zero summaries; real side is non-zero,
        // so every relative difference saturates at 1 and the score is 0.
        let measurement = distribution_summary(&[], &[5.0, 6.0, 7.0]).expect("scored");
        assert!(measurement.match_score.abs() < 1.0e-12);
    }

    #[test]
    fn scaled_samples_score_between_extremes() {
        let measurement =
            distribution_summary(&[2.0, 4.0, 6.0], &[1.0, 2.0, 3.0]).expect("scored");
        // Every statistic doubles: each relative difference is 0.5.
        assert!((measurement.match_score - 0.5).abs() < 1.0e-9);
    }

    #[test]
    fn statistics_are_attached() {
        let measurement = distribution_summary(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]).expect("scored");
        let names: Vec<&str> = measurement.statistics.iter().map(|(n, _)| *n).collect();
        assert!(names.contains(&"synthetic_mean"));
        assert!(names.contains(&"real_std"));
        assert!(names.contains(&"median_difference"));
    }
}
