//! Frequency-domain comparison: chi-square goodness-of-fit over aligned
//! category counts, plus the histogram binning that adapts raw numeric
//! samples into count vectors.

use synthval_core::{ComputationError, TestName, TestOutcome};

use crate::measure::Measurement;
use crate::special::chi_square_sf;

/// Chi-square test over two aligned category-count vectors.
///
/// Builds the 2xK contingency table (synthetic row, real row), derives
/// expected counts from the marginals, and scores with the p-value: a high
/// p-value means the frequency profiles are statistically indistinguishable.
///
/// # Errors
///
/// - [`ComputationError::CategoryMismatch`] when the vectors differ in length.
/// - [`ComputationError::EmptySample`] when either vector is empty.
/// - [`ComputationError::DegenerateNormalization`] for fewer than 2 categories.
/// - [`ComputationError::NonPositiveExpected`] when a marginal collapses and
///   an expected count is not positive.
pub fn chi_square(synthetic: &[f64], real: &[f64]) -> TestOutcome<Measurement> {
    if synthetic.is_empty() {
        return Err(ComputationError::EmptySample { side: "synthetic" });
    }
    if real.is_empty() {
        return Err(ComputationError::EmptySample { side: "real" });
    }
    if synthetic.len() != real.len() {
        return Err(ComputationError::CategoryMismatch {
            synthetic: synthetic.len(),
            real: real.len(),
        });
    }
    let categories = synthetic.len();
    if categories < 2 {
        return Err(ComputationError::DegenerateNormalization {
            detail: "chi-square needs at least 2 categories",
        });
    }

    let synthetic_total: f64 = synthetic.iter().sum();
    let real_total: f64 = real.iter().sum();
    let grand_total = synthetic_total + real_total;

    let mut statistic = 0.0;
    for (index, (&syn, &real_count)) in synthetic.iter().zip(real).enumerate() {
        let column_total = syn + real_count;
        let expected_syn = synthetic_total * column_total / grand_total;
        let expected_real = real_total * column_total / grand_total;
        if expected_syn <= 0.0 || expected_real <= 0.0 {
            let value = expected_syn.min(expected_real);
            return Err(ComputationError::NonPositiveExpected { index, value });
        }
        statistic += (syn - expected_syn).powi(2) / expected_syn;
        statistic += (real_count - expected_real).powi(2) / expected_real;
    }

    #[allow(clippy::cast_precision_loss)]
    let dof = (categories - 1) as f64;
    let p_value = chi_square_sf(statistic, dof);

    Ok(Measurement::new(TestName::ChiSquare, p_value)
        .with("chi2", statistic)
        .with("p_value", p_value))
}

/// Bins two raw numeric samples into shared-range histogram counts.
///
/// Uses `min(max_bins, distinct combined values)` bins, never fewer than 2,
/// over the combined min..max range, so both samples land in comparable
/// categories.
///
/// # Errors
///
/// - [`ComputationError::EmptySample`] when either sample is empty.
/// - [`ComputationError::DegenerateNormalization`] when the combined range is
///   zero (a single shared value cannot be binned into 2+ categories).
pub fn histogram_counts(
    synthetic: &[f64],
    real: &[f64],
    max_bins: usize,
) -> TestOutcome<(Vec<f64>, Vec<f64>)> {
    if synthetic.is_empty() {
        return Err(ComputationError::EmptySample { side: "synthetic" });
    }
    if real.is_empty() {
        return Err(ComputationError::EmptySample { side: "real" });
    }

    let mut combined: Vec<f64> = synthetic.iter().chain(real).copied().collect();
    combined.sort_by(f64::total_cmp);
    let min = combined[0];
    let max = combined[combined.len() - 1];
    if max - min <= 0.0 {
        return Err(ComputationError::DegenerateNormalization {
            detail: "all observations share one value; histogram has no spread",
        });
    }

    let mut distinct = 1_usize;
    for window in combined.windows(2) {
        if window[1] > window[0] {
            distinct += 1;
        }
    }
    let bins = max_bins.min(distinct).max(2);
    let width = (max - min) / {
        #[allow(clippy::cast_precision_loss)]
        let b = bins as f64;
        b
    };

    let bin_of = |value: f64| -> usize {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let index = ((value - min) / width).floor() as usize;
        index.min(bins - 1)
    };

    let mut synthetic_counts = vec![0.0; bins];
    for &value in synthetic {
        synthetic_counts[bin_of(value)] += 1.0;
    }
    let mut real_counts = vec![0.0; bins];
    for &value in real {
        real_counts[bin_of(value)] += 1.0;
    }
    Ok((synthetic_counts, real_counts))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_counts_are_a_perfect_match() {
        let measurement =
            chi_square(&[42.0, 33.0, 18.0, 7.0], &[42.0, 33.0, 18.0, 7.0]).expect("scored");
        assert!((measurement.match_score - 1.0).abs() < 1.0e-9);
        let chi2 = measurement
            .statistics
            .iter()
            .find(|(name, _)| *name == "chi2")
            .map(|(_, v)| *v)
            .expect("chi2");
        assert!(chi2.abs() < 1.0e-9);
    }

    #[test]
    fn near_identical_counts_score_high() {
        let measurement =
            chi_square(&[42.0, 33.0, 18.0, 7.0], &[40.0, 35.0, 20.0, 5.0]).expect("scored");
        assert!(
            measurement.match_score > 0.75,
            "near-identical counts should not reject: {}",
            measurement.match_score
        );
    }

    #[test]
    fn divergent_counts_score_low() {
        let measurement =
            chi_square(&[80.0, 10.0, 5.0, 5.0], &[40.0, 35.0, 20.0, 5.0]).expect("scored");
        assert!(
            measurement.match_score < 0.01,
            "divergent counts should reject decisively: {}",
            measurement.match_score
        );
    }

    #[test]
    fn chi_square_is_symmetric() {
        let forward = chi_square(&[42.0, 33.0, 18.0, 7.0], &[40.0, 35.0, 20.0, 5.0]).expect("fwd");
        let backward = chi_square(&[40.0, 35.0, 20.0, 5.0], &[42.0, 33.0, 18.0, 7.0]).expect("bwd");
        assert!((forward.match_score - backward.match_score).abs() < 1.0e-12);
    }

    #[test]
    fn mismatched_cardinality_errors() {
        let err = chi_square(&[1.0, 2.0], &[1.0, 2.0, 3.0]).expect_err("mismatch");
        assert!(matches!(err, ComputationError::CategoryMismatch { .. }));
    }

    #[test]
    fn empty_vector_errors() {
        let err = chi_square(&[], &[1.0]).expect_err("empty");
        assert!(matches!(
            err,
            ComputationError::EmptySample { side: "synthetic" }
        ));
    }

    #[test]
    fn zero_column_errors_on_expected_counts() {
        // Third category has zero mass on both sides: expected count is 0.
        let err = chi_square(&[5.0, 5.0, 0.0], &[5.0, 5.0, 0.0]).expect_err("zero column");
        assert!(matches!(err, ComputationError::NonPositiveExpected { .. }));
    }

    #[test]
    fn histogram_uses_shared_bins() {
        let (syn, real) =
            histogram_counts(&[1.0, 2.0, 3.0, 4.0], &[1.0, 2.0, 3.0, 4.0], 10).expect("bins");
        assert_eq!(syn.len(), 4, "4 distinct values cap the bin count");
        assert_eq!(syn, real);
        assert!((syn.iter().sum::<f64>() - 4.0).abs() < 1.0e-12);
    }

    #[test]
    fn histogram_caps_at_max_bins() {
        let values: Vec<f64> = (0..100).map(f64::from).collect();
        let (syn, _) = histogram_counts(&values, &values, 10).expect("bins");
        assert_eq!(syn.len(), 10);
    }

    #[test]
    fn histogram_rejects_zero_spread() {
        let err = histogram_counts(&[5.0, 5.0], &[5.0], 10).expect_err("no spread");
        assert!(matches!(
            err,
            ComputationError::DegenerateNormalization { .. }
        ));
    }
}
