//! Paired-sequence comparisons: Pearson/Spearman correlation and the
//! MAE/RMSE error metrics. Both need observations that correspond position
//! by position, unlike the distributional tests in the rest of the battery.

use synthval_core::{ComputationError, TestName, TestOutcome};

use crate::descriptive::{combined_range, mean, midranks};
use crate::measure::Measurement;

/// Pearson and Spearman correlation over equal-length paired sequences.
///
/// `match_score` rescales the mean of the two coefficients from `[-1, 1]`
/// to `[0, 1]`, so perfectly anti-correlated pairs score 0, uncorrelated
/// pairs 0.5, and identical pairs 1.
///
/// # Errors
///
/// - [`ComputationError::LengthMismatch`] when the sequences differ in length.
/// - [`ComputationError::InsufficientData`] for fewer than 2 pairs.
/// - [`ComputationError::ZeroVariance`] when either side is constant.
pub fn correlation(synthetic: &[f64], real: &[f64]) -> TestOutcome<Measurement> {
    if synthetic.len() != real.len() {
        return Err(ComputationError::LengthMismatch {
            synthetic: synthetic.len(),
            real: real.len(),
        });
    }
    if synthetic.len() < 2 {
        return Err(ComputationError::InsufficientData {
            side: "synthetic",
            needed: 2,
            got: synthetic.len(),
        });
    }

    let pearson = pearson_r(synthetic, real)?;
    // Spearman is Pearson over midranks; constant inputs were already
    // rejected, and non-constant values always have non-constant ranks.
    let spearman = pearson_r(&midranks(synthetic), &midranks(real))?;

    let average = (pearson + spearman) / 2.0;
    let match_score = (average + 1.0) / 2.0;

    Ok(Measurement::new(TestName::Correlation, match_score)
        .with("pearson_r", pearson)
        .with("spearman_r", spearman)
        .with("average_correlation", average))
}

fn pearson_r(a: &[f64], b: &[f64]) -> TestOutcome<f64> {
    let mean_a = mean(a);
    let mean_b = mean(b);

    let mut covariance = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (&x, &y) in a.iter().zip(b) {
        covariance += (x - mean_a) * (y - mean_b);
        var_a += (x - mean_a).powi(2);
        var_b += (y - mean_b).powi(2);
    }
    if var_a <= 0.0 {
        return Err(ComputationError::ZeroVariance { side: "synthetic" });
    }
    if var_b <= 0.0 {
        return Err(ComputationError::ZeroVariance { side: "real" });
    }
    Ok((covariance / (var_a * var_b).sqrt()).clamp(-1.0, 1.0))
}

/// Mean absolute error and root-mean-square error over paired values,
/// normalized by the combined value range. `match_score = 1 - normalized
/// MAE`.
///
/// Sequences of different lengths are truncated to the shorter one; the
/// pairing is positional, so the trailing unmatched values carry no error
/// signal. Both sides all-zero leaves no magnitude to normalize by and is
/// an error.
///
/// # Errors
///
/// - [`ComputationError::EmptySample`] when either sequence is empty.
/// - [`ComputationError::DegenerateNormalization`] when every value on both
///   sides is zero.
pub fn error_metrics(synthetic: &[f64], real: &[f64]) -> TestOutcome<Measurement> {
    if synthetic.is_empty() {
        return Err(ComputationError::EmptySample { side: "synthetic" });
    }
    if real.is_empty() {
        return Err(ComputationError::EmptySample { side: "real" });
    }

    let len = synthetic.len().min(real.len());
    let synthetic = &synthetic[..len];
    let real = &real[..len];

    let all_zero = synthetic.iter().chain(real).all(|&v| v == 0.0);
    if all_zero {
        return Err(ComputationError::DegenerateNormalization {
            detail: "both sequences are all-zero; error normalization divides by zero",
        });
    }

    #[allow(clippy::cast_precision_loss)]
    let n = len as f64;
    let mae = synthetic
        .iter()
        .zip(real)
        .map(|(&s, &r)| (s - r).abs())
        .sum::<f64>()
        / n;
    let rmse = (synthetic
        .iter()
        .zip(real)
        .map(|(&s, &r)| (s - r).powi(2))
        .sum::<f64>()
        / n)
        .sqrt();

    let range = combined_range(synthetic, real);
    let (normalized_mae, normalized_rmse) = if range > 0.0 {
        (mae / range, rmse / range)
    } else {
        // Zero range with non-zero values: both sides hold one identical
        // constant, so the error is exactly zero.
        (0.0, 0.0)
    };

    Ok(
        Measurement::new(TestName::ErrorMetrics, 1.0 - normalized_mae.min(1.0))
            .with("mae", mae)
            .with("rmse", rmse)
            .with("normalized_mae", normalized_mae)
            .with("normalized_rmse", normalized_rmse),
    )
}
