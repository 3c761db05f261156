//! Location tests: Mann-Whitney U (medians via ranks) and Welch's t
//! (means with unequal variances). Both score with their two-sided
//! p-value: a high p-value means the null of "same location" survives.

use synthval_core::{ComputationError, TestName, TestOutcome};

use crate::descriptive::{mean, midranks, sample_variance, tie_counts};
use crate::measure::Measurement;
use crate::special::{normal_sf, student_t_two_sided};

/// Mann-Whitney U test, two-sided, tie-corrected normal approximation with
/// continuity correction. `match_score = p_value`.
///
/// When every pooled observation carries one shared value there is no rank
/// information at all; the samples are indistinguishable by rank and the
/// test degrades to a perfect p-value of 1 rather than erroring.
///
/// # Errors
///
/// [`ComputationError::EmptySample`] when either sample is empty.
pub fn mann_whitney(synthetic: &[f64], real: &[f64]) -> TestOutcome<Measurement> {
    if synthetic.is_empty() {
        return Err(ComputationError::EmptySample { side: "synthetic" });
    }
    if real.is_empty() {
        return Err(ComputationError::EmptySample { side: "real" });
    }

    let pooled: Vec<f64> = synthetic.iter().chain(real).copied().collect();
    let ranks = midranks(&pooled);
    #[allow(clippy::cast_precision_loss)]
    let (n, m) = (synthetic.len() as f64, real.len() as f64);
    let big_n = n + m;

    let rank_sum: f64 = ranks[..synthetic.len()].iter().sum();
    let u = rank_sum - n * (n + 1.0) / 2.0;

    let mu = n * m / 2.0;
    let tie_term: f64 = tie_counts(&pooled)
        .into_iter()
        .map(|t| {
            #[allow(clippy::cast_precision_loss)]
            let t = t as f64;
            t.powi(3) - t
        })
        .sum();
    let variance = n * m / 12.0 * ((big_n + 1.0) - tie_term / (big_n * (big_n - 1.0)));

    let p_value = if variance > 0.0 {
        let z = ((u - mu).abs() - 0.5).max(0.0) / variance.sqrt();
        (2.0 * normal_sf(z)).min(1.0)
    } else {
        // Fully tied pool: no rank evidence of a difference.
        1.0
    };

    Ok(Measurement::new(TestName::MannWhitney, p_value)
        .with("statistic", u)
        .with("p_value", p_value))
}

/// Welch's unequal-variance t-test, two-sided, with Welch-Satterthwaite
/// degrees of freedom. `match_score = p_value`.
///
/// Degenerate variance handling:
/// - exactly one side constant: the statistic is undefined, error;
/// - both sides constant: no spread anywhere, so the comparison collapses
///   to the means — p is 1 when they agree and 0 when they do not.
///
/// # Errors
///
/// - [`ComputationError::EmptySample`] when either sample is empty.
/// - [`ComputationError::ZeroVariance`] when exactly one sample is constant.
pub fn welch_t(synthetic: &[f64], real: &[f64]) -> TestOutcome<Measurement> {
    if synthetic.is_empty() {
        return Err(ComputationError::EmptySample { side: "synthetic" });
    }
    if real.is_empty() {
        return Err(ComputationError::EmptySample { side: "real" });
    }

    let mean_syn = mean(synthetic);
    let mean_real = mean(real);
    let var_syn = sample_variance(synthetic);
    let var_real = sample_variance(real);

    match (var_syn > 0.0, var_real > 0.0) {
        (false, false) => {
            let p_value = if (mean_syn - mean_real).abs() < f64::EPSILON {
                1.0
            } else {
                0.0
            };
            return Ok(Measurement::new(TestName::WelchT, p_value)
                .with("statistic", 0.0)
                .with("p_value", p_value));
        }
        (false, true) => return Err(ComputationError::ZeroVariance { side: "synthetic" }),
        (true, false) => return Err(ComputationError::ZeroVariance { side: "real" }),
        (true, true) => {}
    }

    #[allow(clippy::cast_precision_loss)]
    let (n, m) = (synthetic.len() as f64, real.len() as f64);
    let se_syn = var_syn / n;
    let se_real = var_real / m;
    let statistic = (mean_syn - mean_real) / (se_syn + se_real).sqrt();

    let dof =
        (se_syn + se_real).powi(2) / (se_syn.powi(2) / (n - 1.0) + se_real.powi(2) / (m - 1.0));
    let p_value = student_t_two_sided(statistic, dof);

    Ok(Measurement::new(TestName::WelchT, p_value)
        .with("statistic", statistic)
        .with("p_value", p_value))
}
