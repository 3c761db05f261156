//! Distance-based two-sample tests: Kolmogorov-Smirnov, Wasserstein,
//! Anderson-Darling (k = 2), and Cramér-von Mises.
//!
//! All four compare empirical distribution functions. KS carries a real
//! p-value via the asymptotic Kolmogorov distribution; Anderson-Darling and
//! Cramér-von Mises score through a clamped monotonic transform of their
//! standardized statistics (higher statistic, lower score), since their
//! p-value tables are not worth carrying for a bounded match score.

use synthval_core::{ComputationError, TestName, TestOutcome};

use crate::descriptive::{combined_range, midranks, sorted};
use crate::measure::Measurement;
use crate::special::kolmogorov_sf;

/// Standardized Anderson-Darling statistics at or above this score zero.
const ANDERSON_DARLING_SCALE: f64 = 5.0;
/// Cramér-von Mises statistics at or above this score zero.
const CRAMER_VON_MISES_SCALE: f64 = 2.0;

/// Two-sample Kolmogorov-Smirnov test.
///
/// `match_score = 1 - D`; the p-value from the asymptotic Kolmogorov
/// distribution is attached as a native statistic.
///
/// # Errors
///
/// [`ComputationError::InsufficientData`] when either sample has fewer than
/// 2 points.
pub fn ks_test(synthetic: &[f64], real: &[f64]) -> TestOutcome<Measurement> {
    require_points(synthetic, real, 2)?;

    let a = sorted(synthetic);
    let b = sorted(real);
    #[allow(clippy::cast_precision_loss)]
    let (n, m) = (a.len() as f64, b.len() as f64);

    let mut d: f64 = 0.0;
    let (mut i, mut j) = (0_usize, 0_usize);
    while i < a.len() && j < b.len() {
        let (va, vb) = (a[i], b[j]);
        if va <= vb {
            i += 1;
        }
        if vb <= va {
            j += 1;
        }
        #[allow(clippy::cast_precision_loss)]
        let gap = (i as f64 / n - j as f64 / m).abs();
        d = d.max(gap);
    }

    let effective = (n * m / (n + m)).sqrt();
    let lambda = (effective + 0.12 + 0.11 / effective) * d;
    let p_value = kolmogorov_sf(lambda);

    Ok(Measurement::new(TestName::KsTest, 1.0 - d)
        .with("statistic", d)
        .with("p_value", p_value))
}

/// Exact 1-D Wasserstein (earth-mover) distance between the two empirical
/// distributions, normalized by the combined value range.
///
/// A zero combined range means every observation on both sides shares one
/// value: the distance is 0 by definition and the match is perfect, not an
/// error.
///
/// # Errors
///
/// [`ComputationError::EmptySample`] when either sample is empty.
pub fn wasserstein(synthetic: &[f64], real: &[f64]) -> TestOutcome<Measurement> {
    if synthetic.is_empty() {
        return Err(ComputationError::EmptySample { side: "synthetic" });
    }
    if real.is_empty() {
        return Err(ComputationError::EmptySample { side: "real" });
    }

    let a = sorted(synthetic);
    let b = sorted(real);
    #[allow(clippy::cast_precision_loss)]
    let (n, m) = (a.len() as f64, b.len() as f64);

    let mut all: Vec<f64> = a.iter().chain(&b).copied().collect();
    all.sort_by(f64::total_cmp);
    all.dedup();

    let mut distance = 0.0;
    let (mut i, mut j) = (0_usize, 0_usize);
    for window in all.windows(2) {
        let (value, next) = (window[0], window[1]);
        while i < a.len() && a[i] <= value {
            i += 1;
        }
        while j < b.len() && b[j] <= value {
            j += 1;
        }
        #[allow(clippy::cast_precision_loss)]
        let cdf_gap = (i as f64 / n - j as f64 / m).abs();
        distance += cdf_gap * (next - value);
    }

    let range = combined_range(&a, &b);
    let normalized = if range > 0.0 { distance / range } else { 0.0 };

    Ok(
        Measurement::new(TestName::WassersteinDistance, 1.0 - normalized.min(1.0))
            .with("distance", distance)
            .with("normalized_distance", normalized),
    )
}

/// Two-sample Anderson-Darling test (Scholz-Stephens midrank form).
///
/// The statistic is standardized to `T = (A2 - 1) / sigma`; the match score
/// is `1 - min(max(T, 0) / 5, 1)`, so samples more alike than chance (T at
/// or below 0) score a full match and the score decays linearly as T grows.
///
/// # Errors
///
/// - [`ComputationError::InsufficientData`] when either sample has fewer
///   than 2 points.
/// - [`ComputationError::DegenerateNormalization`] when every observation on
///   both sides is one shared value.
pub fn anderson_darling(synthetic: &[f64], real: &[f64]) -> TestOutcome<Measurement> {
    require_points(synthetic, real, 2)?;

    let pooled: Vec<f64> = synthetic.iter().chain(real).copied().collect();
    let mut distinct = sorted(&pooled);
    distinct.dedup();
    if distinct.len() < 2 {
        return Err(ComputationError::DegenerateNormalization {
            detail: "all observations share one value; EDF tests have no spread",
        });
    }

    #[allow(clippy::cast_precision_loss)]
    let big_n = pooled.len() as f64;
    let samples: [&[f64]; 2] = [synthetic, real];

    // Midrank A2akN (Scholz & Stephens 1987, eq. 7), k = 2.
    let mut a2 = 0.0;
    for sample in samples {
        #[allow(clippy::cast_precision_loss)]
        let n_i = sample.len() as f64;
        let mut inner = 0.0;
        for &z in &distinct {
            let below_all = count_below(&pooled, z);
            let equal_all = count_equal(&pooled, z);
            let below_i = count_below(sample, z);
            let equal_i = count_equal(sample, z);

            let l_j = equal_all;
            let b_aj = below_all + equal_all / 2.0;
            let m_aij = below_i + equal_i / 2.0;

            let denominator = b_aj * (big_n - b_aj) - big_n * l_j / 4.0;
            if denominator <= 0.0 {
                continue;
            }
            inner += (l_j / big_n) * (big_n * m_aij - n_i * b_aj).powi(2) / denominator;
        }
        a2 += inner / n_i;
    }
    a2 *= (big_n - 1.0) / big_n;

    let sigma = scholz_stephens_sigma(synthetic.len(), real.len());
    let standardized = if sigma > 0.0 { (a2 - 1.0) / sigma } else { 0.0 };

    let score = 1.0 - (standardized.max(0.0) / ANDERSON_DARLING_SCALE).min(1.0);
    Ok(Measurement::new(TestName::AndersonDarling, score).with("statistic", standardized))
}

/// Two-sample Cramér-von Mises test (rank form, Anderson 1962).
///
/// Scored through the same clamp-transform family as Anderson-Darling:
/// `1 - min(max(T, 0) / 2, 1)`.
///
/// # Errors
///
/// [`ComputationError::InsufficientData`] when either sample has fewer than
/// 2 points.
pub fn cramer_von_mises(synthetic: &[f64], real: &[f64]) -> TestOutcome<Measurement> {
    require_points(synthetic, real, 2)?;

    let a = sorted(synthetic);
    let b = sorted(real);
    let pooled: Vec<f64> = a.iter().chain(&b).copied().collect();
    let ranks = midranks(&pooled);
    let (rank_a, rank_b) = ranks.split_at(a.len());

    #[allow(clippy::cast_precision_loss)]
    let (n, m) = (a.len() as f64, b.len() as f64);
    let big_n = n + m;

    let mut u = 0.0;
    for (index, rank) in rank_a.iter().enumerate() {
        #[allow(clippy::cast_precision_loss)]
        let position = (index + 1) as f64;
        u += n * (rank - position).powi(2);
    }
    for (index, rank) in rank_b.iter().enumerate() {
        #[allow(clippy::cast_precision_loss)]
        let position = (index + 1) as f64;
        u += m * (rank - position).powi(2);
    }

    let statistic = u / (n * m * big_n) - (4.0 * n * m - 1.0) / (6.0 * big_n);
    let score = 1.0 - (statistic.max(0.0) / CRAMER_VON_MISES_SCALE).min(1.0);
    Ok(Measurement::new(TestName::CramerVonMises, score).with("statistic", statistic))
}

fn require_points(synthetic: &[f64], real: &[f64], needed: usize) -> TestOutcome<()> {
    if synthetic.len() < needed {
        return Err(ComputationError::InsufficientData {
            side: "synthetic",
            needed,
            got: synthetic.len(),
        });
    }
    if real.len() < needed {
        return Err(ComputationError::InsufficientData {
            side: "real",
            needed,
            got: real.len(),
        });
    }
    Ok(())
}

fn count_below(values: &[f64], z: f64) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let count = values.iter().filter(|&&v| v < z).count() as f64;
    count
}

fn count_equal(values: &[f64], z: f64) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let count = values.iter().filter(|&&v| v == z).count() as f64;
    count
}

/// Standard deviation of A2kN under the null (Scholz & Stephens 1987), k = 2.
fn scholz_stephens_sigma(n: usize, m: usize) -> f64 {
    let big_n = n + m;
    #[allow(clippy::cast_precision_loss)]
    let nf = big_n as f64;
    let k = 2.0;

    #[allow(clippy::cast_precision_loss)]
    let big_h = 1.0 / n as f64 + 1.0 / m as f64;

    let mut small_h = 0.0;
    for i in 1..big_n {
        #[allow(clippy::cast_precision_loss)]
        let i = i as f64;
        small_h += 1.0 / i;
    }

    let mut g = 0.0;
    for i in 1..=big_n.saturating_sub(2) {
        for j in (i + 1)..big_n {
            #[allow(clippy::cast_precision_loss)]
            let term = 1.0 / (((big_n - i) * j) as f64);
            g += term;
        }
    }

    let a = (4.0 * g - 6.0) * (k - 1.0) + (10.0 - 6.0 * g) * big_h;
    let b = (2.0 * g - 4.0) * k * k + 8.0 * small_h * k
        + (2.0 * g - 14.0 * small_h - 4.0) * big_h
        - 8.0 * small_h
        + 4.0 * g
        - 6.0;
    let c = (6.0 * small_h + 2.0 * g - 2.0) * k * k + (4.0 * small_h - 4.0 * g + 6.0) * k
        + (2.0 * small_h - 6.0) * big_h
        + 4.0 * small_h;
    let d = (2.0 * small_h + 6.0) * k * k - 4.0 * small_h * k;

    let numerator = a * nf.powi(3) + b * nf.powi(2) + c * nf + d;
    let denominator = (nf - 1.0) * (nf - 2.0) * (nf - 3.0);
    if denominator > 0.0 && numerator > 0.0 {
        (numerator / denominator).sqrt()
    } else {
        0.0
    }
}
