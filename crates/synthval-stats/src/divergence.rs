//! Probability-distribution divergences: Jensen-Shannon and
//! Kullback-Leibler.
//!
//! Both treat their input vectors as unnormalized masses: each side is
//! normalized to sum to 1, and the shorter vector is zero-padded so the two
//! distributions share a support. Jensen-Shannon is symmetric;
//! Kullback-Leibler is not, and the direction computed here is
//! KL(synthetic || real) — synthetic is P, real is Q. That asymmetry is a
//! property of the divergence, not a defect.

use synthval_core::{ComputationError, TestName, TestOutcome};

use crate::measure::Measurement;

/// Jensen-Shannon divergence, reported in the square-root (distance) form
/// so the native statistic lives in `[0, 1]`. `match_score = 1 - distance`.
///
/// # Errors
///
/// [`ComputationError::ZeroSum`] when either vector cannot be normalized.
pub fn jensen_shannon(synthetic: &[f64], real: &[f64]) -> TestOutcome<Measurement> {
    let (p, q) = normalized_pair(synthetic, real)?;

    // Base-2 logs bound the divergence to [0, 1].
    let mut divergence = 0.0;
    for (&pi, &qi) in p.iter().zip(&q) {
        let mi = (pi + qi) / 2.0;
        if pi > 0.0 {
            divergence += 0.5 * pi * (pi / mi).log2();
        }
        if qi > 0.0 {
            divergence += 0.5 * qi * (qi / mi).log2();
        }
    }
    let distance = divergence.max(0.0).sqrt();

    Ok(
        Measurement::new(TestName::JensenShannon, 1.0 - distance.min(1.0))
            .with("divergence", distance),
    )
}

/// Kullback-Leibler divergence KL(synthetic || real), natural log.
///
/// Probability masses are floored at `epsilon` before the ratio so empty
/// cells on the real side do not send the divergence to infinity.
/// `match_score = 1 / (1 + divergence)`, a monotonic map of `[0, inf)` onto
/// `(0, 1]`.
///
/// # Errors
///
/// [`ComputationError::ZeroSum`] when either vector cannot be normalized.
pub fn kullback_leibler(synthetic: &[f64], real: &[f64], epsilon: f64) -> TestOutcome<Measurement> {
    let (p, q) = normalized_pair(synthetic, real)?;

    let mut divergence = 0.0;
    for (&pi, &qi) in p.iter().zip(&q) {
        let pi = pi.max(epsilon);
        let qi = qi.max(epsilon);
        divergence += pi * (pi / qi).ln();
    }
    let divergence = divergence.max(0.0);

    Ok(
        Measurement::new(TestName::KullbackLeibler, 1.0 / (1.0 + divergence))
            .with("divergence", divergence),
    )
}

/// Normalizes both vectors into probability distributions over a shared
/// support, zero-padding the shorter one.
fn normalized_pair(synthetic: &[f64], real: &[f64]) -> TestOutcome<(Vec<f64>, Vec<f64>)> {
    let synthetic_sum: f64 = synthetic.iter().sum();
    let real_sum: f64 = real.iter().sum();
    if synthetic_sum <= 0.0 {
        return Err(ComputationError::ZeroSum { side: "synthetic" });
    }
    if real_sum <= 0.0 {
        return Err(ComputationError::ZeroSum { side: "real" });
    }

    let len = synthetic.len().max(real.len());
    let mut p = vec![0.0; len];
    for (slot, &value) in p.iter_mut().zip(synthetic) {
        *slot = value / synthetic_sum;
    }
    let mut q = vec![0.0; len];
    for (slot, &value) in q.iter_mut().zip(real) {
        *slot = value / real_sum;
    }
    Ok((p, q))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1.0e-10;

    #[test]
    fn jensen_shannon_identical_is_perfect() {
        let measurement =
            jensen_shannon(&[42.0, 33.0, 18.0, 7.0], &[42.0, 33.0, 18.0, 7.0]).expect("scored");
        assert!((measurement.match_score - 1.0).abs() < 1.0e-9);
    }

    #[test]
    fn jensen_shannon_near_identical_scores_high() {
        let measurement =
            jensen_shannon(&[42.0, 33.0, 18.0, 7.0], &[40.0, 35.0, 20.0, 5.0]).expect("scored");
        assert!(
            measurement.match_score > 0.9,
            "small count shifts stay close: {}",
            measurement.match_score
        );
    }

    #[test]
    fn jensen_shannon_is_symmetric() {
        let forward = jensen_shannon(&[8.0, 1.0, 1.0], &[4.0, 3.0, 3.0]).expect("fwd");
        let backward = jensen_shannon(&[4.0, 3.0, 3.0], &[8.0, 1.0, 1.0]).expect("bwd");
        assert!((forward.match_score - backward.match_score).abs() < 1.0e-12);
    }

    #[test]
    fn jensen_shannon_disjoint_mass_is_maximal() {
        let measurement = jensen_shannon(&[1.0, 0.0], &[0.0, 1.0]).expect("scored");
        let (_, distance) = measurement.statistics[0];
        assert!((distance - 1.0).abs() < 1.0e-9, "disjoint supports: {distance}");
        assert!(measurement.match_score.abs() < 1.0e-9);
    }

    #[test]
    fn jensen_shannon_pads_shorter_vector() {
        // Padding adds zero-mass cells, equivalent to explicit zeros.
        let padded = jensen_shannon(&[1.0, 1.0], &[1.0, 1.0, 2.0]).expect("padded");
        let explicit = jensen_shannon(&[1.0, 1.0, 0.0], &[1.0, 1.0, 2.0]).expect("explicit");
        assert!((padded.match_score - explicit.match_score).abs() < 1.0e-12);
    }

    #[test]
    fn zero_sum_vector_errors() {
        let err = jensen_shannon(&[0.0, 0.0], &[1.0, 1.0]).expect_err("zero sum");
        assert!(matches!(err, ComputationError::ZeroSum { side: "synthetic" }));
        let err = kullback_leibler(&[1.0, 1.0], &[0.0, 0.0], EPSILON).expect_err("zero sum");
        assert!(matches!(err, ComputationError::ZeroSum { side: "real" }));
    }

    #[test]
    fn kullback_leibler_identical_is_perfect() {
        let measurement =
            kullback_leibler(&[42.0, 33.0, 18.0, 7.0], &[42.0, 33.0, 18.0, 7.0], EPSILON)
                .expect("scored");
        assert!((measurement.match_score - 1.0).abs() < 1.0e-9);
    }

    #[test]
    fn kullback_leibler_is_asymmetric() {
        // Documented property: swapping P and Q changes the divergence.
        let forward = kullback_leibler(&[9.0, 1.0], &[5.0, 5.0], EPSILON).expect("fwd");
        let backward = kullback_leibler(&[5.0, 5.0], &[9.0, 1.0], EPSILON).expect("bwd");
        let (_, fwd) = forward.statistics[0];
        let (_, bwd) = backward.statistics[0];
        assert!(
            (fwd - bwd).abs() > 1.0e-3,
            "KL(P||Q) and KL(Q||P) should differ: {fwd} vs {bwd}"
        );
    }

    #[test]
    fn kullback_leibler_score_is_bounded() {
        // Near-disjoint mass drives the divergence up; the score transform
        // stays inside (0, 1].
        // The epsilon floor caps the divergence near ln(1/epsilon) = 23, so
        // the score bottoms out just above 1/24.
        let measurement = kullback_leibler(&[1.0, 0.0], &[0.0, 1.0], EPSILON).expect("scored");
        assert!(measurement.match_score > 0.0);
        assert!(measurement.match_score < 0.05);
    }
}
