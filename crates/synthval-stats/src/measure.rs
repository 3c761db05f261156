//! Intermediate measurement produced by each test before tier labeling.

use synthval_core::{TestName, TestResult, TierThresholds};

/// A test's raw outcome: the normalized match score plus its native
/// statistics, before the uniform tier classifier is applied.
///
/// Keeping classification out of the individual tests means every test is
/// tiered by exactly one rule, instead of the per-test ad hoc cutoffs this
/// engine replaces.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    /// Which test produced this measurement.
    pub test: TestName,
    /// Similarity in `[0, 1]` (clamped at labeling time).
    pub match_score: f64,
    /// Native statistics under their wire names, in insertion order.
    pub statistics: Vec<(&'static str, f64)>,
}

impl Measurement {
    /// Creates a measurement with no native statistics yet.
    #[must_use]
    pub const fn new(test: TestName, match_score: f64) -> Self {
        Self {
            test,
            match_score,
            statistics: Vec::new(),
        }
    }

    /// Attaches a native statistic.
    #[must_use]
    pub fn with(mut self, name: &'static str, value: f64) -> Self {
        self.statistics.push((name, value));
        self
    }

    /// Labels the measurement with its tier, producing the final result.
    ///
    /// The match score is sanitized first: non-finite collapses to 0.0 and
    /// everything is clamped into `[0, 1]`, so the scored-result invariant
    /// holds no matter what a test computed.
    #[must_use]
    pub fn into_result(self, thresholds: &TierThresholds) -> TestResult {
        let score = if self.match_score.is_finite() {
            self.match_score.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let mut result = TestResult::new(self.test, score, thresholds.classify(score));
        for (name, value) in self.statistics {
            result = result.with_statistic(name, value);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use synthval_core::Tier;

    #[test]
    fn into_result_classifies_and_keeps_statistics() {
        let result = Measurement::new(TestName::KsTest, 0.9)
            .with("statistic", 0.1)
            .with("p_value", 0.97)
            .into_result(&TierThresholds::default());
        assert_eq!(result.tier, Tier::Tier1);
        assert!((result.match_score - 0.9).abs() < 1.0e-12);
        assert_eq!(result.statistic("statistic"), Some(0.1));
    }

    #[test]
    fn into_result_sanitizes_scores() {
        let thresholds = TierThresholds::default();
        let result = Measurement::new(TestName::WelchT, f64::NAN).into_result(&thresholds);
        assert!((result.match_score).abs() < 1.0e-12);
        assert_eq!(result.tier, Tier::Tier4);

        let result = Measurement::new(TestName::WelchT, 1.7).into_result(&thresholds);
        assert!((result.match_score - 1.0).abs() < 1.0e-12);
    }
}
