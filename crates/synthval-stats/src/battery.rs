//! The battery runner: executes the applicable subset of tests over a
//! sample pair and labels each measurement with its tier.
//!
//! Per-test failures never cross a test's boundary: each entry in the
//! returned vector pairs the test's name with a `Result`, and aggregation
//! layers filter the errors out rather than aborting the run.

use std::collections::BTreeMap;

use tracing::{debug, instrument};

use synthval_core::{TestName, TestOutcome, TestRecord, TestResult, ValidationConfig};

use crate::association::{correlation, error_metrics};
use crate::distance::{anderson_darling, cramer_von_mises, ks_test, wasserstein};
use crate::divergence::{jensen_shannon, kullback_leibler};
use crate::frequency::{chi_square, histogram_counts};
use crate::location::{mann_whitney, welch_t};
use crate::measure::Measurement;
use crate::summary::distribution_summary;

/// One battery entry: the test that ran and what came of it.
pub type BatteryEntry = (TestName, TestOutcome<TestResult>);

/// Canonical execution order of the numeric battery.
pub const NUMERIC_BATTERY: [TestName; 12] = [
    TestName::ChiSquare,
    TestName::KsTest,
    TestName::JensenShannon,
    TestName::MannWhitney,
    TestName::WelchT,
    TestName::AndersonDarling,
    TestName::WassersteinDistance,
    TestName::Correlation,
    TestName::ErrorMetrics,
    TestName::DistributionSummary,
    TestName::KullbackLeibler,
    TestName::CramerVonMises,
];

/// Tests applicable to categorical option counts.
pub const COUNTS_BATTERY: [TestName; 2] = [TestName::ChiSquare, TestName::JensenShannon];

/// Runs the full numeric battery over two raw sample vectors.
///
/// All twelve tests execute in canonical order; each produces either a
/// scored, tier-labeled [`TestResult`] or the [`ComputationError`] that
/// disqualified it.
///
/// [`ComputationError`]: synthval_core::ComputationError
#[must_use]
#[instrument(
    name = "synthval::battery_numeric",
    skip(synthetic, real, config),
    fields(synthetic_len = synthetic.len(), real_len = real.len())
)]
pub fn run_numeric(
    synthetic: &[f64],
    real: &[f64],
    config: &ValidationConfig,
) -> Vec<BatteryEntry> {
    let binned_chi_square = || -> TestOutcome<Measurement> {
        let (syn_counts, real_counts) = histogram_counts(synthetic, real, config.histogram_bins)?;
        chi_square(&syn_counts, &real_counts)
    };

    let outcomes: Vec<TestOutcome<Measurement>> = vec![
        binned_chi_square(),
        ks_test(synthetic, real),
        jensen_shannon(synthetic, real),
        mann_whitney(synthetic, real),
        welch_t(synthetic, real),
        anderson_darling(synthetic, real),
        wasserstein(synthetic, real),
        correlation(synthetic, real),
        error_metrics(synthetic, real),
        distribution_summary(synthetic, real),
        kullback_leibler(synthetic, real, config.kl_epsilon),
        cramer_von_mises(synthetic, real),
    ];

    label(&NUMERIC_BATTERY, outcomes, config)
}

/// Runs the categorical battery over two aligned option-count vectors.
///
/// Option counts are frequency data, so only the frequency-profile tests
/// apply: chi-square and Jensen-Shannon.
#[must_use]
#[instrument(
    name = "synthval::battery_counts",
    skip(synthetic, real, config),
    fields(categories = synthetic.len())
)]
pub fn run_counts(synthetic: &[f64], real: &[f64], config: &ValidationConfig) -> Vec<BatteryEntry> {
    let outcomes = vec![chi_square(synthetic, real), jensen_shannon(synthetic, real)];
    label(&COUNTS_BATTERY, outcomes, config)
}

/// Aligns two option-count maps onto the sorted union of their labels,
/// filling absent options with a zero count.
#[must_use]
pub fn align_counts(
    synthetic: &BTreeMap<String, f64>,
    real: &BTreeMap<String, f64>,
) -> (Vec<String>, Vec<f64>, Vec<f64>) {
    let mut labels: Vec<String> = synthetic.keys().chain(real.keys()).cloned().collect();
    labels.sort();
    labels.dedup();

    let synthetic_counts = labels
        .iter()
        .map(|label| synthetic.get(label).copied().unwrap_or(0.0))
        .collect();
    let real_counts = labels
        .iter()
        .map(|label| real.get(label).copied().unwrap_or(0.0))
        .collect();
    (labels, synthetic_counts, real_counts)
}

/// Converts battery entries into their serialized wire form: a scored
/// result, or `{test, error}` with the error's display text.
#[must_use]
pub fn to_records(entries: &[BatteryEntry]) -> Vec<TestRecord> {
    entries
        .iter()
        .map(|(test, outcome)| match outcome {
            Ok(result) => TestRecord::Scored(result.clone()),
            Err(error) => TestRecord::Errored {
                test: *test,
                error: error.to_string(),
            },
        })
        .collect()
}

fn label(
    names: &[TestName],
    outcomes: Vec<TestOutcome<Measurement>>,
    config: &ValidationConfig,
) -> Vec<BatteryEntry> {
    names
        .iter()
        .copied()
        .zip(outcomes)
        .map(|(name, outcome)| {
            let outcome = match outcome {
                Ok(measurement) => {
                    let result = measurement.into_result(&config.tier_thresholds);
                    debug!(
                        target: "synthval.battery",
                        test = name.as_str(),
                        match_score = result.match_score,
                        tier = result.tier.as_str(),
                        "test scored"
                    );
                    Ok(result)
                }
                Err(error) => {
                    debug!(
                        target: "synthval.battery",
                        test = name.as_str(),
                        error = %error,
                        "test excluded for degenerate input"
                    );
                    Err(error)
                }
            };
            (name, outcome)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ValidationConfig {
        ValidationConfig::default()
    }

    const SYNTHETIC: [f64; 8] = [1.0, 2.0, 2.0, 3.0, 4.0, 4.0, 5.0, 6.0];

    #[test]
    fn numeric_battery_runs_all_twelve_in_order() {
        let entries = run_numeric(&SYNTHETIC, &SYNTHETIC, &config());
        let names: Vec<TestName> = entries.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, NUMERIC_BATTERY.to_vec());
    }

    #[test]
    fn numeric_battery_identical_samples_all_score_near_one() {
        let entries = run_numeric(&SYNTHETIC, &SYNTHETIC, &config());
        for (name, outcome) in &entries {
            let result = outcome.as_ref().expect("no test should error");
            assert!(
                result.match_score > 0.99,
                "{} scored {}",
                name.as_str(),
                result.match_score
            );
        }
    }

    #[test]
    fn numeric_battery_scores_are_bounded() {
        let real = [3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0];
        let entries = run_numeric(&SYNTHETIC, &real, &config());
        for (name, outcome) in &entries {
            if let Ok(result) = outcome {
                assert!(
                    (0.0..=1.0).contains(&result.match_score),
                    "{} out of bounds: {}",
                    name.as_str(),
                    result.match_score
                );
            }
        }
    }

    #[test]
    fn numeric_battery_one_sided_empty_reports_errors_and_degradations() {
        let entries = run_numeric(&[], &SYNTHETIC, &config());
        assert_eq!(entries.len(), 12);
        // Distribution summary degrades to a defined score.
        let (_, summary) = entries
            .iter()
            .find(|(name, _)| *name == TestName::DistributionSummary)
            .expect("summary entry present");
        let summary = summary.as_ref().expect("summary always scores");
        assert!(summary.match_score.abs() < 1.0e-12);
        // Everything requiring both sides errors.
        let errored = entries.iter().filter(|(_, o)| o.is_err()).count();
        assert_eq!(errored, 11);
    }

    #[test]
    fn numeric_battery_is_idempotent() {
        let real = [2.0, 2.0, 3.0, 5.0, 5.0, 6.0, 7.0, 9.0];
        let first = run_numeric(&SYNTHETIC, &real, &config());
        let second = run_numeric(&SYNTHETIC, &real, &config());
        assert_eq!(first, second, "same input pair must reproduce bit-identically");
    }

    #[test]
    fn counts_battery_runs_frequency_subset() {
        let entries = run_counts(&[42.0, 33.0, 18.0, 7.0], &[40.0, 35.0, 20.0, 5.0], &config());
        let names: Vec<TestName> = entries.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, COUNTS_BATTERY.to_vec());
        assert!(entries.iter().all(|(_, o)| o.is_ok()));
    }

    #[test]
    fn align_counts_unions_and_zero_fills() {
        let synthetic = BTreeMap::from([
            ("agree".to_owned(), 10.0),
            ("neutral".to_owned(), 5.0),
        ]);
        let real = BTreeMap::from([
            ("agree".to_owned(), 8.0),
            ("disagree".to_owned(), 2.0),
        ]);
        let (labels, syn, rl) = align_counts(&synthetic, &real);
        assert_eq!(labels, vec!["agree", "disagree", "neutral"]);
        assert_eq!(syn, vec![10.0, 0.0, 5.0]);
        assert_eq!(rl, vec![8.0, 2.0, 0.0]);
    }

    #[test]
    fn to_records_preserves_errors_as_data() {
        let entries = run_numeric(&[], &SYNTHETIC, &config());
        let records = to_records(&entries);
        assert_eq!(records.len(), 12);
        let errored = records.iter().filter(|r| r.scored().is_none()).count();
        assert_eq!(errored, 11);
        for record in &records {
            if let TestRecord::Errored { error, .. } = record {
                assert!(!error.is_empty());
            }
        }
    }
}
