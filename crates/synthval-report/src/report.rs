//! Validation report assembly.
//!
//! Three entry points, all infallible and stateless:
//!
//! - [`validate_samples`]: flat mode over two raw numeric vectors; the
//!   qualifying items are the scored tests themselves.
//! - [`validate_survey`]: question mode; the qualifying items are the
//!   questions that reached `Compared` status.
//! - [`validate_pair`]: dispatches on the [`ResponseSet`] kinds and folds
//!   caller-contract violations (both sides empty, mixed kinds) into a
//!   well-formed report flagged `insufficient_data` instead of an error.

use tracing::{debug, instrument, warn};

use synthval_core::{
    OverallTier, QuestionComparison, QuestionStatus, ResponseSet, TestRecord, TestSummary, Tier,
    ValidationConfig, ValidationError, ValidationReport,
};
use synthval_stats::battery::{align_counts, run_counts, run_numeric, to_records, BatteryEntry};

use crate::question::{compare_question, QuestionInput};

/// Runs the full numeric battery over two raw sample vectors and aggregates
/// the scored tests into a report.
#[must_use]
#[instrument(
    name = "synthval::report",
    skip(synthetic, real, config),
    fields(mode = "samples", synthetic_len = synthetic.len(), real_len = real.len())
)]
pub fn validate_samples(
    synthetic: &[f64],
    real: &[f64],
    config: &ValidationConfig,
) -> ValidationReport {
    // Two empty samples carry no evidence either way. Without this guard
    // the distribution summary (which defines empty/empty as a perfect
    // match) would alone drive the report to TIER_1.
    if synthetic.is_empty() && real.is_empty() {
        warn!(
            target: "synthval.report",
            error = %ValidationError::BothEmpty,
            "nothing to compare"
        );
        return empty_report();
    }
    let entries = run_numeric(synthetic, real, config);
    flat_report(&entries, config)
}

/// Compares each question's option counts and aggregates the `Compared`
/// questions into a report.
#[must_use]
#[instrument(
    name = "synthval::report",
    skip(questions, config),
    fields(mode = "survey", questions = questions.len())
)]
pub fn validate_survey(questions: &[QuestionInput], config: &ValidationConfig) -> ValidationReport {
    let evaluations: Vec<_> = questions
        .iter()
        .map(|question| compare_question(question, config))
        .collect();

    let mut tests = Vec::new();
    let mut test_summary = TestSummary::default();
    for evaluation in &evaluations {
        accumulate_summary(&mut test_summary, &evaluation.entries);
        tests.extend(to_records(&evaluation.entries));
    }

    let compared: Vec<_> = evaluations
        .iter()
        .map(|evaluation| &evaluation.comparison)
        .filter(|comparison| comparison.status == QuestionStatus::Compared)
        .collect();
    let scores: Vec<f64> = compared.iter().map(|c| c.match_score).collect();
    let tiers: Vec<Tier> = compared.iter().map(|c| c.tier).collect();

    let report = assemble(
        &scores,
        &tiers,
        test_summary,
        tests,
        evaluations
            .into_iter()
            .map(|evaluation| evaluation.comparison)
            .collect(),
        config,
    );
    debug!(
        target: "synthval.report",
        overall_accuracy = report.overall_accuracy,
        overall_tier = report.overall_tier.as_str(),
        insufficient_data = report.insufficient_data,
        "survey validated"
    );
    report
}

/// Validates one synthetic/real response-set pair, dispatching on kind.
///
/// Numeric pairs run the full battery; categorical pairs align their option
/// counts and run the frequency subset. Both sides empty, or one numeric and
/// one categorical, yields an `insufficient_data` report rather than an
/// error: downstream consumers always receive a well-formed report.
#[must_use]
pub fn validate_pair(
    synthetic: &ResponseSet,
    real: &ResponseSet,
    config: &ValidationConfig,
) -> ValidationReport {
    if synthetic.is_empty() && real.is_empty() {
        warn!(
            target: "synthval.report",
            error = %ValidationError::BothEmpty,
            "nothing to compare"
        );
        return empty_report();
    }

    match (synthetic, real) {
        (ResponseSet::Numeric(syn), ResponseSet::Numeric(rl)) => {
            validate_samples(syn, rl, config)
        }
        (ResponseSet::Counts(syn), ResponseSet::Counts(rl)) => {
            let (_, synthetic_counts, real_counts) = align_counts(syn, rl);
            let entries = run_counts(&synthetic_counts, &real_counts, config);
            flat_report(&entries, config)
        }
        (syn, rl) => {
            warn!(
                target: "synthval.report",
                error = %ValidationError::TypeMismatch {
                    synthetic: syn.kind(),
                    real: rl.kind(),
                },
                "cannot compare mixed response-set kinds"
            );
            empty_report()
        }
    }
}

/// A well-formed report for a run that produced no qualifying items.
#[must_use]
pub fn empty_report() -> ValidationReport {
    ValidationReport {
        overall_accuracy: 0.0,
        overall_tier: OverallTier::NotAvailable,
        insufficient_data: true,
        tier_distribution: std::collections::BTreeMap::new(),
        test_summary: TestSummary::default(),
        tests: Vec::new(),
        question_comparisons: Vec::new(),
    }
}

fn flat_report(entries: &[BatteryEntry], config: &ValidationConfig) -> ValidationReport {
    let mut test_summary = TestSummary::default();
    accumulate_summary(&mut test_summary, entries);

    let scored: Vec<_> = entries
        .iter()
        .filter_map(|(_, outcome)| outcome.as_ref().ok())
        .collect();
    let scores: Vec<f64> = scored.iter().map(|result| result.match_score).collect();
    let tiers: Vec<Tier> = scored.iter().map(|result| result.tier).collect();

    let report = assemble(
        &scores,
        &tiers,
        test_summary,
        to_records(entries),
        Vec::new(),
        config,
    );
    debug!(
        target: "synthval.report",
        overall_accuracy = report.overall_accuracy,
        overall_tier = report.overall_tier.as_str(),
        insufficient_data = report.insufficient_data,
        "sample pair validated"
    );
    report
}

fn assemble(
    scores: &[f64],
    tiers: &[Tier],
    test_summary: TestSummary,
    tests: Vec<TestRecord>,
    question_comparisons: Vec<QuestionComparison>,
    config: &ValidationConfig,
) -> ValidationReport {
    let mut tier_counts = [0_usize; 4];
    for tier in tiers {
        tier_counts[*tier as usize] += 1;
    }

    let insufficient_data = scores.is_empty();
    let overall_accuracy = if insufficient_data {
        0.0
    } else {
        #[allow(clippy::cast_precision_loss)]
        let mean = scores.iter().sum::<f64>() / scores.len() as f64;
        mean.clamp(0.0, 1.0)
    };

    let tier_distribution = Tier::ALL
        .iter()
        .zip(tier_counts.iter())
        .filter(|(_, &count)| count > 0)
        .map(|(&tier, &count)| (tier, count))
        .collect();

    ValidationReport {
        overall_accuracy,
        overall_tier: config.overall_rule.derive(&tier_counts),
        insufficient_data,
        tier_distribution,
        test_summary,
        tests,
        question_comparisons,
    }
}

fn accumulate_summary(summary: &mut TestSummary, entries: &[BatteryEntry]) {
    summary.total += entries.len();
    for (_, outcome) in entries {
        match outcome {
            Ok(_) => summary.scored += 1,
            Err(_) => summary.errored += 1,
        }
    }
}
