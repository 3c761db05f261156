//! Per-question comparison.
//!
//! A survey question arrives as two option-count maps (synthetic and real).
//! The maps are aligned onto the sorted union of their option labels, the
//! categorical battery runs over the aligned vectors, and the question's
//! match score is the equal-weight mean of whatever tests scored. A question
//! where every test errored stays in the report with an
//! `Insufficient data` status instead of failing the run.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use synthval_core::{
    OptionComparison, QuestionComparison, QuestionStatus, QuestionType, Tier, ValidationConfig,
};
use synthval_stats::battery::{align_counts, run_counts, BatteryEntry};

/// One question's worth of raw input: option counts on both sides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionInput {
    /// Caller-supplied question identifier.
    pub question_id: String,
    /// Human-readable question name.
    pub question_name: String,
    /// Option label to response count, synthetic side.
    pub synthetic_counts: BTreeMap<String, f64>,
    /// Option label to response count, real side.
    pub real_counts: BTreeMap<String, f64>,
}

/// A compared question plus the battery entries behind its score.
///
/// The entries feed the report-level test summary and record list; the
/// comparison is the per-question wire object.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionEvaluation {
    /// Wire-level question outcome.
    pub comparison: QuestionComparison,
    /// The categorical battery entries this question produced.
    pub entries: Vec<BatteryEntry>,
}

/// Compares one question's synthetic option counts against its real ones.
#[must_use]
#[instrument(
    name = "synthval::question",
    skip(input, config),
    fields(question_id = %input.question_id)
)]
pub fn compare_question(input: &QuestionInput, config: &ValidationConfig) -> QuestionEvaluation {
    let (labels, synthetic_counts, real_counts) =
        align_counts(&input.synthetic_counts, &input.real_counts);

    let option_comparisons: Vec<OptionComparison> = labels
        .iter()
        .zip(synthetic_counts.iter().zip(real_counts.iter()))
        .map(|(option, (&synthetic_count, &real_count))| OptionComparison {
            option: option.clone(),
            synthetic_count,
            real_count,
        })
        .collect();

    let entries = if labels.is_empty() {
        Vec::new()
    } else {
        run_counts(&synthetic_counts, &real_counts, config)
    };

    let scores: Vec<f64> = entries
        .iter()
        .filter_map(|(_, outcome)| outcome.as_ref().ok())
        .map(|result| result.match_score)
        .collect();

    let (match_score, tier, status) = if scores.is_empty() {
        (0.0, Tier::Tier4, QuestionStatus::InsufficientData)
    } else {
        #[allow(clippy::cast_precision_loss)]
        let mean = scores.iter().sum::<f64>() / scores.len() as f64;
        let mean = mean.clamp(0.0, 1.0);
        (
            mean,
            config.tier_thresholds.classify(mean),
            QuestionStatus::Compared,
        )
    };

    debug!(
        target: "synthval.report",
        question_id = %input.question_id,
        match_score,
        tier = tier.as_str(),
        scored = scores.len(),
        "question compared"
    );

    QuestionEvaluation {
        comparison: QuestionComparison {
            question_id: input.question_id.clone(),
            question_name: input.question_name.clone(),
            option_comparisons,
            match_score,
            tier,
            status,
            question_type: infer_question_type(&labels),
        },
        entries,
    }
}

/// Infers the answer-space shape from the union of option labels.
///
/// A question whose every label parses as an integer in `1..=10` is a rating
/// scale; anything else, including an empty label set, is categorical.
#[must_use]
pub fn infer_question_type(labels: &[String]) -> QuestionType {
    if !labels.is_empty()
        && labels
            .iter()
            .all(|label| matches!(label.trim().parse::<i64>(), Ok(value) if (1..=10).contains(&value)))
    {
        QuestionType::RatingScale
    } else {
        QuestionType::Categorical
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
        pairs
            .iter()
            .map(|(label, count)| ((*label).to_owned(), *count))
            .collect()
    }

    fn question(synthetic: &[(&str, f64)], real: &[(&str, f64)]) -> QuestionInput {
        QuestionInput {
            question_id: "q1".to_owned(),
            question_name: "Satisfaction".to_owned(),
            synthetic_counts: counts(synthetic),
            real_counts: counts(real),
        }
    }

    #[test]
    fn well_matched_question_is_compared_and_scores_high() {
        let input = question(
            &[("1", 42.0), ("2", 33.0), ("3", 18.0), ("4", 7.0)],
            &[("1", 40.0), ("2", 35.0), ("3", 20.0), ("4", 5.0)],
        );
        let evaluation = compare_question(&input, &ValidationConfig::default());
        let comparison = &evaluation.comparison;

        assert_eq!(comparison.status, QuestionStatus::Compared);
        assert_eq!(comparison.question_type, QuestionType::RatingScale);
        assert!(
            comparison.match_score > 0.85,
            "near-identical counts scored {}",
            comparison.match_score
        );
        assert_eq!(comparison.tier, Tier::Tier1);
        assert_eq!(evaluation.entries.len(), 2);
    }

    #[test]
    fn option_comparisons_cover_the_sorted_union() {
        let input = question(
            &[("agree", 10.0), ("neutral", 5.0)],
            &[("agree", 8.0), ("disagree", 2.0)],
        );
        let evaluation = compare_question(&input, &ValidationConfig::default());
        let options: Vec<&str> = evaluation
            .comparison
            .option_comparisons
            .iter()
            .map(|c| c.option.as_str())
            .collect();
        assert_eq!(options, vec!["agree", "disagree", "neutral"]);

        let neutral = &evaluation.comparison.option_comparisons[2];
        assert!((neutral.synthetic_count - 5.0).abs() < 1.0e-12);
        assert!(neutral.real_count.abs() < 1.0e-12, "absent option is zero-filled");
        assert_eq!(
            evaluation.comparison.question_type,
            QuestionType::Categorical
        );
    }

    #[test]
    fn empty_question_is_insufficient_data() {
        let input = question(&[], &[]);
        let evaluation = compare_question(&input, &ValidationConfig::default());
        let comparison = &evaluation.comparison;

        assert_eq!(comparison.status, QuestionStatus::InsufficientData);
        assert!(comparison.match_score.abs() < 1.0e-12);
        assert_eq!(comparison.tier, Tier::Tier4);
        assert!(comparison.option_comparisons.is_empty());
        assert!(evaluation.entries.is_empty());
    }

    #[test]
    fn one_sided_question_still_compares() {
        // Real side empty: aligned vectors are all-zero on one side. The
        // chi-square errors (zero expected counts) and Jensen-Shannon errors
        // (zero-sum mass), so the question degrades to insufficient data.
        let input = question(&[("yes", 10.0), ("no", 5.0)], &[]);
        let evaluation = compare_question(&input, &ValidationConfig::default());
        assert_eq!(
            evaluation.comparison.status,
            QuestionStatus::InsufficientData
        );
        assert_eq!(evaluation.entries.len(), 2);
        assert!(evaluation.entries.iter().all(|(_, o)| o.is_err()));
    }

    #[test]
    fn rating_scale_detection() {
        let rating: Vec<String> = ["1", "2", "3", "10"].iter().map(|s| (*s).to_string()).collect();
        assert_eq!(infer_question_type(&rating), QuestionType::RatingScale);

        let with_zero: Vec<String> = ["0", "1", "2"].iter().map(|s| (*s).to_string()).collect();
        assert_eq!(infer_question_type(&with_zero), QuestionType::Categorical);

        let out_of_range: Vec<String> = ["9", "10", "11"].iter().map(|s| (*s).to_string()).collect();
        assert_eq!(infer_question_type(&out_of_range), QuestionType::Categorical);

        let text: Vec<String> = ["agree", "disagree"].iter().map(|s| (*s).to_string()).collect();
        assert_eq!(infer_question_type(&text), QuestionType::Categorical);

        assert_eq!(infer_question_type(&[]), QuestionType::Categorical);
    }
}
