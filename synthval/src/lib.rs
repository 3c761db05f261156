//! synthval: statistical validation of synthetic survey responses.
//!
//! Given a synthetic response set and a real one, synthval runs a battery of
//! statistical comparisons (frequency profiles, EDF distances, divergences,
//! location shifts, paired association, moment summaries), normalizes every
//! test to a `match_score` in `[0, 1]`, labels each score with a confidence
//! tier, and aggregates everything into a single immutable report.
//!
//! The engine is deliberately boring to hold: stateless, deterministic, no
//! I/O, no randomness. Degenerate input disqualifies individual tests as
//! recorded errors rather than failing the run.
//!
//! Entry points live in [`report`]: [`validate_samples`] for raw numeric
//! vectors, [`validate_survey`] for per-question option counts, and
//! [`validate_pair`] for kind-dispatched response sets.

pub use synthval_core as core;
pub use synthval_report as report;
pub use synthval_stats as stats;

pub use synthval_core::{
    ComputationError, OptionComparison, OverallTier, OverallTierRule, QuestionComparison,
    QuestionStatus, QuestionType, ResponseSet, TestName, TestRecord, TestResult, TestSummary,
    Tier, TierThresholds, ValidationConfig, ValidationError, ValidationReport,
};
pub use synthval_report::{
    compare_question, validate_pair, validate_samples, validate_survey, QuestionInput,
};
