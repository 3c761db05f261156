use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::tier::{OverallTier, Tier};

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// One side of a comparison: a synthetic or real collection of survey answers.
///
/// Numeric sets are ordered raw observations (ratings, totals, any real
/// number). Categorical sets map an option label to a non-negative response
/// count. The two sides of a pair need not have equal length, but must be the
/// same kind. `BTreeMap` keeps option iteration deterministic, which the
/// idempotence guarantee of the engine depends on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseSet {
    /// Ordered numeric observations.
    Numeric(Vec<f64>),
    /// Option label mapped to response count.
    Counts(BTreeMap<String, f64>),
}

impl ResponseSet {
    /// Number of observations (numeric) or options (categorical).
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Numeric(values) => values.len(),
            Self::Counts(counts) => counts.len(),
        }
    }

    /// True when the set carries no data at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Kind label used in type-mismatch diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Numeric(_) => "numeric",
            Self::Counts(_) => "categorical",
        }
    }
}

// ---------------------------------------------------------------------------
// Test result types
// ---------------------------------------------------------------------------

/// Identifier of a statistical test in the battery.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TestName {
    ChiSquare,
    KsTest,
    JensenShannon,
    MannWhitney,
    WelchT,
    AndersonDarling,
    WassersteinDistance,
    Correlation,
    ErrorMetrics,
    DistributionSummary,
    KullbackLeibler,
    CramerVonMises,
}

impl TestName {
    /// Stable identifier matching the serialized form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ChiSquare => "chi_square",
            Self::KsTest => "ks_test",
            Self::JensenShannon => "jensen_shannon",
            Self::MannWhitney => "mann_whitney",
            Self::WelchT => "welch_t",
            Self::AndersonDarling => "anderson_darling",
            Self::WassersteinDistance => "wasserstein_distance",
            Self::Correlation => "correlation",
            Self::ErrorMetrics => "error_metrics",
            Self::DistributionSummary => "distribution_summary",
            Self::KullbackLeibler => "kullback_leibler",
            Self::CramerVonMises => "cramer_von_mises",
        }
    }
}

/// A scored outcome from one statistical test.
///
/// `statistics` carries the test-native figures (`p_value`, `statistic`,
/// `distance`, ...) and is flattened into the serialized object so consumers
/// read them as top-level fields alongside `match_score` and `tier`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    /// Which test produced this result.
    pub test: TestName,
    /// Normalized similarity in `[0, 1]`; 1.0 means identical distributions.
    pub match_score: f64,
    /// Confidence tier derived from `match_score`.
    pub tier: Tier,
    /// Test-native statistics, keyed by wire name.
    #[serde(flatten)]
    pub statistics: BTreeMap<String, f64>,
}

impl TestResult {
    /// Creates a result with no native statistics attached yet.
    #[must_use]
    pub fn new(test: TestName, match_score: f64, tier: Tier) -> Self {
        Self {
            test,
            match_score,
            tier,
            statistics: BTreeMap::new(),
        }
    }

    /// Attaches a native statistic under its wire name.
    ///
    /// Non-finite values are dropped rather than serialized: a NaN statistic
    /// carries no information and breaks strict-JSON consumers.
    #[must_use]
    pub fn with_statistic(mut self, name: &str, value: f64) -> Self {
        if value.is_finite() {
            self.statistics.insert(name.to_owned(), value);
        }
        self
    }

    /// Looks up a native statistic by wire name.
    #[must_use]
    pub fn statistic(&self, name: &str) -> Option<f64> {
        self.statistics.get(name).copied()
    }
}

/// Wire form of a battery entry: either a scored result or an errored test.
///
/// Inside the engine a failed test is a `Result::Err(ComputationError)`;
/// this enum is the serialized rendering, keeping the original contract that
/// an errored test carries `{test, error}` and nothing else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TestRecord {
    /// The test produced a usable score.
    Scored(TestResult),
    /// The test hit degenerate input and was excluded from aggregation.
    Errored {
        /// Which test failed.
        test: TestName,
        /// Human-readable cause, from the `ComputationError` display form.
        error: String,
    },
}

impl TestRecord {
    /// Which test this record belongs to.
    #[must_use]
    pub const fn test(&self) -> TestName {
        match self {
            Self::Scored(result) => result.test,
            Self::Errored { test, .. } => *test,
        }
    }

    /// The scored result, when the test did not error.
    #[must_use]
    pub const fn scored(&self) -> Option<&TestResult> {
        match self {
            Self::Scored(result) => Some(result),
            Self::Errored { .. } => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Question-level types
// ---------------------------------------------------------------------------

/// Synthetic vs. real response count for one answer option of one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionComparison {
    /// Answer option label.
    pub option: String,
    /// Responses in the synthetic set.
    pub synthetic_count: f64,
    /// Responses in the real set.
    pub real_count: f64,
}

/// Comparison lifecycle state of one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionStatus {
    /// At least one applicable test produced a score.
    Compared,
    /// Every applicable test errored; the question is excluded from the
    /// overall aggregation.
    #[serde(rename = "Insufficient data")]
    InsufficientData,
}

/// Shape of a question's answer space, inferred from its option labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionType {
    /// All option labels are integers in `1..=10`.
    #[serde(rename = "Rating Scale")]
    RatingScale,
    /// Anything else.
    Categorical,
}

/// Per-question comparison outcome. Created once per question per validation
/// run and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionComparison {
    /// Caller-supplied question identifier.
    pub question_id: String,
    /// Human-readable question name.
    pub question_name: String,
    /// Per-option synthetic vs. real counts, sorted by option label.
    pub option_comparisons: Vec<OptionComparison>,
    /// Equal-weight mean of the applicable tests' match scores.
    pub match_score: f64,
    /// Tier derived from `match_score`.
    pub tier: Tier,
    /// Whether the question could be compared at all.
    pub status: QuestionStatus,
    /// Inferred answer-space shape.
    #[serde(rename = "type")]
    pub question_type: QuestionType,
}

// ---------------------------------------------------------------------------
// Report types
// ---------------------------------------------------------------------------

/// How many battery entries scored vs. errored in a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestSummary {
    /// Battery entries attempted.
    pub total: usize,
    /// Entries that produced a usable score.
    pub scored: usize,
    /// Entries excluded for degenerate input.
    pub errored: usize,
}

/// The complete, immutable outcome of one validation run.
///
/// Owned by the caller; the engine retains nothing between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Mean match score across qualifying items, in `[0, 1]`.
    pub overall_accuracy: f64,
    /// Tier derived from the qualifying items' tier distribution.
    pub overall_tier: OverallTier,
    /// True when zero items qualified; `overall_accuracy` is then 0 and
    /// `overall_tier` is `N/A`, and neither should be read as a poor-but-valid
    /// result.
    pub insufficient_data: bool,
    /// Qualifying-item count per tier.
    pub tier_distribution: BTreeMap<Tier, usize>,
    /// Scored vs. errored battery entry counts.
    pub test_summary: TestSummary,
    /// Raw battery records (flat mode) or per-question battery records rolled
    /// up by the question aggregator.
    pub tests: Vec<TestRecord>,
    /// Question-level outcomes; empty in flat mode.
    pub question_comparisons: Vec<QuestionComparison>,
}
