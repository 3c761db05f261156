/// Per-test computation failure.
///
/// Degenerate input makes a single statistical test meaningless; the failure
/// is recorded as data and excluded from aggregation, and must never
/// propagate past the test's own boundary. Every variant message names what
/// was degenerate so a consumer reading a serialized report can tell why a
/// test produced no score.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ComputationError {
    /// A sample that the test requires to be non-empty was empty.
    #[error("{side} sample is empty")]
    EmptySample {
        /// Which side was empty ("synthetic" or "real").
        side: &'static str,
    },

    /// A sample has fewer observations than the test needs.
    #[error("insufficient data: {side} sample has {got} observations, test needs {needed}")]
    InsufficientData {
        /// Which side fell short.
        side: &'static str,
        /// Minimum observations the test requires per sample.
        needed: usize,
        /// Observations actually supplied.
        got: usize,
    },

    /// Paired tests require equal-length sequences.
    #[error("length mismatch: synthetic has {synthetic} observations, real has {real}; test requires paired sequences")]
    LengthMismatch {
        /// Synthetic sample length.
        synthetic: usize,
        /// Real sample length.
        real: usize,
    },

    /// Category count vectors have different cardinality.
    #[error("category mismatch: synthetic has {synthetic} categories, real has {real}")]
    CategoryMismatch {
        /// Synthetic category count.
        synthetic: usize,
        /// Real category count.
        real: usize,
    },

    /// A sample has zero variance where the test needs spread on both sides.
    #[error("zero variance in {side} sample; statistic is undefined")]
    ZeroVariance {
        /// Which side was constant.
        side: &'static str,
    },

    /// A vector could not be normalized into a probability distribution.
    #[error("cannot normalize {side} sample: values sum to zero")]
    ZeroSum {
        /// Which side summed to zero.
        side: &'static str,
    },

    /// An expected frequency in a contingency table was not positive.
    #[error("expected count {value} at category {index} is not positive; chi-square is undefined")]
    NonPositiveExpected {
        /// Category position in the aligned vectors.
        index: usize,
        /// The offending expected count.
        value: f64,
    },

    /// A normalization denominator collapsed to zero.
    #[error("degenerate normalization: {detail}")]
    DegenerateNormalization {
        /// What collapsed.
        detail: &'static str,
    },
}

/// Caller-level contract violation.
///
/// Unlike [`ComputationError`], these indicate the caller handed the engine
/// something no battery subset can be selected for. The engine still never
/// panics: top-level entry points convert these into a well-formed report
/// flagged `insufficient_data` rather than returning them raw.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Both response sets are empty; nothing to compare.
    #[error("both response sets are empty; supply at least one observation per side")]
    BothEmpty,

    /// One side is numeric samples, the other option counts.
    #[error("response set type mismatch: {synthetic} vs {real}; both sides must be numeric or both categorical")]
    TypeMismatch {
        /// Kind of the synthetic side.
        synthetic: &'static str,
        /// Kind of the real side.
        real: &'static str,
    },

    /// A configuration value is invalid.
    #[error("invalid config: {field} = {value}: {reason}")]
    InvalidConfig {
        /// Which config field.
        field: &'static str,
        /// The invalid value, rendered.
        value: String,
        /// Why it is invalid.
        reason: &'static str,
    },
}

/// Convenience alias for per-test outcomes throughout the battery.
pub type TestOutcome<T> = Result<T, ComputationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ComputationError>();
        assert_send_sync::<ValidationError>();
    }

    #[test]
    fn messages_name_the_degenerate_side() {
        let err = ComputationError::EmptySample { side: "synthetic" };
        assert!(err.to_string().contains("synthetic"));

        let err = ComputationError::InsufficientData {
            side: "real",
            needed: 2,
            got: 1,
        };
        let msg = err.to_string();
        assert!(msg.contains("real"));
        assert!(msg.contains('2'));
        assert!(msg.contains('1'));
    }

    #[test]
    fn type_mismatch_names_both_kinds() {
        let err = ValidationError::TypeMismatch {
            synthetic: "numeric",
            real: "categorical",
        };
        let msg = err.to_string();
        assert!(msg.contains("numeric"));
        assert!(msg.contains("categorical"));
    }

    #[test]
    fn invalid_config_is_actionable() {
        let err = ValidationError::InvalidConfig {
            field: "tier_thresholds",
            value: "0.5/0.75/0.85".to_owned(),
            reason: "thresholds must be strictly decreasing",
        };
        assert!(err.to_string().contains("strictly decreasing"));
    }
}
