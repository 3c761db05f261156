//! Core types, error taxonomy, and tier classification for the synthval
//! validation engine.
//!
//! This crate defines the value objects exchanged across the engine
//! ([`ResponseSet`], [`TestResult`], [`QuestionComparison`],
//! [`ValidationReport`]), the error taxonomy ([`ComputationError`],
//! [`ValidationError`]), the uniform tier classifier, and the run
//! configuration. It has minimal dependencies and is depended on by every
//! other crate in the workspace.

pub mod config;
pub mod error;
pub mod tier;
pub mod tracing_config;
pub mod types;

pub use config::ValidationConfig;
pub use error::{ComputationError, TestOutcome, ValidationError};
pub use tier::{OverallTier, OverallTierRule, Tier, TierThresholds};
pub use types::{
    OptionComparison, QuestionComparison, QuestionStatus, QuestionType, ResponseSet, TestName,
    TestRecord, TestResult, TestSummary, ValidationReport,
};
