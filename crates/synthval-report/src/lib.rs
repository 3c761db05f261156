//! Aggregation layer: per-question comparison and report assembly.
//!
//! This crate turns battery output into the wire-level validation report.
//! Everything here is pure aggregation over the battery in
//! `synthval-stats`: no I/O, no retained state, and a given input always
//! reproduces the same report.

pub mod question;
pub mod report;

pub use question::{compare_question, infer_question_type, QuestionEvaluation, QuestionInput};
pub use report::{empty_report, validate_pair, validate_samples, validate_survey};
