//! Statistical test battery for synthetic-versus-real response validation.
//!
//! Every public test function takes the synthetic sample first and the real
//! sample second, and returns `Result<Measurement, ComputationError>`: a
//! degenerate input disqualifies one test, never the battery. Scores are
//! deterministic given the inputs; nothing in this crate draws randomness
//! or reads clocks.
//!
//! The crate splits by the shape of evidence each test consumes:
//!
//! - [`frequency`]: chi-square over aligned count vectors, plus the shared
//!   histogram binning for raw numeric data.
//! - [`distance`]: EDF-based tests (Kolmogorov-Smirnov, Anderson-Darling,
//!   Cramér-von Mises, Wasserstein).
//! - [`divergence`]: information-theoretic measures (Jensen-Shannon,
//!   Kullback-Leibler).
//! - [`location`]: location-shift tests (Mann-Whitney U, Welch's t).
//! - [`association`]: paired-sequence measures (correlation, error metrics).
//! - [`summary`]: moment-level distribution comparison.
//! - [`battery`]: runs the applicable subset in canonical order and labels
//!   each score with its tier.
//!
//! [`special`] and [`descriptive`] hold the numeric substrate: p-value
//! special functions and rank/moment helpers.

pub mod association;
pub mod battery;
pub mod descriptive;
pub mod distance;
pub mod divergence;
pub mod frequency;
pub mod location;
pub mod measure;
pub mod special;
pub mod summary;

pub use association::{correlation, error_metrics};
pub use battery::{
    align_counts, run_counts, run_numeric, to_records, BatteryEntry, COUNTS_BATTERY,
    NUMERIC_BATTERY,
};
pub use distance::{anderson_darling, cramer_von_mises, ks_test, wasserstein};
pub use divergence::{jensen_shannon, kullback_leibler};
pub use frequency::{chi_square, histogram_counts};
pub use location::{mann_whitney, welch_t};
pub use measure::Measurement;
pub use summary::distribution_summary;
