//! Tracing conventions for synthval.
//!
//! The engine itself never installs a subscriber; hosts bring their own.
//! This module pins the target prefix and the span names the crates emit,
//! so subscribers, dashboards, and tests can match on them.

use tracing::Level;

/// Target prefix used by all synthval tracing spans and events.
///
/// Consumers can filter on it:
/// ```text
/// RUST_LOG=synthval=debug
/// ```
pub const TARGET_PREFIX: &str = "synthval";

/// Standard span names emitted across the engine.
pub mod span_names {
    /// Full numeric battery over one sample pair.
    pub const BATTERY_NUMERIC: &str = "synthval::battery_numeric";
    /// Categorical battery over one aligned count pair.
    pub const BATTERY_COUNTS: &str = "synthval::battery_counts";
    /// Per-question aggregation.
    pub const QUESTION: &str = "synthval::question";
    /// Report assembly (either mode).
    pub const REPORT: &str = "synthval::report";
}

/// Parse a log level string (case-insensitive).
///
/// Recognized values: `trace`, `debug`, `info`, `warn`, `error`.
#[must_use]
pub fn parse_level(s: &str) -> Option<Level> {
    match s.to_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}

/// Recommended level for the current environment.
///
/// Checks `SYNTHVAL_LOG_LEVEL` first, then falls back to the provided
/// default.
#[must_use]
pub fn level_from_env(default: Level) -> Level {
    std::env::var("SYNTHVAL_LOG_LEVEL")
        .ok()
        .as_deref()
        .and_then(parse_level)
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_level_recognizes_all_levels() {
        assert_eq!(parse_level("trace"), Some(Level::TRACE));
        assert_eq!(parse_level("DEBUG"), Some(Level::DEBUG));
        assert_eq!(parse_level("Info"), Some(Level::INFO));
        assert_eq!(parse_level("warn"), Some(Level::WARN));
        assert_eq!(parse_level("error"), Some(Level::ERROR));
        assert_eq!(parse_level("verbose"), None);
    }

    #[test]
    fn span_names_carry_target_prefix() {
        for name in [
            span_names::BATTERY_NUMERIC,
            span_names::BATTERY_COUNTS,
            span_names::QUESTION,
            span_names::REPORT,
        ] {
            assert!(name.starts_with(TARGET_PREFIX), "{name}");
        }
    }
}
