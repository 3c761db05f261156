//! Confidence tier classification.
//!
//! Every statistical test first reduces its native statistic to a bounded
//! `match_score` in `[0, 1]`; a single classifier then maps that score to one
//! of four ordered tiers. The cut points are deliberately configuration, not
//! constants baked into each test: earlier revisions of this engine tiered
//! each test off its own raw statistic with ad hoc cutoffs, and the uniform
//! normalized scheme replaces all of that.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Ordered confidence tier. `Tier1` is the best match.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Tier {
    /// Excellent match.
    #[serde(rename = "TIER_1")]
    Tier1,
    /// Good match.
    #[serde(rename = "TIER_2")]
    Tier2,
    /// Weak match.
    #[serde(rename = "TIER_3")]
    Tier3,
    /// Poor match.
    #[serde(rename = "TIER_4")]
    Tier4,
}

impl Tier {
    /// All tiers, best first. Iteration order for cumulative tier walks.
    pub const ALL: [Self; 4] = [Self::Tier1, Self::Tier2, Self::Tier3, Self::Tier4];

    /// Stable identifier matching the serialized form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tier1 => "TIER_1",
            Self::Tier2 => "TIER_2",
            Self::Tier3 => "TIER_3",
            Self::Tier4 => "TIER_4",
        }
    }
}

/// Report-level tier: a [`Tier`], or `N/A` when zero items qualified.
///
/// `NotAvailable` is distinct from `Tier4`: it means the run produced no
/// usable scores at all, and callers must not read it as a poor-but-valid
/// result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverallTier {
    /// A qualifying tier was computed.
    Tier(Tier),
    /// No items qualified; see the report's `insufficient_data` flag.
    NotAvailable,
}

impl OverallTier {
    /// Wire spelling: the tier name, or `"N/A"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tier(tier) => tier.as_str(),
            Self::NotAvailable => "N/A",
        }
    }
}

impl Serialize for OverallTier {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for OverallTier {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        match value.as_str() {
            "TIER_1" => Ok(Self::Tier(Tier::Tier1)),
            "TIER_2" => Ok(Self::Tier(Tier::Tier2)),
            "TIER_3" => Ok(Self::Tier(Tier::Tier3)),
            "TIER_4" => Ok(Self::Tier(Tier::Tier4)),
            "N/A" => Ok(Self::NotAvailable),
            other => Err(serde::de::Error::custom(format!(
                "unknown overall tier {other:?}"
            ))),
        }
    }
}

/// Match-score cut points for the four tiers, walked best to worst with
/// strict `>` comparisons.
///
/// Defaults are `0.85 / 0.75 / 0.50`. The exact boundaries are calibration
/// knobs, not load-bearing behavior; anything strictly decreasing inside
/// `(0, 1)` is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct TierThresholds {
    /// Scores above this are `TIER_1`.
    pub tier1: f64,
    /// Scores above this (and not above `tier1`) are `TIER_2`.
    pub tier2: f64,
    /// Scores above this (and not above `tier2`) are `TIER_3`; the rest are `TIER_4`.
    pub tier3: f64,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            tier1: 0.85,
            tier2: 0.75,
            tier3: 0.50,
        }
    }
}

impl TierThresholds {
    /// Validates that the cut points are usable.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidConfig`] when the thresholds are not
    /// strictly decreasing or fall outside `(0, 1)`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let ordered = self.tier1 > self.tier2 && self.tier2 > self.tier3;
        let bounded = self.tier3 > 0.0 && self.tier1 < 1.0;
        if ordered && bounded {
            Ok(())
        } else {
            Err(ValidationError::InvalidConfig {
                field: "tier_thresholds",
                value: format!("{}/{}/{}", self.tier1, self.tier2, self.tier3),
                reason: "cut points must be strictly decreasing within (0, 1)",
            })
        }
    }

    /// Maps a normalized match score to its tier.
    ///
    /// Non-finite scores classify as `TIER_4` (a test that produced NaN has
    /// demonstrated nothing about similarity).
    #[must_use]
    pub fn classify(&self, match_score: f64) -> Tier {
        if !match_score.is_finite() {
            return Tier::Tier4;
        }
        if match_score > self.tier1 {
            Tier::Tier1
        } else if match_score > self.tier2 {
            Tier::Tier2
        } else if match_score > self.tier3 {
            Tier::Tier3
        } else {
            Tier::Tier4
        }
    }
}

/// Cumulative-proportion rule for the report-level tier.
///
/// Walks tiers best to worst: `TIER_1` when at least `tier1_share` of items
/// are `TIER_1`; else `TIER_2` when at least `cumulative_share` of items are
/// `TIER_1` or `TIER_2`; else `TIER_3` when at least `cumulative_share` are
/// `TIER_1..=TIER_3`; else `TIER_4`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct OverallTierRule {
    /// Minimum proportion of `TIER_1` items for an overall `TIER_1`.
    pub tier1_share: f64,
    /// Minimum cumulative proportion for overall `TIER_2` and `TIER_3`.
    pub cumulative_share: f64,
}

impl Default for OverallTierRule {
    fn default() -> Self {
        Self {
            tier1_share: 0.60,
            cumulative_share: 0.40,
        }
    }
}

impl OverallTierRule {
    /// Derives the overall tier from per-item tier counts (best-first order,
    /// matching [`Tier::ALL`]).
    ///
    /// Returns [`OverallTier::NotAvailable`] when `counts` sums to zero.
    #[must_use]
    pub fn derive(&self, counts: &[usize; 4]) -> OverallTier {
        let total: usize = counts.iter().sum();
        if total == 0 {
            return OverallTier::NotAvailable;
        }
        #[allow(clippy::cast_precision_loss)]
        let total = total as f64;

        #[allow(clippy::cast_precision_loss)]
        let share = |cumulative: usize| cumulative as f64 / total;

        if share(counts[0]) >= self.tier1_share {
            OverallTier::Tier(Tier::Tier1)
        } else if share(counts[0] + counts[1]) >= self.cumulative_share {
            OverallTier::Tier(Tier::Tier2)
        } else if share(counts[0] + counts[1] + counts[2]) >= self.cumulative_share {
            OverallTier::Tier(Tier::Tier3)
        } else {
            OverallTier::Tier(Tier::Tier4)
        }
    }
}
