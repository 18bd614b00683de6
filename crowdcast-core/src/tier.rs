//! Crowd tiers and the score thresholds that select them.
//!
//! Tiers are ranked `low < medium < high < very-high`. A
//! [`LevelThresholds`] table maps a continuous score onto a tier by scanning
//! minimum scores from the highest down and taking the first one the score
//! meets.
//!
//! # Examples
//! ```
//! use crowdcast_core::{CrowdTier, LevelThresholds};
//!
//! let thresholds = LevelThresholds::default();
//! assert_eq!(thresholds.classify(0.8).tier, CrowdTier::VeryHigh);
//! assert_eq!(thresholds.classify(0.79).tier, CrowdTier::High);
//! assert_eq!(CrowdTier::VeryHigh.to_string(), "very-high");
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::TableError;

/// Discretised crowd level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CrowdTier {
    /// Quiet; the display bar is floored so it never looks empty.
    Low,
    /// Noticeable crowds.
    Medium,
    /// Busy.
    High,
    /// Peak crowds; the display bar is capped at 100%.
    VeryHigh,
}

impl CrowdTier {
    /// Every tier from lowest to highest rank.
    pub const ALL: [Self; 4] = [Self::Low, Self::Medium, Self::High, Self::VeryHigh];

    /// Return the tier as a kebab-case `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::VeryHigh => "very-high",
        }
    }

    /// Return the label shown on the itinerary site.
    ///
    /// # Examples
    /// ```
    /// use crowdcast_core::CrowdTier;
    ///
    /// assert_eq!(CrowdTier::VeryHigh.label(), "極高");
    /// ```
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "低",
            Self::Medium => "中等",
            Self::High => "偏高",
            Self::VeryHigh => "極高",
        }
    }

    /// Zero-based rank, `0` for [`CrowdTier::Low`].
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
            Self::VeryHigh => 3,
        }
    }
}

impl std::fmt::Display for CrowdTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CrowdTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "very-high" | "very_high" => Ok(Self::VeryHigh),
            _ => Err(format!("unknown crowd tier '{s}'")),
        }
    }
}

/// Minimum score and display colour for one tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    /// Tier selected when the score reaches `min_score`.
    pub tier: CrowdTier,
    /// Inclusive lower bound on the score.
    pub min_score: f32,
    /// CSS colour used by the display layer.
    pub color: String,
}

impl Threshold {
    /// Build a threshold entry.
    #[must_use]
    pub fn new(tier: CrowdTier, min_score: f32, color: impl Into<String>) -> Self {
        Self {
            tier,
            min_score,
            color: color.into(),
        }
    }
}

/// Ordered tier thresholds, highest minimum first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Threshold>", into = "Vec<Threshold>")]
pub struct LevelThresholds {
    levels: Vec<Threshold>,
    lowest: Threshold,
}

impl LevelThresholds {
    /// Validate and order a set of thresholds.
    ///
    /// Entries may be supplied in any order; they are sorted by minimum
    /// score, highest first.
    ///
    /// # Errors
    /// Returns [`TableError`] when the set is empty, a minimum is negative or
    /// not finite, a tier repeats, or a higher tier does not require a
    /// strictly higher score than the tier below it.
    pub fn new(mut levels: Vec<Threshold>) -> Result<Self, TableError> {
        let mut seen = HashSet::new();
        for level in &levels {
            if !level.min_score.is_finite() || level.min_score < 0.0 {
                return Err(TableError::InvalidThreshold {
                    tier: level.tier,
                    min_score: level.min_score,
                });
            }
            if !seen.insert(level.tier) {
                return Err(TableError::DuplicateTier { tier: level.tier });
            }
        }
        levels.sort_by(|a, b| b.min_score.total_cmp(&a.min_score));
        for pair in levels.windows(2) {
            if let [upper, lower] = pair {
                let ordered = upper.tier > lower.tier && upper.min_score > lower.min_score;
                if !ordered {
                    return Err(TableError::MisorderedThresholds {
                        higher: upper.tier.max(lower.tier),
                        lower: upper.tier.min(lower.tier),
                    });
                }
            }
        }
        let lowest = levels.last().cloned().ok_or(TableError::EmptyThresholds)?;
        Ok(Self { levels, lowest })
    }

    /// Return the threshold a score falls into.
    ///
    /// The first entry whose minimum the score meets or exceeds wins. Scores
    /// below every minimum land in the lowest configured tier.
    #[must_use]
    pub fn classify(&self, score: f32) -> &Threshold {
        self.levels
            .iter()
            .find(|level| score >= level.min_score)
            .unwrap_or(&self.lowest)
    }

    /// Iterate over the thresholds, highest minimum first.
    pub fn iter(&self) -> impl Iterator<Item = &Threshold> {
        self.levels.iter()
    }
}

impl Default for LevelThresholds {
    fn default() -> Self {
        let very_high = Threshold::new(CrowdTier::VeryHigh, 0.8, "#ff4d4f");
        let high = Threshold::new(CrowdTier::High, 0.6, "#fa8c16");
        let medium = Threshold::new(CrowdTier::Medium, 0.4, "#faad14");
        let low = Threshold::new(CrowdTier::Low, 0.0, "#52c41a");
        Self {
            levels: vec![very_high, high, medium, low.clone()],
            lowest: low,
        }
    }
}

impl TryFrom<Vec<Threshold>> for LevelThresholds {
    type Error = TableError;

    fn try_from(levels: Vec<Threshold>) -> Result<Self, Self::Error> {
        Self::new(levels)
    }
}

impl From<LevelThresholds> for Vec<Threshold> {
    fn from(thresholds: LevelThresholds) -> Self {
        thresholds.levels
    }
}
