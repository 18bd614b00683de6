//! Crowd-level estimation.
//!
//! The estimator multiplies three hand-authored weights (the holiday weight
//! for the date, the time-slot weight for the hour and the popularity of the
//! location) and classifies the product against the tier thresholds:
//!
//! ```text
//! score = holiday_weight × time_weight × location_weight
//! ```
//!
//! Estimation never fails. Every lookup degrades to a neutral default: the
//! calendar's default day weight, the slot table's fallback weight, and a
//! location multiplier of `1.0`.

use chrono::{DateTime, NaiveDateTime, TimeZone, Timelike};
use serde::Serialize;

use crate::{CrowdConfig, CrowdTier};

/// Display ceiling applied to the very-high tier.
pub const PERCENTAGE_CEILING: u32 = 100;

/// Display floor applied to the low tier so the bar never looks empty.
pub const PERCENTAGE_FLOOR: u32 = 10;

/// The three weights that produced a score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrowdFactors {
    /// Weight of the local calendar date.
    pub holiday_weight: f32,
    /// Weight of the local hour.
    pub time_weight: f32,
    /// Popularity multiplier of the location.
    pub location_weight: f32,
    /// Label of the matched holiday, `None` when the default applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub holiday: Option<String>,
    /// Label of the matched time slot, `None` when the fallback applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_slot: Option<String>,
}

/// Result of a crowd estimate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrowdEstimate {
    /// Selected tier.
    pub tier: CrowdTier,
    /// Display label of the tier.
    pub label: &'static str,
    /// Display colour of the tier.
    pub color: String,
    /// Fill level for the display bar.
    pub percentage: u32,
    /// Raw product of the factors.
    pub score: f32,
    /// Inputs to the score.
    pub factors: CrowdFactors,
}

/// Estimate for one named location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationEstimate {
    /// Location identifier.
    pub location: String,
    /// Estimate at the report time.
    #[serde(flatten)]
    pub estimate: CrowdEstimate,
}

/// Dashboard estimate plus one estimate per known location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrowdReport {
    /// Local date-time the report describes.
    pub local_time: NaiveDateTime,
    /// Estimate without a location.
    pub dashboard: CrowdEstimate,
    /// Estimates for each configured location, ordered by identifier.
    pub locations: Vec<LocationEstimate>,
}

/// Maps a moment and an optional location to a crowd tier.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use crowdcast_core::{CrowdEstimator, CrowdTier};
///
/// let estimator = CrowdEstimator::default();
/// let noon = NaiveDate::from_ymd_opt(2026, 2, 17)
///     .and_then(|date| date.and_hms_opt(12, 0, 0))
///     .unwrap();
/// let estimate = estimator.estimate_local(Some("guandu-temple"), noon);
/// assert_eq!(estimate.tier, CrowdTier::VeryHigh);
/// assert_eq!(estimate.percentage, 100);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrowdEstimator {
    config: CrowdConfig,
}

impl CrowdEstimator {
    /// Build an estimator over fixed tables.
    #[must_use]
    pub const fn new(config: CrowdConfig) -> Self {
        Self { config }
    }

    /// Tables in use.
    #[must_use]
    pub const fn config(&self) -> &CrowdConfig {
        &self.config
    }

    /// Estimate crowds at `at`, converted into the configured timezone.
    ///
    /// `location` of `None` selects dashboard mode.
    #[must_use]
    pub fn estimate<Z: TimeZone>(&self, location: Option<&str>, at: &DateTime<Z>) -> CrowdEstimate {
        let local = at.with_timezone(&self.config.timezone).naive_local();
        self.estimate_local(location, local)
    }

    /// Estimate crowds at a date-time already expressed in the configured
    /// timezone.
    #[must_use]
    pub fn estimate_local(&self, location: Option<&str>, at: NaiveDateTime) -> CrowdEstimate {
        let date = at.date();
        let hour = at.hour();
        let holiday = self.config.holidays.lookup(date);
        let slot = self.config.time_slots.slot_at(hour);
        let factors = CrowdFactors {
            holiday_weight: holiday.map_or(self.config.holidays.default_weight(), |day| day.weight),
            time_weight: slot.map_or(self.config.time_slots.fallback_weight(), |s| s.weight),
            location_weight: self.config.locations.multiplier(location),
            holiday: holiday.and_then(|day| day.label.clone()),
            time_slot: slot.map(|s| s.label.clone()),
        };
        let score = compose(&factors);
        let threshold = self.config.thresholds.classify(score);
        log::debug!(
            "crowd estimate for {} at {at}: {} × {} × {} = {score} ({})",
            location.unwrap_or("dashboard"),
            factors.holiday_weight,
            factors.time_weight,
            factors.location_weight,
            threshold.tier,
        );
        CrowdEstimate {
            tier: threshold.tier,
            label: threshold.tier.label(),
            color: threshold.color.clone(),
            percentage: display_percentage(threshold.tier, score),
            score,
            factors,
        }
    }

    /// Estimate the dashboard and every configured location at `at`.
    #[must_use]
    pub fn report<Z: TimeZone>(&self, at: &DateTime<Z>) -> CrowdReport {
        let local = at.with_timezone(&self.config.timezone).naive_local();
        self.report_local(local)
    }

    /// Estimate the dashboard and every configured location at a local
    /// date-time.
    #[must_use]
    pub fn report_local(&self, at: NaiveDateTime) -> CrowdReport {
        let locations = self
            .config
            .locations
            .locations()
            .map(|id| LocationEstimate {
                location: id.to_owned(),
                estimate: self.estimate_local(Some(id), at),
            })
            .collect();
        CrowdReport {
            local_time: at,
            dashboard: self.estimate_local(None, at),
            locations,
        }
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "the crowd score is a product of authored float weights"
)]
fn compose(factors: &CrowdFactors) -> f32 {
    factors.holiday_weight * factors.time_weight * factors.location_weight
}

/// Convert a score into a bar fill level.
///
/// Only the very-high tier is capped and only the low tier is floored; the
/// middle tiers keep their rounded score.
#[expect(
    clippy::float_arithmetic,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "percentages are rounded from non-negative scores; float-to-int casts saturate"
)]
#[must_use]
pub fn display_percentage(tier: CrowdTier, score: f32) -> u32 {
    let rounded = (score * 100.0).round() as u32;
    match tier {
        CrowdTier::VeryHigh => rounded.min(PERCENTAGE_CEILING),
        CrowdTier::Low => rounded.max(PERCENTAGE_FLOOR),
        CrowdTier::Medium | CrowdTier::High => rounded,
    }
}
