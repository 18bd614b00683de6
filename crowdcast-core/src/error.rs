//! Error types raised while building weight tables and trip plans.

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

use crate::CrowdTier;

/// Errors raised while validating a weight table.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    /// A weight fell outside `0.0..=1.0` or was not finite.
    #[error("{table} weight {weight} for {key} must be within 0.0..=1.0")]
    WeightOutOfRange {
        /// Table that rejected the weight.
        table: &'static str,
        /// Entry the weight belongs to.
        key: String,
        /// Offending value.
        weight: f32,
    },
    /// The holiday calendar listed the same date twice.
    #[error("holiday calendar lists {date} more than once")]
    DuplicateHoliday {
        /// Repeated date.
        date: NaiveDate,
    },
    /// A time slot did not describe a non-empty span of the day.
    #[error("time slot {label} has invalid bounds [{start}, {end})")]
    InvalidSlotBounds {
        /// Slot label.
        label: String,
        /// Inclusive start hour.
        start: u8,
        /// Exclusive end hour.
        end: u8,
    },
    /// Two time slots cover the same hour.
    #[error("time slot {label} starting at {start} overlaps a slot ending at {previous_end}")]
    OverlappingSlots {
        /// Label of the later slot.
        label: String,
        /// Start hour of the later slot.
        start: u8,
        /// End hour of the earlier slot.
        previous_end: u8,
    },
    /// A location multiplier was zero, negative or not finite.
    #[error("popularity multiplier {weight} for {location} must be positive")]
    NonPositivePopularity {
        /// Location identifier.
        location: String,
        /// Offending value.
        weight: f32,
    },
    /// The popularity table listed the same location twice.
    #[error("popularity table lists {location} more than once")]
    DuplicateLocation {
        /// Repeated location identifier.
        location: String,
    },
    /// No crowd levels were supplied.
    #[error("level thresholds must define at least one tier")]
    EmptyThresholds,
    /// The same tier appeared twice.
    #[error("tier {tier} is defined more than once")]
    DuplicateTier {
        /// Repeated tier.
        tier: CrowdTier,
    },
    /// A minimum score was negative or not finite.
    #[error("minimum score {min_score} for tier {tier} must be a finite non-negative value")]
    InvalidThreshold {
        /// Tier carrying the bad minimum.
        tier: CrowdTier,
        /// Offending value.
        min_score: f32,
    },
    /// A higher tier did not require a strictly higher score.
    #[error("tier {higher} must require a higher score than {lower}")]
    MisorderedThresholds {
        /// Tier that should sit above `lower`.
        higher: CrowdTier,
        /// Tier that should sit below `higher`.
        lower: CrowdTier,
    },
}

/// Errors raised while loading a weight-table document.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document was not valid JSON for the expected shape.
    #[error("failed to parse weight tables")]
    Parse(#[source] serde_json::Error),
    /// The document parsed but a table failed validation.
    #[error("invalid weight tables: {0}")]
    Table(#[from] TableError),
}

/// Errors raised while building a [`TripPlan`](crate::TripPlan).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TripError {
    /// No trip days were supplied.
    #[error("trip must contain at least one day")]
    Empty,
    /// More days than a `u8` day number can count.
    #[error("trip has {days} days; at most 255 are supported")]
    TooLong {
        /// Number of supplied days.
        days: usize,
    },
    /// Two trip days share a date.
    #[error("trip lists {date} more than once")]
    DuplicateDay {
        /// Repeated date.
        date: NaiveDate,
    },
    /// Day numbers did not run 1..=n in date order.
    #[error("trip day on {date} is numbered {found}, expected {expected}")]
    MisnumberedDay {
        /// Date of the offending day.
        date: NaiveDate,
        /// Number the day should carry.
        expected: u8,
        /// Number the day carries.
        found: u8,
    },
    /// An authored calendar date does not exist.
    #[error("{year}-{month:02}-{day:02} is not a calendar date")]
    InvalidDate {
        /// Year component.
        year: i32,
        /// Month component.
        month: u32,
        /// Day-of-month component.
        day: u32,
    },
    /// The departure time falls in a gap skipped by the timezone.
    #[error("departure {departure} does not exist in the trip timezone")]
    NonexistentDeparture {
        /// Local departure time.
        departure: NaiveDateTime,
    },
}
