//! Facade crate for Crowdcast, the crowd-level estimator for the 2026 Lunar
//! New Year itinerary.
//!
//! This crate re-exports the core domain types and, behind the `fs` feature,
//! the UTF-8 file helpers used to load and export weight tables.
//!
//! ```
//! use chrono::NaiveDate;
//! use crowdcast::{CrowdEstimator, CrowdTier};
//!
//! let evening = NaiveDate::from_ymd_opt(2026, 2, 18)
//!     .and_then(|date| date.and_hms_opt(19, 0, 0))
//!     .unwrap();
//! let estimate = CrowdEstimator::default().estimate_local(Some("tamsui-old-street"), evening);
//! assert_eq!(estimate.tier, CrowdTier::High);
//! ```

#![forbid(unsafe_code)]

pub use crowdcast_core::{
    BASELINE_POPULARITY, ConfigError, Countdown, CrowdConfig, CrowdEstimate, CrowdEstimator,
    CrowdFactors, CrowdReport, CrowdTier, DEFAULT_DAY_WEIGHT, DEFAULT_TIMEZONE, DEPARTED_GREETING,
    FALLBACK_TIME_WEIGHT, HOURS_PER_DAY, HolidayCalendar, HolidayDay, LevelThresholds,
    LocationEstimate, LocationPopularity, PERCENTAGE_CEILING, PERCENTAGE_FLOOR, TableError,
    Threshold, TimeSlot, TimeSlotTable, TripDay, TripError, TripPlan, display_percentage,
};

#[cfg(feature = "fs")]
pub use crowdcast_fs as fs;
