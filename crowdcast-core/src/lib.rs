//! Core domain for Crowdcast, the crowd-level estimator behind the 2026
//! Lunar New Year family itinerary.
//!
//! The crate provides:
//! - **Weight tables**: [`HolidayCalendar`], [`TimeSlotTable`],
//!   [`LocationPopularity`] and [`LevelThresholds`]. Constructors validate
//!   their input and return `Result`; `Default` yields the authored tables.
//! - **Estimation**: [`CrowdEstimator`] combines the tables into a
//!   [`CrowdEstimate`]. Estimation is pure and never fails.
//! - **Trip plan**: [`TripPlan`] lists the itinerary days and counts down to
//!   departure.
//!
//! # Examples
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use crowdcast_core::{CrowdEstimator, CrowdTier};
//!
//! let estimator = CrowdEstimator::default();
//! // 03:00 UTC on 2026-02-17 is 11:00 in Taipei, the start of the midday peak.
//! let at = Utc.with_ymd_and_hms(2026, 2, 17, 3, 0, 0).unwrap();
//! let estimate = estimator.estimate(None, &at);
//! assert_eq!(estimate.tier, CrowdTier::VeryHigh);
//! assert_eq!(estimate.factors.time_weight, 1.0);
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod calendar;
mod config;
mod error;
mod estimator;
mod popularity;
mod slots;
mod tier;
mod trip;
mod weight;

pub use calendar::{DEFAULT_DAY_WEIGHT, HolidayCalendar, HolidayDay};
pub use config::{CrowdConfig, DEFAULT_TIMEZONE};
pub use error::{ConfigError, TableError, TripError};
pub use estimator::{
    CrowdEstimate, CrowdEstimator, CrowdFactors, CrowdReport, LocationEstimate,
    PERCENTAGE_CEILING, PERCENTAGE_FLOOR, display_percentage,
};
pub use popularity::{BASELINE_POPULARITY, LocationPopularity};
pub use slots::{FALLBACK_TIME_WEIGHT, HOURS_PER_DAY, TimeSlot, TimeSlotTable};
pub use tier::{CrowdTier, LevelThresholds, Threshold};
pub use trip::{Countdown, DEPARTED_GREETING, TripDay, TripPlan};
