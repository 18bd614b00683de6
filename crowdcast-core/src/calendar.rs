//! Per-date crowd weights for the Lunar New Year travel window.
//!
//! Lookup is by exact calendar date. Dates missing from the table resolve to
//! the calendar's default weight.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{TableError, weight::unit_weight};

/// Weight applied to dates the calendar does not list.
pub const DEFAULT_DAY_WEIGHT: f32 = 0.3;

const TABLE: &str = "holiday";

/// Authored holiday days for the 2026 trip: (year, month, day, label, weight).
const AUTHORED_DAYS: [(i32, u32, u32, &str, f32); 7] = [
    (2026, 2, 16, "除夕", 0.7),
    (2026, 2, 17, "初一", 1.0),
    (2026, 2, 18, "初二", 0.9),
    (2026, 2, 19, "初三", 0.8),
    (2026, 2, 20, "初四", 0.6),
    (2026, 2, 21, "初五", 0.5),
    (2026, 2, 22, "收假", 0.4),
];

/// One weighted calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HolidayDay {
    /// Calendar date the weight applies to.
    pub date: NaiveDate,
    /// Regional travel-crowd intensity in `0.0..=1.0`.
    pub weight: f32,
    /// Optional display label such as `初一`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl HolidayDay {
    /// Build a day entry without a label.
    #[must_use]
    pub const fn new(date: NaiveDate, weight: f32) -> Self {
        Self {
            date,
            weight,
            label: None,
        }
    }

    /// Attach a display label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Holiday weights keyed by exact date.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use crowdcast_core::{HolidayCalendar, HolidayDay};
///
/// # fn main() -> Result<(), crowdcast_core::TableError> {
/// let new_year = NaiveDate::from_ymd_opt(2026, 2, 17).unwrap();
/// let calendar = HolidayCalendar::new(0.3, [HolidayDay::new(new_year, 1.0)])?;
/// assert_eq!(calendar.weight_on(new_year), 1.0);
/// assert_eq!(calendar.weight_on(new_year.succ_opt().unwrap()), 0.3);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CalendarDocument", into = "CalendarDocument")]
pub struct HolidayCalendar {
    days: BTreeMap<NaiveDate, HolidayDay>,
    default_weight: f32,
}

impl HolidayCalendar {
    /// Validate and build a calendar.
    ///
    /// # Errors
    /// Returns [`TableError::WeightOutOfRange`] when the default or any day
    /// weight leaves `0.0..=1.0`, and [`TableError::DuplicateHoliday`] when a
    /// date repeats.
    pub fn new(
        default_weight: f32,
        days: impl IntoIterator<Item = HolidayDay>,
    ) -> Result<Self, TableError> {
        let fallback = unit_weight(TABLE, "default", default_weight)?;
        let mut entries = BTreeMap::new();
        for day in days {
            unit_weight(TABLE, day.date, day.weight)?;
            let date = day.date;
            if entries.insert(date, day).is_some() {
                return Err(TableError::DuplicateHoliday { date });
            }
        }
        Ok(Self {
            days: entries,
            default_weight: fallback,
        })
    }

    /// Return the listed entry for `date`, if any.
    #[must_use]
    pub fn lookup(&self, date: NaiveDate) -> Option<&HolidayDay> {
        self.days.get(&date)
    }

    /// Return the weight for `date`, falling back to the default weight.
    #[must_use]
    pub fn weight_on(&self, date: NaiveDate) -> f32 {
        self.lookup(date)
            .map_or(self.default_weight, |day| day.weight)
    }

    /// Weight used for unlisted dates.
    #[must_use]
    pub const fn default_weight(&self) -> f32 {
        self.default_weight
    }

    /// Iterate over listed days in date order.
    pub fn iter(&self) -> impl Iterator<Item = &HolidayDay> {
        self.days.values()
    }

    /// Number of listed days.
    #[must_use]
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Report whether no days are listed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

impl Default for HolidayCalendar {
    fn default() -> Self {
        let days = AUTHORED_DAYS
            .iter()
            .filter_map(|&(year, month, day, label, weight)| {
                NaiveDate::from_ymd_opt(year, month, day)
                    .map(|date| (date, HolidayDay::new(date, weight).with_label(label)))
            })
            .collect();
        Self {
            days,
            default_weight: DEFAULT_DAY_WEIGHT,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CalendarDocument {
    default_weight: f32,
    #[serde(default)]
    days: Vec<HolidayDay>,
}

impl TryFrom<CalendarDocument> for HolidayCalendar {
    type Error = TableError;

    fn try_from(document: CalendarDocument) -> Result<Self, Self::Error> {
        Self::new(document.default_weight, document.days)
    }
}

impl From<HolidayCalendar> for CalendarDocument {
    fn from(calendar: HolidayCalendar) -> Self {
        Self {
            default_weight: calendar.default_weight,
            days: calendar.days.into_values().collect(),
        }
    }
}
