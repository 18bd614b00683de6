//! The itinerary's day plan and the countdown to departure.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta, TimeZone};
use chrono_tz::Tz;

use crate::{DEFAULT_TIMEZONE, TripError};

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 3_600;
const SECONDS_PER_DAY: u64 = 86_400;

/// Greeting shown once the trip has started.
pub const DEPARTED_GREETING: &str = "新年快樂！";

/// Authored days: (month, day, lunar label, title). All dates fall in 2026.
const AUTHORED_DAYS: [(u32, u32, &str, &str); 4] = [
    (2, 17, "初一", "關渡祈福 & 三層崎花海"),
    (2, 18, "初二", "淡水夕陽 & 頂級名廚盛宴"),
    (2, 19, "初三", "陽明山花季 & 頂級森林浴"),
    (2, 20, "初四", "名湯巡禮 & 暖心返程"),
];
const AUTHORED_YEAR: i32 = 2026;

/// One day of the itinerary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripDay {
    /// Calendar date.
    pub date: NaiveDate,
    /// 1-based day number.
    pub day_number: u8,
    /// Lunar calendar label such as `初一`.
    pub lunar: String,
    /// Headline for the day.
    pub title: String,
}

/// Ordered trip days and the departure moment.
#[derive(Debug, Clone, PartialEq)]
pub struct TripPlan {
    departs_at: DateTime<Tz>,
    days: Vec<TripDay>,
}

impl TripPlan {
    /// Validate and build a plan.
    ///
    /// Days are sorted by date and must be numbered `1..=n` in that order.
    ///
    /// # Errors
    /// Returns [`TripError`] when the plan is empty or longer than 255 days,
    /// repeats a date, is misnumbered, or `departure` does not exist in
    /// `timezone`.
    pub fn new(
        departure: NaiveDateTime,
        timezone: Tz,
        mut days: Vec<TripDay>,
    ) -> Result<Self, TripError> {
        if days.is_empty() {
            return Err(TripError::Empty);
        }
        if u8::try_from(days.len()).is_err() {
            return Err(TripError::TooLong { days: days.len() });
        }
        let departs_at = timezone
            .from_local_datetime(&departure)
            .earliest()
            .ok_or(TripError::NonexistentDeparture { departure })?;
        days.sort_by_key(|day| day.date);
        for pair in days.windows(2) {
            if let [earlier, later] = pair {
                if earlier.date == later.date {
                    return Err(TripError::DuplicateDay { date: later.date });
                }
            }
        }
        for (expected, day) in (1_u8..).zip(&days) {
            if day.day_number != expected {
                return Err(TripError::MisnumberedDay {
                    date: day.date,
                    expected,
                    found: day.day_number,
                });
            }
        }
        Ok(Self { departs_at, days })
    }

    /// The 2026 Lunar New Year itinerary, departing at midnight on 初一.
    ///
    /// # Errors
    /// Only fails if the authored dates are invalid.
    pub fn lunar_new_year_2026() -> Result<Self, TripError> {
        let days = (1_u8..)
            .zip(AUTHORED_DAYS)
            .map(|(day_number, (month, day, lunar, title))| -> Result<TripDay, TripError> {
                let date = authored_date(month, day)?;
                Ok(TripDay {
                    date,
                    day_number,
                    lunar: lunar.to_owned(),
                    title: title.to_owned(),
                })
            })
            .collect::<Result<Vec<_>, TripError>>()?;
        let departure = days
            .first()
            .and_then(|day| day.date.and_hms_opt(0, 0, 0))
            .ok_or(TripError::Empty)?;
        Self::new(departure, DEFAULT_TIMEZONE, days)
    }

    /// Departure moment in the trip's timezone.
    #[must_use]
    pub const fn departs_at(&self) -> &DateTime<Tz> {
        &self.departs_at
    }

    /// Trip days in date order.
    #[must_use]
    pub fn days(&self) -> &[TripDay] {
        &self.days
    }

    /// Return the trip day falling on `date`, if any.
    #[must_use]
    pub fn day_on(&self, date: NaiveDate) -> Option<&TripDay> {
        self.days.iter().find(|day| day.date == date)
    }

    /// Time left until departure as seen at `now`.
    #[must_use]
    pub fn countdown<Z: TimeZone>(&self, now: &DateTime<Z>) -> Countdown {
        let remaining = self
            .departs_at
            .signed_duration_since(now.with_timezone(&self.departs_at.timezone()));
        Countdown::from_remaining(remaining)
    }
}

fn authored_date(month: u32, day: u32) -> Result<NaiveDate, TripError> {
    NaiveDate::from_ymd_opt(AUTHORED_YEAR, month, day).ok_or(TripError::InvalidDate {
        year: AUTHORED_YEAR,
        month,
        day,
    })
}

/// Whole units remaining before departure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Countdown {
    /// Departure lies ahead.
    Pending {
        /// Whole days.
        days: u64,
        /// Hours past the whole days, `0..24`.
        hours: u64,
        /// Minutes past the whole hours, `0..60`.
        minutes: u64,
        /// Seconds past the whole minutes, `0..60`.
        seconds: u64,
    },
    /// Departure has been reached.
    Departed,
}

impl Countdown {
    /// Split a remaining duration into whole units.
    ///
    /// Any positive remainder, even below one second, is still pending.
    #[expect(
        clippy::integer_division,
        clippy::integer_division_remainder_used,
        reason = "countdown components are floor-divided whole units"
    )]
    #[must_use]
    pub fn from_remaining(remaining: TimeDelta) -> Self {
        if remaining <= TimeDelta::zero() {
            return Self::Departed;
        }
        let total = u64::try_from(remaining.num_seconds()).unwrap_or(0);
        Self::Pending {
            days: total / SECONDS_PER_DAY,
            hours: (total % SECONDS_PER_DAY) / SECONDS_PER_HOUR,
            minutes: (total % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE,
            seconds: total % SECONDS_PER_MINUTE,
        }
    }

    /// Report whether departure has been reached.
    #[must_use]
    pub const fn is_departed(&self) -> bool {
        matches!(self, Self::Departed)
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending {
                days,
                hours,
                minutes,
                seconds,
            } => write!(f, "{days}d {hours}h {minutes}m {seconds}s"),
            Self::Departed => f.write_str(DEPARTED_GREETING),
        }
    }
}
