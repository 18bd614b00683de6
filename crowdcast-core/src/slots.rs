//! Time-of-day crowd weights.
//!
//! The table partitions the day into closed-open hour ranges `[start, end)`.
//! An hour equal to a slot's `end` belongs to the next slot. Hours that no
//! slot covers resolve to the fallback weight.

use serde::{Deserialize, Serialize};

use crate::{TableError, weight::unit_weight};

/// Weight applied to hours that no slot covers.
pub const FALLBACK_TIME_WEIGHT: f32 = 0.3;

/// Exclusive upper bound for slot hours.
pub const HOURS_PER_DAY: u8 = 24;

const TABLE: &str = "time slot";

/// Authored slots: (start, end, label, weight).
const AUTHORED_SLOTS: [(u8, u8, &str, f32); 7] = [
    (0, 6, "深夜", 0.2),
    (6, 9, "清晨", 0.4),
    (9, 11, "上午", 0.7),
    (11, 15, "午間高峰", 1.0),
    (15, 18, "下午", 0.8),
    (18, 21, "傍晚", 0.6),
    (21, 24, "夜間", 0.3),
];

/// A weighted span of the day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Inclusive start hour.
    pub start: u8,
    /// Exclusive end hour, at most 24.
    pub end: u8,
    /// Crowd weight in `0.0..=1.0`.
    pub weight: f32,
    /// Display label.
    pub label: String,
}

impl TimeSlot {
    /// Build a slot entry.
    #[must_use]
    pub fn new(start: u8, end: u8, weight: f32, label: impl Into<String>) -> Self {
        Self {
            start,
            end,
            weight,
            label: label.into(),
        }
    }

    /// Report whether `hour` falls within `[start, end)`.
    #[must_use]
    pub fn contains(&self, hour: u32) -> bool {
        u32::from(self.start) <= hour && hour < u32::from(self.end)
    }
}

/// Ordered, non-overlapping hour slots.
///
/// # Examples
/// ```
/// use crowdcast_core::TimeSlotTable;
///
/// let slots = TimeSlotTable::default();
/// assert_eq!(slots.weight_at(12), 1.0);
/// assert_eq!(slots.weight_at(3), 0.2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SlotDocument", into = "SlotDocument")]
pub struct TimeSlotTable {
    slots: Vec<TimeSlot>,
    fallback_weight: f32,
}

impl TimeSlotTable {
    /// Validate and build a slot table with the standard fallback weight.
    ///
    /// # Errors
    /// See [`TimeSlotTable::with_fallback`].
    pub fn new(slots: Vec<TimeSlot>) -> Result<Self, TableError> {
        Self::with_fallback(slots, FALLBACK_TIME_WEIGHT)
    }

    /// Validate and build a slot table with an explicit fallback weight.
    ///
    /// Slots are sorted by start hour. A table that leaves some hours
    /// uncovered is accepted; those hours use the fallback weight.
    ///
    /// # Errors
    /// Returns [`TableError::InvalidSlotBounds`] for empty or out-of-day
    /// spans, [`TableError::OverlappingSlots`] when two slots share an hour,
    /// and [`TableError::WeightOutOfRange`] for weights outside `0.0..=1.0`.
    pub fn with_fallback(mut slots: Vec<TimeSlot>, fallback_weight: f32) -> Result<Self, TableError> {
        let fallback = unit_weight(TABLE, "fallback", fallback_weight)?;
        for slot in &slots {
            if slot.start >= slot.end || slot.end > HOURS_PER_DAY {
                return Err(TableError::InvalidSlotBounds {
                    label: slot.label.clone(),
                    start: slot.start,
                    end: slot.end,
                });
            }
            unit_weight(TABLE, &slot.label, slot.weight)?;
        }
        slots.sort_by_key(|slot| slot.start);
        for pair in slots.windows(2) {
            if let [earlier, later] = pair {
                if later.start < earlier.end {
                    return Err(TableError::OverlappingSlots {
                        label: later.label.clone(),
                        start: later.start,
                        previous_end: earlier.end,
                    });
                }
            }
        }
        let table = Self {
            slots,
            fallback_weight: fallback,
        };
        let uncovered = table.uncovered_hours();
        if !uncovered.is_empty() {
            log::warn!("time slots leave hours {uncovered:?} uncovered; they use weight {fallback}");
        }
        Ok(table)
    }

    /// Return the first slot containing `hour`, if any.
    #[must_use]
    pub fn slot_at(&self, hour: u32) -> Option<&TimeSlot> {
        self.slots.iter().find(|slot| slot.contains(hour))
    }

    /// Return the weight for `hour`, falling back when no slot matches.
    #[must_use]
    pub fn weight_at(&self, hour: u32) -> f32 {
        self.slot_at(hour)
            .map_or(self.fallback_weight, |slot| slot.weight)
    }

    /// Weight used for hours outside every slot.
    #[must_use]
    pub const fn fallback_weight(&self) -> f32 {
        self.fallback_weight
    }

    /// Hours of the day that no slot covers.
    #[must_use]
    pub fn uncovered_hours(&self) -> Vec<u8> {
        (0..HOURS_PER_DAY)
            .filter(|&hour| self.slot_at(u32::from(hour)).is_none())
            .collect()
    }

    /// Report whether every hour `0..24` is covered exactly once.
    #[must_use]
    pub fn covers_full_day(&self) -> bool {
        self.uncovered_hours().is_empty()
    }

    /// Iterate over slots in start-hour order.
    pub fn iter(&self) -> impl Iterator<Item = &TimeSlot> {
        self.slots.iter()
    }
}

impl Default for TimeSlotTable {
    fn default() -> Self {
        let slots = AUTHORED_SLOTS
            .iter()
            .map(|&(start, end, label, weight)| TimeSlot::new(start, end, weight, label))
            .collect();
        Self {
            slots,
            fallback_weight: FALLBACK_TIME_WEIGHT,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct SlotDocument {
    #[serde(default = "default_fallback")]
    fallback_weight: f32,
    slots: Vec<TimeSlot>,
}

const fn default_fallback() -> f32 {
    FALLBACK_TIME_WEIGHT
}

impl TryFrom<SlotDocument> for TimeSlotTable {
    type Error = TableError;

    fn try_from(document: SlotDocument) -> Result<Self, Self::Error> {
        Self::with_fallback(document.slots, document.fallback_weight)
    }
}

impl From<TimeSlotTable> for SlotDocument {
    fn from(table: TimeSlotTable) -> Self {
        Self {
            fallback_weight: table.fallback_weight,
            slots: table.slots,
        }
    }
}
