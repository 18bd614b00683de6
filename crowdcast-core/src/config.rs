//! Bundled weight tables and the timezone used to read local dates.
//!
//! A [`CrowdConfig`] is built once and handed to the estimator. It can come
//! from the authored defaults or from a JSON document of the form:
//!
//! ```json
//! {
//!   "timezone": "Asia/Taipei",
//!   "holidays": { "default_weight": 0.3, "days": [{ "date": "2026-02-17", "weight": 1.0 }] },
//!   "time_slots": { "slots": [{ "start": 0, "end": 24, "weight": 0.5, "label": "all day" }] },
//!   "locations": { "guandu-temple": 1.3 },
//!   "thresholds": [{ "tier": "low", "min_score": 0.0, "color": "#52c41a" }]
//! }
//! ```

use std::{collections::BTreeMap, io::Read};

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::{
    ConfigError, HolidayCalendar, LevelThresholds, LocationPopularity, TableError, Threshold,
    TimeSlotTable, calendar::CalendarDocument, slots::SlotDocument,
};

/// Timezone of the itinerary.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Asia::Taipei;

/// Immutable inputs for crowd estimation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ConfigDocument", into = "ConfigDocument")]
pub struct CrowdConfig {
    /// Zone used to derive the local date and hour.
    pub timezone: Tz,
    /// Per-date weights.
    pub holidays: HolidayCalendar,
    /// Per-hour weights.
    pub time_slots: TimeSlotTable,
    /// Per-location multipliers.
    pub locations: LocationPopularity,
    /// Score-to-tier mapping.
    pub thresholds: LevelThresholds,
}

impl CrowdConfig {
    /// Parse and validate a JSON weight-table document.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Table`] when a table fails validation.
    pub fn from_json_str(document: &str) -> Result<Self, ConfigError> {
        let raw: ConfigDocument = serde_json::from_str(document).map_err(ConfigError::Parse)?;
        Ok(Self::try_from(raw)?)
    }

    /// Parse and validate a JSON weight-table document from a reader.
    ///
    /// # Errors
    /// See [`CrowdConfig::from_json_str`].
    pub fn from_reader(reader: impl Read) -> Result<Self, ConfigError> {
        let raw: ConfigDocument = serde_json::from_reader(reader).map_err(ConfigError::Parse)?;
        Ok(Self::try_from(raw)?)
    }

    /// Render the configuration as a pretty-printed JSON document.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] if serialisation fails.
    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(ConfigError::Parse)
    }
}

impl Default for CrowdConfig {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE,
            holidays: HolidayCalendar::default(),
            time_slots: TimeSlotTable::default(),
            locations: LocationPopularity::default(),
            thresholds: LevelThresholds::default(),
        }
    }
}

/// Unvalidated shape of a weight-table document.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigDocument {
    #[serde(default = "default_timezone")]
    timezone: Tz,
    holidays: CalendarDocument,
    time_slots: SlotDocument,
    #[serde(default = "default_locations")]
    locations: BTreeMap<String, f32>,
    #[serde(default = "default_thresholds")]
    thresholds: Vec<Threshold>,
}

const fn default_timezone() -> Tz {
    DEFAULT_TIMEZONE
}

fn default_locations() -> BTreeMap<String, f32> {
    LocationPopularity::default().into()
}

fn default_thresholds() -> Vec<Threshold> {
    LevelThresholds::default().into()
}

impl TryFrom<ConfigDocument> for CrowdConfig {
    type Error = TableError;

    fn try_from(document: ConfigDocument) -> Result<Self, Self::Error> {
        Ok(Self {
            timezone: document.timezone,
            holidays: HolidayCalendar::try_from(document.holidays)?,
            time_slots: TimeSlotTable::try_from(document.time_slots)?,
            locations: LocationPopularity::try_from(document.locations)?,
            thresholds: LevelThresholds::try_from(document.thresholds)?,
        })
    }
}

impl From<CrowdConfig> for ConfigDocument {
    fn from(config: CrowdConfig) -> Self {
        Self {
            timezone: config.timezone,
            holidays: config.holidays.into(),
            time_slots: config.time_slots.into(),
            locations: config.locations.into(),
            thresholds: config.thresholds.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn authored_config_round_trips_through_json() {
        let config = CrowdConfig::default();
        let json = config.to_json_pretty().expect("serialise config");
        let decoded = CrowdConfig::from_json_str(&json).expect("decode config");
        assert_eq!(decoded, config);
    }

    #[rstest]
    fn omitted_sections_use_authored_defaults() {
        let json = r#"{
            "holidays": { "default_weight": 0.5 },
            "time_slots": { "slots": [{ "start": 0, "end": 24, "weight": 1.0, "label": "all day" }] }
        }"#;
        let config = CrowdConfig::from_json_str(json).expect("decode config");
        assert_eq!(config.timezone, DEFAULT_TIMEZONE);
        assert_eq!(config.locations, LocationPopularity::default());
        assert_eq!(config.thresholds, LevelThresholds::default());
        assert!(config.holidays.is_empty());
    }

    #[rstest]
    fn invalid_tables_are_reported_as_table_errors() {
        let json = r#"{
            "holidays": { "default_weight": 1.5 },
            "time_slots": { "slots": [] }
        }"#;
        let err = CrowdConfig::from_json_str(json).expect_err("weight out of range");
        match err {
            ConfigError::Table(TableError::WeightOutOfRange { table, .. }) => {
                assert_eq!(table, "holiday");
            }
            other => panic!("expected a table error, found {other:?}"),
        }
    }

    #[rstest]
    fn overlapping_slots_in_documents_are_rejected() {
        let json = r#"{
            "holidays": { "default_weight": 0.3 },
            "time_slots": { "slots": [
                { "start": 0, "end": 13, "weight": 0.5, "label": "a" },
                { "start": 12, "end": 24, "weight": 0.5, "label": "b" }
            ] }
        }"#;
        let err = CrowdConfig::from_json_str(json).expect_err("overlap");
        assert!(matches!(
            err,
            ConfigError::Table(TableError::OverlappingSlots { .. })
        ));
    }

    #[rstest]
    fn malformed_json_is_a_parse_error() {
        let err = CrowdConfig::from_json_str("{ not json").expect_err("malformed");
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[rstest]
    fn documents_load_from_readers() {
        let json = CrowdConfig::default().to_json_pretty().expect("serialise");
        let config = CrowdConfig::from_reader(json.as_bytes()).expect("decode");
        assert_eq!(config, CrowdConfig::default());
    }

    #[rstest]
    fn unknown_timezones_are_rejected() {
        let json = r#"{
            "timezone": "Mars/Olympus_Mons",
            "holidays": { "default_weight": 0.3 },
            "time_slots": { "slots": [] }
        }"#;
        let err = CrowdConfig::from_json_str(json).expect_err("unknown timezone");
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
