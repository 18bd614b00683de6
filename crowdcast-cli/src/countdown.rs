//! `countdown` command implementation.

use std::io::Write;

use chrono::{DateTime, FixedOffset, Utc};
use clap::Parser;
use crowdcast_core::TripPlan;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{ARG_NOW, CliError, resolve_moment, write_line};

/// CLI arguments for the `countdown` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "countdown",
    long_about = "Print the time left until the itinerary departs, and the \
                 day's plan when the moment falls on a trip day.",
    about = "Show the time left until departure"
)]
#[ortho_config(prefix = "CROWDCAST")]
pub(crate) struct CountdownArgs {
    /// RFC 3339 timestamp to count from; defaults to now.
    #[arg(long = ARG_NOW, value_name = "rfc3339")]
    #[serde(default)]
    pub(crate) now: Option<String>,
}

impl CountdownArgs {
    fn into_config(self, now: DateTime<Utc>) -> Result<CountdownConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        CountdownConfig::resolve(&merged, now)
    }
}

/// Resolved `countdown` command configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CountdownConfig {
    pub(crate) now: DateTime<FixedOffset>,
}

impl CountdownConfig {
    pub(crate) fn resolve(args: &CountdownArgs, now: DateTime<Utc>) -> Result<Self, CliError> {
        Ok(Self {
            now: resolve_moment(args.now.as_deref(), ARG_NOW, now)?,
        })
    }
}

pub(crate) fn run_countdown_with(
    args: CountdownArgs,
    now: DateTime<Utc>,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config(now)?;
    let plan = TripPlan::lunar_new_year_2026()?;
    write_line(writer, &plan.countdown(&config.now).to_string())?;
    let local_date = config
        .now
        .with_timezone(&plan.departs_at().timezone())
        .date_naive();
    if let Some(day) = plan.day_on(local_date) {
        write_line(
            writer,
            &format!("Day {} {} {}", day.day_number, day.lunar, day.title),
        )?;
    }
    Ok(())
}
