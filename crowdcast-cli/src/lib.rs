//! Command-line interface for Crowdcast crowd forecasts.
//!
//! The `crowdcast` binary prints crowd estimates for the Lunar New Year
//! itinerary, the countdown to departure, and the weight tables behind the
//! estimates. Options layer through `ortho_config`: each subcommand reads the
//! `[cmds.<subcommand>]` section of the configuration file, then
//! `CROWDCAST_CMDS_<SUBCOMMAND>_<FIELD>` environment variables such as
//! `CROWDCAST_CMDS_ESTIMATE_LOCATION`, then its command-line flags.
#![forbid(unsafe_code)]

use std::io::Write;

use chrono::{DateTime, FixedOffset, Utc};
use clap::{Parser, Subcommand};

mod countdown;
mod error;
mod estimate;
mod tables;

pub use error::CliError;

use countdown::{CountdownArgs, run_countdown_with};
use estimate::{EstimateArgs, ReportArgs, run_estimate_with, run_report_with};
use tables::{TablesArgs, run_tables_with};

const ARG_AT: &str = "at";
const ARG_LOCATION: &str = "location";
const ARG_NOW: &str = "now";
const ARG_OUTPUT: &str = "output";
const ARG_TABLES: &str = "tables";

/// Run the Crowdcast CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when arguments or configuration are invalid, the
/// weight tables cannot be loaded, or output cannot be written.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    dispatch(cli.command, Utc::now(), &mut stdout)
}

fn dispatch(command: Command, now: DateTime<Utc>, writer: &mut dyn Write) -> Result<(), CliError> {
    match command {
        Command::Estimate(args) => run_estimate_with(args, now, writer),
        Command::Report(args) => run_report_with(args, now, writer),
        Command::Countdown(args) => run_countdown_with(args, now, writer),
        Command::Tables(args) => run_tables_with(args, writer),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "crowdcast",
    about = "Crowd forecasts for the 2026 Lunar New Year itinerary",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Estimate the crowd level at a moment, optionally for one location.
    Estimate(EstimateArgs),
    /// Estimate the dashboard and every known location at a moment.
    Report(ReportArgs),
    /// Show the time left until departure.
    Countdown(CountdownArgs),
    /// Export the effective weight tables as JSON.
    Tables(TablesArgs),
}

/// Resolve an optional RFC 3339 option, defaulting to `now`.
fn resolve_moment(
    raw: Option<&str>,
    field: &'static str,
    now: DateTime<Utc>,
) -> Result<DateTime<FixedOffset>, CliError> {
    raw.map_or_else(
        || Ok(now.fixed_offset()),
        |value| {
            DateTime::parse_from_rfc3339(value).map_err(|source| CliError::InvalidTimestamp {
                field,
                value: value.to_owned(),
                source,
            })
        },
    )
}

fn write_json<T: serde::Serialize>(writer: &mut dyn Write, value: &T) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    write_line(writer, &payload)
}

fn write_line(writer: &mut dyn Write, line: &str) -> Result<(), CliError> {
    writer
        .write_all(line.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
mod tests;
