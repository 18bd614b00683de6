//! `estimate` and `report` command implementations.

use std::io::Write;

use camino::Utf8PathBuf;
use chrono::{DateTime, FixedOffset, Utc};
use clap::Parser;
use crowdcast_core::{CrowdEstimate, CrowdEstimator};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_AT, ARG_LOCATION, ARG_TABLES, CliError, resolve_moment, tables::load_tables, write_json,
};

/// CLI arguments for the `estimate` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "estimate",
    long_about = "Estimate the crowd level at a moment. Without --location \
                 the estimate is the dashboard figure, which ignores \
                 location popularity.",
    about = "Estimate the crowd level at a moment"
)]
#[ortho_config(prefix = "CROWDCAST")]
pub(crate) struct EstimateArgs {
    /// Location identifier such as `guandu-temple`.
    #[arg(long = ARG_LOCATION, value_name = "id")]
    #[serde(default)]
    pub(crate) location: Option<String>,
    /// RFC 3339 timestamp to estimate for; defaults to now.
    #[arg(long = ARG_AT, value_name = "rfc3339")]
    #[serde(default)]
    pub(crate) at: Option<String>,
    /// Path to a JSON weight-table document.
    #[arg(long = ARG_TABLES, value_name = "path")]
    #[serde(default)]
    pub(crate) tables: Option<Utf8PathBuf>,
}

/// CLI arguments for the `report` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "report",
    long_about = "Estimate the dashboard figure and every location in the \
                 popularity table at one moment.",
    about = "Estimate every known location at a moment"
)]
#[ortho_config(prefix = "CROWDCAST")]
pub(crate) struct ReportArgs {
    /// RFC 3339 timestamp to estimate for; defaults to now.
    #[arg(long = ARG_AT, value_name = "rfc3339")]
    #[serde(default)]
    pub(crate) at: Option<String>,
    /// Path to a JSON weight-table document.
    #[arg(long = ARG_TABLES, value_name = "path")]
    #[serde(default)]
    pub(crate) tables: Option<Utf8PathBuf>,
}

impl EstimateArgs {
    fn into_config(self, now: DateTime<Utc>) -> Result<EstimateConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        EstimateConfig::resolve(merged, now)
    }
}

impl ReportArgs {
    fn into_config(self, now: DateTime<Utc>) -> Result<ReportConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ReportConfig::resolve(merged, now)
    }
}

/// Resolved `estimate` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EstimateConfig {
    pub(crate) location: Option<String>,
    pub(crate) at: DateTime<FixedOffset>,
    pub(crate) tables: Option<Utf8PathBuf>,
}

impl EstimateConfig {
    pub(crate) fn resolve(args: EstimateArgs, now: DateTime<Utc>) -> Result<Self, CliError> {
        Ok(Self {
            at: resolve_moment(args.at.as_deref(), ARG_AT, now)?,
            location: args.location,
            tables: args.tables,
        })
    }
}

/// Resolved `report` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ReportConfig {
    pub(crate) at: DateTime<FixedOffset>,
    pub(crate) tables: Option<Utf8PathBuf>,
}

impl ReportConfig {
    pub(crate) fn resolve(args: ReportArgs, now: DateTime<Utc>) -> Result<Self, CliError> {
        Ok(Self {
            at: resolve_moment(args.at.as_deref(), ARG_AT, now)?,
            tables: args.tables,
        })
    }
}

/// JSON payload printed by `estimate`.
#[derive(Debug, Serialize)]
struct EstimateOutput {
    at: DateTime<FixedOffset>,
    location: Option<String>,
    #[serde(flatten)]
    estimate: CrowdEstimate,
}

pub(crate) fn run_estimate_with(
    args: EstimateArgs,
    now: DateTime<Utc>,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config(now)?;
    let estimator = CrowdEstimator::new(load_tables(config.tables.as_deref())?);
    let estimate = estimator.estimate(config.location.as_deref(), &config.at);
    write_json(
        writer,
        &EstimateOutput {
            at: config.at,
            location: config.location,
            estimate,
        },
    )
}

pub(crate) fn run_report_with(
    args: ReportArgs,
    now: DateTime<Utc>,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config(now)?;
    let estimator = CrowdEstimator::new(load_tables(config.tables.as_deref())?);
    write_json(writer, &estimator.report(&config.at))
}

#[cfg(test)]
pub(crate) fn estimate_config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
    now: DateTime<Utc>,
) -> Result<EstimateConfig, CliError> {
    let merged = EstimateArgs::merge_from_layers(layers).map_err(CliError::from)?;
    EstimateConfig::resolve(merged, now)
}
