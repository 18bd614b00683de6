//! Loading and exporting weight-table documents.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use crowdcast_core::CrowdConfig;
use crowdcast_fs::{file_is_file, read_utf8_to_string, write_utf8_file};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{ARG_OUTPUT, ARG_TABLES, CliError, write_line};

/// CLI arguments for the `tables` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "tables",
    long_about = "Print the weight tables the estimator uses as a JSON \
                 document. The document can be edited and passed back to \
                 the other subcommands with --tables.",
    about = "Export the effective weight tables"
)]
#[ortho_config(prefix = "CROWDCAST")]
pub(crate) struct TablesArgs {
    /// Path to a JSON weight-table document to re-export.
    #[arg(long = ARG_TABLES, value_name = "path")]
    #[serde(default)]
    pub(crate) tables: Option<Utf8PathBuf>,
    /// Write the document here instead of standard output.
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

impl TablesArgs {
    fn into_merged(self) -> Result<Self, CliError> {
        self.load_and_merge().map_err(CliError::Configuration)
    }
}

pub(crate) fn run_tables_with(args: TablesArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let merged = args.into_merged()?;
    let config = load_tables(merged.tables.as_deref())?;
    let mut payload = serde_json::to_string_pretty(&config).map_err(CliError::SerialiseOutput)?;
    match merged.output {
        Some(destination) => {
            payload.push('\n');
            write_utf8_file(&destination, payload.as_bytes()).map_err(|source| {
                CliError::WriteTables {
                    path: destination.clone(),
                    source,
                }
            })?;
            log::debug!("wrote weight tables to {destination}");
            write_line(writer, &format!("wrote weight tables to {destination}"))
        }
        None => write_line(writer, &payload),
    }
}

/// Load the weight tables named by `--tables`, or the authored ones.
pub(crate) fn load_tables(path: Option<&Utf8Path>) -> Result<CrowdConfig, CliError> {
    match path {
        Some(document) => load_tables_document(document),
        None => Ok(CrowdConfig::default()),
    }
}

fn load_tables_document(path: &Utf8Path) -> Result<CrowdConfig, CliError> {
    require_existing(path, ARG_TABLES)?;
    let document = read_utf8_to_string(path).map_err(|source| CliError::ReadTables {
        path: path.to_path_buf(),
        source,
    })?;
    let config = CrowdConfig::from_json_str(&document).map_err(|source| CliError::LoadTables {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("loaded weight tables from {path}");
    Ok(config)
}

fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
pub(crate) fn tables_args_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<TablesArgs, CliError> {
    TablesArgs::merge_from_layers(layers).map_err(CliError::from)
}
