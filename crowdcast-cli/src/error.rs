//! Error types emitted by the Crowdcast CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use crowdcast_core::{ConfigError, TripError};
use thiserror::Error;

/// Errors emitted by the Crowdcast CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A timestamp option was not valid RFC 3339.
    #[error("--{field} value {value:?} is not an RFC 3339 timestamp: {source}")]
    InvalidTimestamp {
        /// Option that carried the value.
        field: &'static str,
        /// Raw value as given.
        value: String,
        /// Parser failure.
        #[source]
        source: chrono::ParseError,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Option that named the path.
        field: &'static str,
        /// Path as given.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Option that named the path.
        field: &'static str,
        /// Path as given.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Option that named the path.
        field: &'static str,
        /// Path as given.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// Reading the weight-table document failed.
    #[error("failed to read weight tables at {path:?}: {source}")]
    ReadTables {
        /// Document path.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// The weight-table document could not be parsed or failed validation.
    #[error("failed to load weight tables from {path:?}: {source}")]
    LoadTables {
        /// Document path.
        path: Utf8PathBuf,
        /// Parse or validation failure.
        #[source]
        source: ConfigError,
    },
    /// The authored trip plan could not be built.
    #[error("failed to build the trip plan: {0}")]
    Trip(#[from] TripError),
    /// Serialising command output failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
    /// Writing the exported weight tables to disk failed.
    #[error("failed to write weight tables to {path:?}: {source}")]
    WriteTables {
        /// Destination path.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
}
