//! Focused unit tests covering weight-table loading and export.

use super::helpers::{Workspace, captured};
use super::*;
use crate::tables::{TablesArgs, load_tables, tables_args_from_layers_for_test};
use camino::Utf8PathBuf;
use crowdcast_core::{ConfigError, CrowdConfig, TableError};
use rstest::{fixture, rstest};

#[fixture]
fn workspace() -> Workspace {
    Workspace::new()
}

#[rstest]
fn omitted_tables_use_the_authored_defaults() {
    let config = load_tables(None).expect("authored tables");
    assert_eq!(config, CrowdConfig::default());
}

#[rstest]
fn tables_documents_load_from_disk(workspace: Workspace) {
    let json = r#"{
        "holidays": { "default_weight": 0.5 },
        "time_slots": { "slots": [{ "start": 0, "end": 24, "weight": 1.0, "label": "all day" }] }
    }"#;
    let path = workspace.write("flat.json", json);
    let config = load_tables(Some(path.as_path())).expect("document loads");
    assert_eq!(config.holidays.default_weight(), 0.5);
    assert!(config.time_slots.covers_full_day());
}

#[rstest]
fn missing_tables_documents_are_reported(workspace: Workspace) {
    let path = workspace.root().join("absent.json");
    let err = load_tables(Some(path.as_path())).expect_err("missing document");
    match err {
        CliError::MissingSourceFile { field, path: reported } => {
            assert_eq!(field, ARG_TABLES);
            assert_eq!(reported, path);
        }
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

#[rstest]
fn directories_are_not_tables_documents(workspace: Workspace) {
    let err = load_tables(Some(workspace.root())).expect_err("directory");
    assert!(matches!(
        err,
        CliError::SourcePathNotFile {
            field: ARG_TABLES,
            ..
        }
    ));
}

#[rstest]
fn invalid_tables_surface_the_table_error(workspace: Workspace) {
    let json = r#"{
        "holidays": { "default_weight": 0.3 },
        "time_slots": { "slots": [] },
        "locations": { "guandu-temple": 0.0 }
    }"#;
    let path = workspace.write("invalid.json", json);
    let err = load_tables(Some(path.as_path())).expect_err("invalid document");
    match err {
        CliError::LoadTables {
            source: ConfigError::Table(TableError::NonPositivePopularity { location, .. }),
            ..
        } => assert_eq!(location, "guandu-temple"),
        other => panic!("expected LoadTables, found {other:?}"),
    }
}

#[rstest]
fn malformed_tables_surface_the_parse_error(workspace: Workspace) {
    let path = workspace.write("broken.json", "{ not json");
    let err = load_tables(Some(path.as_path())).expect_err("malformed document");
    assert!(matches!(
        err,
        CliError::LoadTables {
            source: ConfigError::Parse(_),
            ..
        }
    ));
}

#[rstest]
fn tables_export_to_stdout_round_trips() {
    let mut buffer = Vec::new();
    run_tables_with(TablesArgs::default(), &mut buffer).expect("export succeeds");
    let config = CrowdConfig::from_json_str(&captured(buffer)).expect("exported JSON loads");
    assert_eq!(config, CrowdConfig::default());
}

#[rstest]
fn tables_export_creates_missing_directories(workspace: Workspace) {
    let destination = workspace.root().join("exports/2026/tables.json");
    let mut buffer = Vec::new();
    run_tables_with(
        TablesArgs {
            tables: None,
            output: Some(destination.clone()),
        },
        &mut buffer,
    )
    .expect("export succeeds");

    assert_eq!(
        captured(buffer),
        format!("wrote weight tables to {destination}\n")
    );
    let reloaded = load_tables(Some(destination.as_path())).expect("exported file loads");
    assert_eq!(reloaded, CrowdConfig::default());
}

#[rstest]
fn tables_layers_honour_precedence() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "tables": "file-tables.json",
            "output": "from-file.json",
        }),
        None,
    );
    composer.push_environment(json!({ "output": "from-env.json" }));
    composer.push_cli(json!({ "tables": "cli-tables.json" }));

    let args = tables_args_from_layers_for_test(composer.layers()).expect("merged args");
    assert_eq!(args.tables, Some(Utf8PathBuf::from("cli-tables.json")));
    assert_eq!(args.output, Some(Utf8PathBuf::from("from-env.json")));
}

#[rstest]
fn tables_layers_map_configuration_errors() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_file(json!({ "output": ["not", "a", "path"] }), None);

    let err = tables_args_from_layers_for_test(composer.layers())
        .expect_err("invalid config layer should map to CliError::Configuration");
    match err {
        CliError::Configuration(_) => {}
        other => panic!("expected CliError::Configuration, found {other:?}"),
    }
}
