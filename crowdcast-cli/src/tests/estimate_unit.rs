//! Focused unit tests covering the estimate and report commands.

use super::helpers::{captured, fixed_now};
use super::*;
use crate::countdown::CountdownArgs;
use crate::estimate::{
    EstimateArgs, EstimateConfig, ReportArgs, ReportConfig, estimate_config_from_layers_for_test,
};
use crate::tables::TablesArgs;
use camino::Utf8PathBuf;
use clap::CommandFactory;
use rstest::rstest;
use serde_json::Value;

fn estimate_args(location: Option<&str>, at: Option<&str>) -> EstimateArgs {
    EstimateArgs {
        location: location.map(str::to_owned),
        at: at.map(str::to_owned),
        tables: None,
    }
}

#[rstest]
fn omitted_timestamps_fall_back_to_the_clock() {
    let config =
        EstimateConfig::resolve(estimate_args(None, None), fixed_now()).expect("config resolves");
    assert_eq!(config.at, fixed_now().fixed_offset());
    assert_eq!(config.location, None);
    assert_eq!(config.tables, None);
}

#[rstest]
fn explicit_timestamps_keep_their_offset() {
    let config = EstimateConfig::resolve(
        estimate_args(Some("guandu-temple"), Some("2026-02-17T12:00:00+08:00")),
        fixed_now(),
    )
    .expect("config resolves");
    assert_eq!(config.at.offset().local_minus_utc(), 8 * 3_600);
    assert_eq!(config.location.as_deref(), Some("guandu-temple"));
}

#[rstest]
#[case("yesterday")]
#[case("2026-02-17 12:00")]
#[case("")]
fn malformed_timestamps_are_rejected(#[case] raw: &str) {
    let err = ReportConfig::resolve(
        ReportArgs {
            at: Some(raw.to_owned()),
            tables: None,
        },
        fixed_now(),
    )
    .expect_err("malformed timestamp");
    match err {
        CliError::InvalidTimestamp { field, value, .. } => {
            assert_eq!(field, ARG_AT);
            assert_eq!(value, raw);
        }
        other => panic!("expected InvalidTimestamp, found {other:?}"),
    }
}

#[rstest]
fn estimate_prints_the_capped_peak() {
    let mut buffer = Vec::new();
    run_estimate_with(
        estimate_args(Some("guandu-temple"), Some("2026-02-17T12:00:00+08:00")),
        fixed_now(),
        &mut buffer,
    )
    .expect("estimate succeeds");

    let output: Value = serde_json::from_str(&captured(buffer)).expect("JSON output");
    assert_eq!(output["tier"], "very-high");
    assert_eq!(output["label"], "極高");
    assert_eq!(output["percentage"], 100);
    assert_eq!(output["location"], "guandu-temple");
    assert_eq!(output["factors"]["holiday"], "初一");
    assert_eq!(output["factors"]["time_slot"], "午間高峰");
}

#[rstest]
fn estimate_reads_utc_timestamps_in_taipei_time() {
    let mut buffer = Vec::new();
    // 19:00 UTC on the 16th is 03:00 on the 17th in Taipei.
    run_estimate_with(
        estimate_args(None, Some("2026-02-16T19:00:00Z")),
        fixed_now(),
        &mut buffer,
    )
    .expect("estimate succeeds");

    let output: Value = serde_json::from_str(&captured(buffer)).expect("JSON output");
    assert_eq!(output["factors"]["holiday"], "初一");
    assert_eq!(output["factors"]["time_slot"], "深夜");
    assert_eq!(output["location"], Value::Null);
}

#[rstest]
fn report_lists_every_authored_location() {
    let mut buffer = Vec::new();
    run_report_with(
        ReportArgs {
            at: Some("2026-02-18T17:30:00+08:00".to_owned()),
            tables: None,
        },
        fixed_now(),
        &mut buffer,
    )
    .expect("report succeeds");

    let output: Value = serde_json::from_str(&captured(buffer)).expect("JSON output");
    assert_eq!(output["local_time"], "2026-02-18T17:30:00");
    let locations = output["locations"].as_array().expect("locations array");
    assert_eq!(locations.len(), 8);
    let first = locations.first().expect("first location");
    assert_eq!(first["location"], "beitou-hot-springs");
    // 0.9 for 初二 times 0.8 for the afternoon slot.
    assert_eq!(output["dashboard"]["tier"], "high");
    assert_eq!(output["dashboard"]["percentage"], 72);
}

#[rstest]
fn estimate_layers_map_configuration_errors() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "location": 42 }));

    let err = estimate_config_from_layers_for_test(composer.layers(), fixed_now())
        .expect_err("invalid config layer should map to CliError::Configuration");
    match err {
        CliError::Configuration(_) => {}
        other => panic!("expected CliError::Configuration, found {other:?}"),
    }
}

#[rstest]
fn estimate_layers_honour_precedence() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "location": "tamsui-old-street",
            "at": "2026-02-18T09:00:00+08:00",
            "tables": "from-file.json",
        }),
        None,
    );
    composer.push_environment(json!({ "location": "guandu-temple" }));
    composer.push_cli(json!({ "at": "2026-02-17T12:00:00+08:00" }));

    let config = estimate_config_from_layers_for_test(composer.layers(), fixed_now())
        .expect("merged config should build");
    let expected_at =
        DateTime::parse_from_rfc3339("2026-02-17T12:00:00+08:00").expect("valid timestamp");
    assert_eq!(config.location.as_deref(), Some("guandu-temple"));
    assert_eq!(config.at, expected_at);
    assert_eq!(config.tables, Some(Utf8PathBuf::from("from-file.json")));
}

#[rstest]
fn invalid_timestamps_from_layers_are_still_rejected() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_environment(json!({ "at": "tomorrow" }));

    let err = estimate_config_from_layers_for_test(composer.layers(), fixed_now())
        .expect_err("malformed timestamp");
    assert!(matches!(
        err,
        CliError::InvalidTimestamp { field: ARG_AT, .. }
    ));
}

#[rstest]
#[case::estimate(EstimateArgs::command().get_name().to_owned(), "estimate")]
#[case::report(ReportArgs::command().get_name().to_owned(), "report")]
#[case::countdown(CountdownArgs::command().get_name().to_owned(), "countdown")]
#[case::tables(TablesArgs::command().get_name().to_owned(), "tables")]
fn each_subcommand_reads_its_own_configuration_section(
    #[case] name: String,
    #[case] expected: &str,
) {
    // ortho_config keys `[cmds.<name>]` and `CROWDCAST_CMDS_<NAME>_*` on this.
    assert_eq!(name, expected);
}
