//! Focused unit tests covering the countdown command.

use super::helpers::{captured, fixed_now};
use super::*;
use crate::countdown::{CountdownArgs, CountdownConfig};
use rstest::rstest;

fn run_at(now: Option<&str>) -> String {
    let mut buffer = Vec::new();
    run_countdown_with(
        CountdownArgs {
            now: now.map(str::to_owned),
        },
        fixed_now(),
        &mut buffer,
    )
    .expect("countdown succeeds");
    captured(buffer)
}

#[rstest]
fn countdown_defaults_to_the_clock() {
    let config = CountdownConfig::resolve(&CountdownArgs::default(), fixed_now())
        .expect("config resolves");
    assert_eq!(config.now, fixed_now().fixed_offset());
    // 2026-01-01T00:00Z is 08:00 in Taipei, 46 days and 16 hours out.
    assert_eq!(run_at(None), "46d 16h 0m 0s\n");
}

#[rstest]
#[case("2026-02-15T21:56:56+08:00", "1d 2h 3m 4s\n")]
#[case("2026-02-16T15:59:59Z", "0d 0h 0m 1s\n")]
#[case("2026-02-16T23:00:00+08:00", "0d 1h 0m 0s\n")]
fn pending_countdowns_print_whole_units(#[case] now: &str, #[case] expected: &str) {
    assert_eq!(run_at(Some(now)), expected);
}

#[rstest]
fn departure_day_prints_the_greeting_and_the_plan() {
    assert_eq!(
        run_at(Some("2026-02-17T00:00:00+08:00")),
        "新年快樂！\nDay 1 初一 關渡祈福 & 三層崎花海\n"
    );
}

#[rstest]
fn trip_days_follow_the_taipei_calendar() {
    // 17:00 UTC on the 19th is already the 20th in Taipei.
    assert_eq!(
        run_at(Some("2026-02-19T17:00:00Z")),
        "新年快樂！\nDay 4 初四 名湯巡禮 & 暖心返程\n"
    );
}

#[rstest]
fn after_the_trip_only_the_greeting_remains() {
    assert_eq!(run_at(Some("2026-03-01T09:00:00+08:00")), "新年快樂！\n");
}

#[rstest]
fn malformed_now_is_rejected() {
    let err = CountdownConfig::resolve(
        &CountdownArgs {
            now: Some("soon".to_owned()),
        },
        fixed_now(),
    )
    .expect_err("malformed timestamp");
    assert!(matches!(
        err,
        CliError::InvalidTimestamp { field: ARG_NOW, .. }
    ));
}
