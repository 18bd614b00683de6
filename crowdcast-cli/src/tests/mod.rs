//! Shared test harness modules for the Crowdcast CLI.
#![expect(
    clippy::panic,
    reason = "Tests assert panic branches to surface unexpected CLI outcomes"
)]

use super::*;

mod countdown_unit;
mod estimate_unit;
mod helpers;
mod tables_unit;
