// Copyright (c) The route-conformance Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Builds the scripted input a scenario feeds to the planner's prompt.

use crate::list::Scenario;
use std::fmt::Write;

/// The menu token that tells the planner to exit after the query.
const EXIT_TOKEN: &str = "3";

/// Produces the exact line sequence the planner's interactive prompt expects:
/// the mode token, the location count, each location name on its own line,
/// then the exit token. Every line is newline-terminated.
///
/// Location names are not validated here; a name the planner doesn't know
/// shows up later as a rejection in its output.
pub fn build_transcript(scenario: &Scenario) -> String {
    let mut out = String::new();
    // Infallible writes to a String.
    let _ = writeln!(out, "{}", scenario.mode().menu_token());
    let _ = writeln!(out, "{}", scenario.locations().len());
    for location in scenario.locations() {
        let _ = writeln!(out, "{location}");
    }
    let _ = writeln!(out, "{EXIT_TOKEN}");
    out
}
