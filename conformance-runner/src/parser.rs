// Copyright (c) The route-conformance Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scans the planner's captured output for the known textual markers.
//!
//! The grammar is deliberately narrow: one rejection phrase and two
//! line-shaped value markers. Everything else in the output is ignored, and
//! parsing never fails -- a marker that isn't found simply yields no value.

use regex::Regex;
use std::sync::LazyLock;

/// The phrase (matched case-insensitively) by which the planner refuses a
/// query whose locations are not connected to the rest of the map.
///
/// If the planner ever rewords this, runs degrade to parse failures rather
/// than a distinguishable protocol error; keeping the phrase in one place
/// makes that a one-line fix.
const REJECTION_PHRASE: &str = "not reachable";

static TOTAL_TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Total Time:\s*([0-9.]+)").expect("total-time marker regex is valid")
});

static STOPS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Stops:\s*(\d+)").expect("stops marker regex is valid"));

/// What a scan of the raw output found.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParsedSignal {
    /// The output contains the rejection phrase. Takes priority over any
    /// other content.
    Rejected,
    /// The extracted values, each independently optional.
    Parsed {
        /// The reported total trip time, if the marker was found and its
        /// number parsed cleanly.
        total_time: Option<f64>,
        /// The reported stop count, if present.
        stops: Option<u64>,
    },
}

/// Scans `raw` for the rejection phrase and the value markers.
///
/// A marker followed by malformed numeric text (e.g. `Total Time: 1.2.3`)
/// counts as not matched; no partial or garbage value ever surfaces. Pure
/// function of its input.
pub fn parse(raw: &str) -> ParsedSignal {
    if raw.to_lowercase().contains(REJECTION_PHRASE) {
        return ParsedSignal::Rejected;
    }

    let total_time = TOTAL_TIME_RE
        .captures(raw)
        .and_then(|caps| caps[1].parse::<f64>().ok());
    let stops = STOPS_RE
        .captures(raw)
        .and_then(|caps| caps[1].parse::<u64>().ok());

    ParsedSignal::Parsed { total_time, stops }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("Total Time: 5.0 minutes\nStops: 3 stops\n", Some(5.0), Some(3); "both markers with units")]
    #[test_case("Total Time: 17\n", Some(17.0), None; "integer time, no stops")]
    #[test_case("Stops: 4\n", None, Some(4); "stops only")]
    #[test_case("no markers here\n", None, None; "nothing extractable")]
    #[test_case("Total Time: 1.2.3\n", None, None; "malformed number is not matched")]
    #[test_case("prompt text\nTotal Time:    0.0\ntrailing\n", Some(0.0), None; "surrounding text tolerated")]
    fn extraction(raw: &str, total_time: Option<f64>, stops: Option<u64>) {
        assert_eq!(parse(raw), ParsedSignal::Parsed { total_time, stops });
    }

    #[test_case("Error: destination Not Reachable from source"; "mixed case")]
    #[test_case("NOT REACHABLE"; "upper case")]
    #[test_case("Total Time: 9.0\nlocation is not reachable\n"; "rejection wins over markers")]
    fn rejection_priority(raw: &str) {
        assert_eq!(parse(raw), ParsedSignal::Rejected);
    }

    #[test]
    fn parse_is_idempotent() {
        let raw = "Total Time: 12.5 minutes\nStops: 4\n";
        assert_eq!(parse(raw), parse(raw));
    }
}
