// Copyright (c) The route-conformance Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turns a parsed signal plus a scenario's expectations into a verdict.

use crate::{
    driver::TransportFailureKind,
    list::Scenario,
    parser::ParsedSignal,
};
use std::{fmt, time::Duration};

/// Absolute tolerance for comparing the reported total time against the
/// expected bounds. Equal bounds therefore require an exact match up to this
/// slack.
pub const TIME_TOLERANCE: f64 = 1e-6;

/// Why a scenario failed. Every kind is local to its scenario; the run
/// continues regardless.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FailureKind {
    /// The planner binary was not found or could not be spawned.
    ExecutableMissing,
    /// The planner did not exit within the timeout and was killed.
    Timeout,
    /// The output lacked the marker the verdict needed: no total time, or no
    /// rejection phrase where one was expected.
    ParseFailure,
    /// The planner rejected a query it was expected to answer.
    UnexpectedRejection,
    /// The reported total time fell outside the expected range.
    OutOfRange,
    /// The reported stop count did not match the number of requested
    /// locations.
    StopCountMismatch,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            FailureKind::ExecutableMissing => "executable not found",
            FailureKind::Timeout => "timed out",
            FailureKind::ParseFailure => "could not parse output",
            FailureKind::UnexpectedRejection => "unexpected rejection",
            FailureKind::OutOfRange => "total time out of expected range",
            FailureKind::StopCountMismatch => "stop count mismatch",
        };
        f.write_str(reason)
    }
}

/// The verdict for one scenario execution.
///
/// Created exactly once per execution and immutable afterwards; the runner
/// owns the result sequence for the remainder of the run.
#[derive(Clone, Debug)]
pub struct TestResult<'a> {
    scenario: &'a Scenario,
    passed: bool,
    actual_time: Option<f64>,
    actual_stops: Option<u64>,
    failure: Option<FailureKind>,
    duration: Duration,
}

impl<'a> TestResult<'a> {
    /// The scenario this verdict is for.
    pub fn scenario(&self) -> &'a Scenario {
        self.scenario
    }

    /// Whether the scenario passed.
    pub fn passed(&self) -> bool {
        self.passed
    }

    /// The total time the planner reported, when one was extracted.
    pub fn actual_time(&self) -> Option<f64> {
        self.actual_time
    }

    /// The stop count the planner reported, when one was extracted.
    pub fn actual_stops(&self) -> Option<u64> {
        self.actual_stops
    }

    /// The failure classification, `None` for a pass.
    pub fn failure(&self) -> Option<FailureKind> {
        self.failure
    }

    /// Wall-clock time the execution took.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Attaches the measured wall-clock duration. Called once by the runner
    /// when the result is created.
    pub(crate) fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    fn pass(scenario: &'a Scenario, actual_time: Option<f64>, actual_stops: Option<u64>) -> Self {
        Self {
            scenario,
            passed: true,
            actual_time,
            actual_stops,
            failure: None,
            duration: Duration::ZERO,
        }
    }

    fn fail(
        scenario: &'a Scenario,
        kind: FailureKind,
        actual_time: Option<f64>,
        actual_stops: Option<u64>,
    ) -> Self {
        Self {
            scenario,
            passed: false,
            actual_time,
            actual_stops,
            failure: Some(kind),
            duration: Duration::ZERO,
        }
    }
}

/// Maps a transport-level failure straight to a failing verdict. Neither the
/// parser nor the decision table is consulted.
pub fn transport_failure(scenario: &Scenario, kind: TransportFailureKind) -> TestResult<'_> {
    let kind = match kind {
        TransportFailureKind::ExecutableMissing => FailureKind::ExecutableMissing,
        TransportFailureKind::Timeout => FailureKind::Timeout,
    };
    TestResult::fail(scenario, kind, None, None)
}

/// Applies the decision table, in order:
///
/// 1. rejection seen, rejection expected: pass;
/// 2. rejection seen, not expected: [`FailureKind::UnexpectedRejection`];
/// 3. rejection expected but no explicit rejection signal seen:
///    [`FailureKind::ParseFailure`] -- the one marker that could make the
///    scenario pass is missing, whatever else the output contains;
/// 4. no total time extracted: [`FailureKind::ParseFailure`];
/// 5. total time extracted: pass iff it lies within the expected range
///    (inclusive, up to [`TIME_TOLERANCE`]) and, when the scenario checks
///    stop counts and one was extracted, the stop count equals the number of
///    requested locations. An absent stop count never fails a scenario on
///    its own.
pub fn validate<'a>(scenario: &'a Scenario, signal: ParsedSignal) -> TestResult<'a> {
    match signal {
        ParsedSignal::Rejected => {
            if scenario.expects_rejection() {
                TestResult::pass(scenario, None, None)
            } else {
                TestResult::fail(scenario, FailureKind::UnexpectedRejection, None, None)
            }
        }
        ParsedSignal::Parsed { total_time, stops } if scenario.expects_rejection() => {
            TestResult::fail(scenario, FailureKind::ParseFailure, total_time, stops)
        }
        ParsedSignal::Parsed {
            total_time: None,
            stops,
        } => TestResult::fail(scenario, FailureKind::ParseFailure, None, stops),
        ParsedSignal::Parsed {
            total_time: Some(total_time),
            stops,
        } => {
            let in_range = total_time >= scenario.expected_min_time() - TIME_TOLERANCE
                && total_time <= scenario.expected_max_time() + TIME_TOLERANCE;
            if !in_range {
                return TestResult::fail(scenario, FailureKind::OutOfRange, Some(total_time), stops);
            }
            if scenario.checks_stops()
                && let Some(stops) = stops
                && stops as usize != scenario.locations().len()
            {
                return TestResult::fail(
                    scenario,
                    FailureKind::StopCountMismatch,
                    Some(total_time),
                    Some(stops),
                );
            }
            TestResult::pass(scenario, Some(total_time), stops)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::QueryMode;
    use test_case::test_case;

    fn scenario(min: f64, max: f64) -> Scenario {
        Scenario::new("range", QueryMode::FixedOrder, ["A", "B"], min, max)
    }

    fn rejecting_scenario() -> Scenario {
        Scenario::new("reject", QueryMode::FixedOrder, ["A", "Z"], 0.0, 0.0).expect_rejection()
    }

    fn parsed(total_time: Option<f64>, stops: Option<u64>) -> ParsedSignal {
        ParsedSignal::Parsed { total_time, stops }
    }

    #[test]
    fn expected_rejection_passes() {
        let scenario = rejecting_scenario();
        let result = validate(&scenario, ParsedSignal::Rejected);
        assert!(result.passed());
        assert_eq!(result.failure(), None);
    }

    #[test]
    fn unexpected_rejection_fails() {
        let scenario = scenario(2.0, 2.0);
        let result = validate(&scenario, ParsedSignal::Rejected);
        assert!(!result.passed());
        assert_eq!(result.failure(), Some(FailureKind::UnexpectedRejection));
    }

    #[test]
    fn expected_rejection_with_numeric_output_fails() {
        // A rejection scenario only passes on an explicit rejection signal,
        // whatever number the planner printed.
        let scenario = rejecting_scenario();
        let result = validate(&scenario, parsed(Some(0.0), None));
        assert!(!result.passed());
        assert_eq!(result.failure(), Some(FailureKind::ParseFailure));
    }

    #[test]
    fn expected_rejection_with_unparseable_output_fails() {
        let scenario = rejecting_scenario();
        let result = validate(&scenario, parsed(None, None));
        assert!(!result.passed());
        assert_eq!(result.failure(), Some(FailureKind::ParseFailure));
    }

    #[test]
    fn missing_total_time_is_parse_failure() {
        let scenario = scenario(2.0, 2.0);
        let result = validate(&scenario, parsed(None, Some(2)));
        assert!(!result.passed());
        assert_eq!(result.failure(), Some(FailureKind::ParseFailure));
        assert_eq!(result.actual_stops(), Some(2));
    }

    #[test_case(2.0, 2.0, 2.0, true; "exact match on equal bounds")]
    #[test_case(2.0, 2.0, 2.01, false; "a 0.01 deviation beyond tolerance fails")]
    #[test_case(2.0, 2.0, 2.0 + 5e-7, true; "deviation within tolerance passes")]
    #[test_case(12.0, 18.0, 12.0, true; "inclusive lower bound")]
    #[test_case(12.0, 18.0, 18.0, true; "inclusive upper bound")]
    #[test_case(12.0, 18.0, 18.5, false; "above range")]
    #[test_case(12.0, 18.0, 11.5, false; "below range")]
    fn range_check(min: f64, max: f64, reported: f64, expect_pass: bool) {
        let scenario = scenario(min, max);
        let result = validate(&scenario, parsed(Some(reported), None));
        assert_eq!(result.passed(), expect_pass);
        if expect_pass {
            assert_eq!(result.failure(), None);
        } else {
            assert_eq!(result.failure(), Some(FailureKind::OutOfRange));
        }
        assert_eq!(result.actual_time(), Some(reported));
    }

    #[test]
    fn stop_count_mismatch_fails_when_checked() {
        let scenario =
            Scenario::new("stops", QueryMode::FixedOrder, ["A", "B"], 2.0, 2.0).check_stops();
        let result = validate(&scenario, parsed(Some(2.0), Some(3)));
        assert!(!result.passed());
        assert_eq!(result.failure(), Some(FailureKind::StopCountMismatch));
    }

    #[test]
    fn absent_stop_count_is_not_checked() {
        let scenario =
            Scenario::new("stops", QueryMode::FixedOrder, ["A", "B"], 2.0, 2.0).check_stops();
        let result = validate(&scenario, parsed(Some(2.0), None));
        assert!(result.passed());
    }

    #[test]
    fn stop_count_ignored_when_not_checked() {
        let scenario = scenario(2.0, 2.0);
        let result = validate(&scenario, parsed(Some(2.0), Some(99)));
        assert!(result.passed());
        assert_eq!(result.actual_stops(), Some(99));
    }

    #[test_case(TransportFailureKind::ExecutableMissing, FailureKind::ExecutableMissing)]
    #[test_case(TransportFailureKind::Timeout, FailureKind::Timeout)]
    fn transport_failures_short_circuit(kind: TransportFailureKind, expected: FailureKind) {
        let scenario = scenario(2.0, 2.0);
        let result = transport_failure(&scenario, kind);
        assert!(!result.passed());
        assert_eq!(result.failure(), Some(expected));
        assert_eq!(result.actual_time(), None);
        assert_eq!(result.actual_stops(), None);
    }
}
