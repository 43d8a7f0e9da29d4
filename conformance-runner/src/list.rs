// Copyright (c) The route-conformance Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The scenario model: what to ask the planner, and what to expect back.

use crate::errors::InvalidScenarioIndex;
use std::{fmt, slice};

/// How the planner is asked to treat the order of the requested locations.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum QueryMode {
    /// The planner chooses the visiting order that minimizes total cost.
    FlexibleOrder,
    /// The given order must be respected as-is.
    FixedOrder,
}

impl QueryMode {
    /// The menu token the planner's interactive prompt expects for this mode.
    pub fn menu_token(self) -> &'static str {
        match self {
            QueryMode::FlexibleOrder => "1",
            QueryMode::FixedOrder => "2",
        }
    }
}

impl fmt::Display for QueryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryMode::FlexibleOrder => write!(f, "flexible-order"),
            QueryMode::FixedOrder => write!(f, "fixed-order"),
        }
    }
}

/// One configured conformance test: the query to issue and the outcome to
/// expect.
///
/// Immutable once constructed. Location names are passed through verbatim --
/// unknown or disconnected names are the planner's concern and surface as a
/// rejection in its output, not as an error here.
#[derive(Clone, Debug)]
pub struct Scenario {
    name: String,
    mode: QueryMode,
    locations: Vec<String>,
    expected_min_time: f64,
    expected_max_time: f64,
    expect_rejection: bool,
    check_stops: bool,
    description: String,
}

impl Scenario {
    /// Creates a new scenario.
    ///
    /// # Panics
    ///
    /// Panics if `locations` is empty or `expected_min_time >
    /// expected_max_time`. Both are configuration errors: the scenario list
    /// is fixed, process-wide data, and a malformed entry should fail loudly
    /// at startup rather than produce a bogus verdict.
    pub fn new(
        name: impl Into<String>,
        mode: QueryMode,
        locations: impl IntoIterator<Item = impl Into<String>>,
        expected_min_time: f64,
        expected_max_time: f64,
    ) -> Self {
        let name = name.into();
        let locations: Vec<String> = locations.into_iter().map(Into::into).collect();
        assert!(
            !locations.is_empty(),
            "scenario `{name}` must request at least one location",
        );
        assert!(
            expected_min_time <= expected_max_time,
            "scenario `{name}` has an inverted expected range: {expected_min_time} > {expected_max_time}",
        );
        Self {
            name,
            mode,
            locations,
            expected_min_time,
            expected_max_time,
            expect_rejection: false,
            check_stops: false,
            description: String::new(),
        }
    }

    /// Marks this scenario as one the planner is expected to refuse, e.g.
    /// because a location lies in a disconnected part of the map.
    pub fn expect_rejection(mut self) -> Self {
        self.expect_rejection = true;
        self
    }

    /// Additionally requires the reported stop count (when present in the
    /// output) to equal the number of requested locations.
    pub fn check_stops(mut self) -> Self {
        self.check_stops = true;
        self
    }

    /// Attaches a one-line human description, shown by the reporter.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// The scenario's identifier.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The query mode.
    pub fn mode(&self) -> QueryMode {
        self.mode
    }

    /// The requested locations, in order. Repeats are legal (a hub visited
    /// twice).
    pub fn locations(&self) -> &[String] {
        &self.locations
    }

    /// Lower bound (inclusive) of the acceptable total time.
    pub fn expected_min_time(&self) -> f64 {
        self.expected_min_time
    }

    /// Upper bound (inclusive) of the acceptable total time.
    pub fn expected_max_time(&self) -> f64 {
        self.expected_max_time
    }

    /// True if the planner is expected to refuse this input.
    pub fn expects_rejection(&self) -> bool {
        self.expect_rejection
    }

    /// True if the reported stop count should be checked against
    /// `locations().len()`.
    pub fn checks_stops(&self) -> bool {
        self.check_stops
    }

    /// The human description (may be empty).
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// An ordered, immutable list of scenarios.
///
/// Constructed once at startup and passed by reference into the runner; there
/// is no way to mutate it afterwards.
#[derive(Clone, Debug)]
pub struct ScenarioList {
    scenarios: Vec<Scenario>,
}

impl ScenarioList {
    /// Creates a scenario list from the given scenarios, preserving order.
    pub fn new(scenarios: Vec<Scenario>) -> Self {
        Self { scenarios }
    }

    /// The number of scenarios.
    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    /// True if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    /// Iterates over scenarios in their defined order.
    pub fn iter(&self) -> slice::Iter<'_, Scenario> {
        self.scenarios.iter()
    }

    /// Looks up a scenario by its 1-based position, matching the positions
    /// shown by `--list`.
    pub fn select(&self, index: usize) -> Result<&Scenario, InvalidScenarioIndex> {
        index
            .checked_sub(1)
            .and_then(|i| self.scenarios.get(i))
            .ok_or(InvalidScenarioIndex {
                index,
                count: self.scenarios.len(),
            })
    }
}

impl<'a> IntoIterator for &'a ScenarioList {
    type Item = &'a Scenario;
    type IntoIter = slice::Iter<'a, Scenario>;

    fn into_iter(self) -> Self::IntoIter {
        self.scenarios.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_list() -> ScenarioList {
        ScenarioList::new(vec![
            Scenario::new("first", QueryMode::FixedOrder, ["A", "B"], 2.0, 2.0),
            Scenario::new("second", QueryMode::FlexibleOrder, ["A"], 0.0, 0.0),
        ])
    }

    #[test]
    fn select_is_one_based() {
        let list = sample_list();
        assert_eq!(list.select(1).unwrap().name(), "first");
        assert_eq!(list.select(2).unwrap().name(), "second");
    }

    #[test]
    fn select_out_of_range() {
        let list = sample_list();
        for index in [0, 3, 100] {
            let err = list.select(index).unwrap_err();
            assert_eq!(err.index, index);
            assert_eq!(err.count, 2);
        }
    }

    #[test]
    fn menu_tokens() {
        assert_eq!(QueryMode::FlexibleOrder.menu_token(), "1");
        assert_eq!(QueryMode::FixedOrder.menu_token(), "2");
    }

    #[test]
    #[should_panic(expected = "inverted expected range")]
    fn inverted_range_panics() {
        Scenario::new("bad", QueryMode::FixedOrder, ["A"], 5.0, 2.0);
    }

    #[test]
    #[should_panic(expected = "at least one location")]
    fn empty_locations_panic() {
        Scenario::new("bad", QueryMode::FixedOrder, Vec::<String>::new(), 0.0, 1.0);
    }
}
