// Copyright (c) The route-conformance Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Runs scenarios through the full pipeline, strictly in order.
//!
//! Each scenario goes transcript -> process -> parse -> verdict before the
//! next one starts. The runner communicates with the outside world only
//! through [`RunEvent`]s and the returned result sequence; counting and
//! formatting belong to the reporter.

use crate::{
    driver::{self, ExecutionOutcome},
    list::Scenario,
    parser, transcript, validator,
    validator::TestResult,
};
use camino::Utf8PathBuf;
use std::time::{Duration, Instant};
use tracing::debug;

/// The default wall-clock timeout for one planner invocation.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// An event emitted while a run is in progress.
///
/// Events are produced by the [`ScenarioRunner`] and consumed by a reporter
/// callback; the runner itself never prints anything.
#[derive(Clone, Debug)]
pub enum RunEvent<'a> {
    /// The run started.
    RunStarted {
        /// How many scenarios will be executed.
        total: usize,
    },
    /// A scenario is about to be executed.
    ScenarioStarted {
        /// 1-based position within this run.
        current: usize,
        /// How many scenarios this run executes.
        total: usize,
        /// The scenario being executed.
        scenario: &'a Scenario,
    },
    /// A scenario finished with a verdict.
    ScenarioFinished {
        /// 1-based position within this run.
        current: usize,
        /// How many scenarios this run executes.
        total: usize,
        /// The verdict.
        result: TestResult<'a>,
    },
}

/// Builder for [`ScenarioRunner`].
#[derive(Clone, Debug, Default)]
pub struct ScenarioRunnerBuilder {
    timeout: Option<Duration>,
}

impl ScenarioRunnerBuilder {
    /// Creates a builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the per-invocation timeout (default: [`DEFAULT_TIMEOUT`]).
    pub fn set_timeout(&mut self, timeout: Duration) -> &mut Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds a runner that will drive `program`.
    pub fn build(&self, program: Utf8PathBuf) -> ScenarioRunner {
        ScenarioRunner {
            program,
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
        }
    }
}

/// Executes scenarios against one planner binary.
#[derive(Clone, Debug)]
pub struct ScenarioRunner {
    program: Utf8PathBuf,
    timeout: Duration,
}

impl ScenarioRunner {
    /// The path of the planner binary under test.
    pub fn program(&self) -> &Utf8PathBuf {
        &self.program
    }

    /// The per-invocation timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Runs the given scenarios in order, emitting a [`RunEvent`] stream to
    /// `on_event` and returning the verdicts in the same order.
    ///
    /// A transport failure or timeout on one scenario is terminal for that
    /// scenario only; the run always continues to the next one.
    pub async fn run<'a, F>(
        &self,
        scenarios: impl IntoIterator<Item = &'a Scenario>,
        mut on_event: F,
    ) -> Vec<TestResult<'a>>
    where
        F: FnMut(RunEvent<'a>),
    {
        let scenarios: Vec<&Scenario> = scenarios.into_iter().collect();
        let total = scenarios.len();
        on_event(RunEvent::RunStarted { total });

        let mut results = Vec::with_capacity(total);
        for (idx, scenario) in scenarios.into_iter().enumerate() {
            let current = idx + 1;
            on_event(RunEvent::ScenarioStarted {
                current,
                total,
                scenario,
            });

            let result = self.run_one(scenario).await;
            on_event(RunEvent::ScenarioFinished {
                current,
                total,
                result: result.clone(),
            });
            results.push(result);
        }
        results
    }

    /// One scenario's full pipeline: build the transcript, drive the
    /// process, parse, validate. Transport failures bypass the parser and
    /// the decision table entirely.
    async fn run_one<'a>(&self, scenario: &'a Scenario) -> TestResult<'a> {
        debug!(name = scenario.name(), mode = %scenario.mode(), "running scenario");
        let transcript = transcript::build_transcript(scenario);
        let start = Instant::now();
        let outcome = driver::drive(&self.program, &transcript, self.timeout).await;
        let result = match outcome {
            ExecutionOutcome::TransportFailure(kind) => {
                debug!(name = scenario.name(), ?kind, "transport failure");
                validator::transport_failure(scenario, kind)
            }
            ExecutionOutcome::RawText(text) => {
                validator::validate(scenario, parser::parse(&text))
            }
        };
        result.with_duration(start.elapsed())
    }
}
