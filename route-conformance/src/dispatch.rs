// Copyright (c) The route-conformance Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    errors::ExpectedError,
    output::{OutputContext, OutputOpts},
};
use camino::Utf8PathBuf;
use clap::Parser;
use conformance_runner::{
    fixtures::SCENARIOS,
    list::Scenario,
    reporter::{self, ReporterBuilder},
    runner::ScenarioRunnerBuilder,
    validator::TestResult,
};
use std::{
    io::{BufWriter, Write},
    time::Duration,
};
use tracing::info;

/// Conformance harness for the campus route planner.
///
/// With no arguments, runs every built-in scenario against the planner
/// binary. Give a 1-based scenario number to run just that one, or `--list`
/// to enumerate the scenarios without executing anything.
#[derive(Debug, Parser)]
#[command(version, styles = crate::output::clap_styles::style())]
pub struct App {
    #[command(flatten)]
    output: OutputOpts,

    /// Path to the planner binary under test
    #[arg(long, value_name = "PATH", default_value = "./optimizer")]
    program: Utf8PathBuf,

    /// Wall-clock timeout per scenario, in seconds
    #[arg(long, value_name = "SECS", default_value_t = 20)]
    timeout: u64,

    /// List scenario names without executing
    #[arg(long, conflicts_with = "index")]
    list: bool,

    /// 1-based position of a single scenario to run
    #[arg(value_name = "INDEX")]
    index: Option<usize>,
}

impl App {
    /// Executes the app, returning the process exit code.
    pub fn exec(self) -> Result<i32, ExpectedError> {
        let ctx = self.output.init();

        if self.list {
            let mut out = BufWriter::new(std::io::stdout());
            reporter::list_scenarios(&mut out, &*SCENARIOS)
                .and_then(|()| out.flush())
                .map_err(|err| ExpectedError::ReportError { err })?;
            return Ok(0);
        }

        // An out-of-range selector aborts here, before anything is spawned.
        let selected: Vec<&Scenario> = match self.index {
            Some(index) => vec![SCENARIOS.select(index)?],
            None => SCENARIOS.iter().collect(),
        };

        let runner = ScenarioRunnerBuilder::new()
            .set_timeout(Duration::from_secs(self.timeout))
            .build(self.program);
        info!(
            program = %runner.program(),
            scenarios = selected.len(),
            "starting conformance run"
        );

        execute(ctx, &runner, selected)?;
        // No pass/fail exit-code contract: the summary is the verdict.
        Ok(0)
    }
}

fn execute<'a>(
    ctx: OutputContext,
    runner: &conformance_runner::runner::ScenarioRunner,
    selected: Vec<&'a Scenario>,
) -> Result<Vec<TestResult<'a>>, ExpectedError> {
    let stdout = std::io::stdout();
    let mut reporter = ReporterBuilder::new()
        .set_colorize(ctx.color.should_colorize_stdout())
        .build(stdout.lock());

    // Scenarios run strictly one at a time; a current-thread runtime is all
    // the driver's select loop needs.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| ExpectedError::RuntimeCreateError { err })?;

    let mut write_error = None;
    let results = runtime.block_on(runner.run(selected, |event| {
        if let Err(err) = reporter.report_event(&event) {
            write_error.get_or_insert(err);
        }
    }));

    if let Some(err) = write_error {
        return Err(ExpectedError::ReportError { err });
    }
    reporter
        .report_summary(&results)
        .map_err(|err| ExpectedError::ReportError { err })?;
    Ok(results)
}
