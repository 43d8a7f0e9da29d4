// Copyright (c) The route-conformance Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Human-readable reporting for a conformance run.
//!
//! The reporter consumes the runner's event stream and the finished result
//! sequence; it is the only place that knows about colors or formatting.

use crate::{
    runner::RunEvent,
    validator::TestResult,
};
use owo_colors::{OwoColorize, Style};
use std::{io, time::Duration};

/// Styles for the reporter's output. All default to plain text; `colorize`
/// switches the lot on.
#[derive(Clone, Debug, Default)]
struct Styles {
    pass: Style,
    fail: Style,
    count: Style,
    scenario_name: Style,
    description: Style,
}

impl Styles {
    fn colorize(&mut self) {
        self.pass = Style::new().green().bold();
        self.fail = Style::new().red().bold();
        self.count = Style::new().bold();
        self.scenario_name = Style::new().bold();
        self.description = Style::new().dimmed();
    }
}

/// Builder for [`ScenarioReporter`].
#[derive(Clone, Debug, Default)]
pub struct ReporterBuilder {
    colorize: bool,
}

impl ReporterBuilder {
    /// Creates a builder with default settings (no color).
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables colorized output.
    pub fn set_colorize(&mut self, colorize: bool) -> &mut Self {
        self.colorize = colorize;
        self
    }

    /// Builds a reporter writing to `writer`.
    pub fn build<W: io::Write>(&self, writer: W) -> ScenarioReporter<W> {
        let mut styles = Styles::default();
        if self.colorize {
            styles.colorize();
        }
        ScenarioReporter { writer, styles }
    }
}

/// Writes progress lines and the final summary for a run.
pub struct ScenarioReporter<W> {
    writer: W,
    styles: Styles,
}

impl<W: io::Write> ScenarioReporter<W> {
    /// Handles one runner event.
    pub fn report_event(&mut self, event: &RunEvent<'_>) -> io::Result<()> {
        match event {
            RunEvent::RunStarted { total } => {
                writeln!(
                    self.writer,
                    "{:>12} {} scenarios",
                    "Starting".style(self.styles.count),
                    total.style(self.styles.count),
                )
            }
            RunEvent::ScenarioStarted { scenario, .. } => {
                write!(
                    self.writer,
                    "{:>12} {}",
                    "Running",
                    scenario.name().style(self.styles.scenario_name),
                )?;
                if !scenario.description().is_empty() {
                    write!(
                        self.writer,
                        " ({})",
                        scenario.description().style(self.styles.description),
                    )?;
                }
                writeln!(self.writer)
            }
            RunEvent::ScenarioFinished { result, .. } => self.report_result(result),
        }
    }

    fn report_result(&mut self, result: &TestResult<'_>) -> io::Result<()> {
        if result.passed() {
            write!(self.writer, "{:>12} ", "PASS".style(self.styles.pass))?;
        } else {
            write!(self.writer, "{:>12} ", "FAIL".style(self.styles.fail))?;
        }
        write!(
            self.writer,
            "[{}] {}",
            format_duration(result.duration()),
            result.scenario().name().style(self.styles.scenario_name),
        )?;

        let mut details = Vec::new();
        if let Some(time) = result.actual_time() {
            details.push(format!("total time {time}"));
        }
        if let Some(stops) = result.actual_stops() {
            details.push(format!("{stops} stops"));
        }
        if let Some(kind) = result.failure() {
            details.push(kind.to_string());
        }
        if !details.is_empty() {
            write!(self.writer, ": {}", details.join(", "))?;
        }
        writeln!(self.writer)
    }

    /// Writes the final summary: totals, then one line per failing scenario
    /// with its reason.
    pub fn report_summary(&mut self, results: &[TestResult<'_>]) -> io::Result<()> {
        let passed = results.iter().filter(|r| r.passed()).count();
        let failed = results.len() - passed;
        let total_time: Duration = results.iter().map(|r| r.duration()).sum();

        writeln!(self.writer, "{}", "-".repeat(60))?;
        write!(
            self.writer,
            "{:>12} [{}] {} scenarios run: {} ",
            "Summary".style(self.styles.count),
            format_duration(total_time),
            results.len().style(self.styles.count),
            passed.style(self.styles.pass),
        )?;
        writeln!(
            self.writer,
            "passed, {} failed",
            if failed > 0 {
                failed.style(self.styles.fail).to_string()
            } else {
                failed.to_string()
            },
        )?;

        for result in results.iter().filter(|r| !r.passed()) {
            writeln!(
                self.writer,
                "{:>12} {}{}",
                "FAIL".style(self.styles.fail),
                result.scenario().name().style(self.styles.scenario_name),
                result
                    .failure()
                    .map(|kind| format!(" ({kind})"))
                    .unwrap_or_default(),
            )?;
        }
        Ok(())
    }
}

/// Lists scenario names with their 1-based positions, the numbering
/// `select` accepts.
pub fn list_scenarios<'a, W: io::Write>(
    writer: &mut W,
    scenarios: impl IntoIterator<Item = &'a crate::list::Scenario>,
) -> io::Result<()> {
    for (idx, scenario) in scenarios.into_iter().enumerate() {
        writeln!(writer, "{}. {}", idx + 1, scenario.name())?;
    }
    Ok(())
}

fn format_duration(duration: Duration) -> String {
    format!("{:>8.3}s", duration.as_secs_f64())
}
