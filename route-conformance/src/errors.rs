// Copyright (c) The route-conformance Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use conformance_runner::errors::InvalidScenarioIndex;
use owo_colors::{OwoColorize, Stream, Style};
use std::io;
use thiserror::Error;

/// Exit code for user/configuration errors detected before any scenario ran.
pub const SETUP_ERROR_EXIT_CODE: i32 = 96;

/// Exit code for errors internal to the harness itself.
pub const INTERNAL_ERROR_EXIT_CODE: i32 = 101;

/// An error the harness anticipates and reports cleanly, as opposed to a bug
/// worth a backtrace.
///
/// Note that a completed run always exits 0 whatever its pass/fail counts:
/// the planner protocol defines no exit-code contract and the harness does
/// not invent one. Verdicts are in the printed summary.
#[derive(Debug, Error)]
pub enum ExpectedError {
    #[error("invalid scenario selector")]
    ScenarioNotFound {
        #[from]
        err: InvalidScenarioIndex,
    },
    #[error("failed to write report output")]
    ReportError {
        #[source]
        err: io::Error,
    },
    #[error("failed to create async runtime")]
    RuntimeCreateError {
        #[source]
        err: io::Error,
    },
}

impl ExpectedError {
    /// The process exit code this error maps to.
    pub fn process_exit_code(&self) -> i32 {
        match self {
            Self::ScenarioNotFound { .. } => SETUP_ERROR_EXIT_CODE,
            Self::ReportError { .. } | Self::RuntimeCreateError { .. } => INTERNAL_ERROR_EXIT_CODE,
        }
    }

    /// Prints the error to stderr, colorized when stderr supports it.
    pub fn display_to_stderr(&self) {
        let (message, source): (String, Option<&dyn std::error::Error>) = match self {
            Self::ScenarioNotFound { err } => (err.to_string(), None),
            Self::ReportError { err } => ("failed to write report output".to_owned(), Some(err)),
            Self::RuntimeCreateError { err } => {
                ("failed to create async runtime".to_owned(), Some(err))
            }
        };

        let error_style = Style::new().red().bold();
        let bold = Style::new().bold();
        eprintln!(
            "{}: {message}",
            "error".if_supports_color(Stream::Stderr, |s| s.style(error_style)),
        );
        if let Some(source) = source {
            eprintln!(
                "{}: {source}",
                "caused by".if_supports_color(Stream::Stderr, |s| s.style(bold)),
            );
        }
    }
}
