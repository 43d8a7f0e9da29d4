// Copyright (c) The route-conformance Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors produced by the conformance runner.

use thiserror::Error;

/// A scenario was selected by a position that doesn't exist in the list.
///
/// Positions are 1-based, matching the numbering shown by `--list`.
#[derive(Clone, Copy, Debug, Error)]
#[error("no scenario at position {index} (the list has {count} scenarios, numbered 1..={count})")]
pub struct InvalidScenarioIndex {
    /// The requested 1-based position.
    pub index: usize,
    /// The number of scenarios in the list.
    pub count: usize,
}
