// Copyright (c) The route-conformance Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command-line interface for the route-planner conformance harness.
//!
//! The interesting logic lives in the `conformance-runner` crate; this crate
//! only parses arguments, sets up output, and wires the runner to the
//! reporter.

mod dispatch;
mod errors;
mod output;

pub use dispatch::App;
pub use errors::ExpectedError;
