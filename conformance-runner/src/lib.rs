// Copyright (c) The route-conformance Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Core functionality for the route-planner conformance harness.
//!
//! The harness drives an external route-planning binary through its
//! interactive text interface, one scenario at a time: build the scripted
//! input, run the program under a timeout, scan its output for the known
//! markers, and decide pass/fail against the scenario's expectations.
//! Presentation is left entirely to the [`reporter`].

pub mod driver;
pub mod errors;
pub mod fixtures;
pub mod list;
pub mod parser;
pub mod reporter;
pub mod runner;
pub mod transcript;
pub mod validator;
