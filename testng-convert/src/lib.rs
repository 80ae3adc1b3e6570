// Copyright (c) The testng-junit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversion of TestNG XML reports into JUnit XML.
//!
//! A run discovers every report matching a glob, parses it, evaluates each suite against the
//! configured thresholds, and rewrites the file in place as JUnit XML. The first report that fails
//! to parse or exceeds a failure threshold stops the run. Exceeding an unstable threshold is
//! reported but never stops the run.
//!
//! The main entry point is [`ReportConverter`].

pub mod convert;
pub mod discover;
pub mod errors;
mod exit_codes;
pub mod run;
pub mod testng;
pub mod thresholds;

pub use exit_codes::ConvertExitCode;
pub use run::{ConvertConfig, ReportConverter, RunOutcome, RunSummary};
