// Copyright (c) The testng-junit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Converts TestNG XML reports into JUnit XML.
//!
//! Every file matching `--report-filename-pattern` is validated against the configured thresholds
//! and rewritten in place as JUnit XML. Every option can also be set through a `PLUGIN_*`
//! environment variable, which is how CI pipeline plugins receive their settings.
//!
//! Exit codes are documented in [`ConvertExitCode`](testng_convert::ConvertExitCode).

#![warn(missing_docs)]

mod dispatch;
mod errors;
mod output;

#[doc(hidden)]
pub use dispatch::*;
#[doc(hidden)]
pub use errors::*;
pub use output::{OutputContext, StderrStyles};
