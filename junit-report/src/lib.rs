// Copyright (c) The testng-junit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Generate JUnit XML reports in Rust.
//!
//! This crate models the subset of JUnit XML that CI systems consume from a converted TestNG
//! run: a `testsuites` root, suites with counts and a time in seconds, and testcases that either
//! passed, failed with a message and stack trace, or were skipped.

mod errors;
mod report;
mod serialize;

pub use errors::SerializeError;
pub use report::*;
