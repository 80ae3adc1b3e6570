// Copyright (c) The testng-junit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Documented exit codes for `testng-junit` failures.
///
/// Conversion runs may fail for a variety of reasons. This structure documents the exit codes that
/// may occur in case of expected failures.
///
/// Unknown/unexpected failures will always result in exit code 1.
pub enum ConvertExitCode {}

impl ConvertExitCode {
    /// No errors occurred and every report was converted.
    pub const OK: i32 = 0;

    /// A suite exceeded an unstable threshold and `--exit-unstable` was passed.
    pub const UNSTABLE: i32 = 2;

    /// No report files matched the pattern and `--fail-if-no-results` was passed.
    pub const NO_REPORTS_FOUND: i32 = 4;

    /// The configuration was invalid or report files could not be discovered.
    pub const SETUP_ERROR: i32 = 96;

    /// A suite exceeded a failure threshold, or a configuration method failed.
    pub const THRESHOLD_EXCEEDED: i32 = 100;

    /// A report could not be parsed as TestNG XML.
    pub const PARSE_FAILED: i32 = 104;

    /// Reading a report or writing the converted report produced an error.
    pub const WRITE_OUTPUT_ERROR: i32 = 110;
}
