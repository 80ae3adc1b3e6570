// Copyright (c) The testng-junit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Threshold configuration and evaluation.
//!
//! A suite is checked in three steps:
//!
//! 1. The failed-build thresholds, either as absolute counts or as percentages of the suite's
//!    total, depending on the [`ThresholdMode`]. Exceeding one fails the build.
//! 2. The unstable thresholds, always as absolute counts. Exceeding one is logged and recorded in
//!    the returned [`SuiteVerdict`], but never fails the build.
//! 3. If requested, the configuration methods. The first failed setup or teardown method fails the
//!    build.
//!
//! A threshold of zero disables the corresponding check.

use crate::{
    errors::{ConfigError, ValidationError},
    testng::{Suite, TestStatus, TestngReport},
};
use std::fmt;

/// How the failed-build thresholds are compared against a suite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThresholdMode {
    /// Thresholds are absolute counts of failed or skipped tests.
    Absolute,

    /// Thresholds are percentages of the suite's total test count.
    Percentage,
}

impl ThresholdMode {
    /// Converts the numeric mode used on the command line: `1` is absolute, `2` is percentage.
    pub fn from_raw(value: i64) -> Result<Self, ConfigError> {
        match value {
            1 => Ok(Self::Absolute),
            2 => Ok(Self::Percentage),
            value => Err(ConfigError::InvalidMode { value }),
        }
    }
}

/// The validated thresholds for a run. Immutable once built.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThresholdConfig {
    /// Fail the build if more tests than this failed. Zero disables the check.
    pub failed_fails: u32,

    /// Fail the build if more tests than this were skipped. Zero disables the check.
    pub failed_skips: u32,

    /// Mark the build unstable if more tests than this failed. Zero disables the check.
    pub unstable_fails: u32,

    /// Mark the build unstable if more tests than this were skipped. Zero disables the check.
    pub unstable_skips: u32,

    /// How `failed_fails` and `failed_skips` are interpreted.
    pub mode: ThresholdMode,

    /// Fail the build if any configuration method failed.
    pub failure_on_failed_test_config: bool,
}

impl ThresholdConfig {
    /// Creates a config in the given mode with every check disabled.
    pub fn new(mode: ThresholdMode) -> Self {
        Self {
            failed_fails: 0,
            failed_skips: 0,
            unstable_fails: 0,
            unstable_skips: 0,
            mode,
            failure_on_failed_test_config: false,
        }
    }
}

/// Builds a [`ThresholdConfig`] from raw, unvalidated values.
///
/// Values come straight from the command line or environment and may be negative or missing.
/// [`Self::build`] rejects them before any report is looked at.
#[derive(Clone, Debug, Default)]
pub struct ThresholdConfigBuilder {
    failed_fails: i64,
    failed_skips: i64,
    unstable_fails: i64,
    unstable_skips: i64,
    mode: Option<i64>,
    failure_on_failed_test_config: bool,
}

impl ThresholdConfigBuilder {
    /// Creates a builder with every threshold at zero and no mode set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the failed-build threshold for failed tests.
    pub fn set_failed_fails(&mut self, value: i64) -> &mut Self {
        self.failed_fails = value;
        self
    }

    /// Sets the failed-build threshold for skipped tests.
    pub fn set_failed_skips(&mut self, value: i64) -> &mut Self {
        self.failed_skips = value;
        self
    }

    /// Sets the unstable threshold for failed tests.
    pub fn set_unstable_fails(&mut self, value: i64) -> &mut Self {
        self.unstable_fails = value;
        self
    }

    /// Sets the unstable threshold for skipped tests.
    pub fn set_unstable_skips(&mut self, value: i64) -> &mut Self {
        self.unstable_skips = value;
        self
    }

    /// Sets the raw threshold mode. `None` means the mode was not provided.
    pub fn set_mode(&mut self, mode: Option<i64>) -> &mut Self {
        self.mode = mode;
        self
    }

    /// Sets whether a failed configuration method fails the build.
    pub fn set_failure_on_failed_test_config(&mut self, value: bool) -> &mut Self {
        self.failure_on_failed_test_config = value;
        self
    }

    /// Validates the raw values.
    ///
    /// Thresholds are checked before the mode, so a negative threshold is reported even if the
    /// mode is also invalid.
    pub fn build(&self) -> Result<ThresholdConfig, ConfigError> {
        let failed_fails = threshold("failed-fails", self.failed_fails)?;
        let failed_skips = threshold("failed-skips", self.failed_skips)?;
        let unstable_fails = threshold("unstable-fails", self.unstable_fails)?;
        let unstable_skips = threshold("unstable-skips", self.unstable_skips)?;
        let mode = ThresholdMode::from_raw(self.mode.ok_or(ConfigError::MissingMode)?)?;

        Ok(ThresholdConfig {
            failed_fails,
            failed_skips,
            unstable_fails,
            unstable_skips,
            mode,
            failure_on_failed_test_config: self.failure_on_failed_test_config,
        })
    }
}

fn threshold(name: &'static str, value: i64) -> Result<u32, ConfigError> {
    if value < 0 {
        return Err(ConfigError::NegativeThreshold { name, value });
    }
    u32::try_from(value).map_err(|_| ConfigError::ThresholdOutOfRange { name, value })
}

/// Which count exceeded an unstable threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnstableKind {
    Failed,
    Skipped,
}

/// A suite exceeded one of the unstable thresholds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnstableReason {
    /// The suite that exceeded the threshold.
    pub suite: String,
    pub kind: UnstableKind,
    /// The configured threshold.
    pub threshold: u32,
    /// The reported count.
    pub actual: usize,
}

impl fmt::Display for UnstableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self.kind {
            UnstableKind::Failed => "failed",
            UnstableKind::Skipped => "skipped",
        };
        write!(
            f,
            "Number of {what} tests exceeded unstable threshold: \
             provided threshold={}, actual {what}={}",
            self.threshold, self.actual,
        )
    }
}

/// The result of a suite passing validation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SuiteVerdict {
    /// Unstable thresholds the suite exceeded.
    pub unstable: Vec<UnstableReason>,
}

impl SuiteVerdict {
    /// Returns true if any unstable threshold was exceeded.
    pub fn is_unstable(&self) -> bool {
        !self.unstable.is_empty()
    }
}

/// The result of every suite in a report passing validation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReportVerdict {
    /// Unstable thresholds exceeded, across all suites, in document order.
    pub unstable: Vec<UnstableReason>,
}

impl ReportVerdict {
    /// Returns true if any suite exceeded an unstable threshold.
    pub fn is_unstable(&self) -> bool {
        !self.unstable.is_empty()
    }
}

/// Evaluates every suite in document order, stopping at the first suite that fails.
pub fn evaluate_report(
    report: &TestngReport,
    config: &ThresholdConfig,
) -> Result<ReportVerdict, ValidationError> {
    let mut verdict = ReportVerdict::default();
    for suite in &report.suites {
        let suite_verdict = evaluate_suite(suite, config)?;
        verdict.unstable.extend(suite_verdict.unstable);
    }
    Ok(verdict)
}

/// Evaluates a single suite against the thresholds.
pub fn evaluate_suite(
    suite: &Suite,
    config: &ThresholdConfig,
) -> Result<SuiteVerdict, ValidationError> {
    match config.mode {
        ThresholdMode::Absolute => check_absolute(suite, config)?,
        ThresholdMode::Percentage => check_percentage(suite, config)?,
    }

    let verdict = SuiteVerdict {
        unstable: check_unstable(suite, config),
    };

    if config.failure_on_failed_test_config {
        check_config_methods(suite)?;
    }

    Ok(verdict)
}

fn check_absolute(suite: &Suite, config: &ThresholdConfig) -> Result<(), ValidationError> {
    if exceeds(config.failed_fails, suite.failures) {
        return Err(ValidationError::FailedCountExceeded {
            suite: suite.name.clone(),
            threshold: config.failed_fails,
            actual: suite.failures,
        });
    }
    if exceeds(config.failed_skips, suite.skipped) {
        return Err(ValidationError::SkippedCountExceeded {
            suite: suite.name.clone(),
            threshold: config.failed_skips,
            actual: suite.skipped,
        });
    }
    Ok(())
}

fn check_percentage(suite: &Suite, config: &ThresholdConfig) -> Result<(), ValidationError> {
    if suite.tests == 0 {
        return Ok(());
    }

    let failure_rate = rate(suite.failures, suite.tests);
    let skip_rate = rate(suite.skipped, suite.tests);

    if config.failed_fails > 0 && failure_rate > f64::from(config.failed_fails) {
        return Err(ValidationError::FailureRateExceeded {
            suite: suite.name.clone(),
            threshold: config.failed_fails,
            rate: failure_rate,
        });
    }
    if config.failed_skips > 0 && skip_rate > f64::from(config.failed_skips) {
        return Err(ValidationError::SkipRateExceeded {
            suite: suite.name.clone(),
            threshold: config.failed_skips,
            rate: skip_rate,
        });
    }
    Ok(())
}

fn check_unstable(suite: &Suite, config: &ThresholdConfig) -> Vec<UnstableReason> {
    let checks = [
        (UnstableKind::Failed, config.unstable_fails, suite.failures),
        (UnstableKind::Skipped, config.unstable_skips, suite.skipped),
    ];

    checks
        .into_iter()
        .filter(|&(_, threshold, actual)| exceeds(threshold, actual))
        .map(|(kind, threshold, actual)| {
            let reason = UnstableReason {
                suite: suite.name.clone(),
                kind,
                threshold,
                actual,
            };
            tracing::warn!("{reason}; marking build as UNSTABLE");
            reason
        })
        .collect()
}

fn check_config_methods(suite: &Suite) -> Result<(), ValidationError> {
    let failed = suite
        .methods()
        .find(|(_, method)| method.is_config && method.status == TestStatus::Fail);

    match failed {
        Some((class, method)) => Err(ValidationError::ConfigMethodFailed {
            suite: suite.name.clone(),
            class: class.name.clone(),
            method: method.name.clone(),
        }),
        None => Ok(()),
    }
}

/// Returns true if `threshold` is enabled and `actual` is strictly greater than it.
fn exceeds(threshold: u32, actual: usize) -> bool {
    // u32 always fits in u64, and usize fits in u64 on every supported platform.
    threshold > 0 && actual as u64 > u64::from(threshold)
}

fn rate(count: usize, total: usize) -> f64 {
    count as f64 / total as f64 * 100.0
}
