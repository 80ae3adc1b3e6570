// Copyright (c) The testng-junit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors produced while converting TestNG reports.

use camino::Utf8PathBuf;
use junit_report::SerializeError;
use std::io;
use thiserror::Error;

/// An error in the run configuration.
///
/// These are detected eagerly, before any report file is discovered or read.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    /// No report filename pattern was provided.
    #[error("missing required parameter: report filename pattern")]
    MissingPattern,

    /// A threshold was negative.
    #[error("threshold values must be non-negative (`{name}` is {value})")]
    NegativeThreshold {
        /// The name of the threshold.
        name: &'static str,
        /// The value provided.
        value: i64,
    },

    /// A threshold was too large to be represented.
    #[error("threshold `{name}` is out of range ({value})")]
    ThresholdOutOfRange {
        /// The name of the threshold.
        name: &'static str,
        /// The value provided.
        value: i64,
    },

    /// No threshold mode was provided.
    #[error("missing required parameter: threshold mode (1 = absolute, 2 = percentage)")]
    MissingMode,

    /// The threshold mode was not one of the known values.
    #[error("threshold mode must be 1 (absolute) or 2 (percentage), found {value}")]
    InvalidMode {
        /// The value provided.
        value: i64,
    },
}

/// An error that occurred while parsing a TestNG XML report.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TestngParseError {
    /// The document is not well-formed XML.
    #[error("malformed XML")]
    Xml(#[from] quick_xml::Error),

    /// An attribute could not be read.
    #[error("malformed attribute")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    /// Character data was not valid UTF-8.
    #[error("character data is not valid UTF-8")]
    Utf8(#[from] std::str::Utf8Error),

    /// The document contains no root element.
    #[error("document has no root element")]
    MissingRoot,

    /// The document ended before every element was closed.
    #[error("unexpected end of document inside <{element}>")]
    UnexpectedEof {
        /// The innermost element that was still open.
        element: String,
    },

    /// The root element is `testsuites`: the report has already been converted.
    #[error("report is already in JUnit format (root element is <testsuites>)")]
    AlreadyJunit,

    /// The root element is something other than `testng-results`.
    #[error("expected root element <testng-results>, found <{found}>")]
    UnexpectedRoot {
        /// The root element that was found.
        found: String,
    },

    /// An attribute had a value of the wrong type.
    #[error("invalid value `{value}` for attribute `{attribute}` on <{element}>: expected {expected}")]
    InvalidAttribute {
        /// The element the attribute is on.
        element: &'static str,
        /// The name of the attribute.
        attribute: &'static str,
        /// The value found.
        value: String,
        /// A description of the expected value.
        expected: &'static str,
    },
}

/// A threshold or configuration-method check failed for a suite.
///
/// This is the build-failure signal: the run stops at the first suite that produces one.
#[derive(Clone, Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum ValidationError {
    /// More tests failed than the absolute failure threshold allows.
    #[error(
        "number of failed tests exceeded the failure threshold: \
         provided threshold={threshold}, actual failed={actual}"
    )]
    FailedCountExceeded {
        /// The suite that failed validation.
        suite: String,
        /// The configured threshold.
        threshold: u32,
        /// The reported number of failures.
        actual: usize,
    },

    /// More tests were skipped than the absolute skip threshold allows.
    #[error(
        "number of skipped tests exceeded the failure threshold: \
         provided threshold={threshold}, actual skipped={actual}"
    )]
    SkippedCountExceeded {
        /// The suite that failed validation.
        suite: String,
        /// The configured threshold.
        threshold: u32,
        /// The reported number of skips.
        actual: usize,
    },

    /// The failure rate exceeded the percentage failure threshold.
    #[error(
        "failure rate exceeded the failure threshold: \
         provided threshold={threshold}%, actual failure rate={rate:.2}%"
    )]
    FailureRateExceeded {
        /// The suite that failed validation.
        suite: String,
        /// The configured threshold, as a percentage.
        threshold: u32,
        /// The failure rate, as a percentage.
        rate: f64,
    },

    /// The skip rate exceeded the percentage skip threshold.
    #[error(
        "skip rate exceeded the failure threshold: \
         provided threshold={threshold}%, actual skip rate={rate:.2}%"
    )]
    SkipRateExceeded {
        /// The suite that failed validation.
        suite: String,
        /// The configured threshold, as a percentage.
        threshold: u32,
        /// The skip rate, as a percentage.
        rate: f64,
    },

    /// A configuration method (setup or teardown) failed.
    #[error("a configuration method failed: class={class}, method={method}")]
    ConfigMethodFailed {
        /// The suite that failed validation.
        suite: String,
        /// The class owning the method.
        class: String,
        /// The name of the method.
        method: String,
    },
}

impl ValidationError {
    /// Returns the name of the suite that failed validation.
    pub fn suite(&self) -> &str {
        match self {
            Self::FailedCountExceeded { suite, .. }
            | Self::SkippedCountExceeded { suite, .. }
            | Self::FailureRateExceeded { suite, .. }
            | Self::SkipRateExceeded { suite, .. }
            | Self::ConfigMethodFailed { suite, .. } => suite,
        }
    }
}

/// An error that occurred while looking for report files.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DiscoveryError {
    /// The pattern is not a valid glob.
    #[error("invalid report filename pattern `{pattern}`")]
    InvalidGlob {
        /// The pattern provided.
        pattern: String,
        /// The underlying error.
        #[source]
        err: globset::Error,
    },

    /// Walking the directory tree failed.
    #[error("error reading directory tree under `{path}`")]
    Walk {
        /// The directory being walked.
        path: Utf8PathBuf,
        /// The underlying error.
        #[source]
        err: walkdir::Error,
    },
}

/// An error that stopped a conversion run.
///
/// Every error is terminal: the first one encountered stops all further processing.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConvertError {
    /// The configuration was invalid.
    #[error("invalid configuration")]
    Config(#[from] ConfigError),

    /// Looking for report files failed.
    #[error("failed to discover report files")]
    Discovery(#[from] DiscoveryError),

    /// No files matched the pattern, and that was requested to be an error.
    #[error("no TestNG XML report files found matching `{pattern}`")]
    NoReportsFound {
        /// The pattern that matched nothing.
        pattern: String,
    },

    /// A report could not be read.
    #[error("failed to read `{path}`")]
    ReadFailed {
        /// The report path.
        path: Utf8PathBuf,
        /// The underlying error.
        #[source]
        err: io::Error,
    },

    /// A report could not be parsed.
    #[error("failed to parse TestNG XML at `{path}`")]
    ParseFailed {
        /// The report path.
        path: Utf8PathBuf,
        /// The underlying error.
        #[source]
        err: TestngParseError,
    },

    /// A report exceeded a threshold or contained a failed configuration method.
    #[error("validation failed for `{path}`")]
    ValidationFailed {
        /// The report path.
        path: Utf8PathBuf,
        /// The underlying error.
        #[source]
        err: ValidationError,
    },

    /// The converted report could not be serialized.
    #[error("failed to serialize JUnit XML for `{path}`")]
    SerializeFailed {
        /// The report path.
        path: Utf8PathBuf,
        /// The underlying error.
        #[source]
        err: SerializeError,
    },

    /// The converted report could not be written.
    #[error("failed to write `{path}`")]
    WriteFailed {
        /// The report path.
        path: Utf8PathBuf,
        /// The underlying error.
        #[source]
        err: io::Error,
    },
}
