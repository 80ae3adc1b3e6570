// Copyright (c) The testng-junit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The TestNG report model.
//!
//! This is the shape TestNG writes to `testng-results.xml`: suites containing classes containing
//! test methods. Suite-level counts are taken from the report as-is and are never recomputed from
//! the methods.

mod parse;

use crate::errors::TestngParseError;
use std::{fmt, io::BufRead};

/// A parsed `testng-results` document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TestngReport {
    /// The suites in this report, in document order.
    pub suites: Vec<Suite>,
}

impl TestngReport {
    /// Parses a report from a buffered reader.
    pub fn parse(reader: impl BufRead) -> Result<Self, TestngParseError> {
        parse::parse_report(reader)
    }

    /// Parses a report from a byte slice.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TestngParseError> {
        Self::parse(bytes)
    }
}

/// A TestNG `suite` element.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Suite {
    pub name: String,

    /// The raw `duration-ms` attribute. Empty if absent.
    pub duration_ms: String,

    /// The total number of tests, as reported.
    pub tests: usize,

    /// The number of failed tests, as reported.
    pub failures: usize,

    /// The number of skipped tests, as reported.
    pub skipped: usize,

    /// The classes in this suite, in document order.
    pub classes: Vec<Class>,
}

impl Suite {
    /// Iterates over every method in every class, in document order.
    pub fn methods(&self) -> impl Iterator<Item = (&Class, &TestMethod)> + '_ {
        self.classes
            .iter()
            .flat_map(|class| class.methods.iter().map(move |method| (class, method)))
    }
}

/// A TestNG `class` element.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Class {
    pub name: String,
    pub methods: Vec<TestMethod>,
}

/// A TestNG `test-method` element: either a test or a configuration method.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TestMethod {
    pub name: String,

    /// The `class` attribute of the method itself.
    pub class_name: String,

    pub status: TestStatus,

    /// The raw `duration-ms` attribute. Empty if absent.
    pub duration_ms: String,

    /// True for setup and teardown methods (`is-config="true"`).
    pub is_config: bool,

    /// The text of `exception/message`, if present.
    pub exception_message: Option<String>,

    /// The text of `exception/full-stacktrace`, if present.
    pub stack_trace: Option<String>,

    /// The method's parameters, in document order.
    pub params: Vec<Param>,
}

/// A parameter passed to a test method.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub value: String,
}

/// The status of a test method.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum TestStatus {
    #[default]
    Pass,
    Fail,
    Skip,
    /// Any other status. Treated as neither a failure nor a skip.
    Other(String),
}

impl TestStatus {
    /// Parses a `status` attribute value. Matching is case-sensitive.
    pub fn new(status: &str) -> Self {
        match status {
            "PASS" => Self::Pass,
            "FAIL" => Self::Fail,
            "SKIP" => Self::Skip,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Returns the status as it appears in the report.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
            Self::Skip => "SKIP",
            Self::Other(other) => other,
        }
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
