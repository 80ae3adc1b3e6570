// Copyright (c) The testng-junit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{errors::SerializeError, serialize::serialize_report};
use std::io;

/// The root element of a JUnit report, serialized as `testsuites`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Report {
    /// The test suites contained in this report.
    pub testsuites: Vec<TestSuite>,
}

impl Report {
    /// Creates a new, empty `Report`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a new testsuite.
    pub fn add_testsuite(&mut self, testsuite: TestSuite) -> &mut Self {
        self.testsuites.push(testsuite);
        self
    }

    /// Adds several testsuites.
    pub fn add_testsuites(&mut self, testsuites: impl IntoIterator<Item = TestSuite>) -> &mut Self {
        self.testsuites.extend(testsuites);
        self
    }

    /// Serialize this report to the given writer.
    pub fn serialize(&self, writer: impl io::Write) -> Result<(), SerializeError> {
        serialize_report(self, writer)
    }

    /// Serialize this report to a string.
    pub fn to_string(&self) -> Result<String, SerializeError> {
        let mut buf: Vec<u8> = vec![];
        self.serialize(&mut buf)?;
        Ok(String::from_utf8(buf)?)
    }
}

/// Represents a single testsuite.
///
/// Unlike a suite built up from individual results, the counts here are carried over from the
/// source report as-is and are not recomputed from `testcases`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestSuite {
    /// The name of this testsuite.
    pub name: String,

    /// The total number of tests in this testsuite.
    pub tests: usize,

    /// The total number of tests in this suite that failed.
    pub failures: usize,

    /// The total number of tests in this suite that were skipped.
    pub skipped: usize,

    /// The overall time taken by the testsuite, in seconds.
    ///
    /// This is written out verbatim, so callers are expected to have formatted it already
    /// (typically with three decimal places).
    pub time: String,

    /// The testcases that form this testsuite.
    pub testcases: Vec<TestCase>,
}

impl TestSuite {
    /// Creates a new `TestSuite` with zero counts and an empty time.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tests: 0,
            failures: 0,
            skipped: 0,
            time: String::new(),
            testcases: vec![],
        }
    }

    /// Sets the `tests`, `failures` and `skipped` counts.
    pub fn set_counts(&mut self, tests: usize, failures: usize, skipped: usize) -> &mut Self {
        self.tests = tests;
        self.failures = failures;
        self.skipped = skipped;
        self
    }

    /// Sets the time taken for the testsuite.
    pub fn set_time(&mut self, time: impl Into<String>) -> &mut Self {
        self.time = time.into();
        self
    }

    /// Adds a testcase to this testsuite. Counts are left untouched.
    pub fn add_testcase(&mut self, testcase: TestCase) -> &mut Self {
        self.testcases.push(testcase);
        self
    }

    /// Adds several testcases to this testsuite, in order. Counts are left untouched.
    pub fn add_testcases(&mut self, testcases: impl IntoIterator<Item = TestCase>) -> &mut Self {
        self.testcases.extend(testcases);
        self
    }
}

/// Represents a single testcase.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestCase {
    /// The name of the testcase.
    pub name: String,

    /// The "classname" of the testcase.
    pub classname: String,

    /// The time it took to execute this testcase.
    ///
    /// Written out verbatim.
    pub time: String,

    /// The status of this test.
    pub status: TestCaseStatus,
}

impl TestCase {
    /// Creates a new testcase.
    pub fn new(name: impl Into<String>, status: TestCaseStatus) -> Self {
        Self {
            name: name.into(),
            classname: String::new(),
            time: String::new(),
            status,
        }
    }

    /// Sets the classname of the test.
    pub fn set_classname(&mut self, classname: impl Into<String>) -> &mut Self {
        self.classname = classname.into();
        self
    }

    /// Sets the time taken for the testcase.
    pub fn set_time(&mut self, time: impl Into<String>) -> &mut Self {
        self.time = time.into();
        self
    }
}

/// Represents the success or failure of a testcase.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TestCaseStatus {
    /// This testcase passed. Neither `failure` nor `skipped` is written out.
    Success,

    /// This testcase failed.
    Failure {
        /// The failure message.
        message: String,

        /// The "type" of failure that occurred.
        ty: String,

        /// The description of the failure, typically a stack trace.
        ///
        /// This is serialized as the text node of the element.
        description: String,
    },

    /// This testcase was not run. Serialized as an empty `skipped` element.
    Skipped,
}

impl TestCaseStatus {
    /// Creates a new `TestCaseStatus` that represents a successful test.
    pub fn success() -> Self {
        TestCaseStatus::Success
    }

    /// Creates a new `TestCaseStatus` that represents a failed test, with every field empty.
    pub fn failure() -> Self {
        TestCaseStatus::Failure {
            message: String::new(),
            ty: String::new(),
            description: String::new(),
        }
    }

    /// Creates a new `TestCaseStatus` that represents a skipped test.
    pub fn skipped() -> Self {
        TestCaseStatus::Skipped
    }

    /// Sets the message. No-op unless this is a failure.
    pub fn set_message(&mut self, message: impl Into<String>) -> &mut Self {
        if let TestCaseStatus::Failure { message: m, .. } = self {
            *m = message.into();
        }
        self
    }

    /// Sets the type. No-op unless this is a failure.
    pub fn set_type(&mut self, ty: impl Into<String>) -> &mut Self {
        if let TestCaseStatus::Failure { ty: t, .. } = self {
            *t = ty.into();
        }
        self
    }

    /// Sets the description (text node). No-op unless this is a failure.
    pub fn set_description(&mut self, description: impl Into<String>) -> &mut Self {
        if let TestCaseStatus::Failure { description: d, .. } = self {
            *d = description.into();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setters_ignore_non_failures() {
        let mut status = TestCaseStatus::skipped();
        status.set_message("ignored").set_type("ignored");
        assert_eq!(status, TestCaseStatus::Skipped);

        let mut status = TestCaseStatus::success();
        status.set_description("ignored");
        assert_eq!(status, TestCaseStatus::Success);
    }

    #[test]
    fn failure_builder() {
        let mut status = TestCaseStatus::failure();
        status
            .set_message("boom")
            .set_type("Failure")
            .set_description("trace...");
        assert_eq!(
            status,
            TestCaseStatus::Failure {
                message: "boom".to_owned(),
                ty: "Failure".to_owned(),
                description: "trace...".to_owned(),
            }
        );
    }
}
