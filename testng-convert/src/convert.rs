// Copyright (c) The testng-junit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversion of TestNG reports into JUnit reports.

use crate::testng::{Class, Suite, TestMethod, TestStatus, TestngReport};
use junit_report::{Report, TestCase, TestCaseStatus, TestSuite};

/// The `type` attribute written on every converted failure.
pub static FAILURE_TYPE: &str = "Failure";

/// Converts a TestNG report into a JUnit report.
///
/// Every test method becomes a testcase, configuration methods included. Suite counts are copied
/// over rather than recomputed.
pub fn convert_report(report: &TestngReport) -> Report {
    let mut junit = Report::new();
    junit.add_testsuites(report.suites.iter().map(convert_suite));
    junit
}

fn convert_suite(suite: &Suite) -> TestSuite {
    let mut testsuite = TestSuite::new(suite.name.as_str());
    testsuite
        .set_counts(suite.tests, suite.failures, suite.skipped)
        .set_time(format_suite_time(&suite.duration_ms));

    testsuite.add_testcases(
        suite
            .methods()
            .map(|(class, method)| convert_method(class, method)),
    );
    testsuite
}

fn convert_method(class: &Class, method: &TestMethod) -> TestCase {
    let status = match method.status {
        TestStatus::Fail => {
            let mut status = TestCaseStatus::failure();
            status
                .set_message(method.exception_message.as_deref().unwrap_or_default())
                .set_type(FAILURE_TYPE)
                .set_description(method.stack_trace.as_deref().unwrap_or_default());
            status
        }
        TestStatus::Skip => TestCaseStatus::skipped(),
        TestStatus::Pass | TestStatus::Other(_) => TestCaseStatus::success(),
    };

    let mut testcase = TestCase::new(method.name.as_str(), status);
    // The case time is carried over verbatim, in milliseconds.
    testcase
        .set_classname(class.name.as_str())
        .set_time(method.duration_ms.as_str());
    testcase
}

/// Converts a suite's `duration-ms` attribute to seconds with three decimal places.
///
/// A value that is not a number is treated as zero.
pub fn format_suite_time(duration_ms: &str) -> String {
    let millis = match duration_ms.parse::<f64>() {
        Ok(millis) => millis,
        Err(_) => {
            if !duration_ms.is_empty() {
                tracing::debug!("treating malformed suite duration `{duration_ms}` as 0");
            }
            0.0
        }
    };
    format!("{:.3}", millis / 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case("1500", "1.500" ; "whole milliseconds")]
    #[test_case("0", "0.000" ; "zero")]
    #[test_case("1", "0.001" ; "one millisecond")]
    #[test_case("61234", "61.234" ; "over a minute")]
    #[test_case("12.5", "0.013" ; "fractional milliseconds")]
    #[test_case("", "0.000" ; "empty")]
    #[test_case("abc", "0.000" ; "malformed")]
    fn suite_time(input: &str, expected: &str) {
        assert_eq!(format_suite_time(input), expected);
    }

    fn method(name: &str, status: TestStatus) -> TestMethod {
        TestMethod {
            name: name.to_owned(),
            class_name: "com.example.Cls".to_owned(),
            status,
            duration_ms: "15".to_owned(),
            ..TestMethod::default()
        }
    }

    #[test]
    fn converts_statuses() {
        let failed = TestMethod {
            exception_message: Some("boom".to_owned()),
            stack_trace: Some("trace...".to_owned()),
            ..method("fails", TestStatus::Fail)
        };
        let setup = TestMethod {
            is_config: true,
            ..method("setUp", TestStatus::Pass)
        };
        let report = TestngReport {
            suites: vec![Suite {
                name: "suite".to_owned(),
                duration_ms: "1500".to_owned(),
                tests: 5,
                failures: 1,
                skipped: 1,
                classes: vec![
                    Class {
                        name: "com.example.First".to_owned(),
                        methods: vec![setup, failed],
                    },
                    Class {
                        name: "com.example.Second".to_owned(),
                        methods: vec![
                            method("skips", TestStatus::Skip),
                            method("passes", TestStatus::Pass),
                            method("other", TestStatus::new("SUCCESS_PERCENTAGE_FAILURE")),
                        ],
                    },
                ],
            }],
        };

        let junit = convert_report(&report);
        assert_eq!(junit.testsuites.len(), 1);
        let suite = &junit.testsuites[0];
        assert_eq!(suite.name, "suite");
        assert_eq!((suite.tests, suite.failures, suite.skipped), (5, 1, 1));
        assert_eq!(suite.time, "1.500");

        let cases: Vec<_> = suite
            .testcases
            .iter()
            .map(|case| (case.name.as_str(), case.classname.as_str(), &case.status))
            .collect();
        assert_eq!(
            cases,
            vec![
                ("setUp", "com.example.First", &TestCaseStatus::Success),
                (
                    "fails",
                    "com.example.First",
                    &TestCaseStatus::Failure {
                        message: "boom".to_owned(),
                        ty: "Failure".to_owned(),
                        description: "trace...".to_owned(),
                    }
                ),
                ("skips", "com.example.Second", &TestCaseStatus::Skipped),
                ("passes", "com.example.Second", &TestCaseStatus::Success),
                ("other", "com.example.Second", &TestCaseStatus::Success),
            ]
        );

        // Case durations are not converted to seconds.
        assert!(suite.testcases.iter().all(|case| case.time == "15"));
    }

    #[test]
    fn failure_without_exception() {
        let report = TestngReport {
            suites: vec![Suite {
                classes: vec![Class {
                    name: "C".to_owned(),
                    methods: vec![method("fails", TestStatus::Fail)],
                }],
                ..Suite::default()
            }],
        };
        let junit = convert_report(&report);
        assert_eq!(
            junit.testsuites[0].testcases[0].status,
            TestCaseStatus::Failure {
                message: String::new(),
                ty: "Failure".to_owned(),
                description: String::new(),
            }
        );
    }

    #[test]
    fn empty_report() {
        assert_eq!(convert_report(&TestngReport::default()), Report::new());
    }
}
