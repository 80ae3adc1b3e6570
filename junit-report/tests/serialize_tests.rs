// Copyright (c) The testng-junit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use indoc::indoc;
use junit_report::{Report, TestCase, TestCaseStatus, TestSuite};
use pretty_assertions::assert_eq;

fn basic_report() -> Report {
    let mut report = Report::new();

    let mut testsuite = TestSuite::new("suite0");
    testsuite.set_counts(3, 1, 1).set_time("1.500");

    let mut testcase = TestCase::new("passes", TestCaseStatus::success());
    testcase.set_classname("com.example.Basic").set_time("12");
    testsuite.add_testcase(testcase);

    let mut status = TestCaseStatus::failure();
    status
        .set_message("expected <1> but was <2>")
        .set_type("Failure")
        .set_description("java.lang.AssertionError: boom\n\tat Basic.fails(Basic.java:10)");
    let mut testcase = TestCase::new("fails", status);
    testcase.set_classname("com.example.Basic").set_time("7");
    testsuite.add_testcase(testcase);

    let mut testcase = TestCase::new("skips", TestCaseStatus::skipped());
    testcase.set_classname("com.example.Basic").set_time("0");
    testsuite.add_testcase(testcase);

    report.add_testsuite(testsuite);
    report
}

#[test]
fn serializes_suites_and_cases() {
    let xml = basic_report()
        .to_string()
        .expect("serializing basic_report succeeds");

    assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
    assert!(xml.ends_with("</testsuites>\n"), "trailing newline: {xml}");
    assert!(
        xml.contains(
            r#"<testsuite name="suite0" tests="3" failures="1" skipped="1" time="1.500">"#
        ),
        "suite attributes in order: {xml}"
    );
    assert!(
        xml.contains(r#"<testcase name="passes" classname="com.example.Basic" time="12"/>"#),
        "passing case is an empty element: {xml}"
    );
    assert!(xml.contains("<skipped/>"), "skipped marker: {xml}");
}

#[test]
fn escapes_failure_message_and_body() {
    let xml = basic_report()
        .to_string()
        .expect("serializing basic_report succeeds");

    assert!(
        xml.contains(r#"message="expected &lt;1&gt; but was &lt;2&gt;" type="Failure">"#),
        "message is escaped: {xml}"
    );
    assert!(
        xml.contains("java.lang.AssertionError: boom\n\tat Basic.fails(Basic.java:10)</failure>"),
        "stack trace is the element body: {xml}"
    );
}

#[test]
fn uses_two_space_indentation() {
    let xml = basic_report()
        .to_string()
        .expect("serializing basic_report succeeds");

    assert!(xml.contains("\n  <testsuite "), "suite indented by two spaces: {xml}");
    assert!(xml.contains("\n    <testcase "), "case indented by four spaces: {xml}");
    assert!(xml.contains("\n      <skipped/>"), "skipped indented by six spaces: {xml}");
}

#[test]
fn failure_without_description_is_empty_element() {
    let mut testsuite = TestSuite::new("suite");
    let mut status = TestCaseStatus::failure();
    status.set_type("Failure");
    testsuite.add_testcase(TestCase::new("fails", status));

    let mut report = Report::new();
    report.add_testsuite(testsuite);
    let xml = report.to_string().expect("serializing succeeds");

    assert!(
        xml.contains(r#"<failure message="" type="Failure"/>"#),
        "empty failure: {xml}"
    );
}

#[test]
fn empty_report() {
    let xml = Report::new().to_string().expect("serializing succeeds");
    assert!(xml.contains("<testsuites/>"), "empty root: {xml}");
}

#[test]
fn full_output() {
    let mut failed = TestCaseStatus::failure();
    failed
        .set_message("it's \"broken\"")
        .set_type("Failure")
        .set_description("Error: a & b");

    let mut first = TestSuite::new("first");
    first.set_counts(2, 1, 0).set_time("0.020");
    let mut testcase = TestCase::new("fails", failed);
    testcase.set_classname("C").set_time("20");
    first.add_testcase(testcase);
    let mut testcase = TestCase::new("skips", TestCaseStatus::skipped());
    testcase.set_classname("C").set_time("0");
    first.add_testcase(testcase);

    let mut second = TestSuite::new("second");
    second.set_time("0.000");

    let mut report = Report::new();
    report.add_testsuites([first, second]);

    assert_eq!(
        report.to_string().expect("serializing succeeds"),
        indoc! {r#"
            <?xml version="1.0" encoding="UTF-8"?>
            <testsuites>
              <testsuite name="first" tests="2" failures="1" skipped="0" time="0.020">
                <testcase name="fails" classname="C" time="20">
                  <failure message="it&apos;s &quot;broken&quot;" type="Failure">Error: a &amp; b</failure>
                </testcase>
                <testcase name="skips" classname="C" time="0">
                  <skipped/>
                </testcase>
              </testsuite>
              <testsuite name="second" tests="0" failures="0" skipped="0" time="0.000"/>
            </testsuites>
        "#}
    );
}
