// Copyright (c) The testng-junit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Serialize a `Report`.

use crate::{Report, SerializeError, TestCase, TestCaseStatus, TestSuite};
use quick_xml::{
    Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};
use std::io;

static TESTSUITES_TAG: &str = "testsuites";
static TESTSUITE_TAG: &str = "testsuite";
static TESTCASE_TAG: &str = "testcase";
static FAILURE_TAG: &str = "failure";
static SKIPPED_TAG: &str = "skipped";

pub(crate) fn serialize_report(report: &Report, writer: impl io::Write) -> Result<(), SerializeError> {
    let mut writer = Writer::new_with_indent(writer, b' ', 2);

    let decl = BytesDecl::new("1.0", Some("UTF-8"), None);
    writer.write_event(Event::Decl(decl))?;

    serialize_report_impl(report, &mut writer)?;

    // Add a trailing newline.
    writer.get_mut().write_all(b"\n")?;
    Ok(())
}

fn serialize_report_impl(
    report: &Report,
    writer: &mut Writer<impl io::Write>,
) -> Result<(), SerializeError> {
    let Report { testsuites } = report;

    if testsuites.is_empty() {
        writer.write_event(Event::Empty(BytesStart::new(TESTSUITES_TAG)))?;
        return Ok(());
    }

    serialize_empty_start_tag(TESTSUITES_TAG, writer)?;
    for testsuite in testsuites {
        serialize_testsuite(testsuite, writer)?;
    }
    serialize_end_tag(TESTSUITES_TAG, writer)?;

    Ok(())
}

fn serialize_testsuite(
    testsuite: &TestSuite,
    writer: &mut Writer<impl io::Write>,
) -> Result<(), SerializeError> {
    // Use the destructuring syntax to ensure that all fields are handled.
    let TestSuite {
        name,
        tests,
        failures,
        skipped,
        time,
        testcases,
    } = testsuite;

    let mut testsuite_tag = BytesStart::new(TESTSUITE_TAG);
    testsuite_tag.extend_attributes([
        ("name", name.as_str()),
        ("tests", tests.to_string().as_str()),
        ("failures", failures.to_string().as_str()),
        ("skipped", skipped.to_string().as_str()),
        ("time", time.as_str()),
    ]);

    if testcases.is_empty() {
        writer.write_event(Event::Empty(testsuite_tag))?;
        return Ok(());
    }

    writer.write_event(Event::Start(testsuite_tag))?;
    for testcase in testcases {
        serialize_testcase(testcase, writer)?;
    }
    serialize_end_tag(TESTSUITE_TAG, writer)?;

    Ok(())
}

fn serialize_testcase(
    testcase: &TestCase,
    writer: &mut Writer<impl io::Write>,
) -> Result<(), SerializeError> {
    let TestCase {
        name,
        classname,
        time,
        status,
    } = testcase;

    let mut testcase_tag = BytesStart::new(TESTCASE_TAG);
    testcase_tag.extend_attributes([
        ("name", name.as_str()),
        ("classname", classname.as_str()),
        ("time", time.as_str()),
    ]);

    match status {
        TestCaseStatus::Success => {
            writer.write_event(Event::Empty(testcase_tag))?;
        }
        TestCaseStatus::Failure {
            message,
            ty,
            description,
        } => {
            writer.write_event(Event::Start(testcase_tag))?;
            serialize_failure(message, ty, description, writer)?;
            serialize_end_tag(TESTCASE_TAG, writer)?;
        }
        TestCaseStatus::Skipped => {
            writer.write_event(Event::Start(testcase_tag))?;
            writer.write_event(Event::Empty(BytesStart::new(SKIPPED_TAG)))?;
            serialize_end_tag(TESTCASE_TAG, writer)?;
        }
    }

    Ok(())
}

fn serialize_failure(
    message: &str,
    ty: &str,
    description: &str,
    writer: &mut Writer<impl io::Write>,
) -> Result<(), SerializeError> {
    let mut tag = BytesStart::new(FAILURE_TAG);
    tag.extend_attributes([("message", message), ("type", ty)]);

    if description.is_empty() {
        writer.write_event(Event::Empty(tag))?;
    } else {
        writer.write_event(Event::Start(tag))?;
        writer.write_event(Event::Text(BytesText::new(description)))?;
        serialize_end_tag(FAILURE_TAG, writer)?;
    }

    Ok(())
}

fn serialize_empty_start_tag(
    tag_name: &'static str,
    writer: &mut Writer<impl io::Write>,
) -> Result<(), SerializeError> {
    writer.write_event(Event::Start(BytesStart::new(tag_name)))?;
    Ok(())
}

fn serialize_end_tag(
    tag_name: &'static str,
    writer: &mut Writer<impl io::Write>,
) -> Result<(), SerializeError> {
    writer.write_event(Event::End(BytesEnd::new(tag_name)))?;
    Ok(())
}
