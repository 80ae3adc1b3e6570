// Copyright (c) The testng-junit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Event-driven reader for `testng-results.xml`.

use super::{Class, Param, Suite, TestMethod, TestStatus, TestngReport};
use crate::errors::TestngParseError;
use quick_xml::{
    Reader,
    events::{BytesStart, Event},
};
use std::{io::BufRead, mem};

const TAG_RESULTS: &[u8] = b"testng-results";
const TAG_JUNIT_RESULTS: &[u8] = b"testsuites";
const TAG_SUITE: &[u8] = b"suite";
const TAG_TEST: &[u8] = b"test";
const TAG_CLASS: &[u8] = b"class";
const TAG_TEST_METHOD: &[u8] = b"test-method";
const TAG_PARAMS: &[u8] = b"params";
const TAG_PARAM: &[u8] = b"param";
const TAG_VALUE: &[u8] = b"value";
const TAG_EXCEPTION: &[u8] = b"exception";
const TAG_MESSAGE: &[u8] = b"message";
const TAG_FULL_STACKTRACE: &[u8] = b"full-stacktrace";

pub(super) fn parse_report(reader: impl BufRead) -> Result<TestngReport, TestngParseError> {
    let mut reader = Reader::from_reader(reader);
    reader.config_mut().trim_text(true);

    let mut parser = ReportParser::default();
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => parser.open(&e)?,
            Event::Empty(e) => {
                parser.open(&e)?;
                parser.close();
            }
            Event::End(_) => parser.close(),
            Event::Text(text) => {
                if parser.collecting_text() {
                    parser.push_text(&text.unescape()?);
                }
            }
            Event::CData(cdata) => {
                if parser.collecting_text() {
                    parser.push_text(std::str::from_utf8(&cdata)?);
                }
            }
            Event::Eof => break,
            _ => {}
        }

        // Anything after the root element is ignored.
        if parser.finished {
            break;
        }
        buf.clear();
    }

    parser.finish()
}

/// Where an element sits in the TestNG document structure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Context {
    Results,
    Suite,
    Test,
    Class,
    Method,
    Params,
    Param,
    ParamValue,
    Exception,
    Message,
    FullStacktrace,
    Ignored,
}

impl Context {
    fn child(self, name: &[u8]) -> Self {
        match (self, name) {
            (Self::Results, TAG_SUITE) => Self::Suite,
            (Self::Suite, TAG_TEST) => Self::Test,
            (Self::Suite | Self::Test, TAG_CLASS) => Self::Class,
            (Self::Class, TAG_TEST_METHOD) => Self::Method,
            (Self::Method, TAG_PARAMS) => Self::Params,
            (Self::Params, TAG_PARAM) => Self::Param,
            (Self::Param, TAG_VALUE) => Self::ParamValue,
            (Self::Method, TAG_EXCEPTION) => Self::Exception,
            (Self::Exception, TAG_MESSAGE) => Self::Message,
            (Self::Exception, TAG_FULL_STACKTRACE) => Self::FullStacktrace,
            _ => Self::Ignored,
        }
    }

    fn collects_text(self) -> bool {
        matches!(
            self,
            Self::Param | Self::ParamValue | Self::Message | Self::FullStacktrace
        )
    }
}

#[derive(Debug)]
struct Frame {
    context: Context,
    name: String,
}

#[derive(Debug, Default)]
struct ReportParser {
    report: Option<TestngReport>,
    stack: Vec<Frame>,
    suite: Option<Suite>,
    class: Option<Class>,
    method: Option<TestMethod>,
    param: Option<Param>,
    text: String,
    finished: bool,
}

impl ReportParser {
    fn open(&mut self, e: &BytesStart<'_>) -> Result<(), TestngParseError> {
        let name = e.name();
        let context = match self.stack.last() {
            Some(frame) => frame.context.child(name.as_ref()),
            None => match name.as_ref() {
                TAG_RESULTS => Context::Results,
                TAG_JUNIT_RESULTS => return Err(TestngParseError::AlreadyJunit),
                other => {
                    return Err(TestngParseError::UnexpectedRoot {
                        found: String::from_utf8_lossy(other).into_owned(),
                    });
                }
            },
        };

        match context {
            Context::Results => self.report = Some(TestngReport::default()),
            Context::Suite => self.suite = Some(read_suite(e)?),
            Context::Class => self.class = Some(read_class(e)?),
            Context::Method => self.method = Some(read_method(e)?),
            Context::Param => {
                self.param = Some(read_param(e)?);
                self.text.clear();
            }
            Context::Message | Context::FullStacktrace => self.text.clear(),
            Context::Test
            | Context::Params
            | Context::ParamValue
            | Context::Exception
            | Context::Ignored => {}
        }

        self.stack.push(Frame {
            context,
            name: String::from_utf8_lossy(name.as_ref()).into_owned(),
        });
        Ok(())
    }

    fn close(&mut self) {
        let Some(frame) = self.stack.pop() else {
            return;
        };

        match frame.context {
            Context::Results => self.finished = true,
            Context::Suite => {
                if let (Some(suite), Some(report)) = (self.suite.take(), self.report.as_mut()) {
                    report.suites.push(suite);
                }
            }
            Context::Class => {
                if let (Some(class), Some(suite)) = (self.class.take(), self.suite.as_mut()) {
                    suite.classes.push(class);
                }
            }
            Context::Method => {
                if let (Some(method), Some(class)) = (self.method.take(), self.class.as_mut()) {
                    class.methods.push(method);
                }
            }
            Context::Param => {
                if let (Some(mut param), Some(method)) = (self.param.take(), self.method.as_mut())
                {
                    param.value = mem::take(&mut self.text);
                    method.params.push(param);
                }
            }
            Context::Message => {
                if let Some(method) = self.method.as_mut() {
                    method.exception_message = Some(mem::take(&mut self.text));
                }
            }
            Context::FullStacktrace => {
                if let Some(method) = self.method.as_mut() {
                    method.stack_trace = Some(mem::take(&mut self.text));
                }
            }
            Context::Test
            | Context::Params
            | Context::ParamValue
            | Context::Exception
            | Context::Ignored => {}
        }
    }

    fn collecting_text(&self) -> bool {
        self.stack
            .last()
            .is_some_and(|frame| frame.context.collects_text())
    }

    fn push_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    fn finish(self) -> Result<TestngReport, TestngParseError> {
        if let Some(frame) = self.stack.last() {
            return Err(TestngParseError::UnexpectedEof {
                element: frame.name.clone(),
            });
        }
        self.report.ok_or(TestngParseError::MissingRoot)
    }
}

fn read_suite(e: &BytesStart<'_>) -> Result<Suite, TestngParseError> {
    let mut suite = Suite::default();
    for attr in e.attributes() {
        let attr = attr?;
        let value = attr.unescape_value()?;
        match attr.key.as_ref() {
            b"name" => suite.name = value.into_owned(),
            b"duration-ms" => suite.duration_ms = value.into_owned(),
            b"tests" => suite.tests = parse_count("suite", "tests", &value)?,
            b"failures" => suite.failures = parse_count("suite", "failures", &value)?,
            b"skipped" => suite.skipped = parse_count("suite", "skipped", &value)?,
            _ => {}
        }
    }
    Ok(suite)
}

fn read_class(e: &BytesStart<'_>) -> Result<Class, TestngParseError> {
    let mut class = Class::default();
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == b"name" {
            class.name = attr.unescape_value()?.into_owned();
        }
    }
    Ok(class)
}

fn read_method(e: &BytesStart<'_>) -> Result<TestMethod, TestngParseError> {
    let mut method = TestMethod::default();
    for attr in e.attributes() {
        let attr = attr?;
        let value = attr.unescape_value()?;
        match attr.key.as_ref() {
            b"name" => method.name = value.into_owned(),
            b"class" => method.class_name = value.into_owned(),
            b"status" => method.status = TestStatus::new(&value),
            b"duration-ms" => method.duration_ms = value.into_owned(),
            b"is-config" => method.is_config = parse_bool("test-method", "is-config", &value)?,
            _ => {}
        }
    }
    Ok(method)
}

fn read_param(e: &BytesStart<'_>) -> Result<Param, TestngParseError> {
    let mut param = Param::default();
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == b"name" {
            param.name = attr.unescape_value()?.into_owned();
        }
    }
    Ok(param)
}

/// Parses a count attribute. Surrounding whitespace is ignored and an empty value is zero.
fn parse_count(
    element: &'static str,
    attribute: &'static str,
    value: &str,
) -> Result<usize, TestngParseError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed
        .parse()
        .map_err(|_| TestngParseError::InvalidAttribute {
            element,
            attribute,
            value: value.to_owned(),
            expected: "a non-negative integer",
        })
}

/// Parses a boolean attribute. An empty value is false.
fn parse_bool(
    element: &'static str,
    attribute: &'static str,
    value: &str,
) -> Result<bool, TestngParseError> {
    match value.trim() {
        "" | "0" | "f" | "F" | "false" | "FALSE" | "False" => Ok(false),
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Ok(true),
        _ => Err(TestngParseError::InvalidAttribute {
            element,
            attribute,
            value: value.to_owned(),
            expected: "a boolean",
        }),
    }
}
