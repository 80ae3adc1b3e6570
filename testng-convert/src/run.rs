// Copyright (c) The testng-junit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Running a conversion over every report matching a pattern.

use crate::{
    convert::convert_report,
    discover::ReportGlob,
    errors::{ConvertError, TestngParseError},
    testng::TestngReport,
    thresholds::{ThresholdConfig, UnstableReason, evaluate_report},
};
use camino::{Utf8Path, Utf8PathBuf};
use std::{fs, io::Write};

/// Configuration for a conversion run.
#[derive(Clone, Debug)]
pub struct ConvertConfig {
    /// The report filename pattern.
    pub pattern: String,

    /// The thresholds every suite is evaluated against.
    pub thresholds: ThresholdConfig,

    /// If true, a pattern that matches nothing is an error.
    pub fail_if_no_results: bool,

    /// If true, reports that are already in JUnit format are skipped rather than failing the run.
    pub skip_converted: bool,
}

/// Converts every report matching a pattern, in place.
#[derive(Clone, Debug)]
pub struct ReportConverter<'cfg> {
    config: &'cfg ConvertConfig,
    glob: ReportGlob,
    cwd: Utf8PathBuf,
}

impl<'cfg> ReportConverter<'cfg> {
    /// Creates a new converter. Relative patterns are resolved against `cwd`.
    pub fn new(
        config: &'cfg ConvertConfig,
        cwd: impl Into<Utf8PathBuf>,
    ) -> Result<Self, ConvertError> {
        let glob = ReportGlob::new(&config.pattern)?;
        Ok(Self {
            config,
            glob,
            cwd: cwd.into(),
        })
    }

    /// Runs the conversion.
    ///
    /// Files are processed one at a time in discovery order. The first error stops the run, and
    /// files after the failing one are left untouched.
    pub fn run(&self) -> Result<RunSummary, ConvertError> {
        let paths = self.glob.find_in(&self.cwd)?;
        if paths.is_empty() {
            if self.config.fail_if_no_results {
                return Err(ConvertError::NoReportsFound {
                    pattern: self.glob.as_str().to_owned(),
                });
            }
            tracing::info!(
                "no report files found matching `{}`, nothing to do",
                self.glob.as_str()
            );
            return Ok(RunSummary::default());
        }

        tracing::debug!("found {} report files", paths.len());

        let mut summary = RunSummary::default();
        for path in &paths {
            match convert_file(path, &self.config.thresholds) {
                Ok(outcome) => {
                    summary.converted += 1;
                    summary.unstable.extend(outcome.unstable);
                }
                Err(ConvertError::ParseFailed {
                    path,
                    err: TestngParseError::AlreadyJunit,
                }) if self.config.skip_converted => {
                    tracing::warn!("skipping `{path}`: already in JUnit format");
                    summary.skipped += 1;
                }
                Err(err) => return Err(err),
            }
        }

        Ok(summary)
    }
}

/// The result of converting a single file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FileOutcome {
    /// Unstable thresholds exceeded by suites in this file.
    pub unstable: Vec<UnstableReason>,
}

/// Converts a single report in place.
///
/// The file is only rewritten if every suite passes validation. The rewrite is atomic. If `path`
/// is a symlink, the file it points to is rewritten and the link is kept.
pub fn convert_file(
    path: &Utf8Path,
    thresholds: &ThresholdConfig,
) -> Result<FileOutcome, ConvertError> {
    tracing::info!("processing file `{path}`");

    let bytes = fs::read(path).map_err(|err| ConvertError::ReadFailed {
        path: path.to_owned(),
        err,
    })?;
    let report =
        TestngReport::from_bytes(&bytes).map_err(|err| ConvertError::ParseFailed {
            path: path.to_owned(),
            err,
        })?;
    let verdict =
        evaluate_report(&report, thresholds).map_err(|err| ConvertError::ValidationFailed {
            path: path.to_owned(),
            err,
        })?;

    let mut output = Vec::new();
    convert_report(&report)
        .serialize(&mut output)
        .map_err(|err| ConvertError::SerializeFailed {
            path: path.to_owned(),
            err,
        })?;

    // The rename must replace the report itself, not a symlink to it.
    let target = path
        .canonicalize_utf8()
        .map_err(|err| ConvertError::WriteFailed {
            path: path.to_owned(),
            err,
        })?;
    atomicwrites::AtomicFile::new(&target, atomicwrites::AllowOverwrite)
        .write(|file| file.write_all(&output))
        .map_err(|error| ConvertError::WriteFailed {
            path: path.to_owned(),
            err: match error {
                atomicwrites::Error::Internal(err) | atomicwrites::Error::User(err) => err,
            },
        })?;

    tracing::info!("successfully converted `{path}`");
    Ok(FileOutcome {
        unstable: verdict.unstable,
    })
}

/// A summary of a successful run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunSummary {
    /// The number of files converted.
    pub converted: usize,

    /// The number of files skipped because they were already converted.
    pub skipped: usize,

    /// Every unstable threshold exceeded during the run.
    pub unstable: Vec<UnstableReason>,
}

impl RunSummary {
    /// Returns the overall outcome of the run.
    pub fn outcome(&self) -> RunOutcome {
        if self.converted == 0 && self.skipped == 0 {
            RunOutcome::NoReports
        } else if !self.unstable.is_empty() {
            RunOutcome::Unstable
        } else {
            RunOutcome::Passed
        }
    }
}

/// The overall outcome of a successful run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// No reports matched the pattern.
    NoReports,

    /// Every report was converted and no unstable thresholds were exceeded.
    Passed,

    /// Every report was converted, but at least one suite exceeded an unstable threshold.
    Unstable,
}
