// Copyright (c) The testng-junit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::output::{NO_HEADING_TARGET, StderrStyles};
use owo_colors::OwoColorize;
use std::{error::Error, path::PathBuf};
use testng_convert::{ConvertExitCode, errors::ConvertError};
use thiserror::Error;

pub(crate) type Result<T, E = ExpectedError> = std::result::Result<T, E>;

// Note that the #[error()] strings are mostly placeholder messages -- the expected way to print out
// errors is with the display_to_stderr method, which colorizes errors.

/// An error that stopped the conversion.
#[derive(Debug, Error)]
#[doc(hidden)]
pub enum ExpectedError {
    #[error("could not determine the current directory")]
    CurrentDirFailed { err: std::io::Error },
    #[error("current directory is not valid UTF-8")]
    CurrentDirInvalidUtf8 { path: PathBuf },
    #[error("conversion failed")]
    ConvertFailed {
        #[from]
        err: ConvertError,
    },
}

impl ExpectedError {
    /// Returns the exit code for the process.
    pub fn process_exit_code(&self) -> i32 {
        match self {
            Self::CurrentDirFailed { .. } | Self::CurrentDirInvalidUtf8 { .. } => {
                ConvertExitCode::SETUP_ERROR
            }
            Self::ConvertFailed { err } => match err {
                ConvertError::Config(_) | ConvertError::Discovery(_) => {
                    ConvertExitCode::SETUP_ERROR
                }
                ConvertError::NoReportsFound { .. } => ConvertExitCode::NO_REPORTS_FOUND,
                ConvertError::ParseFailed { .. } => ConvertExitCode::PARSE_FAILED,
                ConvertError::ValidationFailed { .. } => ConvertExitCode::THRESHOLD_EXCEEDED,
                ConvertError::ReadFailed { .. }
                | ConvertError::SerializeFailed { .. }
                | ConvertError::WriteFailed { .. } => ConvertExitCode::WRITE_OUTPUT_ERROR,
                _ => 1,
            },
        }
    }

    /// Displays this error to stderr.
    pub fn display_to_stderr(&self, styles: &StderrStyles) {
        let mut next_error: Option<&(dyn Error + 'static)> = match self {
            Self::CurrentDirFailed { err } => {
                tracing::error!("could not determine the current directory");
                Some(err)
            }
            Self::CurrentDirInvalidUtf8 { path } => {
                tracing::error!(
                    "current directory `{}` is not valid UTF-8",
                    path.display().style(styles.bold)
                );
                None
            }
            Self::ConvertFailed { err } => display_convert_error(err, styles),
        };

        while let Some(err) = next_error {
            tracing::error!(target: NO_HEADING_TARGET, "\nCaused by:\n  {}", err);
            next_error = err.source();
        }
    }
}

fn display_convert_error<'a>(
    err: &'a ConvertError,
    styles: &StderrStyles,
) -> Option<&'a (dyn Error + 'static)> {
    match err {
        ConvertError::Config(err) => {
            tracing::error!("invalid configuration: {err}");
            err.source()
        }
        ConvertError::Discovery(err) => {
            tracing::error!("{err}");
            err.source()
        }
        ConvertError::NoReportsFound { pattern } => {
            tracing::error!(
                "no TestNG XML report files found matching `{}`",
                pattern.style(styles.bold)
            );
            None
        }
        ConvertError::ReadFailed { path, err } => {
            tracing::error!("failed to read `{}`", path.style(styles.bold));
            Some(err)
        }
        ConvertError::ParseFailed { path, err } => {
            tracing::error!(
                "failed to parse TestNG XML at `{}`",
                path.style(styles.bold)
            );
            Some(err)
        }
        ConvertError::ValidationFailed { path, err } => {
            tracing::error!(
                "suite `{}` in `{}` failed validation: {err}",
                err.suite().style(styles.bold),
                path.style(styles.bold)
            );
            err.source()
        }
        ConvertError::SerializeFailed { path, err } => {
            tracing::error!(
                "failed to serialize JUnit XML for `{}`",
                path.style(styles.bold)
            );
            Some(err)
        }
        ConvertError::WriteFailed { path, err } => {
            tracing::error!("failed to write `{}`", path.style(styles.bold));
            Some(err)
        }
        other => {
            tracing::error!("{other}");
            other.source()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use testng_convert::errors::{ConfigError, TestngParseError, ValidationError};

    #[test]
    fn exit_codes() {
        let cases = [
            (
                ConvertError::Config(ConfigError::MissingMode),
                ConvertExitCode::SETUP_ERROR,
            ),
            (
                ConvertError::NoReportsFound {
                    pattern: "*.xml".to_owned(),
                },
                ConvertExitCode::NO_REPORTS_FOUND,
            ),
            (
                ConvertError::ParseFailed {
                    path: "a.xml".into(),
                    err: TestngParseError::MissingRoot,
                },
                ConvertExitCode::PARSE_FAILED,
            ),
            (
                ConvertError::ValidationFailed {
                    path: "a.xml".into(),
                    err: ValidationError::ConfigMethodFailed {
                        suite: "s".to_owned(),
                        class: "C".to_owned(),
                        method: "setUp".to_owned(),
                    },
                },
                ConvertExitCode::THRESHOLD_EXCEEDED,
            ),
            (
                ConvertError::WriteFailed {
                    path: "a.xml".into(),
                    err: std::io::Error::other("disk full"),
                },
                ConvertExitCode::WRITE_OUTPUT_ERROR,
            ),
        ];

        for (err, expected) in cases {
            let message = err.to_string();
            let err = ExpectedError::from(err);
            assert_eq!(err.process_exit_code(), expected, "for error: {message}");
        }
    }
}
