// Copyright (c) The testng-junit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    ExpectedError,
    errors::Result,
    output::{OutputContext, OutputOpts},
};
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, builder::BoolishValueParser};
use testng_convert::{
    ConvertConfig, ConvertExitCode, ReportConverter, RunOutcome, errors::ConvertError,
    thresholds::ThresholdConfigBuilder,
};

/// Converts TestNG XML reports into JUnit XML.
///
/// Every report matching the pattern is checked against the failure thresholds and rewritten in
/// place. The first report that exceeds a failure threshold fails the build and stops the run.
#[derive(Debug, clap::Parser)]
#[command(
    name = "testng-junit",
    version,
    styles = crate::output::clap_styles::style(),
    max_term_width = 100
)]
pub struct TestngJunitApp {
    /// Glob matching the TestNG reports to convert, e.g. `**/testng-results.xml`
    #[arg(long, value_name = "PATTERN", env = "PLUGIN_REPORT_FILENAME_PATTERN")]
    report_filename_pattern: Option<String>,

    #[clap(flatten)]
    thresholds: ThresholdOpts,

    /// Fail if no reports match the pattern
    #[arg(long, env = "PLUGIN_FAIL_IF_NO_RESULTS", value_parser = BoolishValueParser::new())]
    fail_if_no_results: bool,

    /// Skip reports that are already in JUnit format instead of failing
    #[arg(long, env = "PLUGIN_SKIP_CONVERTED", value_parser = BoolishValueParser::new())]
    skip_converted: bool,

    /// Exit with code 2 if any suite exceeds an unstable threshold
    #[arg(long, env = "PLUGIN_EXIT_UNSTABLE", value_parser = BoolishValueParser::new())]
    exit_unstable: bool,

    #[clap(flatten)]
    output: OutputOpts,
}

#[derive(Debug, Args)]
#[command(next_help_heading = "Threshold options")]
struct ThresholdOpts {
    /// Fail the build if more tests than this fail (0 disables the check)
    #[arg(
        long,
        value_name = "N",
        default_value_t = 0,
        allow_negative_numbers = true,
        env = "PLUGIN_FAILED_FAILS"
    )]
    failed_fails: i64,

    /// Fail the build if more tests than this are skipped (0 disables the check)
    #[arg(
        long,
        value_name = "N",
        default_value_t = 0,
        allow_negative_numbers = true,
        env = "PLUGIN_FAILED_SKIPS"
    )]
    failed_skips: i64,

    /// Mark the build unstable if more tests than this fail (0 disables the check)
    #[arg(
        long,
        value_name = "N",
        default_value_t = 0,
        allow_negative_numbers = true,
        env = "PLUGIN_UNSTABLE_FAILS"
    )]
    unstable_fails: i64,

    /// Mark the build unstable if more tests than this are skipped (0 disables the check)
    #[arg(
        long,
        value_name = "N",
        default_value_t = 0,
        allow_negative_numbers = true,
        env = "PLUGIN_UNSTABLE_SKIPS"
    )]
    unstable_skips: i64,

    /// How failure thresholds are interpreted: 1 for test counts, 2 for percentages
    #[arg(
        long,
        value_name = "MODE",
        allow_negative_numbers = true,
        env = "PLUGIN_THRESHOLD_MODE"
    )]
    threshold_mode: Option<i64>,

    /// Fail the build if any configuration method (setup or teardown) failed
    #[arg(
        long,
        env = "PLUGIN_FAILURE_ON_FAILED_TEST_CONFIG",
        value_parser = BoolishValueParser::new()
    )]
    failure_on_failed_test_config: bool,
}

impl TestngJunitApp {
    /// Initializes the output context.
    pub fn init_output(&self) -> OutputContext {
        self.output.init()
    }

    /// Executes the app in the current directory.
    pub fn exec(self) -> Result<i32> {
        let cwd = std::env::current_dir()
            .map_err(|err| ExpectedError::CurrentDirFailed { err })?;
        let cwd = Utf8PathBuf::try_from(cwd).map_err(|err| ExpectedError::CurrentDirInvalidUtf8 {
            path: err.into_path_buf(),
        })?;
        self.exec_in(&cwd)
    }

    /// Executes the app, resolving relative patterns against `cwd`.
    pub fn exec_in(self, cwd: &Utf8Path) -> Result<i32> {
        let config = self.to_config()?;
        let summary = ReportConverter::new(&config, cwd)?.run()?;

        match summary.outcome() {
            RunOutcome::NoReports => Ok(ConvertExitCode::OK),
            RunOutcome::Passed => {
                tracing::info!("converted {} reports", summary.converted);
                Ok(ConvertExitCode::OK)
            }
            RunOutcome::Unstable => {
                tracing::warn!(
                    "converted {} reports, {} unstable thresholds exceeded: build is UNSTABLE",
                    summary.converted,
                    summary.unstable.len()
                );
                if self.exit_unstable {
                    Ok(ConvertExitCode::UNSTABLE)
                } else {
                    Ok(ConvertExitCode::OK)
                }
            }
        }
    }

    fn to_config(&self) -> Result<ConvertConfig, ConvertError> {
        let opts = &self.thresholds;
        let thresholds = ThresholdConfigBuilder::new()
            .set_failed_fails(opts.failed_fails)
            .set_failed_skips(opts.failed_skips)
            .set_unstable_fails(opts.unstable_fails)
            .set_unstable_skips(opts.unstable_skips)
            .set_mode(opts.threshold_mode)
            .set_failure_on_failed_test_config(opts.failure_on_failed_test_config)
            .build()?;

        Ok(ConvertConfig {
            pattern: self.report_filename_pattern.clone().unwrap_or_default(),
            thresholds,
            fail_if_no_results: self.fail_if_no_results,
            skip_converted: self.skip_converted,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;
    use testng_convert::{errors::ConfigError, thresholds::ThresholdMode};

    fn parse(args: &[&str]) -> TestngJunitApp {
        TestngJunitApp::try_parse_from(std::iter::once("testng-junit").chain(args.iter().copied()))
            .expect("arguments parse")
    }

    #[test]
    fn builds_config() {
        let app = parse(&[
            "--report-filename-pattern",
            "**/testng-results.xml",
            "--failed-fails",
            "5",
            "--unstable-skips",
            "2",
            "--threshold-mode",
            "2",
            "--failure-on-failed-test-config",
            "--skip-converted",
        ]);
        let config = app.to_config().expect("valid config");

        assert_eq!(config.pattern, "**/testng-results.xml");
        assert_eq!(config.thresholds.failed_fails, 5);
        assert_eq!(config.thresholds.failed_skips, 0);
        assert_eq!(config.thresholds.unstable_skips, 2);
        assert_eq!(config.thresholds.mode, ThresholdMode::Percentage);
        assert!(config.thresholds.failure_on_failed_test_config);
        assert!(config.skip_converted);
        assert!(!config.fail_if_no_results);
    }

    #[test]
    fn negative_threshold_is_config_error() {
        let app = parse(&["--failed-skips", "-1", "--threshold-mode", "1"]);
        let err = app.to_config().expect_err("negative threshold rejected");
        assert!(
            matches!(
                err,
                ConvertError::Config(ConfigError::NegativeThreshold {
                    name: _,
                    value: -1
                })
            ),
            "{err:?}"
        );
    }

    #[test]
    fn missing_mode_is_config_error() {
        let app = parse(&["--report-filename-pattern", "*.xml"]);
        let err = app.to_config().expect_err("mode is required");
        assert!(
            matches!(err, ConvertError::Config(ConfigError::MissingMode)),
            "{err:?}"
        );
    }

    #[test]
    fn debug_assert() {
        use clap::CommandFactory;
        TestngJunitApp::command().debug_assert();
    }
}
