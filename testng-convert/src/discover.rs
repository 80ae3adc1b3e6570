// Copyright (c) The testng-junit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Finding report files from an Ant-style glob.
//!
//! `*` and `?` match within a single path component, `**` matches any number of directories
//! (including none), and `[...]` and `{a,b}` work as usual. Relative patterns are resolved against
//! a working directory; absolute patterns are matched as-is.

use crate::errors::{ConfigError, ConvertError, DiscoveryError};
use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use globset::{GlobBuilder, GlobMatcher};
use itertools::Itertools;
use walkdir::WalkDir;

const GLOB_META: &[char] = &['*', '?', '[', ']', '{', '}'];

/// A compiled report filename pattern.
#[derive(Clone, Debug)]
pub struct ReportGlob {
    pattern: String,
    matcher: GlobMatcher,
    /// The leading components of the pattern that contain no glob syntax.
    base: Utf8PathBuf,
    /// The maximum walk depth below `base`, or `None` if the pattern contains `**`.
    max_depth: Option<usize>,
}

impl ReportGlob {
    /// Compiles a pattern.
    pub fn new(pattern: &str) -> Result<Self, ConvertError> {
        let normalized = normalize(pattern);
        if normalized.is_empty() {
            return Err(ConfigError::MissingPattern.into());
        }

        let glob = GlobBuilder::new(normalized)
            // `*` must not cross directories; only `**` does.
            .literal_separator(true)
            // Allow `{a,}` to match both `a` and nothing.
            .empty_alternates(true)
            .build()
            .map_err(|err| DiscoveryError::InvalidGlob {
                pattern: pattern.to_owned(),
                err,
            })?;

        let components: Vec<&str> = normalized.split('/').collect();
        // The last component is always walked so that a literal file name still goes through the
        // matcher.
        let literal_len = components[..components.len() - 1]
            .iter()
            .take_while(|component| !component.contains(GLOB_META))
            .count();
        let base = match components[..literal_len].join("/") {
            // A pattern such as `/*.xml`.
            joined if joined.is_empty() && literal_len > 0 => Utf8PathBuf::from("/"),
            joined => Utf8PathBuf::from(joined),
        };

        let rest = &components[literal_len..];
        let max_depth = if rest.iter().any(|component| component.contains("**")) {
            None
        } else {
            Some(rest.len())
        };

        Ok(Self {
            pattern: pattern.to_owned(),
            matcher: glob.compile_matcher(),
            base,
            max_depth,
        })
    }

    /// Returns the pattern as provided.
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Returns true if this pattern is absolute.
    pub fn is_absolute(&self) -> bool {
        self.base.is_absolute()
    }

    /// Returns true if the pattern matches the given path.
    ///
    /// Relative patterns are matched against paths relative to the working directory.
    pub fn is_match(&self, path: &Utf8Path) -> bool {
        self.matcher.is_match(slash_path(path))
    }

    /// Returns every regular file matching the pattern.
    ///
    /// Entries are returned in walk order, with each directory's entries sorted by file name.
    /// A base directory that does not exist produces no matches.
    pub fn find_in(&self, cwd: &Utf8Path) -> Result<Vec<Utf8PathBuf>, ConvertError> {
        let walk_root = cwd.join(&self.base);
        if !walk_root.is_dir() {
            tracing::debug!("report directory `{walk_root}` does not exist");
            return Ok(Vec::new());
        }

        let mut walker = WalkDir::new(&walk_root)
            .follow_links(true)
            .sort_by_file_name();
        if let Some(max_depth) = self.max_depth {
            walker = walker.max_depth(max_depth);
        }

        let mut matches = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|err| DiscoveryError::Walk {
                path: walk_root.clone(),
                err,
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = match Utf8PathBuf::from_path_buf(entry.into_path()) {
                Ok(path) => path,
                Err(path) => {
                    tracing::warn!("skipping non-UTF-8 path `{}`", path.display());
                    continue;
                }
            };

            let candidate = if self.is_absolute() {
                path.clone()
            } else {
                match path.strip_prefix(cwd) {
                    Ok(relative) => relative.to_owned(),
                    Err(_) => path.clone(),
                }
            };

            if self.is_match(&candidate) {
                tracing::debug!("found report `{path}`");
                matches.push(path);
            }
        }

        Ok(matches)
    }
}

/// Strips a leading `./` so that `./reports/*.xml` and `reports/*.xml` behave the same.
fn normalize(pattern: &str) -> &str {
    let mut pattern = pattern.trim();
    while let Some(rest) = pattern.strip_prefix("./") {
        pattern = rest;
    }
    pattern
}

/// Renders a path with `/` separators, which is what the glob is compiled against.
fn slash_path(path: &Utf8Path) -> String {
    if path.is_absolute() && cfg!(unix) {
        return path.as_str().to_owned();
    }
    path.components()
        .filter(|component| !matches!(component, Utf8Component::CurDir))
        .map(|component| component.as_str())
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino_tempfile::{Utf8TempDir, tempdir};
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn touch(dir: &Utf8TempDir, rel: &str) {
        let path = dir.path().join(rel);
        std::fs::create_dir_all(path.parent().expect("path has a parent"))
            .expect("created parent dir");
        std::fs::write(&path, "<testng-results/>").expect("wrote file");
    }

    fn layout() -> Utf8TempDir {
        let dir = tempdir().expect("created temp dir");
        for rel in [
            "testng-results.xml",
            "target/surefire-reports/testng-results.xml",
            "target/surefire-reports/b-results.xml",
            "target/surefire-reports/notes.txt",
            "module/target/surefire-reports/testng-results.xml",
        ] {
            touch(&dir, rel);
        }
        dir
    }

    fn relative(dir: &Utf8TempDir, paths: Vec<Utf8PathBuf>) -> Vec<String> {
        paths
            .iter()
            .map(|path| slash_path(path.strip_prefix(dir.path()).expect("path is in temp dir")))
            .collect()
    }

    #[test_case(
        "target/surefire-reports/*.xml",
        &["target/surefire-reports/b-results.xml", "target/surefire-reports/testng-results.xml"]
        ; "single directory"
    )]
    #[test_case(
        "**/testng-results.xml",
        &[
            "module/target/surefire-reports/testng-results.xml",
            "target/surefire-reports/testng-results.xml",
            "testng-results.xml",
        ]
        ; "recursive"
    )]
    #[test_case("./testng-results.xml", &["testng-results.xml"] ; "literal with dot prefix")]
    #[test_case("*.xml", &["testng-results.xml"] ; "star does not cross directories")]
    #[test_case("missing/**/*.xml", &[] ; "missing base directory")]
    #[test_case("target/*/{b,c}-results.xml", &["target/surefire-reports/b-results.xml"] ; "alternation")]
    fn finds_reports(pattern: &str, expected: &[&str]) {
        let dir = layout();
        let glob = ReportGlob::new(pattern).expect("pattern compiles");
        let found = glob.find_in(dir.path()).expect("discovery succeeds");
        assert_eq!(relative(&dir, found), expected);
    }

    #[test]
    fn absolute_pattern() {
        let dir = layout();
        let pattern = format!("{}/target/**/testng-results.xml", dir.path());
        let glob = ReportGlob::new(&pattern).expect("pattern compiles");
        assert!(glob.is_absolute());

        // The working directory is irrelevant for absolute patterns.
        let elsewhere = tempdir().expect("created temp dir");
        let found = glob.find_in(elsewhere.path()).expect("discovery succeeds");
        assert_eq!(
            relative(&dir, found),
            ["target/surefire-reports/testng-results.xml"]
        );
    }

    #[test]
    fn empty_pattern_is_config_error() {
        let err = ReportGlob::new("  ").expect_err("empty pattern rejected");
        assert!(
            matches!(err, ConvertError::Config(ConfigError::MissingPattern)),
            "{err:?}"
        );
    }

    #[test]
    fn invalid_pattern_is_discovery_error() {
        let err = ReportGlob::new("reports/[a-.xml").expect_err("unclosed class rejected");
        assert!(
            matches!(err, ConvertError::Discovery(DiscoveryError::InvalidGlob { .. })),
            "{err:?}"
        );
    }
}
