// Copyright 2026 the SVG Snapshot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Test-harness integration.
//!
//! The engines report [`ComparisonResult`]s and [`BatchResult`]s. This module turns them into
//! the `{ pass, message }` shape an assertion needs and offers three ways to assert:
//!
//! - the [`assert_svg_snapshot!`](crate::assert_svg_snapshot) and
//!   [`assert_svg_snapshots!`](crate::assert_svg_snapshots) macros,
//! - the [`SvgSnapshotMatcher`] / [`MultipleSvgSnapshotMatcher`] extension traits,
//! - a [`Matcher`] built around any [`VisualComparator`].

use std::path::Path;

use crate::batch::{BatchEngine, BatchResult};
use crate::compare::VisualComparator;
use crate::config::SnapshotConfig;
use crate::engine::{ComparisonResult, SnapshotEngine};
use crate::error::SnapshotError;
use crate::path::SnapshotKey;

/// The outcome of an assertion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatcherResult {
    /// Whether the assertion holds.
    pub pass: bool,
    /// What to show the user.
    pub message: String,
}

impl MatcherResult {
    /// Panics with the message unless the assertion passed.
    #[track_caller]
    pub fn assert(self) {
        assert!(self.pass, "{}", self.message);
    }
}

impl From<ComparisonResult> for MatcherResult {
    fn from(result: ComparisonResult) -> Self {
        Self {
            pass: result.equal,
            message: result.message,
        }
    }
}

impl From<BatchResult> for MatcherResult {
    fn from(result: BatchResult) -> Self {
        Self {
            pass: result.pass(),
            message: result.message(),
        }
    }
}

/// Single and batch snapshot assertions backed by one comparator.
#[derive(Debug)]
pub struct Matcher<C> {
    batch: BatchEngine<C>,
}

impl<C: VisualComparator> Matcher<C> {
    /// Creates a matcher from a comparator and config.
    pub fn new(comparator: C, config: SnapshotConfig) -> Self {
        Self {
            batch: BatchEngine::new(SnapshotEngine::new(comparator, config)),
        }
    }

    /// Asserts that `content` matches the snapshot of `test_file` named `name`.
    pub fn match_svg(
        &self,
        content: &str,
        test_file: &Path,
        name: Option<&str>,
    ) -> Result<MatcherResult, SnapshotError> {
        let key = SnapshotKey::new(test_file, name);
        Ok(self.batch.engine().evaluate(content, &key)?.into())
    }

    /// Asserts that each of `contents` matches the batch snapshot with the same index in `names`.
    pub fn match_svgs<S, N>(
        &self,
        contents: &[S],
        test_file: &Path,
        names: &[N],
    ) -> Result<MatcherResult, SnapshotError>
    where
        S: AsRef<str>,
        N: AsRef<str>,
    {
        Ok(self.batch.evaluate_all(contents, test_file, names)?.into())
    }
}

#[cfg(feature = "raster")]
mod raster_matchers {
    use std::path::{Path, PathBuf};

    use super::{Matcher, MatcherResult};
    use crate::config::SnapshotConfig;
    use crate::error::SnapshotError;
    use crate::path::resolve_test_file;
    use crate::raster::RasterComparator;

    impl Matcher<RasterComparator> {
        /// Creates a raster matcher configured for the package under test.
        ///
        /// Reads `svg-snapshot.toml` from `CARGO_MANIFEST_DIR` (or the working directory) and
        /// the update signal from the process.
        pub fn from_env() -> Result<Self, SnapshotError> {
            let package_dir = std::env::var_os("CARGO_MANIFEST_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("."));
            Ok(Self::new(
                RasterComparator,
                SnapshotConfig::load(&package_dir)?,
            ))
        }
    }

    /// `content.to_match_svg_snapshot(test_file, name)`.
    pub trait SvgSnapshotMatcher {
        /// Compares `self` against the snapshot of `test_file` named `name`.
        fn to_match_svg_snapshot(
            &self,
            test_file: impl AsRef<Path>,
            name: Option<&str>,
        ) -> Result<MatcherResult, SnapshotError>;
    }

    impl SvgSnapshotMatcher for str {
        fn to_match_svg_snapshot(
            &self,
            test_file: impl AsRef<Path>,
            name: Option<&str>,
        ) -> Result<MatcherResult, SnapshotError> {
            Matcher::from_env()?.match_svg(self, test_file.as_ref(), name)
        }
    }

    /// `contents.to_match_multiple_svg_snapshots(test_file, names)`.
    pub trait MultipleSvgSnapshotMatcher {
        /// Compares each item of `self` against the batch snapshot with the same index in `names`.
        fn to_match_multiple_svg_snapshots<N: AsRef<str>>(
            &self,
            test_file: impl AsRef<Path>,
            names: &[N],
        ) -> Result<MatcherResult, SnapshotError>;
    }

    impl<S: AsRef<str>> MultipleSvgSnapshotMatcher for [S] {
        fn to_match_multiple_svg_snapshots<N: AsRef<str>>(
            &self,
            test_file: impl AsRef<Path>,
            names: &[N],
        ) -> Result<MatcherResult, SnapshotError> {
            Matcher::from_env()?.match_svgs(self, test_file.as_ref(), names)
        }
    }

    #[doc(hidden)]
    #[track_caller]
    pub fn __assert_svg_snapshot(
        content: &str,
        manifest_dir: &str,
        file: &str,
        name: Option<&str>,
    ) {
        let test_file = resolve_test_file(Path::new(manifest_dir), Path::new(file));
        match content.to_match_svg_snapshot(&test_file, name) {
            Ok(result) => result.assert(),
            Err(err) => panic!("svg snapshot error: {err}"),
        }
    }

    #[doc(hidden)]
    #[track_caller]
    pub fn __assert_svg_snapshots<S: AsRef<str>, N: AsRef<str>>(
        contents: &[S],
        manifest_dir: &str,
        file: &str,
        names: &[N],
    ) {
        let test_file = resolve_test_file(Path::new(manifest_dir), Path::new(file));
        match contents.to_match_multiple_svg_snapshots(&test_file, names) {
            Ok(result) => result.assert(),
            Err(err) => panic!("svg snapshot error: {err}"),
        }
    }
}

#[cfg(feature = "raster")]
pub use raster_matchers::{MultipleSvgSnapshotMatcher, SvgSnapshotMatcher};

#[cfg(feature = "raster")]
#[doc(hidden)]
pub use raster_matchers::{__assert_svg_snapshot, __assert_svg_snapshots};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeComparator;

    #[test]
    fn translates_single_results() {
        let tmp = tempfile::tempdir().unwrap();
        let test_file = tmp.path().join("tests/svg.rs");
        let matcher = Matcher::new(FakeComparator, SnapshotConfig::default());

        let created = matcher.match_svg("<svg/>", &test_file, None).unwrap();
        assert!(created.pass);
        assert!(created.message.starts_with("Snapshot created at "));

        let matched = matcher.match_svg("<svg/>", &test_file, None).unwrap();
        assert_eq!(
            matched,
            MatcherResult {
                pass: true,
                message: "Snapshot matches".into()
            }
        );

        let failed = matcher.match_svg("<svg></svg>", &test_file, None).unwrap();
        assert!(!failed.pass);
    }

    #[test]
    fn translates_batch_results() {
        let tmp = tempfile::tempdir().unwrap();
        let test_file = tmp.path().join("tests/svg.rs");
        let matcher = Matcher::new(FakeComparator, SnapshotConfig::default());

        let result = matcher
            .match_svgs(&["<a/>", "<b/>"], &test_file, &["a", "b"])
            .unwrap();
        assert!(result.pass);
        assert_eq!(result.message.lines().count(), 2);

        let result = matcher
            .match_svgs(&["<a/>", "<c/>"], &test_file, &["a", "b"])
            .unwrap();
        assert!(!result.pass);
        assert!(result.message.starts_with("Snapshot a matches\n"));
    }

    #[test]
    #[should_panic(expected = "does not match")]
    fn failed_result_panics_on_assert() {
        MatcherResult {
            pass: false,
            message: "Snapshot does not match. Diff saved at x.diff.png".into(),
        }
        .assert();
    }
}
