// Copyright 2026 the SVG Snapshot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Snapshot path resolution.
//!
//! Every artifact lives in a `__snapshots__` directory next to the test that owns it:
//!
//! ```text
//! tests/render.rs
//! tests/__snapshots__/render.snap.svg      (reference)
//! tests/__snapshots__/render.diff.png      (written on mismatch)
//! ```
//!
//! Everything in this module is pure; nothing touches the filesystem except
//! [`resolve_test_file`], which only probes for existence.

use std::path::{Path, PathBuf};

/// Name of the directory holding snapshot artifacts.
pub const SNAPSHOT_DIR: &str = "__snapshots__";

/// Suffix of a reference artifact.
pub const SNAPSHOT_SUFFIX: &str = ".snap.svg";

/// Suffix of a diff artifact.
pub const DIFF_SUFFIX: &str = ".diff.png";

/// Whole-extension suffixes removed from a test file name, longest first.
const FILE_SUFFIXES: &[&str] = &[".test.tsx", ".test.jsx", ".test.ts", ".test.js", ".rs"];

/// Stem suffixes removed after the extension is gone.
const STEM_SUFFIXES: &[&str] = &[".test", "_tests", "_test"];

/// Identifies one snapshot artifact.
///
/// The `identity` is the test file path with its test suffix stripped (see [`test_identity`]).
/// Within one identity, names must be unique or artifacts will collide.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SnapshotKey {
    identity: PathBuf,
    name: Option<String>,
}

impl SnapshotKey {
    /// Key for a snapshot owned by `test_file`, optionally named.
    ///
    /// An empty name is treated the same as no name.
    pub fn new(test_file: impl AsRef<Path>, name: Option<&str>) -> Self {
        Self {
            identity: test_identity(test_file.as_ref()),
            name: name.filter(|n| !n.is_empty()).map(str::to_owned),
        }
    }

    /// Key for one item of a batch.
    ///
    /// Batch items share the `__snapshots__` directory with every other test in the same
    /// directory, so their file is prefixed with the test's basename: `<basename>-<name>`.
    ///
    /// The prefixed name shares a namespace with single snapshots of the same directory: item
    /// `c` of `shapes.rs` and a single snapshot named `shapes-c` resolve to the same file, and
    /// an empty item name resolves to the unnamed snapshot of `shapes.rs`. Avoid single names
    /// of the form `<basename>-<item>` in tests that also use batches.
    pub fn batch_item(test_file: impl AsRef<Path>, name: &str) -> Self {
        let mut key = Self::new(test_file, None);
        if !name.is_empty() {
            key.name = Some(format!("{}-{name}", key.basename()));
        }
        key
    }

    /// The stripped test path this key belongs to.
    pub fn identity(&self) -> &Path {
        &self.identity
    }

    /// The logical name, if one was given.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The directory holding this key's artifacts.
    pub fn snapshot_dir(&self) -> PathBuf {
        self.identity
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(SNAPSHOT_DIR)
    }

    /// Full path of the reference artifact.
    pub fn snapshot_path(&self) -> PathBuf {
        let stem = self.name.as_deref().unwrap_or_else(|| self.basename());
        self.snapshot_dir().join(format!("{stem}{SNAPSHOT_SUFFIX}"))
    }

    /// Full path of the diff artifact.
    pub fn diff_path(&self) -> PathBuf {
        diff_path(&self.snapshot_path())
    }

    fn basename(&self) -> &str {
        self.identity
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
    }
}

/// Strips the test-file suffix from `test_file`.
///
/// `tests/svg.test.ts` and `tests/svg.rs` both become `tests/svg`; `src/render_tests.rs`
/// becomes `src/render`. A suffix is never stripped if that would leave an empty name.
pub fn test_identity(test_file: &Path) -> PathBuf {
    let Some(file_name) = test_file.file_name().and_then(|n| n.to_str()) else {
        return test_file.to_path_buf();
    };
    let stem = strip_any(file_name, FILE_SUFFIXES);
    let stem = strip_any(stem, STEM_SUFFIXES);
    test_file.with_file_name(stem)
}

fn strip_any<'a>(name: &'a str, suffixes: &[&str]) -> &'a str {
    suffixes
        .iter()
        .find_map(|suffix| name.strip_suffix(suffix).filter(|rest| !rest.is_empty()))
        .unwrap_or(name)
}

/// Resolves the reference artifact path for `test_file` and an optional logical name.
pub fn resolve(test_file: impl AsRef<Path>, name: Option<&str>) -> PathBuf {
    SnapshotKey::new(test_file, name).snapshot_path()
}

/// Derives the diff artifact path from a reference artifact path.
///
/// The `.snap.svg` suffix is replaced by `.diff.png`; a path without that suffix gets
/// `.diff.png` appended instead.
pub fn diff_path(snapshot_path: &Path) -> PathBuf {
    let Some(file_name) = snapshot_path.file_name().and_then(|n| n.to_str()) else {
        return snapshot_path.with_extension("diff.png");
    };
    let stem = file_name.strip_suffix(SNAPSHOT_SUFFIX).unwrap_or(file_name);
    snapshot_path.with_file_name(format!("{stem}{DIFF_SUFFIX}"))
}

/// Turns the `file!()` of a test into a usable path.
///
/// `file!()` is relative to the workspace root while tests run from the package root, so the
/// path is probed against `manifest_dir` and each of its ancestors. If nothing exists on disk,
/// `manifest_dir.join(file)` is returned.
pub fn resolve_test_file(manifest_dir: &Path, file: &Path) -> PathBuf {
    if file.is_absolute() {
        return file.to_path_buf();
    }
    manifest_dir
        .ancestors()
        .map(|dir| dir.join(file))
        .find(|candidate| candidate.is_file())
        .unwrap_or_else(|| manifest_dir.join(file))
}
