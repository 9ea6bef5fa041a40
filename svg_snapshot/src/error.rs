// Copyright 2026 the SVG Snapshot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.
//!
//! A snapshot that legitimately fails to match is *not* an error: it is reported as a
//! [`ComparisonResult`](crate::ComparisonResult) with `equal == false`. The types here cover the
//! cases where no verdict could be reached at all.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// The filesystem operation that failed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StorageOp {
    /// Creating the `__snapshots__` directory (or one of its parents).
    CreateDir,
    /// Reading a stored artifact.
    Read,
    /// Writing a snapshot or diff artifact.
    Write,
}

impl fmt::Display for StorageOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::CreateDir => "create directory",
            Self::Read => "read",
            Self::Write => "write",
        })
    }
}

/// Failure raised by a [`VisualComparator`](crate::VisualComparator).
#[derive(Debug, thiserror::Error)]
pub enum ComparatorError {
    /// The markup could not be parsed into something rasterizable.
    #[error("failed to parse {which} markup: {message}")]
    Parse {
        /// `"current"` or `"reference"`.
        which: &'static str,
        /// Parser diagnostic.
        message: String,
    },
    /// The markup parsed but describes a zero-sized canvas.
    #[error("{which} markup has an empty canvas ({width}x{height})")]
    EmptyCanvas {
        /// `"current"` or `"reference"`.
        which: &'static str,
        /// Declared width in pixels.
        width: u32,
        /// Declared height in pixels.
        height: u32,
    },
    /// A rendered or diff image could not be assembled.
    #[error("failed to build image: {0}")]
    Image(String),
}

/// Errors surfaced by the snapshot engines.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// A filesystem operation failed.
    #[error("failed to {op} `{}`: {source}", .path.display())]
    Storage {
        /// Which operation failed.
        op: StorageOp,
        /// The path it was applied to.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The visual comparator could not produce a verdict.
    #[error(transparent)]
    Comparator(#[from] ComparatorError),
    /// `svg-snapshot.toml` exists but could not be understood.
    #[error("invalid config `{}`: {message}", .path.display())]
    Config {
        /// Path of the offending file.
        path: PathBuf,
        /// What was wrong with it.
        message: String,
    },
    /// A batch was given a different number of contents and names.
    #[error("batch has {contents} contents but {names} names")]
    BatchLength {
        /// Number of markup strings supplied.
        contents: usize,
        /// Number of names supplied.
        names: usize,
    },
    /// A batch used the same logical name more than once.
    #[error("batch name `{name}` is used more than once")]
    DuplicateName {
        /// The repeated name.
        name: String,
    },
}

impl SnapshotError {
    pub(crate) fn storage(op: StorageOp, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Storage {
            op,
            path: path.into(),
            source,
        }
    }

    /// Returns `true` if this error came from the filesystem and the path did not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Storage { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}
