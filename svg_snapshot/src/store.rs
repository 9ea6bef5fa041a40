// Copyright 2026 the SVG Snapshot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Filesystem access for snapshot and diff artifacts.
//!
//! There is no caching: every call goes to disk, so each evaluation sees the current state.

use std::fs;
use std::path::Path;

use crate::error::{SnapshotError, StorageOp};

/// Reads and writes artifacts on the local filesystem.
#[derive(Copy, Clone, Debug, Default)]
pub struct ArtifactStore;

impl ArtifactStore {
    /// Creates `dir` and any missing parents. Succeeds if it already exists.
    pub fn ensure_dir(&self, dir: &Path) -> Result<(), SnapshotError> {
        if dir.as_os_str().is_empty() {
            return Ok(());
        }
        fs::create_dir_all(dir).map_err(|e| SnapshotError::storage(StorageOp::CreateDir, dir, e))
    }

    /// Returns `true` if an artifact exists at `path`.
    pub fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    /// Reads the artifact at `path`.
    ///
    /// A missing file is reported as a [`SnapshotError::Storage`] for which
    /// [`SnapshotError::is_not_found`] holds.
    pub fn read(&self, path: &Path) -> Result<Vec<u8>, SnapshotError> {
        fs::read(path).map_err(|e| SnapshotError::storage(StorageOp::Read, path, e))
    }

    /// Writes `bytes` to `path`, replacing any previous content.
    pub fn write(&self, path: &Path, bytes: &[u8]) -> Result<(), SnapshotError> {
        fs::write(path, bytes).map_err(|e| SnapshotError::storage(StorageOp::Write, path, e))
    }
}
