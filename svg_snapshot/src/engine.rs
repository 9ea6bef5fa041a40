// Copyright 2026 the SVG Snapshot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The create-or-compare decision for a single snapshot.

use std::fmt;
use std::path::PathBuf;

use crate::compare::{ComparatorAdapter, VisualComparator};
use crate::config::SnapshotConfig;
use crate::error::SnapshotError;
use crate::path::SnapshotKey;
use crate::store::ArtifactStore;

/// What an evaluation did.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// No reference existed; the content became the reference.
    Created,
    /// Update mode replaced an existing reference.
    Updated,
    /// The content matched the reference.
    Matched,
    /// The content did not match; a diff artifact was written.
    Mismatched,
}

/// Result of evaluating one snapshot.
///
/// A mismatch is an ordinary result with `equal == false`, not an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComparisonResult {
    /// Whether the assertion passes.
    pub equal: bool,
    /// Human-readable summary.
    pub message: String,
    /// What happened.
    pub outcome: Outcome,
    /// Location of the reference artifact.
    pub snapshot_path: PathBuf,
    /// Location of the diff artifact, present only on mismatch.
    pub diff_path: Option<PathBuf>,
}

impl fmt::Display for ComparisonResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Evaluates one piece of markup against its stored snapshot.
///
/// Each call walks the same sequence: ensure the snapshot directory exists, then either write
/// the content as the new reference (missing reference, or update mode) or load the reference
/// and compare, rendering a diff on mismatch. Nothing is remembered between calls.
#[derive(Debug)]
pub struct SnapshotEngine<C> {
    adapter: ComparatorAdapter<C>,
    store: ArtifactStore,
    update: bool,
}

impl<C: VisualComparator> SnapshotEngine<C> {
    /// Creates an engine around `comparator` using `config`.
    pub fn new(comparator: C, config: SnapshotConfig) -> Self {
        Self {
            adapter: ComparatorAdapter::new(comparator, config.compare),
            store: ArtifactStore,
            update: config.update,
        }
    }

    /// Whether this engine overwrites existing snapshots.
    pub fn update_mode(&self) -> bool {
        self.update
    }

    /// The comparator adapter in use.
    pub fn adapter(&self) -> &ComparatorAdapter<C> {
        &self.adapter
    }

    /// Evaluates `content` against the snapshot identified by `key`.
    pub fn evaluate(
        &self,
        content: &str,
        key: &SnapshotKey,
    ) -> Result<ComparisonResult, SnapshotError> {
        self.evaluate_labeled(content, key, None)
    }

    /// Like [`evaluate`](Self::evaluate), naming the snapshot in the message.
    pub(crate) fn evaluate_labeled(
        &self,
        content: &str,
        key: &SnapshotKey,
        label: Option<&str>,
    ) -> Result<ComparisonResult, SnapshotError> {
        let subject = match label {
            Some(label) => format!("Snapshot {label}"),
            None => "Snapshot".to_owned(),
        };
        let snapshot_path = key.snapshot_path();
        self.store.ensure_dir(&key.snapshot_dir())?;

        let exists = self.store.exists(&snapshot_path);
        if !exists || self.update {
            log::info!("writing snapshot to {}", snapshot_path.display());
            self.store.write(&snapshot_path, content.as_bytes())?;
            return Ok(ComparisonResult {
                equal: true,
                message: format!("{subject} created at {}", snapshot_path.display()),
                outcome: if exists {
                    Outcome::Updated
                } else {
                    Outcome::Created
                },
                snapshot_path,
                diff_path: None,
            });
        }

        let reference = self.store.read(&snapshot_path)?;
        if self.adapter.compare(content.as_bytes(), &reference)? {
            log::debug!("snapshot {} matches", snapshot_path.display());
            return Ok(ComparisonResult {
                equal: true,
                message: format!("{subject} matches"),
                outcome: Outcome::Matched,
                snapshot_path,
                diff_path: None,
            });
        }

        let diff_path = key.diff_path();
        self.adapter
            .render_diff(&reference, content.as_bytes(), &diff_path)?;
        log::warn!(
            "snapshot {} does not match, diff written to {}",
            snapshot_path.display(),
            diff_path.display()
        );
        Ok(ComparisonResult {
            equal: false,
            message: format!(
                "{subject} does not match. Diff saved at {}",
                diff_path.display()
            ),
            outcome: Outcome::Mismatched,
            snapshot_path,
            diff_path: Some(diff_path),
        })
    }
}
