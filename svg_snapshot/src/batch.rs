// Copyright 2026 the SVG Snapshot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Evaluating several named snapshots that belong to one test.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::compare::VisualComparator;
use crate::engine::{ComparisonResult, SnapshotEngine};
use crate::error::SnapshotError;
use crate::path::SnapshotKey;

/// One evaluated batch item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchItem {
    /// The logical name given for this item.
    pub name: String,
    /// The item's own result.
    pub result: ComparisonResult,
}

impl BatchItem {
    /// Whether this item passed.
    pub fn pass(&self) -> bool {
        self.result.equal
    }

    /// This item's message.
    pub fn message(&self) -> &str {
        &self.result.message
    }
}

/// Aggregate of a batch evaluation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchResult {
    /// Per-item results, in input order.
    pub items: Vec<BatchItem>,
}

impl BatchResult {
    /// `true` only if every item passed. An empty batch passes.
    pub fn pass(&self) -> bool {
        self.items.iter().all(BatchItem::pass)
    }

    /// Every item's message, one per line, in input order.
    pub fn message(&self) -> String {
        self.items
            .iter()
            .map(|item| format!("{}\n", item.message()))
            .collect()
    }

    /// Items that did not pass.
    pub fn failures(&self) -> impl Iterator<Item = &BatchItem> {
        self.items.iter().filter(|item| !item.pass())
    }

    /// Diff artifacts written by this batch.
    pub fn diff_paths(&self) -> impl Iterator<Item = &PathBuf> {
        self.items
            .iter()
            .filter_map(|item| item.result.diff_path.as_ref())
    }
}

/// Runs a [`SnapshotEngine`] over an ordered batch of markup.
///
/// Items are evaluated strictly in order and a failing item never stops the rest. An error
/// (storage or comparator) is different: it aborts the batch and is returned as-is.
#[derive(Debug)]
pub struct BatchEngine<C> {
    engine: SnapshotEngine<C>,
}

impl<C: VisualComparator> BatchEngine<C> {
    /// Wraps a single-snapshot engine.
    pub fn new(engine: SnapshotEngine<C>) -> Self {
        Self { engine }
    }

    /// The wrapped engine.
    pub fn engine(&self) -> &SnapshotEngine<C> {
        &self.engine
    }

    /// Evaluates `contents[i]` as the snapshot named `names[i]` of `test_file`.
    ///
    /// Item files are named `<test basename>-<name>.snap.svg`; see [`SnapshotKey::batch_item`].
    /// Names must be unique within the batch. A length mismatch or a repeated name is rejected
    /// before anything is written.
    pub fn evaluate_all<S, N>(
        &self,
        contents: &[S],
        test_file: &Path,
        names: &[N],
    ) -> Result<BatchResult, SnapshotError>
    where
        S: AsRef<str>,
        N: AsRef<str>,
    {
        if contents.len() != names.len() {
            return Err(SnapshotError::BatchLength {
                contents: contents.len(),
                names: names.len(),
            });
        }
        let mut seen = HashSet::with_capacity(names.len());
        let repeated = names
            .iter()
            .map(|name| name.as_ref())
            .find(|name| !seen.insert(*name));
        if let Some(name) = repeated {
            return Err(SnapshotError::DuplicateName {
                name: name.to_owned(),
            });
        }

        let mut items = Vec::with_capacity(contents.len());
        for (content, name) in contents.iter().zip(names) {
            let name = name.as_ref();
            let key = SnapshotKey::batch_item(test_file, name);
            let result = self
                .engine
                .evaluate_labeled(content.as_ref(), &key, Some(name))?;
            items.push(BatchItem {
                name: name.to_owned(),
                result,
            });
        }
        Ok(BatchResult { items })
    }
}
