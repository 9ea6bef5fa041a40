// Copyright 2026 the SVG Snapshot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The comparator seam.
//!
//! Pixel similarity is not implemented by the engines. They talk to a [`VisualComparator`]
//! through a [`ComparatorAdapter`], which pins the tolerance policy and writes diff images.

use std::path::Path;

use crate::error::{ComparatorError, SnapshotError};
use crate::store::ArtifactStore;

/// Default per-pixel tolerance, as a CIE76 ΔE distance (roughly 0–100).
///
/// A ΔE around 2 is the smallest difference most people can see, which is enough to absorb
/// antialiasing noise between renderer versions.
pub const DEFAULT_TOLERANCE: f32 = 2.0;

/// Default diff highlight color (`#ff00ff`).
pub const DEFAULT_HIGHLIGHT_COLOR: [u8; 4] = [0xff, 0x00, 0xff, 0xff];

/// How strictly two renders are compared.
#[derive(Clone, Debug, PartialEq)]
pub struct CompareOptions {
    /// Require bit-identical pixels, ignoring `tolerance`.
    pub strict: bool,
    /// Maximum per-pixel color distance still considered equal.
    pub tolerance: f32,
    /// RGBA color used to mark differing pixels in diff images.
    pub highlight_color: [u8; 4],
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            strict: false,
            tolerance: DEFAULT_TOLERANCE,
            highlight_color: DEFAULT_HIGHLIGHT_COLOR,
        }
    }
}

/// A visual-similarity oracle over rasterizable markup.
///
/// Implementations must return an error, not `false`, when the input cannot be rendered.
pub trait VisualComparator {
    /// Returns whether `current` and `reference` look the same under `options`.
    fn looks_same(
        &self,
        current: &[u8],
        reference: &[u8],
        options: &CompareOptions,
    ) -> Result<bool, ComparatorError>;

    /// Renders a diff image (encoded, e.g. PNG) highlighting where the two differ.
    fn create_diff(
        &self,
        reference: &[u8],
        current: &[u8],
        options: &CompareOptions,
    ) -> Result<Vec<u8>, ComparatorError>;
}

impl<C: VisualComparator + ?Sized> VisualComparator for &C {
    fn looks_same(
        &self,
        current: &[u8],
        reference: &[u8],
        options: &CompareOptions,
    ) -> Result<bool, ComparatorError> {
        (**self).looks_same(current, reference, options)
    }

    fn create_diff(
        &self,
        reference: &[u8],
        current: &[u8],
        options: &CompareOptions,
    ) -> Result<Vec<u8>, ComparatorError> {
        (**self).create_diff(reference, current, options)
    }
}

/// Binds a [`VisualComparator`] to a fixed [`CompareOptions`].
#[derive(Debug)]
pub struct ComparatorAdapter<C> {
    comparator: C,
    options: CompareOptions,
    store: ArtifactStore,
}

impl<C: VisualComparator> ComparatorAdapter<C> {
    /// Wraps `comparator` with the given policy.
    pub fn new(comparator: C, options: CompareOptions) -> Self {
        Self {
            comparator,
            options,
            store: ArtifactStore,
        }
    }

    /// The policy in effect.
    pub fn options(&self) -> &CompareOptions {
        &self.options
    }

    /// Compares `current` against `reference`.
    pub fn compare(&self, current: &[u8], reference: &[u8]) -> Result<bool, SnapshotError> {
        Ok(self
            .comparator
            .looks_same(current, reference, &self.options)?)
    }

    /// Renders a diff of `reference` vs `current` and writes it to `output`, replacing any
    /// earlier diff there.
    pub fn render_diff(
        &self,
        reference: &[u8],
        current: &[u8],
        output: &Path,
    ) -> Result<(), SnapshotError> {
        let image = self
            .comparator
            .create_diff(reference, current, &self.options)?;
        self.store.write(output, &image)
    }
}
