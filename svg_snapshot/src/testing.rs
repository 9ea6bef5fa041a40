// Copyright 2026 the SVG Snapshot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic comparator for unit tests.

use crate::compare::{CompareOptions, VisualComparator};
use crate::error::ComparatorError;

/// Treats markup as equal when it matches with all whitespace removed.
///
/// Non-empty input that does not start with `<` fails to "parse".
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct FakeComparator;

impl FakeComparator {
    pub(crate) fn diff_bytes(reference: &[u8], current: &[u8]) -> Vec<u8> {
        let mut out = b"diff:".to_vec();
        out.extend_from_slice(reference);
        out.push(b'|');
        out.extend_from_slice(current);
        out
    }

    fn normalize(which: &'static str, markup: &[u8]) -> Result<String, ComparatorError> {
        let text = String::from_utf8_lossy(markup);
        let text = text.trim();
        if !text.is_empty() && !text.starts_with('<') {
            return Err(ComparatorError::Parse {
                which,
                message: "expected `<`".into(),
            });
        }
        Ok(text.split_whitespace().collect())
    }
}

impl VisualComparator for FakeComparator {
    fn looks_same(
        &self,
        current: &[u8],
        reference: &[u8],
        _options: &CompareOptions,
    ) -> Result<bool, ComparatorError> {
        Ok(Self::normalize("current", current)? == Self::normalize("reference", reference)?)
    }

    fn create_diff(
        &self,
        reference: &[u8],
        current: &[u8],
        _options: &CompareOptions,
    ) -> Result<Vec<u8>, ComparatorError> {
        Ok(Self::diff_bytes(reference, current))
    }
}
