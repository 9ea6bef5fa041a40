// Copyright 2026 the SVG Snapshot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=svg_snapshot --heading-base-level=0

//! Visual-regression snapshots for generated SVG.
//!
//! The first time a snapshot is asserted, the markup is stored as the reference in a
//! `__snapshots__` directory next to the test. Later runs render both the new markup and the
//! reference and compare the pixels with a small tolerance; on mismatch a diff image is written
//! next to the reference and the assertion fails.
//!
#![cfg_attr(feature = "raster", doc = "```no_run")]
#![cfg_attr(not(feature = "raster"), doc = "```ignore")]
//! use svg_snapshot::assert_svg_snapshot;
//!
//! let svg = r#"<svg width="100" height="100" xmlns="http://www.w3.org/2000/svg">
//!   <circle cx="50" cy="50" r="40" fill="red" />
//! </svg>"#;
//!
//! // tests/__snapshots__/<test file>.snap.svg
//! assert_svg_snapshot!(svg);
//! // tests/__snapshots__/circle.snap.svg
//! assert_svg_snapshot!(svg, "circle");
//! // tests/__snapshots__/<test file>-a.snap.svg, tests/__snapshots__/<test file>-b.snap.svg
//! svg_snapshot::assert_svg_snapshots!([svg, svg], ["a", "b"]);
//! ```
//!
//! ## Layout
//!
//! ```text
//! tests/__snapshots__/<name>.snap.svg   reference
//! tests/__snapshots__/<name>.diff.png   diff, written on mismatch
//! ```
//!
//! Diff images are overwritten on every mismatch and never deleted.
//!
//! ## Updating snapshots
//!
//! Set `SVG_SNAPSHOT_UPDATE=1` (or pass `--update-snapshots`/`-u` to a harness that forwards
//! them) to rewrite every asserted snapshot instead of comparing.
//!
//! ## Features
//!
//! - `raster` (default): the `resvg` based [`RasterComparator`], the matcher traits and the
//!   assertion macros. Without it, bring your own [`VisualComparator`].

mod batch;
mod compare;
mod config;
mod engine;
mod error;
mod matcher;
pub mod path;
#[cfg(feature = "raster")]
mod raster;
mod store;
#[cfg(test)]
mod testing;

pub use batch::{BatchEngine, BatchItem, BatchResult};
pub use compare::{
    ComparatorAdapter, CompareOptions, DEFAULT_HIGHLIGHT_COLOR, DEFAULT_TOLERANCE,
    VisualComparator,
};
pub use config::{
    CONFIG_FILE, SnapshotConfig, UPDATE_ENV, update_requested, update_requested_from,
};
pub use engine::{ComparisonResult, Outcome, SnapshotEngine};
pub use error::{ComparatorError, SnapshotError, StorageOp};
pub use matcher::{Matcher, MatcherResult};
pub use path::SnapshotKey;
#[cfg(feature = "raster")]
pub use raster::RasterComparator;
pub use store::ArtifactStore;

#[cfg(feature = "raster")]
pub use matcher::{MultipleSvgSnapshotMatcher, SvgSnapshotMatcher};

#[cfg(feature = "raster")]
#[doc(hidden)]
pub use matcher::{__assert_svg_snapshot, __assert_svg_snapshots};

/// Asserts that SVG markup matches its stored snapshot.
///
/// The owning test is taken from `file!()`. Without a name the snapshot is named after the test
/// file; with one, it is `<name>.snap.svg`.
#[cfg(feature = "raster")]
#[macro_export]
macro_rules! assert_svg_snapshot {
    ($svg:expr $(,)?) => {
        $crate::__assert_svg_snapshot(
            ::core::convert::AsRef::<str>::as_ref(&$svg),
            ::core::env!("CARGO_MANIFEST_DIR"),
            ::core::file!(),
            ::core::option::Option::None,
        )
    };
    ($svg:expr, $name:expr $(,)?) => {
        $crate::__assert_svg_snapshot(
            ::core::convert::AsRef::<str>::as_ref(&$svg),
            ::core::env!("CARGO_MANIFEST_DIR"),
            ::core::file!(),
            ::core::option::Option::Some($name),
        )
    };
}

/// Asserts that each SVG in a batch matches the snapshot with the same index in `names`.
///
/// Every item is evaluated even if an earlier one fails; the panic message lists all of them.
#[cfg(feature = "raster")]
#[macro_export]
macro_rules! assert_svg_snapshots {
    ($svgs:expr, $names:expr $(,)?) => {
        $crate::__assert_svg_snapshots(
            &$svgs[..],
            ::core::env!("CARGO_MANIFEST_DIR"),
            ::core::file!(),
            &$names[..],
        )
    };
}
