// Copyright 2026 the SVG Snapshot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end snapshot lifecycle with the `resvg` comparator.

#![cfg(feature = "raster")]

use std::fs;
use std::path::{Path, PathBuf};

use svg_snapshot::{
    ComparatorError, CompareOptions, Matcher, Outcome, RasterComparator, SnapshotConfig,
    SnapshotEngine, SnapshotError, SnapshotKey,
};

const RED_CIRCLE: &str = r#"<svg width="100" height="100" xmlns="http://www.w3.org/2000/svg">
  <circle cx="50" cy="50" r="40" stroke="black" stroke-width="3" fill="red" />
</svg>"#;

const PATTERN: &str = r#"<svg width="400" height="110" xmlns="http://www.w3.org/2000/svg">
  <defs>
    <pattern id="patt1" x="0" y="0" width="20" height="20" patternUnits="userSpaceOnUse">
      <circle cx="10" cy="10" r="10" fill="red" />
    </pattern>
  </defs>

  <rect width="200" height="100" x="0" y="0" stroke="black" fill="url(#patt1)" />
</svg>
"#;

const TRIANGLE: &str = r#"<svg height="220" width="500" xmlns="http://www.w3.org/2000/svg">
  <polygon points="100,10 150,190 50,190" style="fill:lime;stroke:purple;stroke-width:3" />
</svg>"#;

fn test_file(root: &Path) -> PathBuf {
    root.join("tests").join("shapes.rs")
}

fn engine(config: SnapshotConfig) -> SnapshotEngine<RasterComparator> {
    SnapshotEngine::new(RasterComparator, config)
}

#[test]
fn create_then_match() {
    let tmp = tempfile::tempdir().unwrap();
    let key = SnapshotKey::new(test_file(tmp.path()), Some("circle"));
    let engine = engine(SnapshotConfig::default());

    let first = engine.evaluate(RED_CIRCLE, &key).unwrap();
    assert_eq!(first.outcome, Outcome::Created);
    let stored = fs::read_to_string(key.snapshot_path()).unwrap();
    assert_eq!(stored, RED_CIRCLE);

    let second = engine.evaluate(RED_CIRCLE, &key).unwrap();
    assert_eq!(second.outcome, Outcome::Matched);
    assert_eq!(fs::read_to_string(key.snapshot_path()).unwrap(), stored);
}

#[test]
fn textual_changes_that_render_the_same_match() {
    let tmp = tempfile::tempdir().unwrap();
    let key = SnapshotKey::new(test_file(tmp.path()), None);
    let engine = engine(SnapshotConfig::default());
    engine.evaluate(RED_CIRCLE, &key).unwrap();

    let reformatted = RED_CIRCLE
        .replace("fill=\"red\"", "fill=\"#ff0000\"")
        .replace('\n', " ");
    assert!(engine.evaluate(&reformatted, &key).unwrap().equal);
}

#[test]
fn near_identical_colors_are_within_tolerance_unless_strict() {
    let tmp = tempfile::tempdir().unwrap();
    let key = SnapshotKey::new(test_file(tmp.path()), None);
    engine(SnapshotConfig::default())
        .evaluate(RED_CIRCLE, &key)
        .unwrap();

    let almost_red = RED_CIRCLE.replace("fill=\"red\"", "fill=\"#fe0000\"");
    let lenient = engine(SnapshotConfig::default())
        .evaluate(&almost_red, &key)
        .unwrap();
    assert!(lenient.equal);

    let strict = SnapshotConfig {
        update: false,
        compare: CompareOptions {
            strict: true,
            ..CompareOptions::default()
        },
    };
    let result = engine(strict).evaluate(&almost_red, &key).unwrap();
    assert!(!result.equal);
}

#[test]
fn visible_change_fails_and_writes_png_diff() {
    let tmp = tempfile::tempdir().unwrap();
    let key = SnapshotKey::new(test_file(tmp.path()), Some("circle"));
    let engine = engine(SnapshotConfig::default());
    engine.evaluate(RED_CIRCLE, &key).unwrap();

    let blue = RED_CIRCLE.replace("fill=\"red\"", "fill=\"blue\"");
    let result = engine.evaluate(&blue, &key).unwrap();

    assert!(!result.equal);
    let diff_path = result.diff_path.unwrap();
    assert_eq!(
        diff_path,
        tmp.path().join("tests/__snapshots__/circle.diff.png")
    );
    let diff = kompari::load_image(&diff_path).unwrap();
    assert_eq!(diff.dimensions(), (100, 100));
    // The circle's center changed color and is highlighted; the corner did not.
    assert_eq!(diff.get_pixel(50, 50).0, [0xff, 0x00, 0xff, 0xff]);
    assert_ne!(diff.get_pixel(0, 0).0, [0xff, 0x00, 0xff, 0xff]);

    // The reference is untouched.
    assert_eq!(fs::read_to_string(key.snapshot_path()).unwrap(), RED_CIRCLE);
}

#[test]
fn different_canvas_sizes_never_match() {
    let tmp = tempfile::tempdir().unwrap();
    let key = SnapshotKey::new(test_file(tmp.path()), None);
    let engine = engine(SnapshotConfig::default());
    engine.evaluate(RED_CIRCLE, &key).unwrap();

    let wider = RED_CIRCLE.replace("width=\"100\"", "width=\"120\"");
    let result = engine.evaluate(&wider, &key).unwrap();
    assert!(!result.equal);
    let diff = kompari::load_image(&result.diff_path.unwrap()).unwrap();
    assert_eq!(diff.dimensions(), (120, 100));
}

#[test]
fn update_mode_overwrites() {
    let tmp = tempfile::tempdir().unwrap();
    let key = SnapshotKey::new(test_file(tmp.path()), None);
    engine(SnapshotConfig::default())
        .evaluate(RED_CIRCLE, &key)
        .unwrap();

    let result = engine(SnapshotConfig::default().with_update(true))
        .evaluate(TRIANGLE, &key)
        .unwrap();
    assert!(result.equal);
    assert_eq!(result.outcome, Outcome::Updated);
    assert_eq!(fs::read_to_string(key.snapshot_path()).unwrap(), TRIANGLE);
}

#[test]
fn unparseable_markup_is_an_error() {
    let tmp = tempfile::tempdir().unwrap();
    let key = SnapshotKey::new(test_file(tmp.path()), None);
    let engine = engine(SnapshotConfig::default());
    engine.evaluate(RED_CIRCLE, &key).unwrap();

    let err = engine.evaluate("<svg", &key).unwrap_err();
    assert!(matches!(
        err,
        SnapshotError::Comparator(ComparatorError::Parse {
            which: "current",
            ..
        })
    ));
    assert!(!key.diff_path().exists());
}

#[test]
fn batch_reports_every_item_in_order() {
    let tmp = tempfile::tempdir().unwrap();
    let test_file = test_file(tmp.path());
    let matcher = Matcher::new(RasterComparator, SnapshotConfig::default());
    let names = ["test1", "test2", "test3"];

    let created = matcher
        .match_svgs(&[RED_CIRCLE, PATTERN, TRIANGLE], &test_file, &names)
        .unwrap();
    assert!(created.pass);
    for name in names {
        assert!(
            tmp.path()
                .join(format!("tests/__snapshots__/shapes-{name}.snap.svg"))
                .is_file()
        );
    }

    let changed_pattern = PATTERN.replace("fill=\"red\"", "fill=\"blue\"");
    let result = matcher
        .match_svgs(
            &[RED_CIRCLE, changed_pattern.as_str(), TRIANGLE],
            &test_file,
            &names,
        )
        .unwrap();

    assert!(!result.pass);
    let lines: Vec<_> = result.message.lines().collect();
    assert_eq!(
        lines,
        [
            "Snapshot test1 matches".to_owned(),
            format!(
                "Snapshot test2 does not match. Diff saved at {}",
                tmp.path()
                    .join("tests/__snapshots__/shapes-test2.diff.png")
                    .display()
            ),
            "Snapshot test3 matches".to_owned(),
        ]
    );
    assert!(
        tmp.path()
            .join("tests/__snapshots__/shapes-test2.diff.png")
            .is_file()
    );
    assert!(
        !tmp.path()
            .join("tests/__snapshots__/shapes-test1.diff.png")
            .exists()
    );
}
