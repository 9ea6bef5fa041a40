// Copyright 2026 the SVG Snapshot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Project scaffolding for `svg_snapshot`.
//!
//! `svg-snapshot init` adds `svg_snapshot` as a dev-dependency and writes a starter layout:
//!
//! ```text
//! tests/fixtures/mod.rs   re-exports the assertion macros and matcher traits
//! tests/svg.rs            an example snapshot test
//! svg-snapshot.toml       comparison policy
//! ```
//!
//! Files that already exist are never touched; they are reported as skipped.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

/// Name of the crate installed by `init`.
pub const CRATE_NAME: &str = "svg_snapshot";

const FIXTURES: &str = r#"//! Shared snapshot helpers for integration tests.

#![allow(unused_imports, reason = "not every test uses every helper")]

pub use svg_snapshot::{
    MultipleSvgSnapshotMatcher, SvgSnapshotMatcher, assert_svg_snapshot, assert_svg_snapshots,
};
"#;

const EXAMPLE_TEST: &str = r##"mod fixtures;

use fixtures::assert_svg_snapshot;

const TEST_SVG: &str = r#"<svg width="100" height="100" xmlns="http://www.w3.org/2000/svg">
  <circle cx="50" cy="50" r="40" stroke="black" stroke-width="3" fill="red" />
</svg>"#;

#[test]
fn svg_snapshot_example() {
    // The first run creates tests/__snapshots__/svg.snap.svg.
    // Later runs compare against it.
    assert_svg_snapshot!(TEST_SVG);
}
"##;

const CONFIG: &str = r##"# Comparison policy for svg_snapshot.
strict = false
tolerance = 2.0
highlight_color = "#ff00ff"
"##;

/// Files written by `init`, relative to the package root.
pub const SCAFFOLD: &[(&str, &str)] = &[
    ("tests/fixtures/mod.rs", FIXTURES),
    ("tests/svg.rs", EXAMPLE_TEST),
    ("svg-snapshot.toml", CONFIG),
];

/// Errors raised while setting up a project.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    /// The installer could not be started.
    #[error("failed to run `{program}`: {source}")]
    Spawn {
        /// Program that was invoked.
        program: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The installer exited unsuccessfully.
    #[error("installation failed ({status})")]
    Install {
        /// Its exit status.
        status: ExitStatus,
    },
    /// A scaffold file or directory could not be written.
    #[error("failed to write `{}`: {source}", .path.display())]
    Io {
        /// The path being written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Options for [`init`].
#[derive(Clone, Debug)]
pub struct InitOptions {
    /// Package root to scaffold into.
    pub root: PathBuf,
    /// Whether to run `cargo add --dev svg_snapshot` first.
    pub install: bool,
}

/// What happened to one scaffold file.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FileStatus {
    /// The file was written.
    Created,
    /// The file already existed and was left alone.
    Skipped,
}

/// Summary of an [`init`] run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InitReport {
    /// Whether the dependency was installed.
    pub installed: bool,
    /// Scaffold files (relative to the root) in the order they were handled.
    pub files: Vec<(PathBuf, FileStatus)>,
}

impl InitReport {
    /// Files that were written.
    pub fn created(&self) -> impl Iterator<Item = &Path> {
        self.with_status(FileStatus::Created)
    }

    /// Files that already existed.
    pub fn skipped(&self) -> impl Iterator<Item = &Path> {
        self.with_status(FileStatus::Skipped)
    }

    fn with_status(&self, status: FileStatus) -> impl Iterator<Item = &Path> {
        self.files
            .iter()
            .filter(move |(_, s)| *s == status)
            .map(|(path, _)| path.as_path())
    }
}

impl fmt::Display for InitReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.installed {
            writeln!(f, "Installed {CRATE_NAME} as a dev-dependency")?;
        }
        for (path, status) in &self.files {
            match status {
                FileStatus::Created => writeln!(f, "Created {}", path.display())?,
                FileStatus::Skipped => {
                    writeln!(f, "Skipped {} (already exists)", path.display())?;
                }
            }
        }
        write!(f, "\nYou can now run: cargo test")
    }
}

/// Installs the dependency (if requested) and writes the scaffold under `options.root`.
///
/// Installation runs first; if it fails nothing is written.
pub fn init(options: &InitOptions) -> Result<InitReport, SetupError> {
    if options.install {
        install_dependency(&options.root)?;
    }

    let mut report = InitReport {
        installed: options.install,
        files: Vec::with_capacity(SCAFFOLD.len()),
    };
    for (relative, contents) in SCAFFOLD {
        let status = write_new(&options.root.join(relative), contents)?;
        report.files.push((PathBuf::from(relative), status));
    }
    Ok(report)
}

/// Runs `cargo add --dev svg_snapshot` in `root`, honouring `$CARGO`.
pub fn install_dependency(root: &Path) -> Result<(), SetupError> {
    let cargo = std::env::var_os("CARGO").unwrap_or_else(|| OsString::from("cargo"));
    run_installer(&cargo, root)
}

/// Runs `<program> add --dev svg_snapshot` in `root`.
pub fn run_installer(program: &OsStr, root: &Path) -> Result<(), SetupError> {
    let status = Command::new(program)
        .args(["add", "--dev", CRATE_NAME])
        .current_dir(root)
        .status()
        .map_err(|source| SetupError::Spawn {
            program: program.to_string_lossy().into_owned(),
            source,
        })?;
    if status.success() {
        Ok(())
    } else {
        Err(SetupError::Install { status })
    }
}

fn write_new(path: &Path, contents: &str) -> Result<FileStatus, SetupError> {
    let io_err = |source| SetupError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => return Ok(FileStatus::Skipped),
        Err(e) => return Err(io_err(e)),
    };
    file.write_all(contents.as_bytes()).map_err(io_err)?;
    Ok(FileStatus::Created)
}
