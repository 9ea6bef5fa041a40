// Copyright 2026 the SVG Snapshot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Engine configuration.
//!
//! The engines never read process state themselves. Update mode and comparison policy are
//! collected here, once per invocation, and handed to them as a [`SnapshotConfig`].
//!
//! ## Update mode
//!
//! Snapshots are rewritten instead of compared when any of these is present:
//! - a `--update-snapshots` or `-u` argument,
//! - `SVG_SNAPSHOT_UPDATE` set to anything except empty, `0`, `false` or `no`.
//!
//! ## Config file
//!
//! An optional `svg-snapshot.toml` in the package root overrides the comparison policy:
//!
//! ```toml
//! strict = false
//! tolerance = 2.0
//! highlight_color = "#ff00ff"
//! ```

use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;

use crate::compare::CompareOptions;
use crate::error::{SnapshotError, StorageOp};

/// Environment variable that turns on update mode.
pub const UPDATE_ENV: &str = "SVG_SNAPSHOT_UPDATE";

/// Name of the optional per-package config file.
pub const CONFIG_FILE: &str = "svg-snapshot.toml";

const UPDATE_FLAGS: &[&str] = &["--update-snapshots", "-u"];

/// Everything an engine needs besides its inputs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SnapshotConfig {
    /// Overwrite existing snapshots instead of comparing against them.
    pub update: bool,
    /// Comparison policy.
    pub compare: CompareOptions,
}

impl SnapshotConfig {
    /// Returns this config with update mode set to `update`.
    #[must_use]
    pub fn with_update(mut self, update: bool) -> Self {
        self.update = update;
        self
    }

    /// Loads `svg-snapshot.toml` from `package_dir` (if present) and reads the update signal
    /// from the current process.
    pub fn load(package_dir: &Path) -> Result<Self, SnapshotError> {
        Ok(Self::from_file(&package_dir.join(CONFIG_FILE))?.with_update(update_requested()))
    }

    /// Reads comparison policy from `path`. A missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self, SnapshotError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(SnapshotError::storage(StorageOp::Read, path, e)),
        };
        Self::from_toml(&text).map_err(|message| SnapshotError::Config {
            path: path.to_path_buf(),
            message,
        })
    }

    fn from_toml(text: &str) -> Result<Self, String> {
        let file: ConfigFile = toml::from_str(text).map_err(|e| e.message().to_owned())?;
        let mut compare = CompareOptions::default();
        if let Some(strict) = file.strict {
            compare.strict = strict;
        }
        if let Some(tolerance) = file.tolerance {
            if !(tolerance.is_finite() && tolerance >= 0.0) {
                return Err(format!("tolerance must be a non-negative number, got {tolerance}"));
            }
            compare.tolerance = tolerance;
        }
        if let Some(color) = file.highlight_color {
            compare.highlight_color = parse_hex_color(&color)
                .ok_or_else(|| format!("highlight_color must be `#rrggbb` or `#rrggbbaa`, got `{color}`"))?;
        }
        Ok(Self {
            update: false,
            compare,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    strict: Option<bool>,
    tolerance: Option<f32>,
    highlight_color: Option<String>,
}

/// Reads the update signal from this process's arguments and environment.
pub fn update_requested() -> bool {
    update_requested_from(std::env::args_os(), std::env::var_os(UPDATE_ENV))
}

/// Decides update mode from explicit arguments and an environment value.
pub fn update_requested_from<I, S>(args: I, env: Option<OsString>) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    args.into_iter()
        .any(|arg| UPDATE_FLAGS.iter().any(|flag| arg.as_ref() == OsStr::new(flag)))
        || env.as_deref().is_some_and(env_flag_enabled)
}

fn env_flag_enabled(value: &OsStr) -> bool {
    let value = value.to_string_lossy();
    let value = value.trim();
    !(value.is_empty()
        || value == "0"
        || value.eq_ignore_ascii_case("false")
        || value.eq_ignore_ascii_case("no"))
}

/// Parses `#rrggbb` or `#rrggbbaa`.
pub(crate) fn parse_hex_color(s: &str) -> Option<[u8; 4]> {
    let hex = s.strip_prefix('#')?;
    if !hex.is_ascii() || !matches!(hex.len(), 6 | 8) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    let alpha = if hex.len() == 8 { channel(6)? } else { 0xff };
    Some([channel(0)?, channel(2)?, channel(4)?, alpha])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_flags_and_env() {
        let none: Option<OsString> = None;
        assert!(!update_requested_from(["test-bin"], none.clone()));
        assert!(update_requested_from(["test-bin", "-u"], none.clone()));
        assert!(update_requested_from(["test-bin", "--update-snapshots"], none.clone()));
        assert!(!update_requested_from(["test-bin", "--update"], none));

        let env = |v: &str| Some(OsString::from(v));
        assert!(update_requested_from(["test-bin"], env("1")));
        assert!(update_requested_from(["test-bin"], env("true")));
        assert!(!update_requested_from(["test-bin"], env("")));
        assert!(!update_requested_from(["test-bin"], env("0")));
        assert!(!update_requested_from(["test-bin"], env("False")));
        assert!(!update_requested_from(["test-bin"], env("no")));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let config = SnapshotConfig::from_file(&tmp.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, SnapshotConfig::default());
    }

    #[test]
    fn file_overrides_policy() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(CONFIG_FILE);
        fs::write(
            &path,
            "strict = true\ntolerance = 5.5\nhighlight_color = \"#00ff0080\"\n",
        )
        .unwrap();
        let config = SnapshotConfig::from_file(&path).unwrap();
        assert!(!config.update);
        assert!(config.compare.strict);
        assert_eq!(config.compare.tolerance, 5.5);
        assert_eq!(config.compare.highlight_color, [0, 255, 0, 128]);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = SnapshotConfig::from_toml("tolerance = 0.5").unwrap();
        assert_eq!(config.compare.tolerance, 0.5);
        assert!(!config.compare.strict);
        assert_eq!(
            config.compare.highlight_color,
            CompareOptions::default().highlight_color
        );
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(CONFIG_FILE);

        for bad in [
            "tolerance = \"loose\"",
            "tolerance = -1.0",
            "highlight_color = \"magenta\"",
            "colour = \"#ff00ff\"",
        ] {
            fs::write(&path, bad).unwrap();
            let err = SnapshotConfig::from_file(&path).unwrap_err();
            assert!(
                matches!(err, SnapshotError::Config { .. }),
                "expected config error for {bad:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn hex_colors() {
        assert_eq!(parse_hex_color("#ff00ff"), Some([255, 0, 255, 255]));
        assert_eq!(parse_hex_color("#10203040"), Some([16, 32, 48, 64]));
        assert_eq!(parse_hex_color("ff00ff"), None);
        assert_eq!(parse_hex_color("#ff00f"), None);
        assert_eq!(parse_hex_color("#gg0000"), None);
    }
}
