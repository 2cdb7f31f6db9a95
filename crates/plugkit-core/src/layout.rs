// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Repository directory layout.
//!
//! Local and remote repositories share one layout, keyed by group id and
//! version:
//!
//! ```text
//! <root>/<group with dots as slashes>/<artifact>/<version>/<artifact>-<version>.<ext>
//! ```

use std::path::PathBuf;

use crate::types::Coordinate;

/// Returns the conventional local repository root (`~/.m2/repository`).
///
/// Falls back to a relative `.m2/repository` when no home directory is known.
pub fn default_local_repository() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_default()
        .join(".m2")
        .join("repository")
}

/// Relative directory holding every file of one version of an artifact.
pub fn version_dir(group: &str, artifact: &str, version: &str) -> String {
    format!("{}/{artifact}/{version}", group.replace('.', "/"))
}

/// Why `value` cannot be one segment of a repository path, if it cannot.
pub fn segment_problem(value: &str) -> Option<&'static str> {
    if value.is_empty() {
        Some("is empty")
    } else if value == "." || value == ".." {
        Some("is a relative path component")
    } else if value.contains(['/', '\\']) {
        Some("contains a path separator")
    } else {
        None
    }
}

/// Check that a group, artifact, and version map to directories under the
/// repository root and nowhere else.
///
/// Every dot-separated part of the group becomes a directory, so none of
/// them may be empty.
pub fn check_identity(group: &str, artifact: &str, version: &str) -> Result<(), String> {
    if group.contains(['/', '\\']) {
        return Err(format!("group `{group}` contains a path separator"));
    }
    if group.split('.').any(str::is_empty) {
        return Err(format!("group `{group}` has an empty segment"));
    }
    for (field, value) in [("artifact", artifact), ("version", version)] {
        if let Some(problem) = segment_problem(value) {
            return Err(format!("{field} `{value}` {problem}"));
        }
    }
    Ok(())
}

/// Relative path of a file named `<artifact>-<version>.<ext>` for the coordinate.
pub fn artifact_path(coordinate: &Coordinate) -> String {
    file_path(coordinate, &coordinate.extension)
}

/// Relative path of a sibling file of the coordinate with another extension (e.g. `pom`).
pub fn file_path(coordinate: &Coordinate, extension: &str) -> String {
    format!(
        "{}/{}-{}.{extension}",
        version_dir(&coordinate.group, &coordinate.artifact, &coordinate.version),
        coordinate.artifact,
        coordinate.version,
    )
}
