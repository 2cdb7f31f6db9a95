// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across the declarers and the publisher.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::PlugkitError;
use crate::layout::{check_identity, segment_problem};

/// Extension used for archives when a coordinate does not name one.
pub const DEFAULT_EXTENSION: &str = "tar.gz";

/// Visibility window granted to a declared dependency.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum DependencyScope {
    /// Visible at compile time, excluded from the runtime classpath and published metadata.
    CompileOnly,
    /// Visible at compile time and bundled/required at runtime.
    Implementation,
}

impl DependencyScope {
    /// Whether dependencies of this scope are part of the runtime classpath.
    pub fn is_runtime(self) -> bool {
        matches!(self, DependencyScope::Implementation)
    }
}

/// Kind of repository a publication is written to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RepositoryKind {
    /// A directory tree on the local filesystem, usually the local cache.
    Local,
    /// An HTTP repository accepting authenticated `PUT` uploads.
    Remote,
}

/// An artifact coordinate: `group:artifact:version[:extension]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    pub group: String,
    pub artifact: String,
    pub version: String,
    pub extension: String,
}

impl Coordinate {
    /// Builds a coordinate with the default archive extension.
    pub fn new(
        group: impl Into<String>,
        artifact: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
            version: version.into(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    /// Returns a copy of this coordinate with a different extension.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.artifact, self.version)?;
        if self.extension != DEFAULT_EXTENSION {
            write!(f, ":{}", self.extension)?;
        }
        Ok(())
    }
}

impl FromStr for Coordinate {
    type Err = PlugkitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(PlugkitError::Configuration(
                "dependency coordinate must not be empty".to_string(),
            ));
        }

        let parts: Vec<&str> = trimmed.split(':').map(str::trim).collect();
        if !(3..=4).contains(&parts.len()) || parts.iter().any(|p| p.is_empty()) {
            return Err(PlugkitError::Configuration(format!(
                "malformed coordinate `{trimmed}`: expected `group:artifact:version[:extension]`"
            )));
        }

        let unsafe_path = |problem: String| {
            PlugkitError::Configuration(format!("malformed coordinate `{trimmed}`: {problem}"))
        };
        check_identity(parts[0], parts[1], parts[2]).map_err(unsafe_path)?;

        let mut coordinate = Coordinate::new(parts[0], parts[1], parts[2]);
        if let Some(ext) = parts.get(3) {
            if let Some(problem) = segment_problem(ext) {
                return Err(unsafe_path(format!("extension `{ext}` {problem}")));
            }
            coordinate.extension = (*ext).to_string();
        }
        Ok(coordinate)
    }
}

/// The host project a plugin is applied to.
///
/// Plugins contribute task names; the host decides what runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Project {
    pub name: String,
    applied_plugins: Vec<String>,
    tasks: BTreeSet<String>,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Registers a task name. Returns false if the task already existed.
    pub fn register_task(&mut self, name: impl Into<String>) -> bool {
        self.tasks.insert(name.into())
    }

    pub fn has_task(&self, name: &str) -> bool {
        self.tasks.contains(name)
    }

    pub fn tasks(&self) -> impl Iterator<Item = &str> {
        self.tasks.iter().map(String::as_str)
    }

    /// Records that the plugin with `id` was applied.
    pub fn mark_applied(&mut self, id: impl Into<String>) {
        self.applied_plugins.push(id.into());
    }

    pub fn has_plugin(&self, id: &str) -> bool {
        self.applied_plugins.iter().any(|p| p == id)
    }

    pub fn applied_plugins(&self) -> &[String] {
        &self.applied_plugins
    }
}
