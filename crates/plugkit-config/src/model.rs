// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Descriptor model structs.
//!
//! The descriptor is a plain nested structure: it is deserialized in one go
//! and validated afterwards by [`crate::validation::validate_config`]. All
//! structs use `#[serde(deny_unknown_fields)]` so typos are reported instead
//! of silently ignored.

use plugkit_core::{DependencyScope, RepositoryKind};
use serde::{Deserialize, Serialize};

/// Top-level plugkit descriptor (`plugkit.toml`).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PlugkitConfig {
    /// Project identity and build settings.
    #[serde(default)]
    pub project: ProjectConfig,

    /// Plugins declared by this project.
    #[serde(default)]
    pub plugins: Vec<PluginConfig>,

    /// Ordered dependency declarations.
    #[serde(default)]
    pub dependencies: Vec<DependencyConfig>,

    /// The publishable artifact.
    #[serde(default)]
    pub publication: PublicationConfig,

    /// Repositories the publication is written to.
    #[serde(default)]
    pub repositories: Vec<RepositoryConfig>,

    /// Where dependencies are resolved from.
    #[serde(default)]
    pub resolution: ResolutionConfig,
}

/// Project identity and build settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Project name; also the default artifact id.
    #[serde(default = "default_project_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Directory for build outputs such as packaged archives.
    #[serde(default = "default_build_dir")]
    pub build_dir: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: default_project_name(),
            log_level: default_log_level(),
            build_dir: default_build_dir(),
        }
    }
}

fn default_project_name() -> String {
    "plugin".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_build_dir() -> String {
    "build".to_string()
}

/// One `[[plugins]]` entry.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PluginConfig {
    /// Internal name of the declaration (e.g. "androidAspectJPlugin").
    #[serde(default)]
    pub name: Option<String>,

    /// External id consumers apply the plugin by (reverse-DNS).
    pub id: String,

    /// Fully-qualified implementation entry point.
    pub implementation: String,

    #[serde(default)]
    pub display_name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,
}

/// One `[[dependencies]]` entry.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DependencyConfig {
    pub scope: DependencyScope,
    pub coordinate: String,
}

/// The `[publication]` section.
///
/// `group_id` and `version` may be left empty here; the publisher refuses
/// to run until they are set.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PublicationConfig {
    /// Publication name, used in task names (e.g. "main").
    #[serde(default = "default_publication_name")]
    pub name: String,

    #[serde(default)]
    pub group_id: String,

    /// Artifact id. Defaults to the project name.
    #[serde(default)]
    pub artifact_id: Option<String>,

    #[serde(default)]
    pub version: String,

    /// Compiled output to package: a directory or a single file.
    #[serde(default = "default_source")]
    pub source: String,

    /// Whether plugin marker publications are produced for declared plugins.
    #[serde(default = "default_true")]
    pub plugin_markers: bool,
}

impl Default for PublicationConfig {
    fn default() -> Self {
        Self {
            name: default_publication_name(),
            group_id: String::new(),
            artifact_id: None,
            version: String::new(),
            source: default_source(),
            plugin_markers: true,
        }
    }
}

fn default_publication_name() -> String {
    "main".to_string()
}

fn default_source() -> String {
    "build/libs".to_string()
}

fn default_true() -> bool {
    true
}

/// One `[[repositories]]` entry.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RepositoryConfig {
    pub name: String,

    pub kind: RepositoryKind,

    /// Root directory for a local repository. Defaults to `~/.m2/repository`.
    #[serde(default)]
    pub path: Option<String>,

    /// Base URL for a remote repository.
    #[serde(default)]
    pub url: Option<String>,

    /// Names of the build properties holding the upload credentials.
    #[serde(default)]
    pub credentials: Option<CredentialsConfig>,
}

/// Property names for remote credentials. Never the secrets themselves.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CredentialsConfig {
    pub username_property: String,
    pub token_property: String,
}

/// The `[resolution]` section.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ResolutionConfig {
    /// Local repository roots searched in order. Empty means `~/.m2/repository`.
    #[serde(default)]
    pub roots: Vec<String>,
}
