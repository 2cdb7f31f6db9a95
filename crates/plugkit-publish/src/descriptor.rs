// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Publication descriptors.
//!
//! A descriptor names what is published (group id, artifact id, version) and
//! where its content comes from. Descriptors are built once from the
//! configuration and never mutated; identity is only checked when a publish
//! task executes, through [`PublicationDescriptor::validate`].

use std::path::{Path, PathBuf};

use plugkit_config::model::PlugkitConfig;
use plugkit_core::layout::check_identity;
use plugkit_core::{Coordinate, PlugkitError};
use plugkit_deps::DependencySet;
use plugkit_plugin::{PluginMarker, PluginRegistry, plugin_descriptor};
use tracing::{debug, warn};

/// A file placed into the archive next to the compiled output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundledFile {
    /// Archive path with `/` separators.
    pub path: String,
    pub content: Vec<u8>,
}

/// What a publication carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Component {
    /// Compiled output packaged into a `tar.gz` archive.
    Archive {
        /// Directory or single file holding the compiled output.
        source: PathBuf,
        bundled: Vec<BundledFile>,
        /// Listed in the published metadata. CompileOnly dependencies never appear here.
        runtime_dependencies: Vec<Coordinate>,
    },
    /// Metadata only, depending on another publication.
    Marker { target: Coordinate },
}

/// A publishable artifact plus its identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicationDescriptor {
    /// Publication name, used in task names.
    pub name: String,
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub component: Component,
}

impl PublicationDescriptor {
    /// Build the main publication from the descriptor.
    ///
    /// Relative `publication.source` paths are resolved against `project_dir`.
    /// Every registered plugin contributes a properties descriptor to the archive.
    pub fn main(
        config: &PlugkitConfig,
        dependencies: &DependencySet,
        plugins: &PluginRegistry,
        project_dir: &Path,
    ) -> Self {
        let publication = &config.publication;
        let artifact_id = publication
            .artifact_id
            .clone()
            .unwrap_or_else(|| config.project.name.clone());

        let bundled = plugins
            .list_all()
            .into_iter()
            .map(|entry| {
                let (path, content) = plugin_descriptor(&entry.declaration);
                BundledFile {
                    path,
                    content: content.into_bytes(),
                }
            })
            .collect();

        let runtime_dependencies = dependencies
            .runtime()
            .map(|spec| spec.coordinate.clone())
            .collect();

        debug!(
            group_id = %publication.group_id,
            artifact_id = %artifact_id,
            version = %publication.version,
            "configured publication"
        );

        Self {
            name: publication.name.clone(),
            group_id: publication.group_id.clone(),
            artifact_id,
            version: publication.version.clone(),
            component: Component::Archive {
                source: project_dir.join(&publication.source),
                bundled,
                runtime_dependencies,
            },
        }
    }

    /// Marker publications for every registered plugin, pointing at `main`.
    ///
    /// Returns nothing when `publication.plugin_markers` is off.
    pub fn markers(config: &PlugkitConfig, plugins: &PluginRegistry, main: &Self) -> Vec<Self> {
        if !config.publication.plugin_markers {
            if !plugins.is_empty() {
                warn!(
                    plugins = plugins.len(),
                    "plugin markers disabled; plugins will not be resolvable by id"
                );
            }
            return Vec::new();
        }

        plugins
            .list_all()
            .into_iter()
            .map(|entry| {
                let marker = PluginMarker::new(&entry.declaration, main.coordinate());
                Self {
                    name: format!("{}PluginMarker", lower_camel(&marker.plugin_id)),
                    group_id: marker.coordinate.group,
                    artifact_id: marker.coordinate.artifact,
                    version: marker.coordinate.version,
                    component: Component::Marker {
                        target: marker.target,
                    },
                }
            })
            .collect()
    }

    /// Coordinate of the primary file of this publication.
    pub fn coordinate(&self) -> Coordinate {
        let coordinate = Coordinate::new(
            self.group_id.clone(),
            self.artifact_id.clone(),
            self.version.clone(),
        );
        match self.component {
            Component::Archive { .. } => coordinate,
            Component::Marker { .. } => coordinate.with_extension("pom"),
        }
    }

    /// Check identity before anything is written.
    ///
    /// Fails with `PlugkitError::PublicationConfig` if the group id, artifact
    /// id, or version is empty or would place files outside the repository
    /// root, or the version is not a semantic version.
    pub fn validate(&self) -> Result<(), PlugkitError> {
        if self.group_id.trim().is_empty() {
            return Err(PlugkitError::PublicationConfig(format!(
                "publication `{}`: group_id must not be empty",
                self.name
            )));
        }
        if self.artifact_id.trim().is_empty() {
            return Err(PlugkitError::PublicationConfig(format!(
                "publication `{}`: artifact_id must not be empty",
                self.name
            )));
        }
        if self.version.trim().is_empty() {
            return Err(PlugkitError::PublicationConfig(format!(
                "publication `{}`: version must not be empty",
                self.name
            )));
        }
        check_identity(&self.group_id, &self.artifact_id, &self.version).map_err(|problem| {
            PlugkitError::PublicationConfig(format!("publication `{}`: {problem}", self.name))
        })?;
        semver::Version::parse(&self.version).map_err(|e| {
            PlugkitError::PublicationConfig(format!(
                "publication `{}`: version `{}` is not a semantic version: {e}",
                self.name, self.version
            ))
        })?;
        Ok(())
    }
}

/// `io.example.my-plugin` becomes `ioExampleMyPlugin`.
fn lower_camel(id: &str) -> String {
    let mut out = String::with_capacity(id.len());
    let mut upper_next = false;
    for c in id.chars() {
        if matches!(c, '.' | '-' | '_') {
            upper_next = !out.is_empty();
        } else if upper_next {
            out.push(c.to_ascii_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}
