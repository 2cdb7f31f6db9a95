// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Repository targets.
//!
//! Targets are built from `[[repositories]]` entries. Credentials are
//! looked up in the build properties only for the targets actually selected,
//! so a missing token for an unused remote does not block a local publish.

pub mod local;
pub mod remote;

use std::path::PathBuf;
use std::sync::Arc;

use plugkit_config::BuildProperties;
use plugkit_config::model::RepositoryConfig;
use plugkit_core::layout::default_local_repository;
use plugkit_core::{ArtifactRepository, PlugkitError, RepositoryKind};

pub use local::LocalRepository;
pub use remote::{Credentials, RemoteRepository};

/// Build the repository targets named in `repositories`.
///
/// `only` restricts the result to a single repository by name; an unknown
/// name is a configuration error.
pub fn from_config(
    repositories: &[RepositoryConfig],
    properties: &BuildProperties,
    only: Option<&str>,
) -> Result<Vec<Arc<dyn ArtifactRepository>>, PlugkitError> {
    if let Some(name) = only
        && !repositories.iter().any(|r| r.name == name)
    {
        let known: Vec<&str> = repositories.iter().map(|r| r.name.as_str()).collect();
        return Err(PlugkitError::Configuration(format!(
            "unknown repository `{name}` (configured: {})",
            if known.is_empty() {
                "none".to_string()
            } else {
                known.join(", ")
            }
        )));
    }

    repositories
        .iter()
        .filter(|r| only.is_none_or(|name| r.name == name))
        .map(|r| build(r, properties))
        .collect()
}

fn build(
    config: &RepositoryConfig,
    properties: &BuildProperties,
) -> Result<Arc<dyn ArtifactRepository>, PlugkitError> {
    match config.kind {
        RepositoryKind::Local => {
            let root = config
                .path
                .as_ref()
                .map(PathBuf::from)
                .unwrap_or_else(default_local_repository);
            Ok(Arc::new(LocalRepository::new(&config.name, root)))
        }
        RepositoryKind::Remote => {
            let url = config.url.as_deref().ok_or_else(|| {
                PlugkitError::Configuration(format!("repository `{}` has no url", config.name))
            })?;
            let credentials = match &config.credentials {
                Some(creds) => {
                    let username = properties.get(&creds.username_property).ok_or_else(|| {
                        missing_property(&config.name, &creds.username_property)
                    })?;
                    let token = properties
                        .secret(&creds.token_property)
                        .ok_or_else(|| missing_property(&config.name, &creds.token_property))?;
                    Some(Credentials { username, token })
                }
                None => None,
            };
            Ok(Arc::new(RemoteRepository::new(&config.name, url, credentials)?))
        }
    }
}

fn missing_property(repository: &str, property: &str) -> PlugkitError {
    PlugkitError::PublicationConfig(format!(
        "repository `{repository}`: build property `{property}` is not set (plugkit.properties or {})",
        plugkit_config::properties::env_var_name(property)
    ))
}
