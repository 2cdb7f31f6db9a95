// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation of the descriptor.
//!
//! Runs after the whole descriptor is built and collects every problem
//! instead of stopping at the first. Publication identity (`group_id`,
//! `version`) is deliberately not checked here: the publisher enforces it
//! at execution time.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use plugkit_core::RepositoryKind;
use plugkit_core::layout::default_local_repository;

use crate::diagnostic::ConfigError;
use crate::model::PlugkitConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized descriptor for semantic correctness.
pub fn validate_config(config: &PlugkitConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut push = |message: String| errors.push(ConfigError::Validation { message });

    if config.project.name.trim().is_empty() {
        push("project.name must not be empty".to_string());
    }

    if !LOG_LEVELS.contains(&config.project.log_level.as_str()) {
        push(format!(
            "project.log_level `{}` must be one of: {}",
            config.project.log_level,
            LOG_LEVELS.join(", ")
        ));
    }

    let mut seen_ids = HashSet::new();
    for (i, plugin) in config.plugins.iter().enumerate() {
        if plugin.id.trim().is_empty() {
            push(format!("plugins[{i}].id must not be empty"));
        } else if !seen_ids.insert(plugin.id.as_str()) {
            push(format!("duplicate plugin id `{}` in [[plugins]]", plugin.id));
        }
        if plugin.implementation.trim().is_empty() {
            push(format!("plugins[{i}].implementation must not be empty"));
        }
    }

    for (i, dep) in config.dependencies.iter().enumerate() {
        if dep.coordinate.trim().is_empty() {
            push(format!("dependencies[{i}].coordinate must not be empty"));
        }
    }

    if config.publication.name.trim().is_empty() {
        push("publication.name must not be empty".to_string());
    }
    if config.publication.source.trim().is_empty() {
        push("publication.source must not be empty".to_string());
    }

    let mut seen_repos = HashSet::new();
    let mut local_roots: HashMap<PathBuf, &str> = HashMap::new();
    for (i, repo) in config.repositories.iter().enumerate() {
        if repo.name.trim().is_empty() {
            push(format!("repositories[{i}].name must not be empty"));
        } else if !seen_repos.insert(repo.name.as_str()) {
            push(format!("duplicate repository name `{}`", repo.name));
        }

        match repo.kind {
            RepositoryKind::Local => {
                if repo.url.is_some() {
                    push(format!(
                        "repository `{}` is local and must not set `url`",
                        repo.name
                    ));
                }
                if repo.credentials.is_some() {
                    push(format!(
                        "repository `{}` is local and must not set `credentials`",
                        repo.name
                    ));
                }
                let root = repo
                    .path
                    .as_deref()
                    .map(PathBuf::from)
                    .unwrap_or_else(default_local_repository);
                if let Some(other) = local_roots.get(&root) {
                    push(format!(
                        "repositories `{other}` and `{}` share the local root `{}`",
                        repo.name,
                        root.display()
                    ));
                } else {
                    local_roots.insert(root, repo.name.as_str());
                }
            }
            RepositoryKind::Remote => match repo.url.as_deref() {
                None => push(format!("repository `{}` is remote and requires `url`", repo.name)),
                Some(url) if !(url.starts_with("http://") || url.starts_with("https://")) => {
                    push(format!(
                        "repository `{}` url `{url}` must start with http:// or https://",
                        repo.name
                    ));
                }
                Some(_) => {}
            },
        }

        if let Some(creds) = &repo.credentials
            && (creds.username_property.trim().is_empty() || creds.token_property.trim().is_empty())
        {
            push(format!(
                "repository `{}` credentials must name both username_property and token_property",
                repo.name
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
