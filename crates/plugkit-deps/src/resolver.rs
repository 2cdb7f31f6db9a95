// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Resolution against local repository roots.

use std::path::PathBuf;

use plugkit_config::model::ResolutionConfig;
use plugkit_core::layout::{artifact_path, default_local_repository};
use plugkit_core::{Coordinate, PlugkitError, Resolver};
use tracing::debug;

/// Resolves coordinates by searching repository roots in order.
#[derive(Debug, Clone)]
pub struct RepositoryResolver {
    roots: Vec<PathBuf>,
}

impl RepositoryResolver {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    /// Roots from `[resolution]`, or the conventional local cache when none are set.
    pub fn from_config(config: &ResolutionConfig) -> Self {
        if config.roots.is_empty() {
            Self::new(vec![default_local_repository()])
        } else {
            Self::new(config.roots.iter().map(PathBuf::from).collect())
        }
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }
}

impl Resolver for RepositoryResolver {
    fn resolve(&self, coordinate: &Coordinate) -> Result<PathBuf, PlugkitError> {
        let relative = artifact_path(coordinate);
        for root in &self.roots {
            let candidate = root.join(&relative);
            if candidate.is_file() {
                debug!(%coordinate, path = %candidate.display(), "resolved dependency");
                return Ok(candidate);
            }
        }

        let searched = self
            .roots
            .iter()
            .map(|r| r.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        Err(PlugkitError::Resolution {
            coordinate: coordinate.to_string(),
            reason: format!("`{relative}` not found in [{searched}]"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn install(root: &std::path::Path, coordinate: &Coordinate) -> PathBuf {
        let path = root.join(artifact_path(coordinate));
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, b"artifact").unwrap();
        path
    }

    #[test]
    fn resolves_from_first_root_holding_artifact() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        let coordinate = Coordinate::new("org.aspectj", "aspectjtools", "1.9.22");
        let expected = install(second.path(), &coordinate);

        let resolver = RepositoryResolver::new(vec![first.path().into(), second.path().into()]);
        assert_eq!(resolver.resolve(&coordinate).unwrap(), expected);
    }

    #[test]
    fn earlier_root_wins() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        let coordinate = Coordinate::new("a.b", "c", "1.0");
        let expected = install(first.path(), &coordinate);
        install(second.path(), &coordinate);

        let resolver = RepositoryResolver::new(vec![first.path().into(), second.path().into()]);
        assert_eq!(resolver.resolve(&coordinate).unwrap(), expected);
    }

    #[test]
    fn missing_artifact_names_coordinate() {
        let root = tempfile::tempdir().unwrap();
        let resolver = RepositoryResolver::new(vec![root.path().into()]);
        let coordinate = Coordinate::new("org.missing", "nothing", "0.1.0");

        let err = resolver.resolve(&coordinate).unwrap_err();
        match err {
            PlugkitError::Resolution { coordinate, reason } => {
                assert_eq!(coordinate, "org.missing:nothing:0.1.0");
                assert!(reason.contains("org/missing/nothing/0.1.0"));
            }
            other => panic!("expected Resolution, got {other:?}"),
        }
    }

    #[test]
    fn empty_config_uses_local_cache() {
        let resolver = RepositoryResolver::from_config(&ResolutionConfig::default());
        assert_eq!(resolver.roots(), &[default_local_repository()]);
    }
}
