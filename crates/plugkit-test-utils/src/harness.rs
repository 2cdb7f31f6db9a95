// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Temp project harness for end-to-end tests.
//!
//! `TestProject` lays out a complete plugin project in a temp directory:
//! a `plugkit.toml` descriptor, compiled output under `build/libs`, and a
//! local repository root under `repo/` (created lazily by publishing).

use std::path::{Path, PathBuf};

use plugkit_config::model::{
    DependencyConfig, PlugkitConfig, PluginConfig, RepositoryConfig, ResolutionConfig,
};
use plugkit_core::{DependencyScope, PlugkitError, RepositoryKind};

/// Builder for a [`TestProject`].
pub struct TestProjectBuilder {
    config: PlugkitConfig,
    compiled: Vec<(String, String)>,
    resolvable: Vec<String>,
}

impl TestProjectBuilder {
    fn new() -> Self {
        let mut config = PlugkitConfig::default();
        config.project.name = "weaver".to_string();
        config.publication.group_id = "io.example".to_string();
        config.publication.version = "1.0.2".to_string();
        Self {
            config,
            compiled: vec![(
                "com/example/weaver/WeaverPlugin.class".to_string(),
                "compiled weaver plugin".to_string(),
            )],
            resolvable: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.config.project.name = name.to_string();
        self
    }

    pub fn with_group(mut self, group_id: &str) -> Self {
        self.config.publication.group_id = group_id.to_string();
        self
    }

    pub fn with_version(mut self, version: &str) -> Self {
        self.config.publication.version = version.to_string();
        self
    }

    /// Declare a plugin with the given external id and entry point.
    pub fn with_plugin(mut self, id: &str, implementation: &str) -> Self {
        self.config.plugins.push(PluginConfig {
            name: None,
            id: id.to_string(),
            implementation: implementation.to_string(),
            display_name: None,
            description: None,
        });
        self
    }

    pub fn with_dependency(mut self, scope: DependencyScope, coordinate: &str) -> Self {
        self.config.dependencies.push(DependencyConfig {
            scope,
            coordinate: coordinate.to_string(),
        });
        self
    }

    /// Like `with_dependency`, and also place a file for the coordinate in
    /// the project's resolution root.
    pub fn with_resolvable_dependency(mut self, scope: DependencyScope, coordinate: &str) -> Self {
        self.resolvable.push(coordinate.to_string());
        self.with_dependency(scope, coordinate)
    }

    /// Add a file under the compiled output directory.
    pub fn with_compiled_file(mut self, path: &str, content: &str) -> Self {
        self.compiled.push((path.to_string(), content.to_string()));
        self
    }

    /// Add a remote repository without credentials.
    pub fn with_remote(mut self, name: &str, url: &str) -> Self {
        self.config.repositories.push(RepositoryConfig {
            name: name.to_string(),
            kind: RepositoryKind::Remote,
            path: None,
            url: Some(url.to_string()),
            credentials: None,
        });
        self
    }

    /// Create the temp directory and write everything to disk.
    pub fn build(mut self) -> Result<TestProject, PlugkitError> {
        let temp_dir = tempfile::TempDir::new()
            .map_err(|e| PlugkitError::io(std::env::temp_dir(), e))?;
        let dir = temp_dir.path().to_path_buf();
        let local_root = dir.join("repo");
        let resolution_root = dir.join("cache");

        self.config.repositories.insert(
            0,
            RepositoryConfig {
                name: "local".to_string(),
                kind: RepositoryKind::Local,
                path: Some(local_root.display().to_string()),
                url: None,
                credentials: None,
            },
        );
        self.config.resolution = ResolutionConfig {
            roots: vec![resolution_root.display().to_string()],
        };

        let output = dir.join(&self.config.publication.source);
        for (path, content) in &self.compiled {
            write_file(&output.join(path), content.as_bytes())?;
        }

        for coordinate in &self.resolvable {
            let parsed: plugkit_core::Coordinate = coordinate.parse()?;
            let path = resolution_root.join(plugkit_core::layout::artifact_path(&parsed));
            write_file(&path, coordinate.as_bytes())?;
        }

        let descriptor = toml::to_string(&self.config)
            .map_err(|e| PlugkitError::Internal(format!("failed to render descriptor: {e}")))?;
        let descriptor_path = dir.join("plugkit.toml");
        write_file(&descriptor_path, descriptor.as_bytes())?;

        Ok(TestProject {
            dir,
            descriptor_path,
            local_root,
            config: self.config,
            _temp_dir: temp_dir,
        })
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<(), PlugkitError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| PlugkitError::io(parent, e))?;
    }
    std::fs::write(path, bytes).map_err(|e| PlugkitError::io(path, e))
}

/// A plugin project on disk. Removed when dropped.
pub struct TestProject {
    dir: PathBuf,
    descriptor_path: PathBuf,
    local_root: PathBuf,
    /// The descriptor as written to `plugkit.toml`.
    pub config: PlugkitConfig,
    _temp_dir: tempfile::TempDir,
}

impl TestProject {
    pub fn builder() -> TestProjectBuilder {
        TestProjectBuilder::new()
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn descriptor_path(&self) -> &Path {
        &self.descriptor_path
    }

    /// Root of the `local` repository. Absent until something is published.
    pub fn local_root(&self) -> &Path {
        &self.local_root
    }

    /// Path of `relative` inside the local repository.
    pub fn local_file(&self, relative: &str) -> PathBuf {
        self.local_root.join(relative)
    }
}
