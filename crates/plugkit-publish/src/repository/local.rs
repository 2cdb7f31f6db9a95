// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Local filesystem repository.
//!
//! Re-publishing the same version overwrites deterministically: each file is
//! written to a uniquely named temp file in the destination directory and
//! renamed over the destination, so readers see either the old or the new
//! file, never a partial one. Concurrent writers never share a temp file.

use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use plugkit_core::{ArtifactRepository, PlugkitError, RepositoryKind};
use tracing::debug;

/// A repository rooted at a local directory.
#[derive(Debug, Clone)]
pub struct LocalRepository {
    name: String,
    root: PathBuf,
}

impl LocalRepository {
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl ArtifactRepository for LocalRepository {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> RepositoryKind {
        RepositoryKind::Local
    }

    fn location(&self) -> String {
        self.root.display().to_string()
    }

    async fn put(&self, relative_path: &str, bytes: &[u8]) -> Result<(), PlugkitError> {
        let dest = self.root.join(relative_path);
        let parent = dest
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| PlugkitError::Internal(format!("no parent for {}", dest.display())))?;
        tokio::fs::create_dir_all(&parent)
            .await
            .map_err(|e| PlugkitError::io(&parent, e))?;

        let content = bytes.to_vec();
        let target = dest.clone();
        tokio::task::spawn_blocking(move || replace_file(&parent, &target, &content))
            .await
            .map_err(|e| PlugkitError::Internal(format!("writing {} panicked: {e}", dest.display())))??;

        debug!(repository = %self.name, path = %dest.display(), bytes = bytes.len(), "wrote file");
        Ok(())
    }
}

/// Write `bytes` to a fresh temp file in `dir`, then rename it over `dest`.
fn replace_file(dir: &Path, dest: &Path, bytes: &[u8]) -> Result<(), PlugkitError> {
    let mut part = tempfile::Builder::new()
        .prefix(".plugkit-")
        .suffix(".part")
        .tempfile_in(dir)
        .map_err(|e| PlugkitError::io(dir, e))?;
    part.write_all(bytes)
        .map_err(|e| PlugkitError::io(part.path(), e))?;
    part.persist(dest)
        .map_err(|e| PlugkitError::io(dest, e.error))?;
    Ok(())
}
