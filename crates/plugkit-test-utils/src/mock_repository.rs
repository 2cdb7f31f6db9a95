// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory repository for deterministic publish tests.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use plugkit_core::{ArtifactRepository, PlugkitError, RepositoryKind};

/// A repository that records every write instead of persisting it.
///
/// A failing repository rejects every write with `PlugkitError::Upload`.
pub struct MockRepository {
    name: String,
    writes: Arc<Mutex<Vec<(String, Vec<u8>)>>>,
    failure: Option<String>,
}

impl MockRepository {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            writes: Arc::new(Mutex::new(Vec::new())),
            failure: None,
        }
    }

    /// A repository whose writes all fail with `message`.
    pub fn failing(name: &str, message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::new(name)
        }
    }

    /// Paths written so far, in order.
    pub async fn paths(&self) -> Vec<String> {
        self.writes.lock().await.iter().map(|(p, _)| p.clone()).collect()
    }

    /// Content of the last write to `path`.
    pub async fn content(&self, path: &str) -> Option<Vec<u8>> {
        self.writes
            .lock()
            .await
            .iter()
            .rev()
            .find(|(p, _)| p == path)
            .map(|(_, b)| b.clone())
    }
}

#[async_trait]
impl ArtifactRepository for MockRepository {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> RepositoryKind {
        RepositoryKind::Remote
    }

    fn location(&self) -> String {
        format!("mock://{}", self.name)
    }

    async fn put(&self, relative_path: &str, bytes: &[u8]) -> Result<(), PlugkitError> {
        if let Some(message) = &self.failure {
            return Err(PlugkitError::Upload {
                url: format!("{}/{relative_path}", self.location()),
                message: message.clone(),
                source: None,
            });
        }
        self.writes
            .lock()
            .await
            .push((relative_path.to_string(), bytes.to_vec()));
        Ok(())
    }
}
