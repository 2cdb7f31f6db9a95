// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Repository target trait for publish tasks.

use async_trait::async_trait;

use crate::error::PlugkitError;
use crate::types::RepositoryKind;

/// A destination that accepts published files.
///
/// Paths are relative to the repository root and use `/` separators.
/// Each publish task owns its target exclusively for the duration of the
/// upload; implementations hold no state shared between tasks.
#[async_trait]
pub trait ArtifactRepository: Send + Sync {
    /// Configured name of this repository (e.g. "local", "github").
    fn name(&self) -> &str;

    /// Whether this is a local or remote repository.
    fn kind(&self) -> RepositoryKind;

    /// Human-readable location, for logs and error messages.
    fn location(&self) -> String;

    /// Writes `bytes` at `relative_path`, replacing any existing file.
    async fn put(&self, relative_path: &str, bytes: &[u8]) -> Result<(), PlugkitError>;
}
