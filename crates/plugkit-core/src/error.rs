// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types shared by every plugkit component.

use std::path::PathBuf;

use thiserror::Error;

/// The primary error type for declaration, resolution, and publishing.
///
/// None of these are retried automatically. A failed build is repaired by
/// fixing the cause and re-invoking the command.
#[derive(Debug, Error)]
pub enum PlugkitError {
    /// Bad plugin declaration, duplicate plugin id, malformed dependency, or
    /// an entry point that cannot be resolved when the plugin is applied.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A declared dependency coordinate could not be found in any repository.
    #[error("could not resolve dependency `{coordinate}`: {reason}")]
    Resolution { coordinate: String, reason: String },

    /// Publication identity (group id, version) is missing or invalid at publish time.
    #[error("publication configuration error: {0}")]
    PublicationConfig(String),

    /// Network or authentication failure while uploading to a remote repository.
    #[error("upload to {url} failed: {message}")]
    Upload {
        url: String,
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Filesystem failure while packaging or writing to a local repository.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A failure surfaced by a named build task.
    #[error("task '{task}' failed: {source}")]
    TaskFailed {
        task: String,
        source: Box<PlugkitError>,
    },

    /// A task that did not run because a task it depends on failed.
    #[error("skipped: {0}")]
    Skipped(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl PlugkitError {
    /// Wraps this error with the name of the task that produced it.
    pub fn in_task(self, task: impl Into<String>) -> Self {
        PlugkitError::TaskFailed {
            task: task.into(),
            source: Box::new(self),
        }
    }

    /// Builds an `Io` error for the given path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PlugkitError::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns the underlying error with any task wrappers removed.
    pub fn root(&self) -> &PlugkitError {
        match self {
            PlugkitError::TaskFailed { source, .. } => source.root(),
            other => other,
        }
    }

    /// Returns the name of the outermost task this error was raised in, if any.
    pub fn task(&self) -> Option<&str> {
        match self {
            PlugkitError::TaskFailed { task, .. } => Some(task),
            _ => None,
        }
    }
}
