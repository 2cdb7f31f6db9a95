// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dependency resolver trait.

use std::path::PathBuf;

use crate::error::PlugkitError;
use crate::types::Coordinate;

/// Turns a coordinate into the path of a resolved artifact.
pub trait Resolver {
    /// Resolves `coordinate`, failing with `PlugkitError::Resolution` when
    /// no repository holds it.
    fn resolve(&self, coordinate: &Coordinate) -> Result<PathBuf, PlugkitError>;
}
