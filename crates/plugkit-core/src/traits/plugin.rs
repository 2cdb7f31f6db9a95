// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin capability trait implemented by every plugin entry point.

use crate::error::PlugkitError;
use crate::types::Project;

/// The capability a plugin entry point must provide to be applied to a project.
pub trait Plugin: Send + Sync {
    /// Applies the plugin to `project`, registering whatever tasks it contributes.
    fn apply(&self, project: &mut Project) -> Result<(), PlugkitError>;
}
