// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for plugkit.
//!
//! Provides the error taxonomy, the shared coordinate and scope types, the
//! repository layout, and the host extension point traits used by the
//! plugin declarer, dependency declarer, and publisher.

pub mod error;
pub mod layout;
pub mod traits;
pub mod types;

pub use error::PlugkitError;
pub use traits::{ArtifactRepository, Plugin, Resolver};
pub use types::{Coordinate, DependencyScope, Project, RepositoryKind};
