// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Host extension point traits.

pub mod plugin;
pub mod repository;
pub mod resolver;

pub use plugin::Plugin;
pub use repository::ArtifactRepository;
pub use resolver::Resolver;
