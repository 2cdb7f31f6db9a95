// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dependency declarer.
//!
//! Dependencies are declared with a scope (`compile-only` or
//! `implementation`) and a `group:artifact:version` coordinate. Every
//! coordinate is validated when declared; resolution happens later, when a
//! classpath is requested.

pub mod classpath;
pub mod declare;
pub mod resolver;

pub use classpath::Classpath;
pub use declare::{DependencySet, DependencySpec};
pub use resolver::RepositoryResolver;
