// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Publication Configurator for plugkit.
//!
//! Turns the `[publication]` section into publication descriptors, packages
//! them deterministically, and writes them to local or remote repositories
//! through publish tasks.

pub mod descriptor;
pub mod files;
pub mod package;
pub mod pom;
pub mod repository;
pub mod task;

pub use descriptor::{BundledFile, Component, PublicationDescriptor};
pub use files::{PublishedFile, assemble, sha256_hex};
pub use package::{package, package_to_dir};
pub use repository::{Credentials, LocalRepository, RemoteRepository};
pub use task::{PublicationConfigurator, PublishReport, PublishTask, package_task_name, run_tasks, task_name};
