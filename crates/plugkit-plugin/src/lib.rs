// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin declarer: declarations, registry, entry-point catalog, and markers.
//!
//! A plugin is declared by binding a reverse-DNS external id to an
//! implementation entry point. Declarations are validated when registered;
//! entry points are resolved when a consumer applies the plugin.

pub mod catalog;
pub mod declaration;
pub mod marker;
pub mod registry;

pub use catalog::{EntryPointCatalog, PluginFactory};
pub use declaration::{PluginDeclaration, validate_external_id};
pub use marker::{PluginMarker, plugin_descriptor};
pub use registry::{PluginEntry, PluginRegistry};
