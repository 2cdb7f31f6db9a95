// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Entry-point catalog.
//!
//! Maps entry point strings to factories producing plugin instances. The
//! registry stores only strings; resolution through the catalog happens when
//! a plugin is applied, or eagerly through [`EntryPointCatalog::verify`].

use std::collections::HashMap;

use plugkit_core::{Plugin, PlugkitError};

use crate::declaration::PluginDeclaration;

/// Factory for plugin instances.
///
/// Implemented for any `Fn() -> Box<dyn Plugin>`, so plain functions and
/// closures can be registered directly.
pub trait PluginFactory: Send + Sync {
    fn create(&self) -> Box<dyn Plugin>;
}

impl<F> PluginFactory for F
where
    F: Fn() -> Box<dyn Plugin> + Send + Sync,
{
    fn create(&self) -> Box<dyn Plugin> {
        self()
    }
}

/// String-keyed registry of loadable entry points.
#[derive(Default)]
pub struct EntryPointCatalog {
    factories: HashMap<String, Box<dyn PluginFactory>>,
}

impl EntryPointCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory under `entry_point`, replacing any previous one.
    pub fn insert(&mut self, entry_point: impl Into<String>, factory: impl PluginFactory + 'static) {
        self.factories.insert(entry_point.into(), Box::new(factory));
    }

    pub fn contains(&self, entry_point: &str) -> bool {
        self.factories.contains_key(entry_point)
    }

    /// Instantiate the plugin behind `entry_point`.
    pub fn instantiate(&self, entry_point: &str) -> Result<Box<dyn Plugin>, PlugkitError> {
        self.factories
            .get(entry_point)
            .map(|f| f.create())
            .ok_or_else(|| {
                PlugkitError::Configuration(format!(
                    "entry point `{entry_point}` cannot be resolved to a plugin implementation"
                ))
            })
    }

    /// Eagerly check that a declaration's entry point resolves.
    pub fn verify(&self, declaration: &PluginDeclaration) -> Result<(), PlugkitError> {
        if self.contains(&declaration.implementation_entry_point) {
            Ok(())
        } else {
            Err(PlugkitError::Configuration(format!(
                "plugin `{}`: entry point `{}` cannot be resolved to a plugin implementation",
                declaration.external_id, declaration.implementation_entry_point
            )))
        }
    }

    /// Registered entry points, sorted.
    pub fn entry_points(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl std::fmt::Debug for EntryPointCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntryPointCatalog")
            .field("entry_points", &self.entry_points())
            .finish()
    }
}
