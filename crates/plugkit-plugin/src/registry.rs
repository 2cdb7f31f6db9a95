// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin registry.
//!
//! The `PluginRegistry` holds one `PluginEntry` per external id. Entry points
//! are kept as strings; they are resolved through an [`EntryPointCatalog`]
//! only when a consumer applies the plugin, so an unresolvable entry point
//! is a deferred failure.

use std::collections::HashMap;

use plugkit_core::{PlugkitError, Project};
use tracing::{debug, info};

use crate::catalog::EntryPointCatalog;
use crate::declaration::PluginDeclaration;

/// A registered plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginEntry {
    pub declaration: PluginDeclaration,
    /// Descriptor that declared the plugin, for duplicate diagnostics.
    pub declared_by: String,
}

/// Registry of plugins declared in one build.
#[derive(Debug, Default)]
pub struct PluginRegistry {
    entries: HashMap<String, PluginEntry>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a declaration made by `declared_by`.
    ///
    /// Fails with `PlugkitError::Configuration` if the id is empty or
    /// malformed, the entry point is empty, or the id is already registered.
    pub fn register(
        &mut self,
        declaration: PluginDeclaration,
        declared_by: &str,
    ) -> Result<(), PlugkitError> {
        declaration.validate()?;

        if let Some(existing) = self.entries.get(&declaration.external_id) {
            return Err(PlugkitError::Configuration(format!(
                "plugin id `{}` is already registered by `{}`",
                declaration.external_id, existing.declared_by
            )));
        }

        debug!(
            id = %declaration.external_id,
            entry_point = %declaration.implementation_entry_point,
            declared_by,
            "registered plugin"
        );
        self.entries.insert(
            declaration.external_id.clone(),
            PluginEntry {
                declaration,
                declared_by: declared_by.to_string(),
            },
        );
        Ok(())
    }

    /// Register every declaration, stopping at the first failure.
    pub fn register_all<I>(&mut self, declarations: I, declared_by: &str) -> Result<(), PlugkitError>
    where
        I: IntoIterator<Item = PluginDeclaration>,
    {
        for declaration in declarations {
            self.register(declaration, declared_by)?;
        }
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&PluginEntry> {
        self.entries.get(id)
    }

    /// The entry point registered for `id`.
    pub fn lookup(&self, id: &str) -> Option<&str> {
        self.entries
            .get(id)
            .map(|e| e.declaration.implementation_entry_point.as_str())
    }

    /// Apply the plugin registered as `id` to `project`.
    ///
    /// This is where the entry point is resolved: an unknown id or an entry
    /// point missing from `catalog` fails with `PlugkitError::Configuration`.
    /// Applying a plugin already applied to the project is a no-op.
    pub fn apply(
        &self,
        id: &str,
        project: &mut Project,
        catalog: &EntryPointCatalog,
    ) -> Result<(), PlugkitError> {
        let entry = self.entries.get(id).ok_or_else(|| {
            PlugkitError::Configuration(format!("plugin with id `{id}` not found"))
        })?;

        if project.has_plugin(id) {
            debug!(id, project = %project.name, "plugin already applied");
            return Ok(());
        }

        let plugin = catalog
            .instantiate(&entry.declaration.implementation_entry_point)
            .map_err(|e| PlugkitError::Configuration(format!("failed to apply plugin `{id}`: {e}")))?;
        plugin.apply(project)?;
        project.mark_applied(id);

        info!(id, project = %project.name, "applied plugin");
        Ok(())
    }

    /// All entries, sorted by external id.
    pub fn list_all(&self) -> Vec<&PluginEntry> {
        let mut entries: Vec<&PluginEntry> = self.entries.values().collect();
        entries.sort_by(|a, b| a.declaration.external_id.cmp(&b.declaration.external_id));
        entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plugkit_core::Plugin;
    use proptest::prelude::*;

    struct WeaverPlugin;

    impl Plugin for WeaverPlugin {
        fn apply(&self, project: &mut Project) -> Result<(), PlugkitError> {
            project.register_task("aspectJConfigure");
            project.register_task("aspectJWeaving");
            Ok(())
        }
    }

    struct FailingPlugin;

    impl Plugin for FailingPlugin {
        fn apply(&self, _project: &mut Project) -> Result<(), PlugkitError> {
            Err(PlugkitError::Internal("boom".into()))
        }
    }

    fn catalog() -> EntryPointCatalog {
        let mut catalog = EntryPointCatalog::new();
        catalog.insert("com.example.WeaverPlugin", || -> Box<dyn Plugin> { Box::new(WeaverPlugin) });
        catalog.insert("com.example.FailingPlugin", || -> Box<dyn Plugin> { Box::new(FailingPlugin) });
        catalog
    }

    #[test]
    fn register_and_lookup_roundtrip() {
        let mut registry = PluginRegistry::new();
        registry
            .register(
                PluginDeclaration::new("io.example.weaver", "com.example.WeaverPlugin"),
                "plugkit.toml",
            )
            .unwrap();
        assert_eq!(registry.lookup("io.example.weaver"), Some("com.example.WeaverPlugin"));
        assert_eq!(registry.get("io.example.weaver").unwrap().declared_by, "plugkit.toml");
    }

    #[test]
    fn duplicate_id_is_configuration_error() {
        let mut registry = PluginRegistry::new();
        registry
            .register(PluginDeclaration::new("io.example.weaver", "com.example.A"), "first.toml")
            .unwrap();
        let err = registry
            .register(PluginDeclaration::new("io.example.weaver", "com.example.B"), "second.toml")
            .unwrap_err();
        assert!(matches!(err, PlugkitError::Configuration(ref m) if m.contains("already registered by `first.toml`")));
        assert_eq!(registry.lookup("io.example.weaver"), Some("com.example.A"));
    }

    #[test]
    fn malformed_id_is_rejected_at_registration() {
        let mut registry = PluginRegistry::new();
        assert!(registry.register(PluginDeclaration::new("", "com.example.A"), "d").is_err());
        assert!(registry.register(PluginDeclaration::new("weaver", "com.example.A"), "d").is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn unresolvable_entry_point_registers_but_fails_on_apply() {
        let mut registry = PluginRegistry::new();
        registry
            .register(PluginDeclaration::new("io.example.ghost", "com.example.Ghost"), "d")
            .unwrap();

        let mut project = Project::new("app");
        let err = registry.apply("io.example.ghost", &mut project, &catalog()).unwrap_err();
        assert!(matches!(err, PlugkitError::Configuration(ref m) if m.contains("com.example.Ghost")));
        assert!(!project.has_plugin("io.example.ghost"));
    }

    #[test]
    fn apply_runs_plugin_and_marks_project() {
        let mut registry = PluginRegistry::new();
        registry
            .register(PluginDeclaration::new("io.example.weaver", "com.example.WeaverPlugin"), "d")
            .unwrap();

        let mut project = Project::new("app");
        registry.apply("io.example.weaver", &mut project, &catalog()).unwrap();
        assert!(project.has_task("aspectJWeaving"));
        assert!(project.has_plugin("io.example.weaver"));

        // Second application is a no-op.
        registry.apply("io.example.weaver", &mut project, &catalog()).unwrap();
        assert_eq!(project.applied_plugins().len(), 1);
    }

    #[test]
    fn apply_propagates_plugin_failure() {
        let mut registry = PluginRegistry::new();
        registry
            .register(PluginDeclaration::new("io.example.fail", "com.example.FailingPlugin"), "d")
            .unwrap();
        let mut project = Project::new("app");
        let err = registry.apply("io.example.fail", &mut project, &catalog()).unwrap_err();
        assert!(matches!(err, PlugkitError::Internal(_)));
        assert!(!project.has_plugin("io.example.fail"));
    }

    #[test]
    fn apply_unknown_id_fails() {
        let registry = PluginRegistry::new();
        let mut project = Project::new("app");
        assert!(registry.apply("io.example.none", &mut project, &catalog()).is_err());
    }

    #[test]
    fn list_all_returns_sorted() {
        let mut registry = PluginRegistry::new();
        registry
            .register_all(
                vec![
                    PluginDeclaration::new("io.zebra.p", "Z"),
                    PluginDeclaration::new("io.alpha.p", "A"),
                    PluginDeclaration::new("io.middle.p", "M"),
                ],
                "d",
            )
            .unwrap();
        let ids: Vec<&str> = registry
            .list_all()
            .iter()
            .map(|e| e.declaration.external_id.as_str())
            .collect();
        assert_eq!(ids, vec!["io.alpha.p", "io.middle.p", "io.zebra.p"]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    #[tracing_test::traced_test]
    fn registration_is_logged() {
        let mut registry = PluginRegistry::new();
        registry
            .register(PluginDeclaration::new("io.example.logged", "com.example.L"), "d")
            .unwrap();
        assert!(logs_contain("registered plugin"));
    }

    proptest! {
        #[test]
        fn any_well_formed_id_registers_and_looks_up(
            segments in prop::collection::vec("[a-z][a-z0-9_-]{0,8}", 2..5),
            entry in "[a-z]{1,6}(\\.[A-Z][a-zA-Z]{0,8}){1,3}",
        ) {
            let id = segments.join(".");
            let mut registry = PluginRegistry::new();
            registry.register(PluginDeclaration::new(id.clone(), entry.clone()), "d").unwrap();
            prop_assert_eq!(registry.lookup(&id), Some(entry.as_str()));

            let dup = registry.register(PluginDeclaration::new(id, entry), "d");
            prop_assert!(matches!(dup, Err(PlugkitError::Configuration(_))));
        }
    }
}
