// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Build context shared by every command.
//!
//! The descriptor is turned into a plugin registry, a dependency set, and
//! publication descriptors exactly once; commands only read from it.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use plugkit_config::PlugkitConfig;
use plugkit_core::{Plugin, PlugkitError, Project};
use plugkit_deps::{DependencySet, RepositoryResolver};
use plugkit_plugin::{EntryPointCatalog, PluginDeclaration, PluginRegistry};
use plugkit_publish::PublicationDescriptor;
use tracing::debug;

pub struct BuildContext {
    pub config: PlugkitConfig,
    pub project_dir: PathBuf,
    pub registry: PluginRegistry,
    pub dependencies: DependencySet,
    descriptor_label: String,
}

impl BuildContext {
    /// Declare plugins and dependencies from `config`.
    ///
    /// Malformed plugin ids, duplicate ids, and empty or malformed
    /// coordinates fail here, before anything is resolved or packaged.
    pub fn assemble(
        config: PlugkitConfig,
        project_dir: PathBuf,
        descriptor_label: String,
    ) -> Result<Self, PlugkitError> {
        let mut registry = PluginRegistry::new();
        registry
            .register_all(
                config.plugins.iter().map(PluginDeclaration::from),
                &descriptor_label,
            )
            .map_err(|e| e.in_task("declarePlugins"))?;
        let dependencies = DependencySet::from_config(&config.dependencies)
            .map_err(|e| e.in_task("declareDependencies"))?;

        debug!(
            project = %config.project.name,
            plugins = registry.len(),
            dependencies = dependencies.len(),
            "assembled build context"
        );

        Ok(Self {
            config,
            project_dir,
            registry,
            dependencies,
            descriptor_label,
        })
    }

    pub fn descriptor_label(&self) -> &str {
        &self.descriptor_label
    }

    /// The main publication followed by its plugin markers.
    pub fn publications(&self) -> Vec<Arc<PublicationDescriptor>> {
        let main = PublicationDescriptor::main(
            &self.config,
            &self.dependencies,
            &self.registry,
            &self.project_dir,
        );
        let markers = PublicationDescriptor::markers(&self.config, &self.registry, &main);
        std::iter::once(main).chain(markers).map(Arc::new).collect()
    }

    /// Directory `plugkit package` writes archives to.
    pub fn package_dir(&self) -> PathBuf {
        self.project_dir
            .join(&self.config.project.build_dir)
            .join("plugkit")
    }

    /// Resolver over `[resolution].roots`, relative roots taken from the project directory.
    pub fn resolver(&self) -> RepositoryResolver {
        let roots = &self.config.resolution.roots;
        if roots.is_empty() {
            RepositoryResolver::from_config(&self.config.resolution)
        } else {
            RepositoryResolver::new(roots.iter().map(|r| self.project_dir.join(r)).collect())
        }
    }

    pub fn compiled_output(&self) -> PathBuf {
        self.project_dir.join(&self.config.publication.source)
    }

    /// Apply every declared plugin to a fresh host project.
    ///
    /// Entry points are resolved against the classes found in the compiled
    /// output, so a typo in `implementation` fails here instead of in a
    /// consumer's build.
    pub fn apply_plugins(&self) -> Result<Project, PlugkitError> {
        let catalog = compiled_catalog(&self.compiled_output())?;
        let entries = self.registry.list_all();
        for entry in &entries {
            catalog.verify(&entry.declaration)?;
        }

        let mut project = Project::new(&self.config.project.name);
        for entry in entries {
            self.registry
                .apply(&entry.declaration.external_id, &mut project, &catalog)?;
        }
        Ok(project)
    }
}

/// A plugin class found in the compiled output.
///
/// Plugin bodies run inside the host build; applying one here only records
/// it on the project.
struct CompiledPlugin;

impl Plugin for CompiledPlugin {
    fn apply(&self, _project: &mut Project) -> Result<(), PlugkitError> {
        Ok(())
    }
}

fn compiled_catalog(output: &Path) -> Result<EntryPointCatalog, PlugkitError> {
    if !output.is_dir() {
        return Err(PlugkitError::Configuration(format!(
            "entry points can only be checked against a compiled output directory; `{}` is not one",
            output.display()
        )));
    }

    let mut catalog = EntryPointCatalog::new();
    let mut pending = vec![output.to_path_buf()];
    while let Some(dir) = pending.pop() {
        let entries = std::fs::read_dir(&dir).map_err(|e| PlugkitError::io(&dir, e))?;
        for entry in entries {
            let path = entry.map_err(|e| PlugkitError::io(&dir, e))?.path();
            if path.is_dir() {
                pending.push(path);
            } else if let Some(entry_point) = entry_point_name(output, &path) {
                catalog.insert(entry_point, || Box::new(CompiledPlugin) as Box<dyn Plugin>);
            }
        }
    }
    debug!(output = %output.display(), entry_points = catalog.len(), "scanned compiled output");
    Ok(catalog)
}

/// `com/example/WeaverPlugin.class` under `root` becomes `com.example.WeaverPlugin`.
fn entry_point_name(root: &Path, file: &Path) -> Option<String> {
    let relative = file.strip_prefix(root).ok()?.with_extension("");
    let segments: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if segments.is_empty() {
        None
    } else {
        Some(segments.join("."))
    }
}
