// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Compile and runtime classpaths.

use std::ffi::OsString;
use std::path::PathBuf;

use plugkit_core::{PlugkitError, Resolver};
use tracing::info;

use crate::declare::{DependencySet, DependencySpec};

/// Ordered list of resolved artifact paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classpath {
    entries: Vec<PathBuf>,
}

impl Classpath {
    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    /// Join the entries with the platform path separator.
    pub fn to_os_string(&self) -> Result<OsString, PlugkitError> {
        std::env::join_paths(&self.entries)
            .map_err(|e| PlugkitError::Internal(format!("cannot join classpath: {e}")))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl DependencySet {
    /// Resolve every declared dependency (CompileOnly and Implementation).
    pub fn compile_classpath(&self, resolver: &dyn Resolver) -> Result<Classpath, PlugkitError> {
        resolve_all("compile", self.compile(), resolver)
    }

    /// Resolve Implementation dependencies only.
    pub fn runtime_classpath(&self, resolver: &dyn Resolver) -> Result<Classpath, PlugkitError> {
        resolve_all("runtime", self.runtime(), resolver)
    }
}

fn resolve_all<'a>(
    name: &str,
    specs: impl Iterator<Item = &'a DependencySpec>,
    resolver: &dyn Resolver,
) -> Result<Classpath, PlugkitError> {
    let entries = specs
        .map(|spec| resolver.resolve(&spec.coordinate))
        .collect::<Result<Vec<_>, _>>()?;
    info!(classpath = name, entries = entries.len(), "resolved classpath");
    Ok(Classpath { entries })
}
