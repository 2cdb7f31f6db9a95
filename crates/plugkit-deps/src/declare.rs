// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dependency declarations.

use plugkit_config::model::DependencyConfig;
use plugkit_core::{Coordinate, DependencyScope, PlugkitError};

/// A validated dependency declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencySpec {
    pub scope: DependencyScope,
    pub coordinate: Coordinate,
}

impl DependencySpec {
    /// Parse `coordinate` under `scope`.
    ///
    /// An empty or malformed coordinate fails with `PlugkitError::Configuration`.
    pub fn new(scope: DependencyScope, coordinate: &str) -> Result<Self, PlugkitError> {
        let coordinate = coordinate.parse::<Coordinate>().map_err(|e| match e {
            PlugkitError::Configuration(msg) => {
                PlugkitError::Configuration(format!("{scope} dependency: {msg}"))
            }
            other => other,
        })?;
        Ok(Self { scope, coordinate })
    }
}

/// Ordered set of declared dependencies.
///
/// Construction validates every entry before anything is resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencySet {
    entries: Vec<DependencySpec>,
}

impl DependencySet {
    /// Declare `(scope, coordinate)` pairs in order.
    pub fn declare<'a, I>(declarations: I) -> Result<Self, PlugkitError>
    where
        I: IntoIterator<Item = (DependencyScope, &'a str)>,
    {
        let entries = declarations
            .into_iter()
            .map(|(scope, coordinate)| DependencySpec::new(scope, coordinate))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { entries })
    }

    /// Declare the `[[dependencies]]` entries of a descriptor.
    pub fn from_config(dependencies: &[DependencyConfig]) -> Result<Self, PlugkitError> {
        Self::declare(
            dependencies
                .iter()
                .map(|d| (d.scope, d.coordinate.as_str())),
        )
    }

    pub fn entries(&self) -> &[DependencySpec] {
        &self.entries
    }

    /// Entries of `scope`, in declaration order.
    pub fn of_scope(&self, scope: DependencyScope) -> impl Iterator<Item = &DependencySpec> {
        self.entries.iter().filter(move |e| e.scope == scope)
    }

    /// Entries on the compile classpath (every scope).
    pub fn compile(&self) -> impl Iterator<Item = &DependencySpec> {
        self.entries.iter()
    }

    /// Entries on the runtime classpath and in published metadata.
    pub fn runtime(&self) -> impl Iterator<Item = &DependencySpec> {
        self.entries.iter().filter(|e| e.scope.is_runtime())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
