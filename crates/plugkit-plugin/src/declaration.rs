// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin declarations and external id validation.

use plugkit_config::model::PluginConfig;
use plugkit_core::PlugkitError;
use serde::Serialize;

/// A plugin id bound to an implementation entry point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginDeclaration {
    /// Id consumers apply the plugin by, e.g. `io.github.example.weaver`.
    pub external_id: String,
    /// Fully-qualified entry point, e.g. `com.example.weaver.WeaverPlugin`.
    pub implementation_entry_point: String,
    pub display_name: Option<String>,
    pub description: Option<String>,
}

impl PluginDeclaration {
    pub fn new(external_id: impl Into<String>, entry_point: impl Into<String>) -> Self {
        Self {
            external_id: external_id.into(),
            implementation_entry_point: entry_point.into(),
            display_name: None,
            description: None,
        }
    }

    /// Checks the id is well formed and the entry point non-empty.
    ///
    /// Does not check that the entry point resolves; that happens when the
    /// plugin is applied.
    pub fn validate(&self) -> Result<(), PlugkitError> {
        validate_external_id(&self.external_id)?;
        if self.implementation_entry_point.trim().is_empty() {
            return Err(PlugkitError::Configuration(format!(
                "plugin `{}`: implementation entry point must not be empty",
                self.external_id
            )));
        }
        Ok(())
    }
}

impl From<&PluginConfig> for PluginDeclaration {
    fn from(config: &PluginConfig) -> Self {
        Self {
            external_id: config.id.clone(),
            implementation_entry_point: config.implementation.clone(),
            display_name: config.display_name.clone(),
            description: config.description.clone(),
        }
    }
}

/// Validate a reverse-DNS plugin id.
///
/// At least two `.`-separated segments; each starts with an ASCII letter and
/// contains only ASCII alphanumerics, `-` or `_`.
pub fn validate_external_id(id: &str) -> Result<(), PlugkitError> {
    if id.is_empty() {
        return Err(PlugkitError::Configuration(
            "plugin id must not be empty".to_string(),
        ));
    }

    let segments: Vec<&str> = id.split('.').collect();
    if segments.len() < 2 {
        return Err(PlugkitError::Configuration(format!(
            "plugin id `{id}` is malformed: expected a reverse-DNS name such as `io.example.my-plugin`"
        )));
    }

    for segment in &segments {
        let mut chars = segment.chars();
        let starts_with_letter = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
        let rest_valid = chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !starts_with_letter || !rest_valid {
            return Err(PlugkitError::Configuration(format!(
                "plugin id `{id}` is malformed: segment `{segment}` must start with a letter \
                 and contain only letters, digits, `-` or `_`"
            )));
        }
    }

    Ok(())
}
