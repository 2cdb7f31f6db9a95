// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Descriptor configuration for plugkit.
//!
//! Parses `plugkit.toml` with strict validation (`deny_unknown_fields`),
//! layered lookup with `PLUGKIT_*` environment overrides, and miette
//! diagnostics with typo suggestions. The resulting [`PlugkitConfig`] is
//! assembled once and passed by reference to every component.
//!
//! # Usage
//!
//! ```no_run
//! use plugkit_config::load_and_validate;
//!
//! let config = load_and_validate().expect("descriptor errors");
//! println!("publishing {}", config.project.name);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod properties;
pub mod validation;

use std::path::Path;

pub use diagnostic::{ConfigError, render_errors};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::PlugkitConfig;
pub use properties::BuildProperties;

/// Load the descriptor from the layered hierarchy and validate it.
pub fn load_and_validate() -> Result<PlugkitConfig, Vec<ConfigError>> {
    match loader::load_config() {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(
            err,
            &collect_toml_sources(),
        )),
    }
}

/// Load one explicit descriptor file (plus env overrides) and validate it.
pub fn load_and_validate_path(path: &Path) -> Result<PlugkitConfig, Vec<ConfigError>> {
    let content = std::fs::read_to_string(path).map_err(|_| {
        vec![ConfigError::NotFound {
            path: path.display().to_string(),
        }]
    })?;

    match loader::load_config_from_path(path) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let sources = vec![(path.display().to_string(), content)];
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

/// Load a descriptor from a TOML string and validate it.
pub fn load_and_validate_str(toml_content: &str) -> Result<PlugkitConfig, Vec<ConfigError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let sources = vec![("<inline>".to_string(), toml_content.to_string())];
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

/// Collect the descriptor layers that exist, for error span resolution.
fn collect_toml_sources() -> Vec<(String, String)> {
    let mut sources = Vec::new();

    if let Ok(content) = std::fs::read_to_string(loader::DESCRIPTOR_FILE) {
        let path = std::env::current_dir()
            .map(|d| d.join(loader::DESCRIPTOR_FILE).display().to_string())
            .unwrap_or_else(|_| loader::DESCRIPTOR_FILE.to_string());
        sources.push((path, content));
    }

    if let Some(path) = loader::user_descriptor_path()
        && let Ok(content) = std::fs::read_to_string(&path)
    {
        sources.push((path.display().to_string(), content));
    }

    if let Ok(content) = std::fs::read_to_string(loader::SYSTEM_DESCRIPTOR) {
        sources.push((loader::SYSTEM_DESCRIPTOR.to_string(), content));
    }

    sources
}
