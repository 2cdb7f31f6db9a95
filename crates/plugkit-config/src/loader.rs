// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Descriptor loader using Figment for layered merging.
//!
//! Lookup: `./plugkit.toml` > `~/.config/plugkit/plugkit.toml` > `/etc/plugkit/plugkit.toml`,
//! with environment variable overrides via the `PLUGKIT_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::PlugkitConfig;

/// Name of the descriptor file looked up in each layer.
pub const DESCRIPTOR_FILE: &str = "plugkit.toml";

/// System-wide descriptor layer.
pub const SYSTEM_DESCRIPTOR: &str = "/etc/plugkit/plugkit.toml";

/// User descriptor layer (`~/.config/plugkit/plugkit.toml`), if a config dir exists.
pub fn user_descriptor_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("plugkit").join(DESCRIPTOR_FILE))
}

/// Load the descriptor from the standard hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/plugkit/plugkit.toml`
/// 3. `~/.config/plugkit/plugkit.toml`
/// 4. `./plugkit.toml`
/// 5. `PLUGKIT_*` environment variables
pub fn load_config() -> Result<PlugkitConfig, figment::Error> {
    build_figment().extract()
}

/// Load the descriptor from a TOML string only (no file lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<PlugkitConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PlugkitConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load the descriptor from one explicit file with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<PlugkitConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PlugkitConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the layered Figment before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(PlugkitConfig::default()))
        .merge(Toml::file(SYSTEM_DESCRIPTOR))
        .merge(Toml::file(user_descriptor_path().unwrap_or_default()))
        .merge(Toml::file(DESCRIPTOR_FILE))
        .merge(env_provider())
}

/// Environment provider mapping `PLUGKIT_<SECTION>_<KEY>` to `section.key`.
///
/// Uses explicit section prefixes rather than splitting on `_`, since keys
/// such as `group_id` contain underscores themselves:
/// `PLUGKIT_PUBLICATION_GROUP_ID` maps to `publication.group_id`.
fn env_provider() -> Env {
    Env::prefixed("PLUGKIT_")
        .filter(|key| {
            let key = key.as_str();
            key.starts_with("project_") || key.starts_with("publication_")
        })
        .map(|key| {
            let mapped = key
                .as_str()
                .replacen("project_", "project.", 1)
                .replacen("publication_", "publication.", 1);
            mapped.into()
        })
}
