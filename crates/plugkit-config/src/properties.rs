// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Build properties: the out-of-band source for publishing credentials.
//!
//! Properties come from `plugkit.properties` files (`key=value` lines, `#`
//! comments) and from the environment. A property `github.publish.token` is
//! also looked up as the environment variable `GITHUB_PUBLISH_TOKEN`, which
//! takes precedence over any file.

use std::collections::HashMap;
use std::path::Path;

use secrecy::SecretString;
use tracing::debug;

use crate::diagnostic::ConfigError;

/// File name of a properties layer.
pub const PROPERTIES_FILE: &str = "plugkit.properties";

/// Key/value properties assembled once at startup.
#[derive(Debug, Clone, Default)]
pub struct BuildProperties {
    values: HashMap<String, String>,
    read_env: bool,
}

impl BuildProperties {
    /// Empty properties that do not consult the environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the user layer (`~/.config/plugkit/plugkit.properties`) then the
    /// project layer (`<project_dir>/plugkit.properties`), with environment
    /// lookups enabled.
    pub fn load(project_dir: &Path) -> Result<Self, ConfigError> {
        let mut props = Self {
            values: HashMap::new(),
            read_env: true,
        };

        if let Some(dir) = dirs::config_dir() {
            props.merge_file(&dir.join("plugkit").join(PROPERTIES_FILE))?;
        }
        props.merge_file(&project_dir.join(PROPERTIES_FILE))?;
        Ok(props)
    }

    /// Merge a properties file over the current values. Missing files are skipped.
    pub fn merge_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => {
                return Err(ConfigError::Other(format!(
                    "failed to read {}: {e}",
                    path.display()
                )));
            }
        };
        debug!(path = %path.display(), "loaded build properties");
        self.merge_str(&content);
        Ok(())
    }

    /// Merge `key=value` lines over the current values.
    pub fn merge_str(&mut self, content: &str) {
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                self.values
                    .insert(key.trim().to_string(), value.trim().to_string());
            }
        }
    }

    /// Set a single property.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Look up a property. The environment wins over files when enabled.
    pub fn get(&self, key: &str) -> Option<String> {
        if self.read_env
            && let Ok(value) = std::env::var(env_var_name(key))
            && !value.is_empty()
        {
            return Some(value);
        }
        self.values.get(key).filter(|v| !v.is_empty()).cloned()
    }

    /// Look up a property holding a secret.
    pub fn secret(&self, key: &str) -> Option<SecretString> {
        self.get(key).map(SecretString::from)
    }
}

/// Environment variable consulted for a property: `a.b-c` becomes `A_B_C`.
pub fn env_var_name(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn env_var_name_uppercases_and_replaces_separators() {
        assert_eq!(env_var_name("github.publish.token"), "GITHUB_PUBLISH_TOKEN");
        assert_eq!(env_var_name("repo-user"), "REPO_USER");
    }

    #[test]
    fn merge_str_skips_comments_and_blank_lines() {
        let mut props = BuildProperties::new();
        props.merge_str("# comment\n\ngithub.publish.name = octocat\n! bang\nbroken line\n");
        assert_eq!(props.get("github.publish.name").as_deref(), Some("octocat"));
        assert!(props.get("broken line").is_none());
    }

    #[test]
    fn later_layers_override_earlier() {
        let mut props = BuildProperties::new();
        props.merge_str("k=one");
        props.merge_str("k=two");
        assert_eq!(props.get("k").as_deref(), Some("two"));
    }

    #[test]
    fn empty_values_are_absent() {
        let mut props = BuildProperties::new();
        props.set("token", "");
        assert!(props.get("token").is_none());
        assert!(props.secret("token").is_none());
    }

    #[test]
    fn secret_exposes_value() {
        let mut props = BuildProperties::new();
        props.set("github.publish.token", "ghp_abc");
        let secret = props.secret("github.publish.token").unwrap();
        assert_eq!(secret.expose_secret(), "ghp_abc");
    }

    #[test]
    fn merge_missing_file_is_ok() {
        let tmp = tempfile::tempdir().unwrap();
        let mut props = BuildProperties::new();
        props.merge_file(&tmp.path().join("absent.properties")).unwrap();
        assert!(props.get("anything").is_none());
    }

    #[test]
    #[serial_test::serial]
    fn environment_overrides_file_when_loaded() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(
            tmp.path().join(PROPERTIES_FILE),
            "plugkit.test.token=from-file\nplugkit.test.user=file-user\n",
        )
        .unwrap();

        // SAFETY: serialized test; no other thread reads this variable.
        unsafe { std::env::set_var("PLUGKIT_TEST_TOKEN", "from-env") };
        let props = BuildProperties::load(tmp.path()).unwrap();
        let token = props.secret("plugkit.test.token");
        let user = props.get("plugkit.test.user");
        unsafe { std::env::remove_var("PLUGKIT_TEST_TOKEN") };

        assert_eq!(token.unwrap().expose_secret(), "from-env");
        assert_eq!(user.as_deref(), Some("file-user"));
    }
}
