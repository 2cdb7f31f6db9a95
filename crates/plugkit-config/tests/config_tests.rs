// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for descriptor loading and validation.

use plugkit_config::diagnostic::ConfigError;
use plugkit_config::{load_and_validate_path, load_and_validate_str, load_config_from_str};
use plugkit_core::{DependencyScope, RepositoryKind};

const FULL_DESCRIPTOR: &str = r#"
[project]
name = "android-aspectj"
log_level = "debug"

[[plugins]]
name = "androidAspectJPlugin"
id = "io.github.jianqinghh.android-aspectj"
implementation = "com.jaq.aspectj.AspectJPlugin"

[[dependencies]]
scope = "compile-only"
coordinate = "com.android.tools.build:gradle:8.5.0"

[[dependencies]]
scope = "implementation"
coordinate = "org.aspectj:aspectjtools:1.9.22"

[publication]
group_id = "io.github.jianqinghh"
version = "1.0.2"
source = "build/libs"

[[repositories]]
name = "local"
kind = "local"

[[repositories]]
name = "github"
kind = "remote"
url = "https://maven.pkg.github.com/owner/repo"
credentials = { username_property = "github.publish.name", token_property = "github.publish.token" }
"#;

#[test]
fn full_descriptor_deserializes() {
    let config = load_config_from_str(FULL_DESCRIPTOR).expect("valid descriptor");
    assert_eq!(config.project.name, "android-aspectj");
    assert_eq!(config.project.log_level, "debug");

    assert_eq!(config.plugins.len(), 1);
    assert_eq!(config.plugins[0].id, "io.github.jianqinghh.android-aspectj");
    assert_eq!(config.plugins[0].implementation, "com.jaq.aspectj.AspectJPlugin");
    assert_eq!(config.plugins[0].name.as_deref(), Some("androidAspectJPlugin"));

    assert_eq!(config.dependencies.len(), 2);
    assert_eq!(config.dependencies[0].scope, DependencyScope::CompileOnly);
    assert_eq!(config.dependencies[1].scope, DependencyScope::Implementation);

    assert_eq!(config.publication.group_id, "io.github.jianqinghh");
    assert_eq!(config.publication.version, "1.0.2");
    assert_eq!(config.publication.name, "main");
    assert!(config.publication.plugin_markers);

    assert_eq!(config.repositories.len(), 2);
    assert_eq!(config.repositories[0].kind, RepositoryKind::Local);
    assert_eq!(config.repositories[1].kind, RepositoryKind::Remote);
    let creds = config.repositories[1].credentials.as_ref().unwrap();
    assert_eq!(creds.token_property, "github.publish.token");
}

#[test]
fn full_descriptor_validates() {
    assert!(load_and_validate_str(FULL_DESCRIPTOR).is_ok());
}

#[test]
fn unknown_key_gets_suggestion() {
    let toml = r#"
[publication]
gruop_id = "io.example"
"#;
    let errors = load_and_validate_str(toml).unwrap_err();
    let found = errors.iter().any(|e| {
        matches!(
            e,
            ConfigError::UnknownKey { key, suggestion: Some(s), .. }
                if key == "gruop_id" && s == "group_id"
        )
    });
    assert!(found, "expected an UnknownKey with a suggestion, got: {errors:?}");
}

#[test]
fn unknown_scope_is_reported() {
    let toml = r#"
[[dependencies]]
scope = "runtime"
coordinate = "a:b:1.0"
"#;
    let errors = load_and_validate_str(toml).unwrap_err();
    assert!(!errors.is_empty());
    let text = errors.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("\n");
    assert!(text.contains("runtime"), "got: {text}");
}

#[test]
fn plugin_without_implementation_is_missing_key() {
    let toml = r#"
[[plugins]]
id = "io.example.weaver"
"#;
    let errors = load_and_validate_str(toml).unwrap_err();
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::MissingKey { key } if key.contains("implementation"))),
        "got: {errors:?}"
    );
}

#[test]
fn empty_coordinate_fails_validation() {
    let toml = r#"
[[dependencies]]
scope = "implementation"
coordinate = ""
"#;
    let errors = load_and_validate_str(toml).unwrap_err();
    assert!(errors
        .iter()
        .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("coordinate"))));
}

#[test]
fn explicit_path_loads_descriptor() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("plugkit.toml");
    std::fs::write(&path, FULL_DESCRIPTOR).unwrap();

    let config = load_and_validate_path(&path).expect("descriptor should load");
    assert_eq!(config.publication.version, "1.0.2");
}

#[test]
fn explicit_missing_path_is_not_found() {
    let tmp = tempfile::tempdir().unwrap();
    let errors = load_and_validate_path(&tmp.path().join("nope.toml")).unwrap_err();
    assert!(matches!(errors.as_slice(), [ConfigError::NotFound { .. }]));
}

#[test]
#[serial_test::serial]
fn env_overrides_publication_version() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("plugkit.toml");
    std::fs::write(&path, FULL_DESCRIPTOR).unwrap();

    // SAFETY: serialized test; no other thread reads this variable.
    unsafe { std::env::set_var("PLUGKIT_PUBLICATION_VERSION", "2.0.0") };
    let result = load_and_validate_path(&path);
    unsafe { std::env::remove_var("PLUGKIT_PUBLICATION_VERSION") };

    assert_eq!(result.unwrap().publication.version, "2.0.0");
}
