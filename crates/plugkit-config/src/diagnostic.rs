// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Figment-to-miette error bridge for descriptor problems.
//!
//! Deserialization failures become miette diagnostics carrying a source span
//! into the offending `plugkit.toml`, the list of keys the section accepts,
//! and a Jaro-Winkler "did you mean?" suggestion.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Minimum Jaro-Winkler similarity for a key to be offered as a correction.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// A descriptor error with enough context for miette to render it.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// A key the descriptor schema does not know.
    #[error("unknown descriptor key `{key}`")]
    #[diagnostic(
        code(plugkit::config::unknown_key),
        help("{}", format_unknown_key_help(suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        key: String,
        suggestion: Option<String>,
        valid_keys: String,
        #[label("not a recognized key")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A value of the wrong type (e.g. `kind = 3`).
    #[error("invalid type for `{key}`: {detail}")]
    #[diagnostic(code(plugkit::config::invalid_type), help("expected {expected}"))]
    InvalidType {
        key: String,
        detail: String,
        expected: String,
    },

    /// A value outside the accepted set (e.g. `scope = "runtime"`).
    #[error("invalid value for `{key}`: {detail}")]
    #[diagnostic(code(plugkit::config::invalid_value))]
    InvalidValue { key: String, detail: String },

    /// A required key is absent.
    #[error("missing required key `{key}`")]
    #[diagnostic(
        code(plugkit::config::missing_key),
        help("add `{key} = <value>` to your plugkit.toml")
    )]
    MissingKey { key: String },

    /// The explicitly requested descriptor file does not exist.
    #[error("descriptor not found: {path}")]
    #[diagnostic(code(plugkit::config::not_found))]
    NotFound { path: String },

    /// A semantic check on an otherwise well-typed descriptor failed.
    #[error("validation error: {message}")]
    #[diagnostic(code(plugkit::config::validation))]
    Validation { message: String },

    #[error("configuration error: {0}")]
    #[diagnostic(code(plugkit::config::other))]
    Other(String),
}

fn format_unknown_key_help(suggestion: Option<&str>, valid_keys: &str) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`? Valid keys: {valid_keys}"),
        None => format!("valid keys: {valid_keys}"),
    }
}

/// Convert a `figment::Error` (which may hold several errors) into diagnostics.
pub fn figment_to_config_errors(
    err: figment::Error,
    toml_sources: &[(String, String)],
) -> Vec<ConfigError> {
    use figment::error::Kind;

    let mut errors = Vec::new();

    for error in err {
        let key_path = error
            .path
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(".");

        let config_error = match &error.kind {
            Kind::UnknownField(field, expected) => {
                let valid_keys: Vec<&str> = expected.to_vec();
                let suggestion = suggest_key(field, &valid_keys);
                let (span, src) = find_source_span(&error, field, toml_sources);

                ConfigError::UnknownKey {
                    key: field.clone(),
                    suggestion,
                    valid_keys: valid_keys.join(", "),
                    span,
                    src,
                }
            }
            Kind::MissingField(field) => ConfigError::MissingKey {
                key: if key_path.is_empty() {
                    field.to_string()
                } else {
                    format!("{key_path}.{field}")
                },
            },
            Kind::InvalidType(actual, expected) => ConfigError::InvalidType {
                key: key_path,
                detail: format!("found {actual}, expected {expected}"),
                expected: expected.to_string(),
            },
            Kind::UnknownVariant(found, expected) => ConfigError::InvalidValue {
                key: key_path,
                detail: format!("`{found}` is not one of: {}", expected.join(", ")),
            },
            _ => ConfigError::Other(format!("{error}")),
        };

        errors.push(config_error);
    }

    errors
}

/// Locate the offending key in whichever TOML source the error came from.
fn find_source_span(
    error: &figment::error::Error,
    field: &str,
    toml_sources: &[(String, String)],
) -> (Option<SourceSpan>, Option<NamedSource<String>>) {
    let source_path = error
        .metadata
        .as_ref()
        .and_then(|m| m.source.as_ref())
        .and_then(|s| match s {
            figment::Source::File(path) => Some(path.display().to_string()),
            _ => None,
        });

    // Inline sources carry no file metadata; fall back to the only source given.
    let source = source_path
        .and_then(|path| toml_sources.iter().find(|(p, _)| *p == path))
        .or_else(|| match toml_sources {
            [only] => Some(only),
            _ => None,
        });

    if let Some((path, content)) = source {
        let section: Vec<String> = error.path.iter().map(|s| s.to_string()).collect();
        if let Some(offset) = find_key_offset(content, &section, field) {
            let span = SourceSpan::new(offset.into(), field.len());
            let named = NamedSource::new(path, content.clone());
            return (Some(span), Some(named));
        }
    }

    (None, None)
}

/// Find the byte offset of `field` in TOML content, after the header of the
/// first path segment.
///
/// Both table (`[publication]`) and array-of-tables (`[[plugins]]`) headers
/// are recognized. Top-level fields are searched from the start.
pub fn find_key_offset(content: &str, path: &[String], field: &str) -> Option<usize> {
    let search_start = match path.first() {
        None => 0,
        Some(section) => {
            let array_header = format!("[[{section}]]");
            let table_header = format!("[{section}]");
            if let Some(pos) = content.find(&array_header) {
                pos + array_header.len()
            } else {
                content.find(&table_header).map(|pos| pos + table_header.len())?
            }
        }
    };

    let remaining = &content[search_start..];
    let mut byte_offset = 0;
    for line in remaining.split_inclusive('\n') {
        let trimmed = line.trim_start();
        if let Some(after) = trimmed.strip_prefix(field)
            && (after.starts_with(' ') || after.starts_with('=') || after.starts_with('\t'))
        {
            return Some(search_start + byte_offset + (line.len() - trimmed.len()));
        }
        byte_offset += line.len();
    }

    None
}

/// Suggest the closest valid key, if any is similar enough.
pub fn suggest_key(unknown: &str, valid_keys: &[&str]) -> Option<String> {
    let mut best_score = SUGGESTION_THRESHOLD;
    let mut best_match = None;

    for &key in valid_keys {
        let score = strsim::jaro_winkler(unknown, key);
        if score > best_score {
            best_score = score;
            best_match = Some(key.to_string());
        }
    }

    best_match
}

/// Render diagnostics to stderr with miette's graphical handler.
pub fn render_errors(errors: &[ConfigError]) {
    use miette::GraphicalReportHandler;

    let handler = GraphicalReportHandler::new();
    for error in errors {
        let mut buf = String::new();
        let diagnostic: &dyn Diagnostic = error;
        if handler.render_report(&mut buf, diagnostic).is_ok() {
            eprint!("{buf}");
        } else {
            eprintln!("error: {error}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggest_group_id_for_typo() {
        let valid = &["name", "group_id", "artifact_id", "version", "source"];
        assert_eq!(suggest_key("gruop_id", valid), Some("group_id".to_string()));
    }

    #[test]
    fn suggest_implementation_for_typo() {
        let valid = &["name", "id", "implementation", "display_name", "description"];
        assert_eq!(
            suggest_key("implementaton", valid),
            Some("implementation".to_string())
        );
    }

    #[test]
    fn no_suggestion_for_distant_key() {
        let valid = &["name", "group_id", "version"];
        assert_eq!(suggest_key("zzzzzz", valid), None);
    }

    #[test]
    fn find_key_offset_in_table() {
        let content = "[publication]\ngruop_id = \"io.example\"\n";
        let path = vec!["publication".to_string()];
        let o = find_key_offset(content, &path, "gruop_id").unwrap();
        assert_eq!(&content[o..o + 8], "gruop_id");
    }

    #[test]
    fn find_key_offset_in_array_of_tables() {
        let content = "[project]\nname = \"x\"\n\n[[plugins]]\n  idd = \"io.example.p\"\n";
        let path = vec!["plugins".to_string(), "0".to_string()];
        let o = find_key_offset(content, &path, "idd").unwrap();
        assert_eq!(&content[o..o + 3], "idd");
    }

    #[test]
    fn find_key_offset_missing_section() {
        let content = "[project]\nname = \"x\"\n";
        assert!(find_key_offset(content, &["publication".to_string()], "name").is_none());
    }
}
