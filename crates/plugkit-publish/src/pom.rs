// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Metadata descriptor (`.pom`) rendering.

use plugkit_core::Coordinate;

use crate::descriptor::{Component, PublicationDescriptor};

/// Render the metadata descriptor published next to the artifact.
///
/// Archive publications list their runtime dependencies; marker
/// publications depend on the archive they point at.
pub fn render_pom(publication: &PublicationDescriptor) -> String {
    let (packaging, dependencies): (&str, Vec<&Coordinate>) = match &publication.component {
        Component::Archive {
            runtime_dependencies,
            ..
        } => ("tar.gz", runtime_dependencies.iter().collect()),
        Component::Marker { target } => ("pom", vec![target]),
    };

    let mut xml = String::new();
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<project xmlns=\"http://maven.apache.org/POM/4.0.0\">\n");
    xml.push_str("  <modelVersion>4.0.0</modelVersion>\n");
    xml.push_str(&format!("  <groupId>{}</groupId>\n", escape(&publication.group_id)));
    xml.push_str(&format!("  <artifactId>{}</artifactId>\n", escape(&publication.artifact_id)));
    xml.push_str(&format!("  <version>{}</version>\n", escape(&publication.version)));
    xml.push_str(&format!("  <packaging>{packaging}</packaging>\n"));

    if !dependencies.is_empty() {
        xml.push_str("  <dependencies>\n");
        for dep in dependencies {
            xml.push_str("    <dependency>\n");
            xml.push_str(&format!("      <groupId>{}</groupId>\n", escape(&dep.group)));
            xml.push_str(&format!("      <artifactId>{}</artifactId>\n", escape(&dep.artifact)));
            xml.push_str(&format!("      <version>{}</version>\n", escape(&dep.version)));
            if matches!(publication.component, Component::Marker { .. }) {
                xml.push_str(&format!("      <type>{}</type>\n", escape(&dep.extension)));
            } else {
                xml.push_str("      <scope>runtime</scope>\n");
            }
            xml.push_str("    </dependency>\n");
        }
        xml.push_str("  </dependencies>\n");
    }

    xml.push_str("</project>\n");
    xml
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}
