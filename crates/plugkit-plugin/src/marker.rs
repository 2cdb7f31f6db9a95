// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin markers.
//!
//! A consumer that only knows a plugin id finds the implementation through a
//! marker publication: `group = <id>`, `artifact = <id>.plugin`, whose
//! metadata depends on the main artifact. The main artifact in turn bundles
//! one properties descriptor per plugin mapping the id to its entry point.

use plugkit_core::Coordinate;

use crate::declaration::PluginDeclaration;

/// Directory inside the archive that holds plugin properties descriptors.
pub const PLUGIN_DESCRIPTOR_DIR: &str = "META-INF/plugkit-plugins";

/// Suffix appended to the plugin id to form the marker artifact id.
pub const MARKER_SUFFIX: &str = ".plugin";

/// Marker publication for one declared plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginMarker {
    pub plugin_id: String,
    /// Coordinate of the marker itself.
    pub coordinate: Coordinate,
    /// Coordinate of the main artifact the marker points to.
    pub target: Coordinate,
}

impl PluginMarker {
    /// Marker for `declaration`, pointing at the main artifact `target`.
    pub fn new(declaration: &PluginDeclaration, target: Coordinate) -> Self {
        let id = &declaration.external_id;
        Self {
            plugin_id: id.clone(),
            coordinate: Coordinate::new(id.clone(), format!("{id}{MARKER_SUFFIX}"), target.version.clone())
                .with_extension("pom"),
            target,
        }
    }
}

/// Path and content of the properties descriptor bundled for a plugin.
pub fn plugin_descriptor(declaration: &PluginDeclaration) -> (String, String) {
    let path = format!("{PLUGIN_DESCRIPTOR_DIR}/{}.properties", declaration.external_id);
    let content = format!(
        "implementation-class={}\n",
        declaration.implementation_entry_point
    );
    (path, content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_coordinates_follow_plugin_id() {
        let decl = PluginDeclaration::new(
            "io.github.jianqinghh.android-aspectj",
            "com.jaq.aspectj.AspectJPlugin",
        );
        let target = Coordinate::new("io.github.jianqinghh", "android-aspectj", "1.0.2");
        let marker = PluginMarker::new(&decl, target.clone());

        assert_eq!(marker.coordinate.group, "io.github.jianqinghh.android-aspectj");
        assert_eq!(
            marker.coordinate.artifact,
            "io.github.jianqinghh.android-aspectj.plugin"
        );
        assert_eq!(marker.coordinate.version, "1.0.2");
        assert_eq!(marker.target, target);
    }

    #[test]
    fn descriptor_maps_id_to_entry_point() {
        let decl = PluginDeclaration::new("io.example.weaver", "com.example.WeaverPlugin");
        let (path, content) = plugin_descriptor(&decl);
        assert_eq!(path, "META-INF/plugkit-plugins/io.example.weaver.properties");
        assert_eq!(content, "implementation-class=com.example.WeaverPlugin\n");
    }
}
