// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `plugkit plugins` command implementation.

use plugkit_core::PlugkitError;
use plugkit_plugin::{PluginEntry, PluginMarker};
use plugkit_publish::PublicationDescriptor;
use serde::Serialize;

use crate::context::BuildContext;

/// One row of `plugkit plugins --json`.
#[derive(Debug, Serialize)]
pub struct PluginRow {
    pub id: String,
    pub implementation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub declared_by: String,
    /// Marker coordinate consumers resolve the plugin id through.
    pub marker: String,
}

impl PluginRow {
    fn new(entry: &PluginEntry, main: &PublicationDescriptor) -> Self {
        let marker = PluginMarker::new(&entry.declaration, main.coordinate());
        Self {
            id: entry.declaration.external_id.clone(),
            implementation: entry.declaration.implementation_entry_point.clone(),
            display_name: entry.declaration.display_name.clone(),
            description: entry.declaration.description.clone(),
            declared_by: entry.declared_by.clone(),
            marker: marker.coordinate.to_string(),
        }
    }
}

/// Run `plugkit plugins`, listing registered plugins sorted by id.
pub fn run_plugins(ctx: &BuildContext, json: bool) -> Result<(), PlugkitError> {
    let publications = ctx.publications();
    let main = publications
        .first()
        .ok_or_else(|| PlugkitError::Internal("no main publication".to_string()))?;
    let rows: Vec<PluginRow> = ctx
        .registry
        .list_all()
        .into_iter()
        .map(|entry| PluginRow::new(entry, main))
        .collect();

    if json {
        let rendered = serde_json::to_string_pretty(&rows)
            .map_err(|e| PlugkitError::Internal(format!("failed to render plugins: {e}")))?;
        println!("{rendered}");
        return Ok(());
    }

    if rows.is_empty() {
        println!("no plugins declared in {}", ctx.descriptor_label());
        return Ok(());
    }
    for row in &rows {
        match &row.display_name {
            Some(name) => println!("{}  {}  ({name})", row.id, row.implementation),
            None => println!("{}  {}", row.id, row.implementation),
        }
        println!("    marker: {}", row.marker);
    }
    Ok(())
}
