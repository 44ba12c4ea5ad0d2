//! Schema export for the database viewer
//!
//! Writes each record kind's JSON Schema document plus a manifest to a
//! directory, the form the external database viewer reads to render
//! the schema.

use std::fs;
use std::path::Path;

use serde_json::json;
use tracing::debug;

use crate::error::Result;
use crate::records::RecordKind;
use crate::registry::SchemaRegistry;

/// File name of a kind's exported schema document
pub fn schema_filename(kind: RecordKind) -> String {
    format!("{}.schema.json", kind.name())
}

/// Export all record schemas to a directory.
///
/// Writes `<Kind>.schema.json` for every kind and a `manifest.json`
/// listing each kind with its storage collection and file.
pub fn export_to_dir(registry: &SchemaRegistry, output_dir: impl AsRef<Path>) -> Result<()> {
    let output = output_dir.as_ref();
    fs::create_dir_all(output)?;

    let mut entries = Vec::new();
    for schema in registry.schemas() {
        let filename = schema_filename(schema.kind);
        let document = registry.json_schema(schema.kind);
        let content = serde_json::to_string_pretty(&document)?;
        fs::write(output.join(&filename), &content)?;

        debug!(kind = %schema.kind, file = %filename, "exported schema");

        entries.push(json!({
            "name": schema.kind.name(),
            "collection": schema.kind.collection(),
            "embedded": schema.kind.is_embedded(),
            "file": filename,
        }));
    }

    let manifest = json!({ "schemas": entries });
    let manifest_content = serde_json::to_string_pretty(&manifest)?;
    fs::write(output.join("manifest.json"), &manifest_content)?;

    Ok(())
}
