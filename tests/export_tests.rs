//! Schema Export Tests
//!
//! The database viewer consumes the exported JSON Schema files and
//! manifest; these tests pin down that surface.

use serde_json::Value;
use storefront_schemas::{export, RecordKind, SchemaRegistry};
use tempfile::tempdir;

#[test]
fn test_export_writes_one_file_per_kind_plus_manifest() {
    let dir = tempdir().unwrap();
    let registry = SchemaRegistry::new();

    export::export_to_dir(&registry, dir.path()).unwrap();

    for kind in RecordKind::ALL {
        let path = dir.path().join(export::schema_filename(kind));
        assert!(path.exists(), "missing schema file for {}", kind);
    }
    assert!(dir.path().join("manifest.json").exists());
}

#[test]
fn test_manifest_parses_and_lists_collections() {
    let dir = tempdir().unwrap();
    let registry = SchemaRegistry::new();

    export::export_to_dir(&registry, dir.path()).unwrap();

    let content = std::fs::read_to_string(dir.path().join("manifest.json")).unwrap();
    let manifest: Value = serde_json::from_str(&content).unwrap();
    let schemas = manifest["schemas"].as_array().unwrap();
    assert_eq!(schemas.len(), 5);

    let order = schemas
        .iter()
        .find(|entry| entry["name"] == "Order")
        .unwrap();
    assert_eq!(order["collection"], "order");
    assert_eq!(order["embedded"], false);
    assert_eq!(order["file"], "Order.schema.json");

    let cart_item = schemas
        .iter()
        .find(|entry| entry["name"] == "CartItem")
        .unwrap();
    assert_eq!(cart_item["collection"], Value::Null);
    assert_eq!(cart_item["embedded"], true);
}

#[test]
fn test_exported_schema_documents_parse_back() {
    let dir = tempdir().unwrap();
    let registry = SchemaRegistry::new();

    export::export_to_dir(&registry, dir.path()).unwrap();

    let content =
        std::fs::read_to_string(dir.path().join(export::schema_filename(RecordKind::Order)))
            .unwrap();
    let document: Value = serde_json::from_str(&content).unwrap();

    assert_eq!(
        document["$schema"],
        "https://json-schema.org/draft/2020-12/schema"
    );
    assert_eq!(document["title"], "Order");
    assert!(document["$defs"]["CartItem"].is_object());
    assert!(document["$defs"]["CustomerInfo"].is_object());

    let required: Vec<&str> = document["required"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(required, vec!["items", "subtotal", "total", "customer"]);
}
