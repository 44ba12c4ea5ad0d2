//! Schema Registry
//!
//! The fixed, immutable set of record schemas for the storefront data
//! layer, with one validate-and-construct operation per record kind.
//! Validation is pure and synchronous; a registry can be shared across
//! threads freely.

use std::collections::HashMap;

use regex::Regex;
use serde_json::{json, Map, Value};
use tracing::debug;

use crate::error::{Result, ValidationError};
use crate::records::{Record, RecordKind};
use crate::schema::{FieldSpec, FieldType, RecordSchema};
use crate::validate::{normalize_record, Context};

/// Pragmatic RFC-5322-style syntax: local part, "@", dotted domain.
/// Intentionally not the full RFC grammar.
const EMAIL_PATTERN: &str =
    r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~.-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)+$";

/// The main schema registry
pub struct SchemaRegistry {
    /// Schema per record kind, fixed at construction
    schemas: HashMap<RecordKind, RecordSchema>,
    /// Compiled email syntax pattern
    email: Regex,
}

impl SchemaRegistry {
    /// Build the registry with all five record schemas
    pub fn new() -> Self {
        let mut schemas = HashMap::new();
        for schema in [
            user_schema(),
            product_schema(),
            cart_item_schema(),
            customer_info_schema(),
            order_schema(),
        ] {
            schemas.insert(schema.kind, schema);
        }

        debug!(kinds = schemas.len(), "built record schema registry");

        Self {
            schemas,
            email: Regex::new(EMAIL_PATTERN).unwrap(),
        }
    }

    /// Get the schema for a record kind
    pub fn schema(&self, kind: RecordKind) -> &RecordSchema {
        &self.schemas[&kind]
    }

    /// All schemas, in registry order
    pub fn schemas(&self) -> impl Iterator<Item = &RecordSchema> {
        RecordKind::ALL.iter().map(|kind| &self.schemas[kind])
    }

    /// Validate an untyped JSON value against a kind's schema.
    ///
    /// Checks all fields and reports all violations. On success,
    /// returns the input with defaults applied and unknown keys
    /// dropped; the input itself is never mutated.
    pub fn normalize(
        &self,
        kind: RecordKind,
        raw: &Value,
    ) -> std::result::Result<Value, ValidationError> {
        let mut violations = Vec::new();
        let ctx = Context {
            schemas: &self.schemas,
            email: &self.email,
        };

        match normalize_record(&ctx, self.schema(kind), raw, "", &mut violations) {
            Some(object) if violations.is_empty() => Ok(Value::Object(object)),
            _ => {
                debug!(
                    kind = %kind,
                    violations = violations.len(),
                    "record rejected"
                );
                Err(ValidationError::new(violations))
            }
        }
    }

    /// Validate-and-construct: turn an untyped JSON value into a typed
    /// record, or reject it with every violation found.
    pub fn construct<R: Record>(&self, raw: &Value) -> Result<R> {
        let normalized = self.normalize(R::KIND, raw)?;
        Ok(serde_json::from_value(normalized)?)
    }

    /// Render a kind's schema as a standalone JSON Schema document,
    /// with embedded kinds under `$defs`.
    pub fn json_schema(&self, kind: RecordKind) -> Value {
        let schema = self.schema(kind);
        let mut document = match schema.object_schema() {
            Value::Object(map) => map,
            _ => unreachable!("object_schema always renders an object"),
        };
        document.insert(
            "$schema".to_string(),
            json!("https://json-schema.org/draft/2020-12/schema"),
        );

        // Collect transitively referenced embedded kinds
        let mut defs = Map::new();
        let mut pending = schema.embedded_kinds();
        while let Some(embedded) = pending.pop() {
            if defs.contains_key(embedded.name()) {
                continue;
            }
            let embedded_schema = self.schema(embedded);
            defs.insert(embedded.name().to_string(), embedded_schema.object_schema());
            pending.extend(embedded_schema.embedded_kinds());
        }
        if !defs.is_empty() {
            document.insert("$defs".to_string(), Value::Object(defs));
        }

        Value::Object(document)
    }

    /// Describe every record kind for the external database viewer:
    /// name, storage collection, embedded flag, and full JSON Schema.
    pub fn describe(&self) -> Value {
        let kinds: Vec<Value> = self
            .schemas()
            .map(|schema| {
                json!({
                    "name": schema.kind.name(),
                    "collection": schema.kind.collection(),
                    "embedded": schema.kind.is_embedded(),
                    "fields": schema.fields.len(),
                    "schema": self.json_schema(schema.kind),
                })
            })
            .collect();

        json!({ "kinds": kinds })
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn user_schema() -> RecordSchema {
    RecordSchema::new(
        RecordKind::User,
        vec![
            FieldSpec::required("name", FieldType::Text).describe("Full name"),
            FieldSpec::required("email", FieldType::Text)
                .email()
                .describe("Email address"),
            FieldSpec::optional("address", FieldType::Text).describe("Address"),
            FieldSpec::optional("age", FieldType::Integer)
                .min(0.0)
                .max(120.0)
                .describe("Age in years"),
            FieldSpec::optional("is_active", FieldType::Bool)
                .with_default(json!(true))
                .describe("Whether user is active"),
        ],
    )
}

fn product_schema() -> RecordSchema {
    RecordSchema::new(
        RecordKind::Product,
        vec![
            FieldSpec::required("title", FieldType::Text).describe("Product title"),
            FieldSpec::optional("description", FieldType::Text).describe("Product description"),
            FieldSpec::required("price", FieldType::Float)
                .min(0.0)
                .describe("Price in dollars"),
            FieldSpec::required("category", FieldType::Text).describe("Product category"),
            FieldSpec::optional("in_stock", FieldType::Bool)
                .with_default(json!(true))
                .describe("Whether product is in stock"),
            FieldSpec::optional("image", FieldType::Text).describe("Primary image URL"),
            FieldSpec::optional("rating", FieldType::Float)
                .min(0.0)
                .max(5.0)
                .with_default(json!(4.5))
                .describe("Average rating"),
            FieldSpec::optional("tags", FieldType::TextList)
                .with_default(json!([]))
                .describe("Searchable tags"),
            FieldSpec::optional("trending", FieldType::Bool)
                .with_default(json!(false))
                .describe("Whether this product is currently trending/viral"),
        ],
    )
}

fn cart_item_schema() -> RecordSchema {
    RecordSchema::new(
        RecordKind::CartItem,
        vec![
            FieldSpec::required("product_id", FieldType::Text).describe("ID of the product"),
            FieldSpec::required("title", FieldType::Text),
            FieldSpec::required("price", FieldType::Float).min(0.0),
            FieldSpec::required("quantity", FieldType::Integer).min(1.0),
            FieldSpec::optional("image", FieldType::Text),
        ],
    )
}

fn customer_info_schema() -> RecordSchema {
    RecordSchema::new(
        RecordKind::CustomerInfo,
        vec![
            FieldSpec::required("name", FieldType::Text),
            FieldSpec::required("email", FieldType::Text).email(),
            FieldSpec::optional("phone", FieldType::Text),
            FieldSpec::required("address_line1", FieldType::Text),
            FieldSpec::optional("address_line2", FieldType::Text),
            FieldSpec::required("city", FieldType::Text),
            FieldSpec::required("state", FieldType::Text),
            FieldSpec::required("postal_code", FieldType::Text),
            FieldSpec::required("country", FieldType::Text),
        ],
    )
}

fn order_schema() -> RecordSchema {
    RecordSchema::new(
        RecordKind::Order,
        vec![
            // Expected non-empty by convention; emptiness is caller policy
            FieldSpec::required("items", FieldType::RecordList(RecordKind::CartItem)),
            FieldSpec::required("subtotal", FieldType::Float).min(0.0),
            FieldSpec::optional("shipping", FieldType::Float)
                .min(0.0)
                .with_default(json!(0.0)),
            FieldSpec::required("total", FieldType::Float).min(0.0),
            FieldSpec::required("customer", FieldType::Record(RecordKind::CustomerInfo)),
            FieldSpec::optional("status", FieldType::Text)
                .with_default(json!("received"))
                .describe("Order status"),
        ],
    )
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::records::User;

    #[test]
    fn test_registry_covers_all_kinds() {
        let registry = SchemaRegistry::new();
        for kind in RecordKind::ALL {
            assert_eq!(registry.schema(kind).kind, kind);
        }
        assert_eq!(registry.schemas().count(), 5);
    }

    #[test]
    fn test_registry_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SchemaRegistry>();
    }

    #[test]
    fn test_normalize_applies_defaults() {
        let registry = SchemaRegistry::new();
        let normalized = registry
            .normalize(
                RecordKind::User,
                &json!({ "name": "Ada", "email": "ada@example.com" }),
            )
            .unwrap();

        assert_eq!(normalized["is_active"], json!(true));
        assert!(normalized.get("address").is_none());
    }

    #[test]
    fn test_normalize_drops_unknown_keys() {
        let registry = SchemaRegistry::new();
        let normalized = registry
            .normalize(
                RecordKind::User,
                &json!({ "name": "Ada", "email": "ada@example.com", "role": "admin" }),
            )
            .unwrap();

        assert!(normalized.get("role").is_none());
    }

    #[test]
    fn test_construct_typed_record() {
        let registry = SchemaRegistry::new();
        let user: User = registry
            .construct(&json!({ "name": "Ada", "email": "ada@example.com", "age": 36 }))
            .unwrap();

        assert_eq!(user.name, "Ada");
        assert_eq!(user.age, Some(36));
        assert!(user.is_active);
    }

    #[test]
    fn test_non_object_input_rejected_at_root() {
        let registry = SchemaRegistry::new();
        let err = registry
            .normalize(RecordKind::User, &json!("not a record"))
            .unwrap_err();

        assert_eq!(err.violations.len(), 1);
        assert_eq!(err.violations[0].path, "");
    }

    #[test]
    fn test_json_schema_includes_defs_for_order() {
        let registry = SchemaRegistry::new();
        let schema = registry.json_schema(RecordKind::Order);

        assert_eq!(schema["title"], json!("Order"));
        assert!(schema["$defs"]["CartItem"].is_object());
        assert!(schema["$defs"]["CustomerInfo"].is_object());
        assert_eq!(
            schema["properties"]["customer"]["$ref"],
            json!("#/$defs/CustomerInfo")
        );
    }

    #[test]
    fn test_describe_covers_all_kinds() {
        let registry = SchemaRegistry::new();
        let description = registry.describe();
        let kinds = description["kinds"].as_array().unwrap();

        assert_eq!(kinds.len(), 5);
        let user = &kinds[0];
        assert_eq!(user["name"], json!("User"));
        assert_eq!(user["collection"], json!("user"));
        assert_eq!(user["embedded"], json!(false));
    }
}
