//! Field metadata and record schemas
//!
//! A `RecordSchema` is the introspectable description of one record
//! kind: the exact set of fields, their types, required/optional
//! status, defaults, and constraints. The validation engine interprets
//! these tables; the database viewer reads them as JSON Schema.

use serde_json::{json, Map, Value};

use crate::records::RecordKind;

/// The semantic type of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// A UTF-8 string
    Text,
    /// A whole number (JSON numbers with a fractional part are rejected)
    Integer,
    /// A floating-point number (whole numbers are accepted)
    Float,
    Bool,
    /// An ordered sequence of strings
    TextList,
    /// An embedded record of the given kind
    Record(RecordKind),
    /// An ordered sequence of embedded records
    RecordList(RecordKind),
}

impl FieldType {
    /// Human-readable name used in type-mismatch violations
    pub fn expected(&self) -> &'static str {
        match self {
            FieldType::Text => "string",
            FieldType::Integer => "integer",
            FieldType::Float => "number",
            FieldType::Bool => "boolean",
            FieldType::TextList => "array of strings",
            FieldType::Record(_) => "object",
            FieldType::RecordList(_) => "array of objects",
        }
    }

    /// The embedded kind this type references, if any
    pub fn embedded_kind(&self) -> Option<RecordKind> {
        match self {
            FieldType::Record(kind) | FieldType::RecordList(kind) => Some(*kind),
            _ => None,
        }
    }
}

/// A validation constraint on a field value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Constraint {
    /// Inclusive numeric lower bound
    Min(f64),
    /// Inclusive numeric upper bound
    Max(f64),
    /// RFC-5322-style email syntax
    Email,
}

/// One field of a record schema
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub field_type: FieldType,
    /// Validation fails with a missing-field violation if absent
    pub required: bool,
    /// Applied to the normalized output when the field is absent
    pub default: Option<Value>,
    pub constraints: Vec<Constraint>,
    pub description: Option<&'static str>,
}

impl FieldSpec {
    /// A field that must be present on input
    pub fn required(name: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            field_type,
            required: true,
            default: None,
            constraints: Vec::new(),
            description: None,
        }
    }

    /// A field that may be absent on input
    pub fn optional(name: &'static str, field_type: FieldType) -> Self {
        Self {
            required: false,
            ..Self::required(name, field_type)
        }
    }

    /// Set the default applied when the field is absent
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    /// Add an inclusive lower bound
    pub fn min(mut self, bound: f64) -> Self {
        self.constraints.push(Constraint::Min(bound));
        self
    }

    /// Add an inclusive upper bound
    pub fn max(mut self, bound: f64) -> Self {
        self.constraints.push(Constraint::Max(bound));
        self
    }

    /// Require email syntax
    pub fn email(mut self) -> Self {
        self.constraints.push(Constraint::Email);
        self
    }

    /// Attach a human-readable description
    pub fn describe(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }

    /// The inclusive lower bound, if one is set
    pub fn min_bound(&self) -> Option<f64> {
        self.constraints.iter().find_map(|c| match c {
            Constraint::Min(bound) => Some(*bound),
            _ => None,
        })
    }

    /// The inclusive upper bound, if one is set
    pub fn max_bound(&self) -> Option<f64> {
        self.constraints.iter().find_map(|c| match c {
            Constraint::Max(bound) => Some(*bound),
            _ => None,
        })
    }

    /// Whether this field must satisfy email syntax
    pub fn requires_email(&self) -> bool {
        self.constraints.contains(&Constraint::Email)
    }
}

/// The complete schema for one record kind
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSchema {
    pub kind: RecordKind,
    /// Field specs in declaration order
    pub fields: Vec<FieldSpec>,
}

impl RecordSchema {
    pub fn new(kind: RecordKind, fields: Vec<FieldSpec>) -> Self {
        Self { kind, fields }
    }

    /// Look up a field spec by name
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Names of all required fields
    pub fn required_fields(&self) -> Vec<&'static str> {
        self.fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name)
            .collect()
    }

    /// Embedded kinds directly referenced by this schema's fields
    pub fn embedded_kinds(&self) -> Vec<RecordKind> {
        let mut kinds = Vec::new();
        for field in &self.fields {
            if let Some(kind) = field.field_type.embedded_kind() {
                if !kinds.contains(&kind) {
                    kinds.push(kind);
                }
            }
        }
        kinds
    }

    /// Render the bare JSON Schema object for this kind.
    ///
    /// Embedded kinds are referenced via `#/$defs/<Name>`; the caller
    /// (the registry) attaches the matching `$defs` section.
    pub fn object_schema(&self) -> Value {
        let mut properties = Map::new();
        for field in &self.fields {
            properties.insert(field.name.to_string(), property_schema(field));
        }

        let required: Vec<Value> = self
            .required_fields()
            .into_iter()
            .map(|name| Value::String(name.to_string()))
            .collect();

        let mut schema = Map::new();
        schema.insert("title".to_string(), json!(self.kind.name()));
        schema.insert("type".to_string(), json!("object"));
        schema.insert("properties".to_string(), Value::Object(properties));
        if !required.is_empty() {
            schema.insert("required".to_string(), Value::Array(required));
        }
        Value::Object(schema)
    }
}

/// Render the JSON Schema for a single field
fn property_schema(field: &FieldSpec) -> Value {
    let mut prop = Map::new();

    match field.field_type {
        FieldType::Text => {
            prop.insert("type".to_string(), json!("string"));
            if field.requires_email() {
                prop.insert("format".to_string(), json!("email"));
            }
        }
        FieldType::Integer => {
            prop.insert("type".to_string(), json!("integer"));
        }
        FieldType::Float => {
            prop.insert("type".to_string(), json!("number"));
        }
        FieldType::Bool => {
            prop.insert("type".to_string(), json!("boolean"));
        }
        FieldType::TextList => {
            prop.insert("type".to_string(), json!("array"));
            prop.insert("items".to_string(), json!({ "type": "string" }));
        }
        FieldType::Record(kind) => {
            prop.insert("$ref".to_string(), json!(format!("#/$defs/{}", kind.name())));
        }
        FieldType::RecordList(kind) => {
            prop.insert("type".to_string(), json!("array"));
            prop.insert(
                "items".to_string(),
                json!({ "$ref": format!("#/$defs/{}", kind.name()) }),
            );
        }
    }

    if let Some(min) = field.min_bound() {
        prop.insert("minimum".to_string(), json!(min));
    }
    if let Some(max) = field.max_bound() {
        prop.insert("maximum".to_string(), json!(max));
    }
    if let Some(default) = &field.default {
        prop.insert("default".to_string(), default.clone());
    }
    if let Some(description) = field.description {
        prop.insert("description".to_string(), json!(description));
    }

    Value::Object(prop)
}
