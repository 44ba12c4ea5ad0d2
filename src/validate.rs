//! Schema interpreter
//!
//! Walks a `RecordSchema` over an untyped JSON value, collecting every
//! violation (batch validation) and producing the normalized record
//! with defaults applied and unknown keys dropped.

use std::collections::HashMap;

use regex::Regex;
use serde_json::{Map, Value};

use crate::error::{Violation, ViolationReason};
use crate::records::RecordKind;
use crate::schema::{FieldSpec, FieldType, RecordSchema};

/// Shared validation context: the fixed schema set and the compiled
/// email pattern, both owned by the registry.
pub(crate) struct Context<'a> {
    pub schemas: &'a HashMap<RecordKind, RecordSchema>,
    pub email: &'a Regex,
}

/// Validate `raw` against `schema`, appending violations.
///
/// Returns the normalized object on success, `None` if any violation
/// was recorded under this record (violations from sibling records do
/// not affect the return value; the caller checks the full list).
pub(crate) fn normalize_record(
    ctx: &Context<'_>,
    schema: &RecordSchema,
    raw: &Value,
    path: &str,
    violations: &mut Vec<Violation>,
) -> Option<Map<String, Value>> {
    let object = match raw {
        Value::Object(object) => object,
        other => {
            violations.push(Violation::new(
                path,
                ViolationReason::TypeMismatch {
                    expected: "object",
                    found: json_type_name(other),
                },
            ));
            return None;
        }
    };

    let before = violations.len();
    let mut normalized = Map::new();

    for field in &schema.fields {
        let field_path = join_path(path, field.name);

        // Explicit null means absent, for required and optional alike
        match object.get(field.name).filter(|v| !v.is_null()) {
            Some(value) => {
                if let Some(checked) = normalize_field(ctx, field, value, &field_path, violations)
                {
                    normalized.insert(field.name.to_string(), checked);
                }
            }
            None if field.required => {
                violations.push(Violation::new(&field_path, ViolationReason::Missing));
            }
            None => {
                if let Some(default) = &field.default {
                    normalized.insert(field.name.to_string(), default.clone());
                }
            }
        }
    }

    // Unknown input keys are ignored and not copied to the output

    if violations.len() == before {
        Some(normalized)
    } else {
        None
    }
}

/// Validate a single present field value
fn normalize_field(
    ctx: &Context<'_>,
    field: &FieldSpec,
    value: &Value,
    path: &str,
    violations: &mut Vec<Violation>,
) -> Option<Value> {
    match field.field_type {
        FieldType::Text => {
            let text = expect_string(value, path, violations)?;
            if field.requires_email() && !ctx.email.is_match(text) {
                violations.push(Violation::new(
                    path,
                    ViolationReason::PatternMismatch {
                        value: text.to_string(),
                    },
                ));
                return None;
            }
            Some(value.clone())
        }
        FieldType::Integer => {
            if value.as_i64().is_none() {
                violations.push(type_mismatch(path, "integer", value));
                return None;
            }
            check_range(field, value, path, violations)?;
            Some(value.clone())
        }
        FieldType::Float => {
            if value.as_f64().is_none() {
                violations.push(type_mismatch(path, "number", value));
                return None;
            }
            check_range(field, value, path, violations)?;
            Some(value.clone())
        }
        FieldType::Bool => {
            if !value.is_boolean() {
                violations.push(type_mismatch(path, "boolean", value));
                return None;
            }
            Some(value.clone())
        }
        FieldType::TextList => {
            let items = expect_array(value, "array of strings", path, violations)?;
            let before = violations.len();
            for (index, item) in items.iter().enumerate() {
                if !item.is_string() {
                    violations.push(type_mismatch(
                        &format!("{}[{}]", path, index),
                        "string",
                        item,
                    ));
                }
            }
            (violations.len() == before).then(|| value.clone())
        }
        FieldType::Record(kind) => {
            let schema = &ctx.schemas[&kind];
            normalize_record(ctx, schema, value, path, violations).map(Value::Object)
        }
        FieldType::RecordList(kind) => {
            let items = expect_array(value, "array of objects", path, violations)?;
            let schema = &ctx.schemas[&kind];
            let before = violations.len();
            let mut normalized = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                let item_path = format!("{}[{}]", path, index);
                if let Some(object) =
                    normalize_record(ctx, schema, item, &item_path, violations)
                {
                    normalized.push(Value::Object(object));
                }
            }
            (violations.len() == before).then(|| Value::Array(normalized))
        }
    }
}

/// Enforce inclusive min/max bounds on a numeric value
fn check_range(
    field: &FieldSpec,
    value: &Value,
    path: &str,
    violations: &mut Vec<Violation>,
) -> Option<()> {
    let min = field.min_bound();
    let max = field.max_bound();
    if min.is_none() && max.is_none() {
        return Some(());
    }

    // Type was checked by the caller
    let number = value.as_f64()?;
    let below = min.is_some_and(|bound| number < bound);
    let above = max.is_some_and(|bound| number > bound);
    if below || above {
        violations.push(Violation::new(
            path,
            ViolationReason::OutOfRange {
                min,
                max,
                value: number,
            },
        ));
        return None;
    }
    Some(())
}

fn expect_string<'v>(
    value: &'v Value,
    path: &str,
    violations: &mut Vec<Violation>,
) -> Option<&'v str> {
    match value.as_str() {
        Some(text) => Some(text),
        None => {
            violations.push(type_mismatch(path, "string", value));
            None
        }
    }
}

fn expect_array<'v>(
    value: &'v Value,
    expected: &'static str,
    path: &str,
    violations: &mut Vec<Violation>,
) -> Option<&'v Vec<Value>> {
    match value.as_array() {
        Some(items) => Some(items),
        None => {
            violations.push(type_mismatch(path, expected, value));
            None
        }
    }
}

fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}

fn type_mismatch(path: &str, expected: &'static str, found: &Value) -> Violation {
    Violation::new(
        path,
        ViolationReason::TypeMismatch {
            expected,
            found: json_type_name(found),
        },
    )
}

/// JSON type name as reported in violations
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.as_i64().is_some() || n.as_u64().is_some() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_json_type_names() {
        assert_eq!(json_type_name(&json!(null)), "null");
        assert_eq!(json_type_name(&json!(true)), "boolean");
        assert_eq!(json_type_name(&json!(3)), "integer");
        assert_eq!(json_type_name(&json!(3.5)), "number");
        assert_eq!(json_type_name(&json!("x")), "string");
        assert_eq!(json_type_name(&json!([])), "array");
        assert_eq!(json_type_name(&json!({})), "object");
    }
}
