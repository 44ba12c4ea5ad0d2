//! Error types for the schema registry

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Result type for schema operations
pub type Result<T> = std::result::Result<T, SchemaError>;

/// Schema registry errors
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Rejection of an input record, carrying every field-level violation.
///
/// Validation is batch: all fields are checked and all violations are
/// reported, never just the first one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    /// All violations found in the input, in schema field order
    pub violations: Vec<Violation>,
}

impl std::error::Error for ValidationError {}

impl ValidationError {
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    /// True if any violation's path matches exactly
    pub fn has_path(&self, path: &str) -> bool {
        self.violations.iter().any(|v| v.path == path)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} validation violation(s):", self.violations.len())?;
        for violation in &self.violations {
            write!(f, "\n  - {}", violation)?;
        }
        Ok(())
    }
}

/// A single field-level constraint violation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    /// Dotted path to the offending field, with list indices
    /// (e.g. "customer.city", "items[0].quantity")
    pub path: String,
    /// Why the field was rejected
    pub reason: ViolationReason,
}

impl Violation {
    pub fn new(path: impl Into<String>, reason: ViolationReason) -> Self {
        Self {
            path: path.into(),
            reason,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The root path is empty for non-object input
        if self.path.is_empty() {
            write!(f, "{}", self.reason)
        } else {
            write!(f, "{}: {}", self.path, self.reason)
        }
    }
}

/// The reason a field was rejected
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViolationReason {
    /// A required field is absent (or explicitly null)
    Missing,
    /// The value has the wrong JSON type
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    /// A numeric value falls outside its inclusive bounds
    OutOfRange {
        min: Option<f64>,
        max: Option<f64>,
        value: f64,
    },
    /// A string value does not match its required pattern (email syntax)
    PatternMismatch { value: String },
}

impl fmt::Display for ViolationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "missing required field"),
            Self::TypeMismatch { expected, found } => {
                write!(f, "expected {}, found {}", expected, found)
            }
            Self::OutOfRange { min, max, value } => match (min, max) {
                (Some(min), Some(max)) => {
                    write!(f, "value {} outside range [{}, {}]", value, min, max)
                }
                (Some(min), None) => write!(f, "value {} below minimum {}", value, min),
                (None, Some(max)) => write!(f, "value {} above maximum {}", value, max),
                (None, None) => write!(f, "value {} out of range", value),
            },
            Self::PatternMismatch { value } => {
                write!(f, "malformed email address: {:?}", value)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_lists_every_violation() {
        let err = ValidationError::new(vec![
            Violation::new("name", ViolationReason::Missing),
            Violation::new(
                "age",
                ViolationReason::OutOfRange {
                    min: Some(0.0),
                    max: Some(120.0),
                    value: 150.0,
                },
            ),
        ]);

        let rendered = err.to_string();
        assert!(rendered.contains("2 validation violation(s)"));
        assert!(rendered.contains("name: missing required field"));
        assert!(rendered.contains("age: value 150 outside range [0, 120]"));
    }

    #[test]
    fn test_has_path_exact_match() {
        let err = ValidationError::new(vec![Violation::new(
            "customer.city",
            ViolationReason::Missing,
        )]);
        assert!(err.has_path("customer.city"));
        assert!(!err.has_path("customer"));
    }
}
