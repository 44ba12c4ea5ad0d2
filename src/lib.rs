//! Storefront Schema Registry
//!
//! Declarative record schemas and validation for a small storefront
//! application: users, products, and orders (with embedded cart items
//! and customer info).
//!
//! ## Features
//!
//! - **Fixed Schema Set**: the five record kinds and their field
//!   constraints are defined once, at registry construction
//! - **Batch Validation**: every field is checked and every violation
//!   reported, never just the first
//! - **Defaults**: absent optional fields get their declared defaults
//!   applied in the normalized output
//! - **Introspection**: field metadata renders as JSON Schema for the
//!   external database viewer
//!
//! ## Usage
//!
//! ```
//! use serde_json::json;
//! use storefront_schemas::{SchemaRegistry, records::Product};
//!
//! let registry = SchemaRegistry::new();
//! let product: Product = registry
//!     .construct(&json!({
//!         "title": "Desk Lamp",
//!         "price": 39.99,
//!         "category": "lighting",
//!     }))
//!     .unwrap();
//!
//! assert!(product.in_stock);
//! assert_eq!(product.rating, 4.5);
//! ```

pub mod error;
pub mod export;
pub mod records;
pub mod registry;
pub mod schema;
mod validate;

pub use error::{Result, SchemaError, ValidationError, Violation, ViolationReason};
pub use records::{Record, RecordKind};
pub use registry::SchemaRegistry;
pub use schema::{Constraint, FieldSpec, FieldType, RecordSchema};
