//! Avro-style schema parsing into a strongly typed schema tree.
//!
//! This library parses JSON schema documents written in an Avro-style
//! grammar. Input is an in-memory `serde_json::Value` (or JSON text);
//! output is the root [`Schema`] node of an immutable tree. A
//! [`SchemaParser`] carries the per-parse registry of named types, so
//! bare-name references to previously completed records resolve within
//! one parse context and never leak across independent parses.
//!
//! ```
//! use airfoil::{parse_schema, Schema};
//!
//! let schema = parse_schema(
//!     r#"{"type": "record", "name": "User", "fields": [
//!         {"name": "id", "type": "long"},
//!         {"name": "email", "type": ["null", "string"]}
//!     ]}"#,
//! )
//! .unwrap();
//!
//! let Schema::Record(user) = schema else { panic!("expected a record") };
//! assert_eq!(user.name(), "User");
//! assert!(user.field("email").unwrap().schema.is_nullable());
//! ```

pub mod error;
pub mod schema;

// Re-export main types
pub use error::InvalidSchemaError;
pub use schema::{
    full_type_name, parse_schema, EnumSchema, FieldSchema, FixedSchema, PrimitiveType,
    RecordSchema, Schema, SchemaParser, PRIMITIVE_TYPE_NAMES,
};
