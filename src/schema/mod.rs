//! Schema types and parsing.
//!
//! This module defines the schema type system (primitives, complex
//! types, named-type references), JSON parsing with per-parse named-type
//! resolution, and fully qualified name computation.

mod names;
mod parser;
mod types;

pub use names::full_type_name;
pub use parser::{parse_schema, SchemaParser};
pub use types::*;
