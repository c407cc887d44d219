//! Schema tree types.
//!
//! This module defines the schema type system: the eight primitive leaf
//! types, the complex types composed from them, and references to
//! previously registered named types.

use std::collections::HashMap;
use std::fmt;

use serde_json::{json, Map, Value};

use crate::error::InvalidSchemaError;

/// The eight built-in primitive type names, in canonical order.
pub const PRIMITIVE_TYPE_NAMES: [&str; 8] = [
    "null", "boolean", "int", "long", "float", "double", "bytes", "string",
];

/// One of the eight built-in leaf types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveType {
    /// Null type - no value.
    Null,
    /// Boolean type.
    Boolean,
    /// 32-bit signed integer.
    Int,
    /// 64-bit signed integer.
    Long,
    /// 32-bit IEEE 754 floating-point.
    Float,
    /// 64-bit IEEE 754 floating-point.
    Double,
    /// Sequence of bytes.
    Bytes,
    /// Unicode string.
    String,
}

impl PrimitiveType {
    /// Look up a primitive type by its schema name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "null" => Some(PrimitiveType::Null),
            "boolean" => Some(PrimitiveType::Boolean),
            "int" => Some(PrimitiveType::Int),
            "long" => Some(PrimitiveType::Long),
            "float" => Some(PrimitiveType::Float),
            "double" => Some(PrimitiveType::Double),
            "bytes" => Some(PrimitiveType::Bytes),
            "string" => Some(PrimitiveType::String),
            _ => None,
        }
    }

    /// The schema name of this primitive type.
    pub fn name(self) -> &'static str {
        match self {
            PrimitiveType::Null => "null",
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Int => "int",
            PrimitiveType::Long => "long",
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
            PrimitiveType::Bytes => "bytes",
            PrimitiveType::String => "string",
        }
    }
}

/// A node in the schema tree.
///
/// One case per schema kind; child nodes are owned by value, so the tree
/// has no shared mutable structure. A [`Schema::Reference`] is the one
/// non-owning case: it holds the name of a record registered with the
/// [`SchemaParser`](crate::schema::SchemaParser) that produced the tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    /// One of the eight built-in leaf types.
    Primitive(PrimitiveType),
    /// Record type with named fields.
    Record(RecordSchema),
    /// Enumeration over a fixed symbol set.
    Enum(EnumSchema),
    /// Array of items with a single schema.
    Array(Box<Schema>),
    /// Map with string keys and values of a single schema.
    Map(Box<Schema>),
    /// Union of multiple schemas.
    Union(Vec<Schema>),
    /// Fixed-size byte array.
    Fixed(FixedSchema),
    /// Reference to a previously registered record, by name.
    Reference(String),
}

/// Schema for a record type.
///
/// Construction validates the record-level invariants: a non-empty name
/// and unique field names. The name-to-field index is built once here,
/// so duplicate field names are a construction error rather than a
/// silent overwrite.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSchema {
    name: String,
    namespace: Option<String>,
    fields: Vec<FieldSchema>,
    index: HashMap<String, usize>,
}

impl RecordSchema {
    /// Create a new record schema from a name, optional namespace, and
    /// ordered field list.
    pub fn new(
        name: impl Into<String>,
        namespace: Option<String>,
        fields: Vec<FieldSchema>,
    ) -> Result<Self, InvalidSchemaError> {
        let name = name.into();
        if name.is_empty() {
            return Err(InvalidSchemaError::with_fragment(
                "record name must be a non-empty string",
                "\"\"",
            ));
        }

        let mut index = HashMap::with_capacity(fields.len());
        for (position, field) in fields.iter().enumerate() {
            if index.insert(field.name.clone(), position).is_some() {
                return Err(InvalidSchemaError::new(
                    format!(
                        "duplicate field name \"{}\" in record \"{}\"",
                        field.name, name
                    ),
                    &Value::String(field.name.clone()),
                ));
            }
        }

        Ok(Self {
            name,
            namespace,
            fields,
            index,
        })
    }

    /// The record's short name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The record's namespace, if any.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// The fields in declaration order.
    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.index.get(name).map(|&position| &self.fields[position])
    }

    /// The fully qualified name.
    pub fn fullname(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{}.{}", ns, self.name),
            None => self.name.clone(),
        }
    }

    /// Serialize the record schema to a JSON value.
    pub fn to_json_value(&self) -> Value {
        let mut obj = Map::new();
        obj.insert("type".to_string(), json!("record"));
        obj.insert("name".to_string(), json!(&self.name));

        if let Some(ns) = &self.namespace {
            obj.insert("namespace".to_string(), json!(ns));
        }

        let fields: Vec<Value> = self.fields.iter().map(|f| f.to_json_value()).collect();
        obj.insert("fields".to_string(), Value::Array(fields));

        Value::Object(obj)
    }
}

/// Schema for a field within a record.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSchema {
    /// The name of the field.
    pub name: String,
    /// The schema of the field's value.
    pub schema: Schema,
}

impl FieldSchema {
    /// Create a new field schema with the given name and value schema.
    pub fn new(name: impl Into<String>, schema: Schema) -> Self {
        Self {
            name: name.into(),
            schema,
        }
    }

    /// Serialize the field schema to a JSON value.
    pub fn to_json_value(&self) -> Value {
        json!({
            "name": &self.name,
            "type": self.schema.to_json_value(),
        })
    }
}

/// Schema for an enumeration type.
///
/// The symbol list is ordered, non-empty, and free of duplicates;
/// construction fails otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumSchema {
    symbols: Vec<String>,
}

impl EnumSchema {
    /// Create a new enum schema from an ordered symbol list.
    pub fn new(symbols: Vec<String>) -> Result<Self, InvalidSchemaError> {
        if symbols.is_empty() {
            return Err(InvalidSchemaError::new(
                "enum must have at least one symbol",
                &json!(symbols),
            ));
        }

        let mut seen = std::collections::HashSet::new();
        for symbol in &symbols {
            if !seen.insert(symbol.as_str()) {
                return Err(InvalidSchemaError::new(
                    format!("duplicate enum symbol \"{}\"", symbol),
                    &json!(symbols),
                ));
            }
        }

        Ok(Self { symbols })
    }

    /// The symbols in declaration order.
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// Get the index of a symbol.
    pub fn symbol_index(&self, symbol: &str) -> Option<usize> {
        self.symbols.iter().position(|s| s == symbol)
    }

    /// Serialize the enum schema to a JSON value.
    pub fn to_json_value(&self) -> Value {
        json!({
            "type": "enum",
            "symbols": &self.symbols,
        })
    }
}

/// Schema for a fixed-size byte array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedSchema {
    /// The name of the fixed type.
    pub name: String,
    /// The size in bytes, always positive.
    pub size: usize,
}

impl FixedSchema {
    /// Create a new fixed schema with the given name and size.
    pub fn new(name: impl Into<String>, size: usize) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }

    /// Serialize the fixed schema to a JSON value.
    pub fn to_json_value(&self) -> Value {
        json!({
            "type": "fixed",
            "name": &self.name,
            "size": self.size,
        })
    }
}

impl Schema {
    /// Check if this schema is a primitive type.
    pub fn is_primitive(&self) -> bool {
        matches!(self, Schema::Primitive(_))
    }

    /// Check if this schema is a named type (record or fixed).
    pub fn is_named(&self) -> bool {
        matches!(self, Schema::Record(_) | Schema::Fixed(_))
    }

    /// Get the name of a named type or reference, if applicable.
    pub fn name(&self) -> Option<&str> {
        match self {
            Schema::Record(r) => Some(r.name()),
            Schema::Fixed(f) => Some(&f.name),
            Schema::Reference(n) => Some(n),
            _ => None,
        }
    }

    /// Get the fully qualified name of a named type, if applicable.
    pub fn fullname(&self) -> Option<String> {
        match self {
            Schema::Record(r) => Some(r.fullname()),
            Schema::Fixed(f) => Some(f.name.clone()),
            Schema::Reference(n) => Some(n.clone()),
            _ => None,
        }
    }

    /// Check if this schema represents a nullable type (union with null).
    pub fn is_nullable(&self) -> bool {
        match self {
            Schema::Union(branches) => branches
                .iter()
                .any(|b| matches!(b, Schema::Primitive(PrimitiveType::Null))),
            _ => false,
        }
    }

    /// For a two-branch nullable union, get the non-null schema.
    pub fn nullable_inner(&self) -> Option<&Schema> {
        match self {
            Schema::Union(branches) if branches.len() == 2 => branches
                .iter()
                .find(|b| !matches!(b, Schema::Primitive(PrimitiveType::Null))),
            _ => None,
        }
    }

    /// Serialize the schema to a JSON string.
    ///
    /// This produces schema JSON that can be parsed back to an equivalent
    /// tree, provided any references resolve in the target registry.
    pub fn to_json(&self) -> String {
        self.to_json_value().to_string()
    }

    /// Serialize the schema to a JSON value.
    pub fn to_json_value(&self) -> Value {
        match self {
            // Primitive types serialize as bare strings
            Schema::Primitive(p) => json!(p.name()),

            // Complex types
            Schema::Record(r) => r.to_json_value(),
            Schema::Enum(e) => e.to_json_value(),
            Schema::Array(items) => json!({
                "type": "array",
                "items": items.to_json_value(),
            }),
            Schema::Map(values) => json!({
                "type": "map",
                "values": values.to_json_value(),
            }),
            Schema::Union(branches) => {
                Value::Array(branches.iter().map(|b| b.to_json_value()).collect())
            }
            Schema::Fixed(f) => f.to_json_value(),

            // Named reference - just the name string
            Schema::Reference(name) => json!(name),
        }
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json_value())
    }
}
