//! Recursive-descent parser for schema documents.
//!
//! Dispatches on the JSON shape of each fragment and produces the
//! corresponding [`Schema`] node, maintaining a registry of completed
//! records so later fragments can reference them by name.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::InvalidSchemaError;
use crate::schema::{EnumSchema, FieldSchema, FixedSchema, PrimitiveType, RecordSchema, Schema};

/// Parse a schema document from a JSON string.
///
/// Uses a fresh parser, so named types registered by earlier calls are
/// not visible; use [`SchemaParser`] directly to parse several documents
/// against one registry or to resolve [`Schema::Reference`] nodes
/// afterwards.
///
/// # Example
/// ```
/// use airfoil::schema::{parse_schema, PrimitiveType, Schema};
///
/// let schema = parse_schema(r#""string""#).unwrap();
/// assert_eq!(schema, Schema::Primitive(PrimitiveType::String));
/// ```
pub fn parse_schema(json: &str) -> Result<Schema, InvalidSchemaError> {
    let value: Value = serde_json::from_str(json)
        .map_err(|e| InvalidSchemaError::with_fragment(format!("invalid JSON: {}", e), json))?;

    SchemaParser::new().parse(&value)
}

/// Schema parser holding the named-type registry for one parse context.
///
/// The registry is owned by the parser instance and never shared: each
/// independent document parse gets its own `SchemaParser`, so concurrent
/// parses need no locking, and no registry state leaks between them.
/// Once built, the returned trees are immutable and safe to share across
/// threads.
///
/// Recursion depth equals the nesting depth of the input document; the
/// trees `serde_json` produces are acyclic, so descent always
/// terminates, but stack use is linear in that depth.
#[derive(Debug, Default)]
pub struct SchemaParser {
    /// Completed records by short name, for resolving bare references.
    registry: HashMap<String, RecordSchema>,
}

impl SchemaParser {
    /// Create a parser with an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a schema fragment with no starting namespace.
    pub fn parse(&mut self, value: &Value) -> Result<Schema, InvalidSchemaError> {
        self.parse_fragment(value, None)
    }

    /// Parse a schema fragment with the given starting namespace.
    pub fn parse_with_namespace(
        &mut self,
        value: &Value,
        namespace: Option<&str>,
    ) -> Result<Schema, InvalidSchemaError> {
        self.parse_fragment(value, namespace)
    }

    /// Look up a registered record by its short name.
    pub fn record(&self, name: &str) -> Option<&RecordSchema> {
        self.registry.get(name)
    }

    /// All registered records by short name.
    pub fn records(&self) -> &HashMap<String, RecordSchema> {
        &self.registry
    }

    fn parse_fragment(
        &mut self,
        value: &Value,
        namespace: Option<&str>,
    ) -> Result<Schema, InvalidSchemaError> {
        match value {
            Value::Null => Err(InvalidSchemaError::new("schema is null", value)),
            Value::String(name) => self.parse_type_name(name, value),
            Value::Array(branches) => self.parse_union(branches, namespace, value),
            Value::Object(obj) => self.parse_object(obj, namespace, value),
            _ => Err(InvalidSchemaError::new(
                format!("unexpected input shape for schema: {}", shape_name(value)),
                value,
            )),
        }
    }

    /// Parse a bare type name: a primitive, or a reference to a record
    /// completed earlier in this parse context.
    fn parse_type_name(&self, name: &str, fragment: &Value) -> Result<Schema, InvalidSchemaError> {
        if let Some(primitive) = PrimitiveType::from_name(name) {
            return Ok(Schema::Primitive(primitive));
        }

        if self.registry.contains_key(name) {
            return Ok(Schema::Reference(name.to_string()));
        }

        let mut known: Vec<&str> = self.registry.keys().map(String::as_str).collect();
        known.sort_unstable();
        Err(InvalidSchemaError::new(
            format!(
                "unknown type name \"{}\"; known type names are {:?}",
                name, known
            ),
            fragment,
        ))
    }

    /// Parse a union from a JSON array, preserving branch order.
    ///
    /// Branches are stored as parsed; no namespace qualification is
    /// applied to them.
    fn parse_union(
        &mut self,
        branches: &[Value],
        namespace: Option<&str>,
        fragment: &Value,
    ) -> Result<Schema, InvalidSchemaError> {
        if branches.is_empty() {
            return Err(InvalidSchemaError::new(
                "union must have at least one branch",
                fragment,
            ));
        }

        let branches = branches
            .iter()
            .map(|b| self.parse_fragment(b, namespace))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Schema::Union(branches))
    }

    /// Parse a complex type from a JSON object, dispatching on its
    /// `type` discriminator.
    fn parse_object(
        &mut self,
        obj: &Map<String, Value>,
        namespace: Option<&str>,
        fragment: &Value,
    ) -> Result<Schema, InvalidSchemaError> {
        match obj.get("type").and_then(Value::as_str) {
            Some("record") => self.parse_record(obj, namespace, fragment),
            Some("enum") => parse_enum(obj, fragment),
            Some("array") => {
                let items = obj.get("items").ok_or_else(|| {
                    InvalidSchemaError::new("array must specify \"items\"", fragment)
                })?;
                Ok(Schema::Array(Box::new(
                    self.parse_fragment(items, namespace)?,
                )))
            }
            Some("map") => {
                let values = obj.get("values").ok_or_else(|| {
                    InvalidSchemaError::new("map must specify \"values\" schema", fragment)
                })?;
                Ok(Schema::Map(Box::new(
                    self.parse_fragment(values, namespace)?,
                )))
            }
            Some("fixed") => parse_fixed(obj, fragment),
            // Any other object carrying a `type` member is a wrapper
            // around a nested fragment, including `{"type": "string"}`;
            // recurse into the member itself.
            _ => match obj.get("type") {
                Some(inner) => self.parse_fragment(inner, namespace),
                None => Err(InvalidSchemaError::new("not yet implemented", fragment)),
            },
        }
    }

    /// Parse a record definition and register it.
    ///
    /// Fields are parsed before the record is registered, so a field in
    /// this same record cannot reference the record's own name; only
    /// records completed earlier in the parse resolve. The first
    /// registration for a name wins and later ones are ignored.
    fn parse_record(
        &mut self,
        obj: &Map<String, Value>,
        namespace: Option<&str>,
        fragment: &Value,
    ) -> Result<Schema, InvalidSchemaError> {
        let fields_value = obj
            .get("fields")
            .ok_or_else(|| InvalidSchemaError::new("record must specify \"fields\"", fragment))?;
        let fields_value = fields_value.as_array().ok_or_else(|| {
            InvalidSchemaError::new("record \"fields\" must be an array", fragment)
        })?;

        let name = obj
            .get("name")
            .ok_or_else(|| InvalidSchemaError::new("record must specify \"name\"", fragment))?;
        let name = name
            .as_str()
            .ok_or_else(|| InvalidSchemaError::new("record \"name\" must be a string", fragment))?;

        let record_namespace = match obj.get("namespace") {
            None => None,
            Some(Value::String(ns)) => Some(ns.clone()),
            Some(other) => {
                return Err(InvalidSchemaError::new(
                    "record \"namespace\" must be a string",
                    other,
                ))
            }
        };

        let fields = fields_value
            .iter()
            .map(|field| self.parse_field(field, namespace))
            .collect::<Result<Vec<_>, _>>()?;

        let record = RecordSchema::new(name, record_namespace, fields)?;

        match self.registry.entry(record.name().to_string()) {
            Entry::Vacant(entry) => {
                debug!(name = record.name(), "registered record type");
                entry.insert(record.clone());
            }
            Entry::Occupied(_) => {
                warn!(
                    name = record.name(),
                    "record type already registered, keeping first definition"
                );
            }
        }

        Ok(Schema::Record(record))
    }

    /// Parse one entry of a record's `fields` array.
    ///
    /// The whole field object is recursed into as the type fragment; its
    /// `type` member is resolved through the object-wrapper rule in
    /// [`parse_object`](Self::parse_object).
    fn parse_field(
        &mut self,
        field: &Value,
        namespace: Option<&str>,
    ) -> Result<FieldSchema, InvalidSchemaError> {
        let name = field
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| InvalidSchemaError::new("field \"name\" must be a string", field))?;

        let schema = self.parse_fragment(field, namespace)?;

        Ok(FieldSchema::new(name, schema))
    }
}

/// Parse an enum definition.
fn parse_enum(obj: &Map<String, Value>, fragment: &Value) -> Result<Schema, InvalidSchemaError> {
    let symbols_value = obj
        .get("symbols")
        .ok_or_else(|| InvalidSchemaError::new("enum must specify \"symbols\"", fragment))?;
    let symbols_value = symbols_value.as_array().ok_or_else(|| {
        InvalidSchemaError::new("enum \"symbols\" must be an array", symbols_value)
    })?;

    let symbols = symbols_value
        .iter()
        .map(|symbol| {
            symbol
                .as_str()
                .map(String::from)
                .ok_or_else(|| InvalidSchemaError::new("enum symbols must be strings", fragment))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Schema::Enum(EnumSchema::new(symbols)?))
}

/// Parse a fixed definition.
fn parse_fixed(obj: &Map<String, Value>, fragment: &Value) -> Result<Schema, InvalidSchemaError> {
    let name = obj
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| InvalidSchemaError::new("fixed must specify a string \"name\"", fragment))?;

    let size_value = obj
        .get("size")
        .ok_or_else(|| InvalidSchemaError::new("fixed must specify \"size\"", fragment))?;
    let size = size_value
        .as_u64()
        .filter(|size| *size > 0)
        .ok_or_else(|| {
            InvalidSchemaError::new("fixed \"size\" must be a positive integer", fragment)
        })? as usize;

    Ok(Schema::Fixed(FixedSchema::new(name, size)))
}

/// Human-readable name of an input shape, for diagnostics.
fn shape_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
