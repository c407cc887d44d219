//! Fully qualified name resolution.

use serde_json::Value;

use crate::error::InvalidSchemaError;
use crate::schema::PrimitiveType;

/// Compute the fully qualified name of a type reference.
///
/// A bare string fragment is its own candidate name. An object fragment
/// takes its candidate from its `name` member, falling back to `type`;
/// a string `namespace` member on the object overrides the current
/// namespace for this call. Candidates that already contain a dot, and
/// primitive type names, are returned unchanged; anything else is
/// prefixed with the namespace when one is known.
///
/// # Example
/// ```
/// use serde_json::json;
/// use airfoil::schema::full_type_name;
///
/// let name = full_type_name(&json!({"name": "Foo", "namespace": "ns"}), None).unwrap();
/// assert_eq!(name, "ns.Foo");
/// ```
pub fn full_type_name(
    fragment: &Value,
    namespace: Option<&str>,
) -> Result<String, InvalidSchemaError> {
    let mut namespace = namespace;

    let candidate = match fragment {
        Value::String(s) => Some(s.as_str()),
        Value::Object(obj) => {
            if let Some(ns) = obj.get("namespace").and_then(Value::as_str) {
                namespace = Some(ns);
            }
            obj.get("name")
                .and_then(Value::as_str)
                .or_else(|| obj.get("type").and_then(Value::as_str))
        }
        _ => {
            return Err(InvalidSchemaError::new(
                format!(
                    "unable to determine fully qualified type name in namespace {:?}",
                    namespace
                ),
                fragment,
            ))
        }
    };

    let candidate = candidate.ok_or_else(|| {
        InvalidSchemaError::new(
            format!(
                "unable to determine type name in namespace {:?}",
                namespace
            ),
            fragment,
        )
    })?;

    if candidate.contains('.') {
        // Already fully qualified
        return Ok(candidate.to_string());
    }
    if PrimitiveType::from_name(candidate).is_some() {
        // Primitives are never namespaced
        return Ok(candidate.to_string());
    }
    match namespace {
        Some(ns) => Ok(format!("{}.{}", ns, candidate)),
        None => Ok(candidate.to_string()),
    }
}
