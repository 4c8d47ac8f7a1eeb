//! # Schema Type Classification
//!
//! Classifies a possibly composite schema by its effective semantic type.
//! Each [`SchemaType`] knows the per-node test that identifies it; the
//! public `is_*_schema` predicates lift that test over composition with
//! [`has_constraint`] in strict mode, so `allOf` may supply the type from any
//! branch while every `oneOf`/`anyOf` alternative must agree.
//!
//! ## Heuristics
//!
//! - A schema without `type` but with `items` is an array.
//! - A schema without `type` but with `properties`, or with a truthy
//!   `additionalProperties`, is an object.
//! - Only a scalar `type` string is recognized. OpenAPI 3.1 `type` arrays
//!   (e.g. `["string", "null"]`) classify as [`SchemaType::Unknown`].
//! - Formatted types require `type` and `format` on the same node.
//! - Contradictory compositions (`allOf: [{type: string}, {type: integer}]`)
//!   are not detected.

use std::fmt;

use serde_json::Value;

use crate::composition::{has_constraint, CompositionMode};

/// Effective semantic type of a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaType {
    Array,
    /// `type: string, format: binary`
    Binary,
    Boolean,
    /// `type: string, format: byte`
    Byte,
    /// `type: string, format: date`
    Date,
    /// `type: string, format: date-time`
    DateTime,
    /// `type: number, format: double`
    Double,
    /// `type: string` with an `enum` list.
    Enumeration,
    /// `type: number, format: float`
    Float,
    /// `type: integer, format: int32`
    Int32,
    /// `type: integer, format: int64`
    Int64,
    Integer,
    Number,
    Object,
    String,
    Unknown,
}

impl SchemaType {
    /// Classification order used by [`get_schema_type`]. More specific
    /// variants precede the base type they refine.
    pub const PRECEDENCE: [SchemaType; 15] = [
        Self::Array,
        Self::Binary,
        Self::Boolean,
        Self::Byte,
        Self::Date,
        Self::DateTime,
        Self::Double,
        Self::Enumeration,
        Self::Float,
        Self::Int32,
        Self::Int64,
        Self::Integer,
        Self::Number,
        Self::Object,
        Self::String,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Array => "array",
            Self::Binary => "binary",
            Self::Boolean => "boolean",
            Self::Byte => "byte",
            Self::Date => "date",
            Self::DateTime => "date-time",
            Self::Double => "double",
            Self::Enumeration => "enumeration",
            Self::Float => "float",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Object => "object",
            Self::String => "string",
            Self::Unknown => "unknown",
        }
    }

    /// Does this single node, ignoring composition, have this type?
    pub fn matches_node(&self, node: &Value) -> bool {
        match self {
            Self::Array => {
                schema_is_of_type(node, "array")
                    || (node.get("type").is_none() && node.get("items").is_some())
            }
            Self::Binary => is_formatted(node, "string", "binary"),
            Self::Boolean => schema_is_of_type(node, "boolean"),
            Self::Byte => is_formatted(node, "string", "byte"),
            Self::Date => is_formatted(node, "string", "date"),
            Self::DateTime => is_formatted(node, "string", "date-time"),
            Self::Double => is_formatted(node, "number", "double"),
            Self::Enumeration => {
                schema_is_of_type(node, "string") && node.get("enum").is_some_and(Value::is_array)
            }
            Self::Float => is_formatted(node, "number", "float"),
            Self::Int32 => is_formatted(node, "integer", "int32"),
            Self::Int64 => is_formatted(node, "integer", "int64"),
            Self::Integer => schema_is_of_type(node, "integer"),
            Self::Number => schema_is_of_type(node, "number"),
            Self::Object => {
                schema_is_of_type(node, "object")
                    || (node.get("type").is_none()
                        && (node.get("properties").is_some_and(Value::is_object)
                            || is_truthy(node.get("additionalProperties"))))
            }
            Self::String => schema_is_of_type(node, "string"),
            Self::Unknown => false,
        }
    }

    /// Does `schema`, taking composition into account, have this type?
    pub fn matches(&self, schema: &Value) -> bool {
        has_constraint(schema, &|node: &Value| self.matches_node(node), CompositionMode::Strict)
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn is_formatted(node: &Value, ty: &str, format: &str) -> bool {
    schema_is_of_type(node, ty) && node.get("format").and_then(Value::as_str) == Some(format)
}

fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => false,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

/// Is the `type` keyword of this node exactly `ty`?
///
/// Direct field comparison with no composition awareness; non-string
/// `type` values never match.
pub fn schema_is_of_type(schema: &Value, ty: &str) -> bool {
    schema.get("type").and_then(Value::as_str) == Some(ty)
}

/// The most specific [`SchemaType`] that `schema` satisfies.
pub fn get_schema_type(schema: &Value) -> SchemaType {
    SchemaType::PRECEDENCE
        .iter()
        .copied()
        .find(|ty| ty.matches(schema))
        .unwrap_or(SchemaType::Unknown)
}

pub fn is_array_schema(schema: &Value) -> bool {
    SchemaType::Array.matches(schema)
}

pub fn is_binary_schema(schema: &Value) -> bool {
    SchemaType::Binary.matches(schema)
}

pub fn is_boolean_schema(schema: &Value) -> bool {
    SchemaType::Boolean.matches(schema)
}

pub fn is_byte_schema(schema: &Value) -> bool {
    SchemaType::Byte.matches(schema)
}

pub fn is_date_schema(schema: &Value) -> bool {
    SchemaType::Date.matches(schema)
}

pub fn is_date_time_schema(schema: &Value) -> bool {
    SchemaType::DateTime.matches(schema)
}

pub fn is_double_schema(schema: &Value) -> bool {
    SchemaType::Double.matches(schema)
}

pub fn is_enumeration_schema(schema: &Value) -> bool {
    SchemaType::Enumeration.matches(schema)
}

pub fn is_float_schema(schema: &Value) -> bool {
    SchemaType::Float.matches(schema)
}

pub fn is_int32_schema(schema: &Value) -> bool {
    SchemaType::Int32.matches(schema)
}

pub fn is_int64_schema(schema: &Value) -> bool {
    SchemaType::Int64.matches(schema)
}

pub fn is_integer_schema(schema: &Value) -> bool {
    SchemaType::Integer.matches(schema)
}

pub fn is_number_schema(schema: &Value) -> bool {
    SchemaType::Number.matches(schema)
}

pub fn is_object_schema(schema: &Value) -> bool {
    SchemaType::Object.matches(schema)
}

pub fn is_string_schema(schema: &Value) -> bool {
    SchemaType::String.matches(schema)
}

/// Boolean, integer, number or string (formatted variants included).
pub fn is_primitive_schema(schema: &Value) -> bool {
    is_boolean_schema(schema)
        || is_integer_schema(schema)
        || is_number_schema(schema)
        || is_string_schema(schema)
}
