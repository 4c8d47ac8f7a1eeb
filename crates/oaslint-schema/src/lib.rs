//! # oaslint-schema — Composition-Aware Schema Analysis
//!
//! Lets a rule ask semantic questions about an OpenAPI / Swagger schema
//! without re-implementing JSON Schema composition each time.
//!
//! ## Predicates (`schema_type`)
//!
//! [`is_string_schema`], [`is_object_schema`], [`is_date_time_schema`] and
//! friends classify the effective type of a possibly composite schema;
//! [`get_schema_type`] returns the most specific [`SchemaType`].
//!
//! ## Composition (`composition`)
//!
//! [`schema_has_constraint`] and [`schema_loosely_has_constraint`] lift any
//! per-node predicate over `allOf`/`oneOf`/`anyOf`. Property questions
//! ([`schema_has_property`], [`schema_requires_property`],
//! [`get_property_names_for_schema`], [`get_property_schemas_by_name`]) are
//! built on the same combinator.
//!
//! ## Traversal (`traversal`)
//!
//! [`validate_composed_schemas`], [`validate_nested_schemas`] and
//! [`validate_subschemas`] apply a check to every relevant node and collect
//! the [`Diagnostic`](oaslint_core::Diagnostic)s it returns.
//!
//! ## Crate Policy
//!
//! - Input is a resolved `serde_json::Value` graph. `$ref` is never followed.
//! - Nothing here mutates its input, panics, or returns an error: malformed
//!   shapes yield `false` or an empty result.

pub mod composition;
pub mod schema_type;
pub mod traversal;

pub use composition::{
    applicator_branches, collect_composed_schemas, collect_from_composed_schemas,
    get_property_names_for_schema, get_property_names_matching, get_property_schemas_by_name,
    has_constraint, is_composite_schema, schema_has_constraint, schema_has_property,
    schema_loosely_has_constraint, schema_requires_property, Applicator, ComposedSchema,
    CompositionMode,
};
pub use schema_type::{
    get_schema_type, is_array_schema, is_binary_schema, is_boolean_schema, is_byte_schema,
    is_date_schema, is_date_time_schema, is_double_schema, is_enumeration_schema, is_float_schema,
    is_int32_schema, is_int64_schema, is_integer_schema, is_number_schema, is_object_schema,
    is_primitive_schema, is_string_schema, schema_is_of_type, SchemaType,
};
pub use traversal::{
    validate_composed_schemas, validate_nested_schemas, validate_subschemas, ANY_ITEM, ANY_KEY,
};
