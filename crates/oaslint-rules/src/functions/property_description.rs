//! Schema properties without a description.
//!
//! Every property reached by nested traversal must carry a non-empty
//! `description`, either directly or through an `allOf` branch. A `oneOf`
//! or `anyOf` property is accepted only when every branch is described.

use oaslint_core::{Diagnostic, JsonPath, RuleError};
use oaslint_schema::{schema_has_constraint, validate_nested_schemas};
use serde_json::Value;

use crate::function::{RuleContext, RuleFunction};

/// True when `path` addresses an entry of a `properties` map.
fn is_property_path(path: &JsonPath) -> bool {
    let segments = path.segments();
    segments.len() >= 2 && segments[segments.len() - 2].as_key() == Some("properties")
}

fn has_description(schema: &Value) -> bool {
    schema
        .get("description")
        .and_then(Value::as_str)
        .is_some_and(|d| !d.trim().is_empty())
}

pub struct PropertyDescription;

impl RuleFunction for PropertyDescription {
    fn name(&self) -> &'static str {
        "property-description"
    }

    fn check(
        &self,
        target: &Value,
        _options: &Value,
        ctx: &RuleContext<'_>,
    ) -> Result<Vec<Diagnostic>, RuleError> {
        Ok(validate_nested_schemas(
            target,
            &ctx.path,
            &mut |node: &Value, path: &JsonPath, logical: &JsonPath| {
                if !is_property_path(path) || schema_has_constraint(node, has_description) {
                    return Vec::new();
                }
                vec![Diagnostic::new(
                    format!("Schema property '{logical}' should have a non-empty description"),
                    path.clone(),
                )]
            },
            true,
            false,
        ))
    }
}
