//! Arrays whose items are themselves arrays.
//!
//! `items` may be supplied by the array schema itself or by any of its
//! composition branches; each offending `items` is flagged where it is
//! written.

use oaslint_core::{Diagnostic, JsonPath, RuleError};
use oaslint_schema::{is_array_schema, validate_composed_schemas, validate_nested_schemas};
use serde_json::Value;

use crate::function::{RuleContext, RuleFunction};

fn array_items(schema: &Value, path: &JsonPath) -> Vec<Diagnostic> {
    match schema.get("items") {
        Some(items) if is_array_schema(items) => vec![Diagnostic::new(
            "Array schemas should avoid having items of type array",
            path.child("items"),
        )],
        _ => Vec::new(),
    }
}

pub struct ArrayOfArrays;

impl RuleFunction for ArrayOfArrays {
    fn name(&self) -> &'static str {
        "array-of-arrays"
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
            &mut |node: &Value, path: &JsonPath, _: &JsonPath| {
                if !is_array_schema(node) {
                    return Vec::new();
                }
                validate_composed_schemas(node, path, &mut array_items, true, false)
            },
            true,
            false,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run(schema: &Value) -> Vec<String> {
        let ctx = RuleContext::new("array-of-arrays", schema, JsonPath::root());
        ArrayOfArrays
            .check(schema, &Value::Null, &ctx)
            .unwrap()
            .iter()
            .map(|d| d.path.to_string())
            .collect()
    }

    #[test]
    fn test_matrix_property() {
        let schema = json!({
            "properties": {
                "matrix": {"type": "array", "items": {"type": "array", "items": {"type": "number"}}},
                "list": {"type": "array", "items": {"type": "string"}}
            }
        });
        assert_eq!(run(&schema), vec!["properties.matrix.items"]);
    }

    #[test]
    fn test_items_array_through_composition() {
        let schema = json!({
            "type": "array",
            "items": {"allOf": [{"type": "array", "items": {"type": "string"}}, {"description": "rows"}]}
        });
        assert_eq!(run(&schema), vec!["items"]);
    }

    #[test]
    fn test_items_supplied_by_allof_branch() {
        let schema = json!({
            "type": "array",
            "allOf": [{"items": {"type": "array", "items": {"type": "string"}}}]
        });
        assert_eq!(run(&schema), vec!["allOf.0.items"]);
    }

    #[test]
    fn test_oneof_items_need_every_branch() {
        let schema = json!({
            "type": "array",
            "items": {"oneOf": [{"type": "array", "items": {}}, {"type": "string"}]}
        });
        assert!(run(&schema).is_empty());
    }
}
