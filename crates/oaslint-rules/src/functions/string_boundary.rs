//! String schemas without an upper length bound.
//!
//! Only plain strings are checked: enumerations and formatted strings
//! (`date`, `date-time`, `byte`, `binary`) have their length fixed by other
//! means.

use oaslint_core::{Diagnostic, JsonPath, RuleError};
use oaslint_schema::{get_schema_type, schema_is_of_type, validate_subschemas, SchemaType};
use serde_json::Value;

use crate::function::{RuleContext, RuleFunction};

pub struct StringBoundary;

impl RuleFunction for StringBoundary {
    fn name(&self) -> &'static str {
        "string-boundary"
    }

    fn check(
        &self,
        target: &Value,
        _options: &Value,
        ctx: &RuleContext<'_>,
    ) -> Result<Vec<Diagnostic>, RuleError> {
        Ok(validate_subschemas(target, &ctx.path, &mut |node: &Value, path: &JsonPath| {
            let plain_string = schema_is_of_type(node, "string") && get_schema_type(node) == SchemaType::String;
            if plain_string && node.get("maxLength").is_none() {
                vec![Diagnostic::new("String schemas should define 'maxLength'", path.clone())]
            } else {
                Vec::new()
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run(schema: &Value) -> Vec<String> {
        let ctx = RuleContext::new("string-boundary", schema, JsonPath::root());
        StringBoundary
            .check(schema, &Value::Null, &ctx)
            .unwrap()
            .iter()
            .map(|d| d.path.to_string())
            .collect()
    }

    #[test]
    fn test_unbounded_strings() {
        let schema = json!({
            "type": "object",
            "properties": {
                "name": {"type": "string"},
                "code": {"type": "string", "maxLength": 8},
                "born": {"type": "string", "format": "date"},
                "kind": {"type": "string", "enum": ["a", "b"]},
                "tags": {"type": "array", "items": {"type": "string"}}
            }
        });
        assert_eq!(run(&schema), vec!["properties.name", "properties.tags.items"]);
    }

    #[test]
    fn test_only_first_child_kind_is_followed() {
        let schema = json!({
            "properties": {"a": {"type": "string", "maxLength": 1}},
            "allOf": [{"type": "string"}]
        });
        assert!(run(&schema).is_empty());
        assert_eq!(run(&json!({"anyOf": [{"type": "string"}]})), vec!["anyOf.0"]);
    }
}
