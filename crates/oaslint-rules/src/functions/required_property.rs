//! Names listed in `required` that no schema defines.
//!
//! A required name is accepted when it is defined by the composition branch
//! that lists it or by the enclosing schema, so a `required` list in one
//! `allOf` branch may refer to a property defined in another.

use oaslint_core::{Diagnostic, JsonPath, RuleError};
use oaslint_schema::{schema_has_property, validate_composed_schemas, validate_nested_schemas};
use serde_json::Value;

use crate::function::{RuleContext, RuleFunction};

pub struct RequiredPropertyDefined;

impl RuleFunction for RequiredPropertyDefined {
    fn name(&self) -> &'static str {
        "required-property-defined"
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
                validate_composed_schemas(
                    node,
                    path,
                    &mut |branch: &Value, branch_path: &JsonPath| undefined_required(node, branch, branch_path),
                    true,
                    false,
                )
            },
            true,
            false,
        ))
    }
}

fn undefined_required(schema: &Value, branch: &Value, path: &JsonPath) -> Vec<Diagnostic> {
    let Some(required) = branch.get("required").and_then(Value::as_array) else {
        return Vec::new();
    };
    required
        .iter()
        .enumerate()
        .filter_map(|(i, name)| name.as_str().map(|name| (i, name)))
        .filter(|(_, name)| !schema_has_property(branch, name) && !schema_has_property(schema, name))
        .map(|(i, name)| {
            Diagnostic::new(
                format!("Required property '{name}' is not defined in the schema"),
                path.child("required").child(i),
            )
        })
        .collect()
}
