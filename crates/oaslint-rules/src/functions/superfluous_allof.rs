//! `allOf` wrappers around a single schema.
//!
//! A schema whose only keyword is a one-element `allOf` adds nothing over
//! the element itself.

use oaslint_core::{Diagnostic, JsonPath, RuleError};
use oaslint_schema::validate_composed_schemas;
use serde_json::Value;

use crate::function::{RuleContext, RuleFunction};

pub struct SuperfluousAllOf;

impl RuleFunction for SuperfluousAllOf {
    fn name(&self) -> &'static str {
        "superfluous-allof"
    }

    fn check(
        &self,
        target: &Value,
        _options: &Value,
        ctx: &RuleContext<'_>,
    ) -> Result<Vec<Diagnostic>, RuleError> {
        Ok(validate_composed_schemas(
            target,
            &ctx.path,
            &mut |node: &Value, path: &JsonPath| {
                let Some(map) = node.as_object() else {
                    return Vec::new();
                };
                let single = map
                    .get("allOf")
                    .and_then(Value::as_array)
                    .is_some_and(|branches| branches.len() == 1);
                if single && map.len() == 1 {
                    vec![Diagnostic::new(
                        "allOf with a single schema and no sibling keywords is superfluous",
                        path.child("allOf"),
                    )]
                } else {
                    Vec::new()
                }
            },
            true,
            true,
        ))
    }
}
