//! Keys placed beside `$ref`.
//!
//! Before OpenAPI 3.1 a `$ref` object replaces itself with its target, so
//! any sibling key is silently ignored by tooling. Each sibling is flagged
//! at its own path; the `$ref` key itself is never flagged.
//!
//! Option `allowedSiblings` lists keys to tolerate (e.g. `description`).

use oaslint_core::{Diagnostic, JsonPath, RuleError};
use serde_json::Value;

use crate::function::{optional_str_array_option, RuleContext, RuleFunction};
use crate::walker::walk_document;

pub struct RefSiblings;

impl RuleFunction for RefSiblings {
    fn name(&self) -> &'static str {
        "ref-siblings"
    }

    fn check(
        &self,
        target: &Value,
        options: &Value,
        ctx: &RuleContext<'_>,
    ) -> Result<Vec<Diagnostic>, RuleError> {
        let allowed = optional_str_array_option(options, "allowedSiblings", ctx)?;

        Ok(walk_document(target, &ctx.path, &mut |node: &Value, path: &JsonPath| {
            let Some(map) = node.as_object() else {
                return Vec::new();
            };
            if !map.get("$ref").is_some_and(Value::is_string) {
                return Vec::new();
            }
            map.keys()
                .filter(|k| k.as_str() != "$ref" && !allowed.contains(&k.as_str()))
                .map(|k| Diagnostic::new(format!("'{k}' is ignored beside $ref"), path.child(k)))
                .collect()
        }))
    }
}
