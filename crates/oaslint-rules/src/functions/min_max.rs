//! Lower bounds that exceed their upper bounds.
//!
//! Applies anywhere in the document, so schemas nested inside examples,
//! parameters and headers are covered without knowing where they live.

use oaslint_core::{Diagnostic, JsonPath, RuleError};
use serde_json::Value;

use crate::function::{RuleContext, RuleFunction};
use crate::walker::walk_document;

/// `(lower, upper)` keyword pairs.
const BOUNDS: &[(&str, &str)] = &[
    ("minimum", "maximum"),
    ("minLength", "maxLength"),
    ("minItems", "maxItems"),
    ("minProperties", "maxProperties"),
];

pub struct MinMaxConsistency;

impl RuleFunction for MinMaxConsistency {
    fn name(&self) -> &'static str {
        "min-max-consistency"
    }

    fn check(
        &self,
        target: &Value,
        _options: &Value,
        ctx: &RuleContext<'_>,
    ) -> Result<Vec<Diagnostic>, RuleError> {
        Ok(walk_document(target, &ctx.path, &mut |node: &Value, path: &JsonPath| {
            let mut diagnostics = Vec::new();
            for (lower, upper) in BOUNDS {
                let min = node.get(*lower).and_then(Value::as_f64);
                let max = node.get(*upper).and_then(Value::as_f64);
                if let (Some(min), Some(max)) = (min, max) {
                    if min > max {
                        diagnostics.push(Diagnostic::new(
                            format!("{lower} ({min}) must not be greater than {upper} ({max})"),
                            path.child(*lower),
                        ));
                    }
                }
            }
            diagnostics
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_inverted_bounds() {
        let doc = json!({
            "definitions": {
                "Age": {"type": "integer", "minimum": 10, "maximum": 5},
                "Name": {"type": "string", "minLength": 3, "maxLength": 3},
                "Tags": {"type": "array", "minItems": 4, "maxItems": 2},
                "Bag": {"type": "object", "minProperties": 1.5, "maxProperties": 1}
            }
        });
        let ctx = RuleContext::new("min-max", &doc, JsonPath::root());
        let diagnostics = MinMaxConsistency.check(&doc, &Value::Null, &ctx).unwrap();
        let paths: Vec<String> = diagnostics.iter().map(|d| d.path.to_string()).collect();
        assert_eq!(
            paths,
            vec![
                "definitions.Age.minimum",
                "definitions.Tags.minItems",
                "definitions.Bag.minProperties"
            ]
        );
        assert_eq!(diagnostics[0].message, "minimum (10) must not be greater than maximum (5)");
    }

    #[test]
    fn test_properties_named_like_keywords_are_ignored() {
        let doc = json!({"properties": {"minimum": {"type": "integer"}, "maximum": {"type": "integer"}}});
        let ctx = RuleContext::new("min-max", &doc, JsonPath::root());
        assert!(MinMaxConsistency.check(&doc, &Value::Null, &ctx).unwrap().is_empty());
    }
}
