//! Properties given contradictory types across `allOf` branches.
//!
//! All `allOf` branches apply at once, so a property typed `string` in one
//! branch and `integer` in another can never be satisfied. `oneOf` and
//! `anyOf` alternatives are free to disagree with each other, but each
//! alternative's own `allOf` set is compared.

use std::collections::BTreeSet;

use oaslint_core::{Diagnostic, JsonPath, RuleError};
use oaslint_schema::{
    applicator_branches, get_property_names_for_schema, validate_composed_schemas, validate_nested_schemas,
    Applicator,
};
use serde_json::Value;

use crate::function::{RuleContext, RuleFunction};

/// `type` keywords given to property `name` by `schema` and its `allOf`
/// branches.
fn declared_types<'a>(schema: &'a Value, name: &str, types: &mut BTreeSet<&'a str>) {
    if let Some(ty) = schema
        .get("properties")
        .and_then(|props| props.get(name))
        .and_then(|prop| prop.get("type"))
        .and_then(Value::as_str)
    {
        types.insert(ty);
    }
    for branch in applicator_branches(schema, Applicator::AllOf) {
        declared_types(branch, name, types);
    }
}

/// An `allOf` branch is compared as part of its parent's `allOf` set.
fn is_all_of_branch(path: &JsonPath) -> bool {
    let segments = path.segments();
    segments.len() >= 2 && segments[segments.len() - 2].as_key() == Some("allOf")
}

fn conflicting_types(schema: &Value, path: &JsonPath, logical: &JsonPath) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    for name in get_property_names_for_schema(schema) {
        let mut types = BTreeSet::new();
        declared_types(schema, &name, &mut types);
        if types.len() > 1 {
            let listed: Vec<&str> = types.into_iter().collect();
            diagnostics.push(Diagnostic::new(
                format!(
                    "Property '{}' is declared with conflicting types: {}",
                    logical.child(name.as_str()),
                    listed.join(", ")
                ),
                path.clone(),
            ));
        }
    }
    diagnostics
}

pub struct PropertyConsistentType;

impl RuleFunction for PropertyConsistentType {
    fn name(&self) -> &'static str {
        "property-consistent-type"
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
                validate_composed_schemas(
                    node,
                    path,
                    &mut |branch: &Value, branch_path: &JsonPath| {
                        if is_all_of_branch(branch_path) {
                            return Vec::new();
                        }
                        conflicting_types(branch, branch_path, logical)
                    },
                    true,
                    false,
                )
            },
            true,
            false,
        ))
    }
}
