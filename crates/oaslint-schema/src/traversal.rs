//! # Schema Traversal
//!
//! Three ways to apply a per-node check across a resolved schema graph,
//! each accumulating path-tagged [`Diagnostic`]s returned by the callback.
//!
//! | Traversal | Follows | Use for |
//! |-----------|---------|---------|
//! | [`validate_composed_schemas`] | `allOf`/`oneOf`/`anyOf` (+ `not`) | checks meaningful per composition branch |
//! | [`validate_nested_schemas`] | properties, items, additional/pattern properties, through composition | checks that must hold for every property or item |
//! | [`validate_subschemas`] | one of properties / items / allOf / anyOf / oneOf | simple checks that ignore composition |
//!
//! None of them follow `$ref` or detect cycles: input must be a resolved,
//! acyclic graph. None mutate the input. Non-object schemas produce no
//! diagnostics and are not passed to the callback.

use oaslint_core::{Diagnostic, JsonPath};
use serde_json::Value;

use crate::composition::{applicator_branches, Applicator};

/// Logical path segment standing for any array index.
pub const ANY_ITEM: &str = "[]";
/// Logical path segment standing for any dictionary key.
pub const ANY_KEY: &str = "*";

/// Run `validate` on `schema` (when `include_self`) and on every schema it
/// composes through `allOf`/`oneOf`/`anyOf`, and `not` when `include_not`.
///
/// A schema is always validated before the schemas it composes. Properties
/// and items are not descended into. The usual call passes
/// `include_self = true, include_not = true`.
pub fn validate_composed_schemas<F>(
    schema: &Value,
    path: &JsonPath,
    validate: &mut F,
    include_self: bool,
    include_not: bool,
) -> Vec<Diagnostic>
where
    F: FnMut(&Value, &JsonPath) -> Vec<Diagnostic>,
{
    if !schema.is_object() {
        return Vec::new();
    }

    let mut diagnostics = Vec::new();
    if include_self {
        diagnostics.extend(validate(schema, path));
    }

    for applicator in Applicator::ARRAYS {
        for (i, branch) in applicator_branches(schema, applicator).iter().enumerate() {
            diagnostics.extend(validate_composed_schemas(
                branch,
                &path.child(applicator.as_str()).child(i),
                validate,
                true,
                include_not,
            ));
        }
    }

    if include_not {
        if let Some(negated) = schema.get(Applicator::Not.as_str()) {
            diagnostics.extend(validate_composed_schemas(
                negated,
                &path.child(Applicator::Not.as_str()),
                validate,
                true,
                include_not,
            ));
        }
    }

    diagnostics
}

/// Run `validate` on `schema` (when `include_self`) and on every schema
/// nested under it as a property, array item, additional property or
/// pattern property, however deeply.
///
/// Composition branches are descended through but are not themselves
/// validated: a branch is part of the same logical schema as its parent, so
/// only the properties and items it contributes are visited. `not` is
/// descended through only when `include_not`. The usual call passes
/// `include_self = true, include_not = false`.
///
/// The callback receives `(schema, path, logical_path)`. The logical path
/// locates the value in an instance of the root schema: property names,
/// [`ANY_ITEM`] for array items and [`ANY_KEY`] for dictionary values,
/// independent of which composition branch defined the node.
pub fn validate_nested_schemas<F>(
    schema: &Value,
    path: &JsonPath,
    validate: &mut F,
    include_self: bool,
    include_not: bool,
) -> Vec<Diagnostic>
where
    F: FnMut(&Value, &JsonPath, &JsonPath) -> Vec<Diagnostic>,
{
    visit_nested(schema, path, &JsonPath::root(), validate, include_self, include_not)
}

fn visit_nested<F>(
    schema: &Value,
    path: &JsonPath,
    logical_path: &JsonPath,
    validate: &mut F,
    include_self: bool,
    include_not: bool,
) -> Vec<Diagnostic>
where
    F: FnMut(&Value, &JsonPath, &JsonPath) -> Vec<Diagnostic>,
{
    if !schema.is_object() {
        return Vec::new();
    }

    let mut diagnostics = Vec::new();
    if include_self {
        diagnostics.extend(validate(schema, path, logical_path));
    }

    if let Some(props) = schema.get("properties").and_then(Value::as_object) {
        for (name, prop) in props {
            diagnostics.extend(visit_nested(
                prop,
                &path.child("properties").child(name),
                &logical_path.child(name),
                validate,
                true,
                include_not,
            ));
        }
    }

    if let Some(items) = schema.get("items").filter(|v| v.is_object()) {
        diagnostics.extend(visit_nested(
            items,
            &path.child("items"),
            &logical_path.child(ANY_ITEM),
            validate,
            true,
            include_not,
        ));
    }

    if let Some(additional) = schema.get("additionalProperties").filter(|v| v.is_object()) {
        diagnostics.extend(visit_nested(
            additional,
            &path.child("additionalProperties"),
            &logical_path.child(ANY_KEY),
            validate,
            true,
            include_not,
        ));
    }

    if let Some(patterns) = schema.get("patternProperties").and_then(Value::as_object) {
        for (pattern, prop) in patterns {
            diagnostics.extend(visit_nested(
                prop,
                &path.child("patternProperties").child(pattern),
                &logical_path.child(ANY_KEY),
                validate,
                true,
                include_not,
            ));
        }
    }

    if include_not {
        if let Some(negated) = schema.get(Applicator::Not.as_str()) {
            diagnostics.extend(visit_nested(
                negated,
                &path.child(Applicator::Not.as_str()),
                logical_path,
                validate,
                false,
                include_not,
            ));
        }
    }

    for applicator in Applicator::ARRAYS {
        for (i, branch) in applicator_branches(schema, applicator).iter().enumerate() {
            diagnostics.extend(visit_nested(
                branch,
                &path.child(applicator.as_str()).child(i),
                logical_path,
                validate,
                false,
                include_not,
            ));
        }
    }

    diagnostics
}

/// Run `validate` on `schema` and then on ONE kind of child, chosen by
/// precedence: `properties`, else `items`, else `allOf`, else `anyOf`, else
/// `oneOf`.
///
/// A schema combining several of these keywords is only descended through
/// the first present one. Rules that need full coverage use
/// [`validate_nested_schemas`] or [`validate_composed_schemas`] instead.
pub fn validate_subschemas<F>(schema: &Value, path: &JsonPath, validate: &mut F) -> Vec<Diagnostic>
where
    F: FnMut(&Value, &JsonPath) -> Vec<Diagnostic>,
{
    if !schema.is_object() {
        return Vec::new();
    }

    let mut diagnostics = validate(schema, path);

    if let Some(props) = schema.get("properties").and_then(Value::as_object) {
        for (name, prop) in props {
            diagnostics.extend(validate_subschemas(
                prop,
                &path.child("properties").child(name),
                validate,
            ));
        }
    } else if let Some(items) = schema.get("items").filter(|v| v.is_object()) {
        diagnostics.extend(validate_subschemas(items, &path.child("items"), validate));
    } else if let Some((applicator, branches)) = [Applicator::AllOf, Applicator::AnyOf, Applicator::OneOf]
        .into_iter()
        .find_map(|a| schema.get(a.as_str()).and_then(Value::as_array).map(|b| (a, b)))
    {
        for (i, branch) in branches.iter().enumerate() {
            diagnostics.extend(validate_subschemas(
                branch,
                &path.child(applicator.as_str()).child(i),
                validate,
            ));
        }
    }

    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn missing_type(schema: &Value, path: &JsonPath) -> Vec<Diagnostic> {
        if schema.get("type").is_some() {
            Vec::new()
        } else {
            vec![Diagnostic::new("missing type", path.clone())]
        }
    }

    fn visited(diagnostics: &[Diagnostic]) -> Vec<String> {
        diagnostics.iter().map(|d| d.path.to_string()).collect()
    }

    fn record_all(_: &Value, path: &JsonPath) -> Vec<Diagnostic> {
        vec![Diagnostic::new("visited", path.clone())]
    }

    #[test]
    fn test_composed_includes_root_when_include_self() {
        let schema = json!({"allOf": [{"type": "string"}]});
        let base = JsonPath::from(["defs", "Foo"]);

        let with_self = validate_composed_schemas(&schema, &base, &mut missing_type, true, true);
        assert_eq!(with_self, vec![Diagnostic::new("missing type", base.clone())]);

        let branches_only = validate_composed_schemas(&schema, &base, &mut missing_type, false, true);
        assert!(branches_only.is_empty());
    }

    #[test]
    fn test_composed_visits_parent_before_children() {
        let schema = json!({
            "oneOf": [{"allOf": [{}, {}]}, {}],
            "anyOf": [{}],
            "not": {"oneOf": [{}]},
            "properties": {"skipped": {}},
            "items": {}
        });
        let all = validate_composed_schemas(&schema, &JsonPath::root(), &mut record_all, true, true);
        assert_eq!(
            visited(&all),
            vec![
                "",
                "oneOf.0",
                "oneOf.0.allOf.0",
                "oneOf.0.allOf.1",
                "oneOf.1",
                "anyOf.0",
                "not",
                "not.oneOf.0",
            ]
        );

        let without_not = validate_composed_schemas(&schema, &JsonPath::root(), &mut record_all, true, false);
        assert_eq!(without_not.len(), 6);
    }

    #[test]
    fn test_nested_visits_properties_items_and_dictionaries() {
        let schema = json!({
            "type": "object",
            "properties": {
                "tags": {"type": "array", "items": {"type": "string"}},
                "meta": {"type": "object", "additionalProperties": {"type": "integer"}}
            },
            "patternProperties": {"^x-": {"type": "string"}}
        });
        let mut seen = Vec::new();
        let diagnostics = validate_nested_schemas(
            &schema,
            &JsonPath::from(["components", "schemas", "Pet"]),
            &mut |_, path: &JsonPath, logical: &JsonPath| {
                seen.push((path.to_string(), logical.to_string()));
                Vec::new()
            },
            true,
            false,
        );
        assert!(diagnostics.is_empty());
        assert_eq!(
            seen,
            vec![
                ("components.schemas.Pet".to_string(), "".to_string()),
                ("components.schemas.Pet.properties.tags".to_string(), "tags".to_string()),
                ("components.schemas.Pet.properties.tags.items".to_string(), "tags.[]".to_string()),
                ("components.schemas.Pet.properties.meta".to_string(), "meta".to_string()),
                (
                    "components.schemas.Pet.properties.meta.additionalProperties".to_string(),
                    "meta.*".to_string()
                ),
                ("components.schemas.Pet.patternProperties.^x-".to_string(), "*".to_string()),
            ]
        );
    }

    #[test]
    fn test_nested_descends_through_composition_without_validating_branches() {
        let schema = json!({
            "allOf": [
                {"properties": {"id": {"type": "string"}}},
                {"oneOf": [{"properties": {"name": {}}}]}
            ],
            "not": {"properties": {"forbidden": {}}}
        });
        let mut paths = Vec::new();
        validate_nested_schemas(
            &schema,
            &JsonPath::root(),
            &mut |_, path: &JsonPath, logical: &JsonPath| {
                paths.push((path.to_string(), logical.to_string()));
                Vec::new()
            },
            true,
            false,
        );
        assert_eq!(
            paths,
            vec![
                ("".to_string(), "".to_string()),
                ("allOf.0.properties.id".to_string(), "id".to_string()),
                ("allOf.1.oneOf.0.properties.name".to_string(), "name".to_string()),
            ]
        );
    }

    #[test]
    fn test_nested_include_not() {
        let schema = json!({"not": {"properties": {"forbidden": {}}}});
        let mut count = 0;
        validate_nested_schemas(
            &schema,
            &JsonPath::root(),
            &mut |_, _: &JsonPath, _: &JsonPath| {
                count += 1;
                Vec::new()
            },
            false,
            true,
        );
        assert_eq!(count, 1);
    }

    #[test]
    fn test_nested_collects_diagnostics_with_logical_path() {
        let schema = json!({
            "type": "array",
            "items": {"properties": {"a": {"type": "string"}, "b": {}}}
        });
        let diagnostics = validate_nested_schemas(
            &schema,
            &JsonPath::from(["definitions", "List"]),
            &mut |s: &Value, path: &JsonPath, logical: &JsonPath| {
                if s.get("type").is_none() {
                    vec![Diagnostic::new(format!("{logical} has no type"), path.clone())]
                } else {
                    Vec::new()
                }
            },
            true,
            false,
        );
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[0].message, "[] has no type");
        assert_eq!(diagnostics[1].message, "[].b has no type");
        assert_eq!(diagnostics[1].path.to_string(), "definitions.List.items.properties.b");
    }

    #[test]
    fn test_subschemas_precedence() {
        let schema = json!({
            "properties": {"a": {}},
            "items": {"type": "string"},
            "allOf": [{}]
        });
        let all = validate_subschemas(&schema, &JsonPath::root(), &mut record_all);
        assert_eq!(visited(&all), vec!["", "properties.a"]);

        let composed = json!({"anyOf": [{}], "allOf": [{}, {"items": {}}], "oneOf": [{}]});
        let all = validate_subschemas(&composed, &JsonPath::root(), &mut record_all);
        assert_eq!(visited(&all), vec!["", "allOf.0", "allOf.1", "allOf.1.items"]);

        let alternatives = json!({"oneOf": [{}], "anyOf": [{}]});
        let all = validate_subschemas(&alternatives, &JsonPath::root(), &mut record_all);
        assert_eq!(visited(&all), vec!["", "anyOf.0"]);
    }

    #[test]
    fn test_non_object_schema_is_skipped() {
        let mut calls = 0;
        let mut count = |_: &Value, _: &JsonPath| {
            calls += 1;
            Vec::new()
        };
        assert!(validate_subschemas(&json!(true), &JsonPath::root(), &mut count).is_empty());
        assert!(validate_composed_schemas(&Value::Null, &JsonPath::root(), &mut count, true, true).is_empty());
        assert!(validate_composed_schemas(&json!({"allOf": [true, 1]}), &JsonPath::root(), &mut count, false, true).is_empty());
        assert_eq!(calls, 0);
    }
}
