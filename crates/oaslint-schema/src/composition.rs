//! # Constraint & Property Composition
//!
//! Answers "does constraint P hold for schema S" when S may be assembled from
//! `allOf`/`oneOf`/`anyOf` branches. Every type predicate in
//! [`crate::schema_type`] and every property question a rule asks funnels
//! through [`has_constraint`].
//!
//! ## Composition Policy
//!
//! | Applicator | Satisfied when |
//! |------------|----------------|
//! | the schema itself | the predicate holds for it directly |
//! | `allOf` | ANY branch satisfies it (one conjunct may supply the constraint alone) |
//! | `oneOf` / `anyOf` (strict) | EVERY branch satisfies it |
//! | `oneOf` / `anyOf` (loose) | ANY branch satisfies it |
//! | `not` | never consulted |
//!
//! An empty `oneOf`/`anyOf` array never satisfies a constraint in either
//! mode.
//!
//! `$ref` is never followed: callers pass an already-resolved schema graph.
//! Cyclic graphs are assumed broken upstream.
//!
//! Property enumeration ([`get_property_names_for_schema`],
//! [`get_property_schemas_by_name`]) deliberately uses union semantics over
//! all branches: it answers "which names might appear", not "which are
//! guaranteed".

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use oaslint_core::JsonPath;
use serde_json::Value;

/// `oneOf`/`anyOf` policy for [`has_constraint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CompositionMode {
    /// Every `oneOf`/`anyOf` branch must satisfy the constraint.
    #[default]
    Strict,
    /// At least one `oneOf`/`anyOf` branch must satisfy the constraint.
    Loose,
}

/// Schema keywords that combine other schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Applicator {
    AllOf,
    OneOf,
    AnyOf,
    Not,
}

impl Applicator {
    /// The array-valued applicators, in traversal order.
    pub const ARRAYS: [Applicator; 3] = [Self::AllOf, Self::OneOf, Self::AnyOf];

    /// The keyword as it appears in a document.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AllOf => "allOf",
            Self::OneOf => "oneOf",
            Self::AnyOf => "anyOf",
            Self::Not => "not",
        }
    }
}

impl fmt::Display for Applicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Branches of an array-valued applicator, or an empty slice when the
/// keyword is absent or malformed.
pub fn applicator_branches(schema: &Value, applicator: Applicator) -> &[Value] {
    schema
        .get(applicator.as_str())
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Returns true if `schema` carries any of `allOf`/`oneOf`/`anyOf`/`not`.
pub fn is_composite_schema(schema: &Value) -> bool {
    [Applicator::AllOf, Applicator::OneOf, Applicator::AnyOf, Applicator::Not]
        .iter()
        .any(|a| schema.get(a.as_str()).is_some())
}

/// Does `predicate` hold for `schema`, taking composition into account?
///
/// Non-object input yields `false`.
pub fn has_constraint<F>(schema: &Value, predicate: &F, mode: CompositionMode) -> bool
where
    F: Fn(&Value) -> bool + ?Sized,
{
    if !schema.is_object() {
        return false;
    }

    if predicate(schema) {
        return true;
    }

    if applicator_branches(schema, Applicator::AllOf)
        .iter()
        .any(|branch| has_constraint(branch, predicate, mode))
    {
        return true;
    }

    for applicator in [Applicator::OneOf, Applicator::AnyOf] {
        let branches = applicator_branches(schema, applicator);
        if branches.is_empty() {
            continue;
        }
        let satisfied = match mode {
            CompositionMode::Strict => branches
                .iter()
                .all(|branch| has_constraint(branch, predicate, mode)),
            CompositionMode::Loose => branches
                .iter()
                .any(|branch| has_constraint(branch, predicate, mode)),
        };
        if satisfied {
            return true;
        }
    }

    false
}

/// [`has_constraint`] under [`CompositionMode::Strict`].
pub fn schema_has_constraint<F>(schema: &Value, predicate: F) -> bool
where
    F: Fn(&Value) -> bool,
{
    has_constraint(schema, &predicate, CompositionMode::Strict)
}

/// [`has_constraint`] under [`CompositionMode::Loose`].
pub fn schema_loosely_has_constraint<F>(schema: &Value, predicate: F) -> bool
where
    F: Fn(&Value) -> bool,
{
    has_constraint(schema, &predicate, CompositionMode::Loose)
}

/// Is the property `name` defined by `schema` or its composition?
///
/// An `allOf` branch alone may define it; every `oneOf`/`anyOf` branch must.
pub fn schema_has_property(schema: &Value, name: &str) -> bool {
    schema_has_constraint(schema, |s| {
        s.get("properties")
            .and_then(Value::as_object)
            .is_some_and(|props| props.contains_key(name))
    })
}

/// Is the property `name` both listed in some `required` array and defined
/// somewhere in the composition?
///
/// A name that is required but never defined does not count.
pub fn schema_requires_property(schema: &Value, name: &str) -> bool {
    let required = schema_has_constraint(schema, |s| {
        s.get("required")
            .and_then(Value::as_array)
            .is_some_and(|names| names.iter().any(|n| n.as_str() == Some(name)))
    });
    required && schema_has_property(schema, name)
}

/// Every property name visible on `schema` directly or through any
/// `allOf`/`oneOf`/`anyOf` branch, de-duplicated, in first-seen order.
pub fn get_property_names_for_schema(schema: &Value) -> Vec<String> {
    get_property_names_matching(schema, |_, _| true)
}

/// Like [`get_property_names_for_schema`], keeping only the properties for
/// which `filter(name, property_schema)` holds.
pub fn get_property_names_matching<F>(schema: &Value, filter: F) -> Vec<String>
where
    F: Fn(&str, &Value) -> bool,
{
    let mut seen = HashSet::new();
    let mut names = Vec::new();
    collect_property_names(schema, &filter, &mut seen, &mut names);
    names
}

fn collect_property_names<F>(
    schema: &Value,
    filter: &F,
    seen: &mut HashSet<String>,
    names: &mut Vec<String>,
) where
    F: Fn(&str, &Value) -> bool,
{
    if !schema.is_object() {
        return;
    }
    if let Some(props) = schema.get("properties").and_then(Value::as_object) {
        for (name, prop) in props {
            if filter(name, prop) && seen.insert(name.clone()) {
                names.push(name.clone());
            }
        }
    }
    for applicator in Applicator::ARRAYS {
        for branch in applicator_branches(schema, applicator) {
            collect_property_names(branch, filter, seen, names);
        }
    }
}

/// For each property name visible on `schema`, every schema fragment that
/// defines it, across all `allOf`/`oneOf`/`anyOf` branches.
///
/// Fragments for one name appear in pre-order: the schema's own definition
/// first, then `allOf`, `oneOf`, `anyOf` branches.
pub fn get_property_schemas_by_name(schema: &Value) -> BTreeMap<String, Vec<&Value>> {
    let mut by_name: BTreeMap<String, Vec<&Value>> = BTreeMap::new();
    collect_property_schemas(schema, &mut by_name);
    by_name
}

fn collect_property_schemas<'a>(schema: &'a Value, by_name: &mut BTreeMap<String, Vec<&'a Value>>) {
    if !schema.is_object() {
        return;
    }
    if let Some(props) = schema.get("properties").and_then(Value::as_object) {
        for (name, prop) in props {
            by_name.entry(name.clone()).or_default().push(prop);
        }
    }
    for applicator in Applicator::ARRAYS {
        for branch in applicator_branches(schema, applicator) {
            collect_property_schemas(branch, by_name);
        }
    }
}

/// Run `collector` on `schema` (when `include_self`) and on every schema
/// reachable through `allOf`/`oneOf`/`anyOf` (and `not`, when `include_not`),
/// concatenating the results with duplicates removed.
///
/// Properties and items are not descended into.
pub fn collect_from_composed_schemas<'a, T, F>(
    schema: &'a Value,
    collector: &mut F,
    include_self: bool,
    include_not: bool,
) -> Vec<T>
where
    T: PartialEq,
    F: FnMut(&'a Value) -> Vec<T>,
{
    let mut items = Vec::new();
    collect_composed_into(schema, collector, include_self, include_not, &mut items);
    items
}

fn collect_composed_into<'a, T, F>(
    schema: &'a Value,
    collector: &mut F,
    include_self: bool,
    include_not: bool,
    items: &mut Vec<T>,
) where
    T: PartialEq,
    F: FnMut(&'a Value) -> Vec<T>,
{
    if !schema.is_object() {
        return;
    }
    if include_self {
        for item in collector(schema) {
            if !items.contains(&item) {
                items.push(item);
            }
        }
    }
    if include_not {
        if let Some(negated) = schema.get(Applicator::Not.as_str()) {
            collect_composed_into(negated, collector, true, include_not, items);
        }
    }
    for applicator in Applicator::ARRAYS {
        for branch in applicator_branches(schema, applicator) {
            collect_composed_into(branch, collector, true, include_not, items);
        }
    }
}

/// A schema reached through composition from some root schema.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedSchema<'a> {
    /// The composed schema itself.
    pub schema: &'a Value,
    /// Its location relative to the root schema.
    pub path: JsonPath,
    /// The applicators followed to reach it, outermost first. Empty for the
    /// root schema.
    pub via: Vec<Applicator>,
}

impl ComposedSchema<'_> {
    /// Renders the applicator chain, e.g. `anyOf->allOf`.
    pub fn via_description(&self) -> String {
        self.via
            .iter()
            .map(Applicator::as_str)
            .collect::<Vec<_>>()
            .join("->")
    }
}

/// Flatten every schema reachable from `schema` through `allOf`/`oneOf`/
/// `anyOf` into a list, keeping those that satisfy `filter`.
///
/// `not`, properties and items are not followed. Structurally equal
/// schemas are reported once, at their first pre-order occurrence.
pub fn collect_composed_schemas<F>(
    schema: &Value,
    filter: F,
    include_self: bool,
) -> Vec<ComposedSchema<'_>>
where
    F: Fn(&Value) -> bool,
{
    let mut found = Vec::new();
    flatten_composed(schema, &filter, include_self, JsonPath::root(), Vec::new(), &mut found);
    found
}

fn flatten_composed<'a, F>(
    schema: &'a Value,
    filter: &F,
    include_self: bool,
    path: JsonPath,
    via: Vec<Applicator>,
    found: &mut Vec<ComposedSchema<'a>>,
) where
    F: Fn(&Value) -> bool,
{
    if !schema.is_object() {
        return;
    }
    for applicator in Applicator::ARRAYS {
        for (i, branch) in applicator_branches(schema, applicator).iter().enumerate() {
            let mut branch_via = via.clone();
            branch_via.push(applicator);
            // Record the branch before recursing so parents precede children.
            if branch.is_object()
                && filter(branch)
                && !found.iter().any(|c| c.schema == branch)
            {
                found.push(ComposedSchema {
                    schema: branch,
                    path: path.child(applicator.as_str()).child(i),
                    via: branch_via.clone(),
                });
            }
            flatten_composed(
                branch,
                filter,
                false,
                path.child(applicator.as_str()).child(i),
                branch_via,
                found,
            );
        }
    }
    if include_self && filter(schema) && !found.iter().any(|c| c.schema == schema) {
        found.insert(
            0,
            ComposedSchema {
                schema,
                path,
                via,
            },
        );
    }
}
