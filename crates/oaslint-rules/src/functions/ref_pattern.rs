//! Local `$ref` values that point into the wrong component section.
//!
//! The section a reference should target follows from where the `$ref`
//! object sits: a schema position must reference a schema, an entry of a
//! `parameters` list must reference a parameter, and so on. Only local
//! references (`#/...`) are checked, and positions that do not imply a
//! section (path items, extensions) are left alone. Run against the
//! unresolved document.

use oaslint_core::{Diagnostic, JsonPath, PathSegment, RuleError, SpecVersion};
use serde_json::Value;

use crate::function::{RuleContext, RuleFunction};
use crate::walker::walk_document;

/// Kind of component a position in the document holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Schema,
    Parameter,
    Response,
    RequestBody,
    Header,
    Example,
    Link,
    Callback,
}

impl Section {
    /// Required `$ref` prefix, or `None` when the version has no such section.
    fn prefix(&self, version: SpecVersion) -> Option<&'static str> {
        match (self, version) {
            (Self::Schema, SpecVersion::Swagger2) => Some("#/definitions/"),
            (Self::Parameter, SpecVersion::Swagger2) => Some("#/parameters/"),
            (Self::Response, SpecVersion::Swagger2) => Some("#/responses/"),
            (_, SpecVersion::Swagger2) => None,
            (Self::Schema, _) => Some("#/components/schemas/"),
            (Self::Parameter, _) => Some("#/components/parameters/"),
            (Self::Response, _) => Some("#/components/responses/"),
            (Self::RequestBody, _) => Some("#/components/requestBodies/"),
            (Self::Header, _) => Some("#/components/headers/"),
            (Self::Example, _) => Some("#/components/examples/"),
            (Self::Link, _) => Some("#/components/links/"),
            (Self::Callback, _) => Some("#/components/callbacks/"),
        }
    }
}

/// Infer the section of the node at `path` from its trailing segments.
fn section_for(path: &JsonPath) -> Option<Section> {
    let segments = path.segments();
    let last = segments.last()?;
    let parent = segments
        .len()
        .checked_sub(2)
        .and_then(|i| segments.get(i))
        .and_then(PathSegment::as_key);

    if let Some(parent) = parent {
        match parent {
            "properties" | "patternProperties" | "schemas" | "definitions" => return Some(Section::Schema),
            "allOf" | "oneOf" | "anyOf" if matches!(last, PathSegment::Index(_)) => return Some(Section::Schema),
            _ => {}
        }
    }

    match last.as_key() {
        Some("schema" | "items" | "additionalProperties" | "not") => return Some(Section::Schema),
        Some("requestBody") => return Some(Section::RequestBody),
        _ => {}
    }

    match parent? {
        "parameters" => Some(Section::Parameter),
        "responses" => Some(Section::Response),
        "requestBodies" => Some(Section::RequestBody),
        "headers" => Some(Section::Header),
        "examples" => Some(Section::Example),
        "links" => Some(Section::Link),
        "callbacks" => Some(Section::Callback),
        _ => None,
    }
}

pub struct RefPattern;

impl RuleFunction for RefPattern {
    fn name(&self) -> &'static str {
        "ref-pattern"
    }

    fn check(
        &self,
        target: &Value,
        _options: &Value,
        ctx: &RuleContext<'_>,
    ) -> Result<Vec<Diagnostic>, RuleError> {
        let version = ctx.spec_version;
        if version == SpecVersion::Unknown {
            return Ok(Vec::new());
        }

        Ok(walk_document(target, &ctx.path, &mut |node: &Value, path: &JsonPath| {
            let Some(reference) = node.get("$ref").and_then(Value::as_str) else {
                return Vec::new();
            };
            if !reference.starts_with("#/") {
                return Vec::new();
            }
            let Some(prefix) = section_for(path).and_then(|s| s.prefix(version)) else {
                return Vec::new();
            };
            if reference.starts_with(prefix) {
                Vec::new()
            } else {
                vec![Diagnostic::new(
                    format!("$ref value should start with '{prefix}': {reference}"),
                    path.child("$ref"),
                )]
            }
        }))
    }
}
