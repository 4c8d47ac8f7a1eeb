//! # Target Selection
//!
//! [`Given`] says which nodes of a document a rule runs against. It covers
//! the handful of locations the built-in rules need in place of arbitrary
//! JSONPath expressions, for both Swagger 2 and OpenAPI 3 layouts.
//!
//! Targets are produced in document order so rule output is reproducible.

use oaslint_core::{JsonPath, SpecVersion};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// HTTP methods that introduce an operation under a path item.
pub const HTTP_METHODS: &[&str] = &["get", "put", "post", "delete", "options", "head", "patch", "trace"];

/// A class of document locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Given {
    /// The document root.
    #[default]
    Document,
    /// Every top-level schema: named definitions and the schemas of
    /// parameters, request bodies, responses and headers.
    Schemas,
    /// Every operation object under `paths`.
    Operations,
    /// Every parameter object, at path-item, operation and component level.
    Parameters,
}

/// A node selected for a rule, with its location.
#[derive(Debug, Clone, PartialEq)]
pub struct Target<'a> {
    pub value: &'a Value,
    pub path: JsonPath,
}

impl<'a> Target<'a> {
    fn new(value: &'a Value, path: JsonPath) -> Self {
        Self { value, path }
    }
}

impl Given {
    /// Select the nodes of `document` this class covers.
    pub fn targets<'a>(&self, document: &'a Value, version: SpecVersion) -> Vec<Target<'a>> {
        match self {
            Self::Document => vec![Target::new(document, JsonPath::root())],
            Self::Operations => operations(document),
            Self::Parameters => parameters(document, version),
            Self::Schemas => schemas(document, version),
        }
    }
}

/// Object-valued entries of the map at `path`, in document order.
fn entries<'a>(document: &'a Value, path: &JsonPath) -> Vec<Target<'a>> {
    path.resolve(document)
        .and_then(Value::as_object)
        .map(|map| {
            map.iter()
                .filter(|(_, v)| v.is_object())
                .map(|(k, v)| Target::new(v, path.child(k)))
                .collect()
        })
        .unwrap_or_default()
}

/// Object-valued elements of the array at `path`.
fn elements<'a>(document: &'a Value, path: &JsonPath) -> Vec<Target<'a>> {
    path.resolve(document)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .enumerate()
                .filter(|(_, v)| v.is_object())
                .map(|(i, v)| Target::new(v, path.child(i)))
                .collect()
        })
        .unwrap_or_default()
}

fn path_items(document: &Value) -> Vec<Target<'_>> {
    entries(document, &JsonPath::from(["paths"]))
}

fn operations(document: &Value) -> Vec<Target<'_>> {
    let mut found = Vec::new();
    for item in path_items(document) {
        for (method, op) in item.value.as_object().into_iter().flatten() {
            if HTTP_METHODS.contains(&method.as_str()) && op.is_object() {
                found.push(Target::new(op, item.path.child(method)));
            }
        }
    }
    found
}

fn parameters(document: &Value, version: SpecVersion) -> Vec<Target<'_>> {
    let mut found = Vec::new();
    for item in path_items(document) {
        found.extend(elements(document, &item.path.child("parameters")));
        for method in item.value.as_object().into_iter().flat_map(|m| m.keys()) {
            if HTTP_METHODS.contains(&method.as_str()) {
                found.extend(elements(document, &item.path.child(method).child("parameters")));
            }
        }
    }
    if version != SpecVersion::OpenApi3 {
        found.extend(entries(document, &JsonPath::from(["parameters"])));
    }
    if version != SpecVersion::Swagger2 {
        found.extend(entries(document, &JsonPath::from(["components", "parameters"])));
    }
    found
}

/// `<target>.schema` when it is an object.
fn schema_of<'a>(target: &Target<'a>) -> Option<Target<'a>> {
    target
        .value
        .get("schema")
        .filter(|s| s.is_object())
        .map(|s| Target::new(s, target.path.child("schema")))
}

/// `<target>.content.<media type>.schema` for every media type.
fn content_schemas<'a>(document: &'a Value, target: &Target<'a>) -> Vec<Target<'a>> {
    entries(document, &target.path.child("content"))
        .iter()
        .filter_map(schema_of)
        .collect()
}

/// Schemas reachable from a parameter, response, request body or header.
fn carried_schemas<'a>(document: &'a Value, target: &Target<'a>, version: SpecVersion) -> Vec<Target<'a>> {
    let mut found = Vec::new();
    found.extend(schema_of(target));
    if version != SpecVersion::Swagger2 {
        found.extend(content_schemas(document, target));
    }
    found
}

fn response_schemas<'a>(document: &'a Value, response: &Target<'a>, version: SpecVersion) -> Vec<Target<'a>> {
    let mut found = carried_schemas(document, response, version);
    for header in entries(document, &response.path.child("headers")) {
        found.extend(carried_schemas(document, &header, version));
    }
    found
}

fn schemas(document: &Value, version: SpecVersion) -> Vec<Target<'_>> {
    let mut found = Vec::new();

    if version != SpecVersion::OpenApi3 {
        found.extend(entries(document, &JsonPath::from(["definitions"])));
    }
    if version != SpecVersion::Swagger2 {
        found.extend(entries(document, &JsonPath::from(["components", "schemas"])));
    }

    for parameter in parameters(document, version) {
        found.extend(carried_schemas(document, &parameter, version));
    }

    for operation in operations(document) {
        if version != SpecVersion::Swagger2 {
            if let Some(body) = operation.value.get("requestBody").filter(|b| b.is_object()) {
                let body = Target::new(body, operation.path.child("requestBody"));
                found.extend(content_schemas(document, &body));
            }
        }
        for response in entries(document, &operation.path.child("responses")) {
            found.extend(response_schemas(document, &response, version));
        }
    }

    if version != SpecVersion::OpenApi3 {
        for response in entries(document, &JsonPath::from(["responses"])) {
            found.extend(response_schemas(document, &response, version));
        }
    }
    if version != SpecVersion::Swagger2 {
        for body in entries(document, &JsonPath::from(["components", "requestBodies"])) {
            found.extend(content_schemas(document, &body));
        }
        for response in entries(document, &JsonPath::from(["components", "responses"])) {
            found.extend(response_schemas(document, &response, version));
        }
        for header in entries(document, &JsonPath::from(["components", "headers"])) {
            found.extend(carried_schemas(document, &header, version));
        }
    }

    found
}
