//! # Generic Document Walker
//!
//! Depth-first traversal of an entire API document, not just its schemas.
//! Whole-document rules (sibling keys beside `$ref`, min/max pairs, `$ref`
//! targets) hand a visitor to [`walk_document`] and receive the diagnostics
//! it produced.
//!
//! ## Ordering
//!
//! The visitor sees a node before any of its children, and children are
//! visited in document order: object keys in insertion order (serde_json is
//! built with `preserve_order`), array elements by index. Walking the same
//! document twice yields diagnostics in the same order.

use oaslint_core::{Diagnostic, JsonPath};
use serde_json::Value;

/// Visit every non-empty object and array under `document`, starting at
/// `path`.
///
/// Scalars and `null` end the descent. Empty objects and arrays are skipped
/// without calling the visitor. Array elements are addressed by
/// [`PathSegment::Index`](oaslint_core::PathSegment::Index) segments.
pub fn walk_document<F>(document: &Value, path: &JsonPath, visitor: &mut F) -> Vec<Diagnostic>
where
    F: FnMut(&Value, &JsonPath) -> Vec<Diagnostic>,
{
    let mut diagnostics = Vec::new();
    walk_into(document, path, visitor, &mut diagnostics);
    diagnostics
}

fn walk_into<F>(node: &Value, path: &JsonPath, visitor: &mut F, diagnostics: &mut Vec<Diagnostic>)
where
    F: FnMut(&Value, &JsonPath) -> Vec<Diagnostic>,
{
    match node {
        Value::Object(map) if !map.is_empty() => {
            diagnostics.extend(visitor(node, path));
            for (key, child) in map {
                walk_into(child, &path.child(key), visitor, diagnostics);
            }
        }
        Value::Array(items) if !items.is_empty() => {
            diagnostics.extend(visitor(node, path));
            for (i, child) in items.iter().enumerate() {
                walk_into(child, &path.child(i), visitor, diagnostics);
            }
        }
        _ => {}
    }
}
