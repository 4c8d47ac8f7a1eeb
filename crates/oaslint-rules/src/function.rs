//! # Rule Function Contract
//!
//! A rule function receives one target node selected by the rule's
//! [`Given`](crate::given::Given), the rule's `functionOptions`, and a
//! [`RuleContext`] describing where it is running. It returns the
//! diagnostics for that target, or a [`RuleError`] when the rule entry
//! itself is misconfigured.
//!
//! Rule id and document version travel in the context value; there is no
//! module-level "current rule" state.

use std::collections::BTreeMap;
use std::fmt;

use oaslint_core::{Diagnostic, JsonPath, RuleError, SpecVersion};
use serde_json::Value;

use crate::functions;

/// Where a rule function is running.
#[derive(Debug, Clone)]
pub struct RuleContext<'a> {
    /// Id of the ruleset entry being evaluated.
    pub rule_id: &'a str,
    /// Root of the document view the rule runs against (resolved unless
    /// the rule asked for the unresolved view).
    pub document: &'a Value,
    /// Location of the target node within `document`.
    pub path: JsonPath,
    /// Version detected from the resolved document.
    pub spec_version: SpecVersion,
}

impl<'a> RuleContext<'a> {
    pub fn new(rule_id: &'a str, document: &'a Value, path: JsonPath) -> Self {
        Self {
            rule_id,
            document,
            path,
            spec_version: SpecVersion::detect(document),
        }
    }

    pub fn with_spec_version(mut self, spec_version: SpecVersion) -> Self {
        self.spec_version = spec_version;
        self
    }

    /// Build a [`RuleError::MissingOption`] for this rule.
    pub fn missing_option(&self, option: &str) -> RuleError {
        RuleError::MissingOption {
            rule: self.rule_id.to_string(),
            option: option.to_string(),
        }
    }

    /// Build a [`RuleError::InvalidOption`] for this rule.
    pub fn invalid_option(&self, option: &str, reason: impl Into<String>) -> RuleError {
        RuleError::InvalidOption {
            rule: self.rule_id.to_string(),
            option: option.to_string(),
            reason: reason.into(),
        }
    }
}

/// A check that can be referenced from a ruleset by name.
pub trait RuleFunction: Send + Sync {
    /// Name used in a ruleset's `then.function`.
    fn name(&self) -> &'static str;

    /// Check one target node.
    fn check(
        &self,
        target: &Value,
        options: &Value,
        ctx: &RuleContext<'_>,
    ) -> Result<Vec<Diagnostic>, RuleError>;
}

/// A non-empty string option that must be present.
pub fn required_str_option<'o>(
    options: &'o Value,
    name: &str,
    ctx: &RuleContext<'_>,
) -> Result<&'o str, RuleError> {
    match options.get(name) {
        None | Some(Value::Null) => Err(ctx.missing_option(name)),
        Some(Value::String(s)) if !s.is_empty() => Ok(s.as_str()),
        Some(Value::String(_)) => Err(ctx.invalid_option(name, "must not be empty")),
        Some(other) => Err(ctx.invalid_option(name, format!("expected a string, found {other}"))),
    }
}

/// An optional list of strings. Absent means empty.
pub fn optional_str_array_option<'o>(
    options: &'o Value,
    name: &str,
    ctx: &RuleContext<'_>,
) -> Result<Vec<&'o str>, RuleError> {
    match options.get(name) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .ok_or_else(|| ctx.invalid_option(name, format!("expected strings, found {item}")))
            })
            .collect(),
        Some(other) => Err(ctx.invalid_option(name, format!("expected a list, found {other}"))),
    }
}

/// Rule functions by name.
#[derive(Default)]
pub struct FunctionRegistry {
    functions: BTreeMap<&'static str, Box<dyn RuleFunction>>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in function.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for function in functions::builtin() {
            registry.register(function);
        }
        registry
    }

    /// Add `function`, replacing any function already registered under the
    /// same name.
    pub fn register(&mut self, function: Box<dyn RuleFunction>) {
        self.functions.insert(function.name(), function);
    }

    pub fn get(&self, name: &str) -> Option<&dyn RuleFunction> {
        self.functions.get(name).map(|f| f.as_ref())
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        self.functions.keys().copied().collect()
    }
}

impl fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionRegistry")
            .field("functions", &self.names())
            .finish()
    }
}
