//! # Lint Runner
//!
//! [`Linter`] applies every enabled rule of a [`Ruleset`] to a document and
//! collects the tagged results. Rules run in id order and targets in
//! document order, so a report is reproducible for a given input.
//!
//! A rule whose function reports a [`RuleError`] (a misconfigured rule
//! entry, not a problem with the document) stops at that target. The error
//! is recorded in [`LintReport::failures`] and the remaining rules still run.

use oaslint_core::{ConfigError, LintResult, RuleError, Severity, SpecVersion};
use serde_json::Value;

use crate::function::{FunctionRegistry, RuleContext};
use crate::ruleset::{RuleDefinition, Ruleset};

/// A rule that could not complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleFailure {
    pub rule_id: String,
    pub error: RuleError,
}

/// Output of one [`Linter::lint`] call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LintReport {
    pub results: Vec<LintResult>,
    pub failures: Vec<RuleFailure>,
}

impl LintReport {
    /// Number of results at `severity`.
    pub fn count(&self, severity: Severity) -> usize {
        self.results.iter().filter(|r| r.severity == severity).count()
    }

    /// True when any result has [`Severity::Error`].
    pub fn has_errors(&self) -> bool {
        self.count(Severity::Error) > 0
    }

    /// Results produced by `rule_id`.
    pub fn for_rule<'a>(&'a self, rule_id: &'a str) -> impl Iterator<Item = &'a LintResult> + 'a {
        self.results.iter().filter(move |r| r.rule_id == rule_id)
    }
}

/// Runs a ruleset against documents.
#[derive(Debug)]
pub struct Linter {
    ruleset: Ruleset,
    registry: FunctionRegistry,
}

impl Linter {
    pub fn new(ruleset: Ruleset, registry: FunctionRegistry) -> Self {
        Self { ruleset, registry }
    }

    /// The recommended ruleset over the built-in functions.
    pub fn recommended() -> Result<Self, ConfigError> {
        Ok(Self::new(Ruleset::recommended()?, FunctionRegistry::builtin()))
    }

    pub fn ruleset(&self) -> &Ruleset {
        &self.ruleset
    }

    pub fn registry(&self) -> &FunctionRegistry {
        &self.registry
    }

    /// Lint a document.
    ///
    /// `resolved` is the document with every `$ref` replaced by its target;
    /// `unresolved` is the document as written. Rules see the resolved view
    /// unless their definition sets `resolved: false`. The document version is
    /// detected once, from `resolved`.
    pub fn lint(&self, resolved: &Value, unresolved: &Value) -> LintReport {
        let version = SpecVersion::detect(resolved);
        let mut report = LintReport::default();

        for (rule_id, rule) in self.ruleset.enabled() {
            let span = tracing::debug_span!("rule", rule_id);
            let _entered = span.enter();

            let document = if rule.resolved { resolved } else { unresolved };
            match self.run_rule(rule_id, rule, document, version) {
                Ok(results) => {
                    tracing::debug!(rule_id, results = results.len(), "rule finished");
                    report.results.extend(results);
                }
                Err(error) => {
                    tracing::warn!(rule_id, %error, "rule failed");
                    report.failures.push(RuleFailure {
                        rule_id: rule_id.to_string(),
                        error,
                    });
                }
            }
        }

        report
    }

    fn run_rule(
        &self,
        rule_id: &str,
        rule: &RuleDefinition,
        document: &Value,
        version: SpecVersion,
    ) -> Result<Vec<LintResult>, RuleError> {
        let Some(severity) = rule.severity.level() else {
            return Ok(Vec::new());
        };
        let function = self
            .registry
            .get(&rule.then.function)
            .ok_or_else(|| RuleError::UnknownFunction(rule.then.function.clone()))?;

        let mut results = Vec::new();
        for target in rule.given.targets(document, version) {
            tracing::trace!(path = %target.path, function = function.name(), "checking target");
            let ctx = RuleContext::new(rule_id, document, target.path).with_spec_version(version);
            let diagnostics = function.check(target.value, &rule.then.function_options, &ctx)?;
            results.extend(
                diagnostics
                    .into_iter()
                    .map(|d| LintResult::from_diagnostic(rule_id, severity, d)),
            );
        }
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::given::Given;
    use crate::ruleset::{RuleAction, RuleSeverity};
    use serde_json::json;

    fn rule(function: &str, severity: RuleSeverity, given: Given, options: Value) -> RuleDefinition {
        RuleDefinition {
            description: None,
            severity,
            given,
            resolved: true,
            then: RuleAction {
                function: function.to_string(),
                function_options: options,
            },
        }
    }

    fn linter(rules: Vec<(&str, RuleDefinition)>) -> Linter {
        let ruleset = Ruleset {
            rules: rules.into_iter().map(|(id, r)| (id.to_string(), r)).collect(),
        };
        Linter::new(ruleset, FunctionRegistry::builtin())
    }

    fn document() -> Value {
        json!({
            "openapi": "3.0.0",
            "paths": {
                "/pets": {
                    "get": {
                        "parameters": [
                            {"name": "Accept", "in": "header", "schema": {"type": "string", "maxLength": 20}},
                            {"name": "limit", "in": "query", "schema": {"type": "integer", "minimum": 10, "maximum": 1}}
                        ],
                        "responses": {"200": {"description": "ok"}}
                    }
                }
            }
        })
    }

    #[test]
    fn test_results_are_tagged() {
        let doc = document();
        let linter = linter(vec![
            ("no-accept", rule("disallowed-header", RuleSeverity::Warn, Given::Parameters, json!({"headerName": "accept"}))),
            ("bounds", rule("min-max-consistency", RuleSeverity::Error, Given::Document, Value::Null)),
        ]);
        let report = linter.lint(&doc, &doc);

        assert!(report.failures.is_empty());
        assert_eq!(report.results.len(), 2);
        assert_eq!(report.results[0].rule_id, "bounds");
        assert_eq!(report.results[0].severity, Severity::Error);
        assert_eq!(
            report.results[0].path.to_string(),
            "paths./pets.get.parameters.1.schema.minimum"
        );
        assert_eq!(report.results[1].rule_id, "no-accept");
        assert_eq!(report.results[1].severity, Severity::Warn);
        assert_eq!(report.count(Severity::Warn), 1);
        assert!(report.has_errors());
        assert_eq!(report.for_rule("no-accept").count(), 1);
    }

    #[test]
    fn test_rule_error_is_isolated() {
        let doc = document();
        let linter = linter(vec![
            ("a-broken", rule("disallowed-header", RuleSeverity::Error, Given::Parameters, json!({}))),
            ("b-unknown", rule("no-such-function", RuleSeverity::Error, Given::Document, Value::Null)),
            ("c-bounds", rule("min-max-consistency", RuleSeverity::Warn, Given::Document, Value::Null)),
        ]);
        let report = linter.lint(&doc, &doc);

        assert_eq!(report.failures.len(), 2);
        assert_eq!(report.failures[0].rule_id, "a-broken");
        assert!(matches!(report.failures[0].error, RuleError::MissingOption { .. }));
        assert_eq!(
            report.failures[1].error,
            RuleError::UnknownFunction("no-such-function".to_string())
        );
        assert_eq!(report.results.len(), 1);
        assert_eq!(report.results[0].rule_id, "c-bounds");
        assert!(!report.has_errors());
    }

    #[test]
    fn test_disabled_rules_do_not_run() {
        let doc = document();
        let linter = linter(vec![(
            "bounds",
            rule("min-max-consistency", RuleSeverity::Off, Given::Document, Value::Null),
        )]);
        assert_eq!(linter.lint(&doc, &doc), LintReport::default());
    }

    #[test]
    fn test_unresolved_view() {
        let resolved = json!({"openapi": "3.0.0", "components": {"schemas": {"A": {"type": "string"}}}});
        let unresolved = json!({"openapi": "3.0.0", "components": {"schemas": {"A": {"$ref": "#/x", "type": "string"}}}});
        let mut siblings = rule("ref-siblings", RuleSeverity::Error, Given::Document, Value::Null);
        siblings.resolved = false;
        let report = linter(vec![("ref-siblings", siblings)]).lint(&resolved, &unresolved);
        assert_eq!(report.results.len(), 1);
        assert_eq!(report.results[0].path.to_string(), "components.schemas.A.type");
    }
}
