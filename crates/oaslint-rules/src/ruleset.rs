//! # Ruleset Configuration
//!
//! A ruleset maps rule ids to declarative rule definitions: which function
//! runs, on which targets, against which document view, and at what
//! severity. Rulesets are plain data loaded from YAML or JSON.
//!
//! ```yaml
//! rules:
//!   schema-property-description:
//!     severity: warn
//!     given: schemas
//!     then:
//!       function: property-description
//! ```
//!
//! Rules are kept in a `BTreeMap`, so iteration (and therefore lint output)
//! follows rule id order regardless of the order in the source file.

use std::collections::BTreeMap;
use std::path::Path;

use oaslint_core::{ConfigError, Severity};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::given::Given;

const RECOMMENDED: &str = include_str!("../rulesets/recommended.yaml");

/// Severity as written in a ruleset, including `off`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleSeverity {
    Off,
    Error,
    #[default]
    #[serde(alias = "warning")]
    Warn,
    #[serde(alias = "information")]
    Info,
    Hint,
}

impl RuleSeverity {
    /// Severity attached to results, or `None` for a disabled rule.
    pub fn level(&self) -> Option<Severity> {
        match self {
            Self::Off => None,
            Self::Error => Some(Severity::Error),
            Self::Warn => Some(Severity::Warn),
            Self::Info => Some(Severity::Info),
            Self::Hint => Some(Severity::Hint),
        }
    }
}

impl From<Severity> for RuleSeverity {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Error => Self::Error,
            Severity::Warn => Self::Warn,
            Severity::Info => Self::Info,
            Severity::Hint => Self::Hint,
        }
    }
}

impl std::str::FromStr for RuleSeverity {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("off") {
            return Ok(Self::Off);
        }
        s.parse::<Severity>().map(Self::from)
    }
}

/// The function a rule runs and its options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleAction {
    pub function: String,
    #[serde(default)]
    pub function_options: Value,
}

fn resolved_default() -> bool {
    true
}

/// One entry of a ruleset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub severity: RuleSeverity,
    #[serde(default)]
    pub given: Given,
    /// Run against the resolved document (default) or the document as
    /// written, with `$ref`s intact.
    #[serde(default = "resolved_default")]
    pub resolved: bool,
    pub then: RuleAction,
}

impl RuleDefinition {
    pub fn is_enabled(&self) -> bool {
        self.severity.level().is_some()
    }
}

/// A named collection of rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ruleset {
    #[serde(default)]
    pub rules: BTreeMap<String, RuleDefinition>,
}

impl Ruleset {
    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(source).map_err(|e| ConfigError::Parse {
            format: "YAML",
            reason: e.to_string(),
        })
    }

    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(source).map_err(|e| ConfigError::Parse {
            format: "JSON",
            reason: e.to_string(),
        })
    }

    /// Load a ruleset file. `.json` files are parsed as JSON; anything else
    /// as YAML.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        match ext {
            "json" => Self::from_json_str(&content),
            _ => Self::from_yaml_str(&content),
        }
    }

    /// The built-in ruleset.
    pub fn recommended() -> Result<Self, ConfigError> {
        Self::from_yaml_str(RECOMMENDED)
    }

    /// Change the severity of `rule_id`. Unknown ids are ignored.
    pub fn with_override(mut self, rule_id: &str, severity: RuleSeverity) -> Self {
        if let Some(rule) = self.rules.get_mut(rule_id) {
            rule.severity = severity;
        }
        self
    }

    /// Rules whose severity is not `off`, in id order.
    pub fn enabled(&self) -> impl Iterator<Item = (&str, &RuleDefinition)> {
        self.rules
            .iter()
            .filter(|(_, rule)| rule.is_enabled())
            .map(|(id, rule)| (id.as_str(), rule))
    }

    pub fn get(&self, rule_id: &str) -> Option<&RuleDefinition> {
        self.rules.get(rule_id)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::function::FunctionRegistry;
    use serde_json::json;

    #[test]
    fn test_parse_yaml() {
        let ruleset = Ruleset::from_yaml_str(
            r#"
rules:
  no-accept-header:
    description: Accept is described by the response media types
    severity: warning
    given: parameters
    then:
      function: disallowed-header
      functionOptions:
        headerName: Accept
  ref-siblings:
    severity: off
    resolved: false
    then:
      function: ref-siblings
"#,
        )
        .unwrap();

        assert_eq!(ruleset.len(), 2);
        let rule = ruleset.get("no-accept-header").unwrap();
        assert_eq!(rule.severity, RuleSeverity::Warn);
        assert_eq!(rule.given, Given::Parameters);
        assert!(rule.resolved);
        assert_eq!(rule.then.function_options, json!({"headerName": "Accept"}));

        let siblings = ruleset.get("ref-siblings").unwrap();
        assert_eq!(siblings.given, Given::Document);
        assert!(!siblings.resolved);
        assert!(!siblings.is_enabled());
        assert_eq!(siblings.then.function_options, Value::Null);

        let enabled: Vec<&str> = ruleset.enabled().map(|(id, _)| id).collect();
        assert_eq!(enabled, vec!["no-accept-header"]);
    }

    #[test]
    fn test_parse_json() {
        let ruleset = Ruleset::from_json_str(
            r#"{"rules": {"b": {"severity": "error", "given": "schemas", "then": {"function": "string-boundary"}},
                          "a": {"severity": "hint", "then": {"function": "ref-pattern"}}}}"#,
        )
        .unwrap();
        let ids: Vec<&String> = ruleset.rules.keys().collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(ruleset.get("b").unwrap().severity.level(), Some(Severity::Error));
    }

    #[test]
    fn test_parse_errors() {
        let err = Ruleset::from_yaml_str("rules:\n  x:\n    severity: loud\n    then: {function: f}\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { format: "YAML", .. }));

        let err = Ruleset::from_json_str(r#"{"rules": {"x": {"then": {}}}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { format: "JSON", .. }));

        let err = Ruleset::from_yaml_str("rules:\n  x:\n    when: always\n    then: {function: f}\n").unwrap_err();
        assert!(err.to_string().contains("when"));
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = Ruleset::from_path(Path::new("/nonexistent/oaslint/ruleset.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_from_path_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("rules.json");
        std::fs::write(&json_path, r#"{"rules": {"r": {"then": {"function": "array-of-arrays"}}}}"#).unwrap();
        let yaml_path = dir.path().join("rules.yml");
        std::fs::write(&yaml_path, "rules:\n  r:\n    then:\n      function: array-of-arrays\n").unwrap();

        let from_json = Ruleset::from_path(&json_path).unwrap();
        let from_yaml = Ruleset::from_path(&yaml_path).unwrap();
        assert_eq!(from_json, from_yaml);
    }

    #[test]
    fn test_recommended_uses_builtin_functions() {
        let ruleset = Ruleset::recommended().unwrap();
        let registry = FunctionRegistry::builtin();
        assert!(!ruleset.is_empty());
        for (id, rule) in &ruleset.rules {
            assert!(
                registry.get(&rule.then.function).is_some(),
                "rule {id} uses unknown function {}",
                rule.then.function
            );
        }
        assert!(!ruleset.get("ref-siblings").unwrap().resolved);
    }

    #[test]
    fn test_with_override() {
        let ruleset = Ruleset::recommended()
            .unwrap()
            .with_override("string-boundary", RuleSeverity::Off)
            .with_override("no-such-rule", RuleSeverity::Error);
        assert!(!ruleset.get("string-boundary").unwrap().is_enabled());
        assert!(ruleset.get("no-such-rule").is_none());
    }

    #[test]
    fn test_rule_severity_from_str() {
        assert_eq!("off".parse::<RuleSeverity>().unwrap(), RuleSeverity::Off);
        assert_eq!("warning".parse::<RuleSeverity>().unwrap(), RuleSeverity::Warn);
        assert!(matches!(
            "loud".parse::<RuleSeverity>(),
            Err(ConfigError::UnknownSeverity(_))
        ));
    }
}
