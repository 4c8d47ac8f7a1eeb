//! # Diagnostics
//!
//! [`Diagnostic`] is the result shape threaded through every predicate,
//! traversal and walker in oaslint: a message plus the [`JsonPath`] of the
//! offending node. Core functions never assign a severity. The host that
//! runs a rule tags each diagnostic with the rule's configured [`Severity`],
//! producing a [`LintResult`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::path::JsonPath;

/// A single rule violation, located in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Human-readable description of the violation.
    pub message: String,
    /// Location of the flagged node.
    pub path: JsonPath,
}

impl Diagnostic {
    pub fn new(message: impl Into<String>, path: JsonPath) -> Self {
        Self {
            message: message.into(),
            path,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Severity assigned to a rule by the ruleset configuration.
///
/// Ordered from most to least severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warn,
    Info,
    Hint,
}

impl Severity {
    /// All severities, most severe first.
    pub fn all() -> &'static [Severity] {
        &[Self::Error, Self::Warn, Self::Info, Self::Hint]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Hint => "hint",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = ConfigError;

    /// Accepts the identifiers produced by [`Severity::as_str`] plus the
    /// `warning` and `information` spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" | "information" => Ok(Self::Info),
            "hint" => Ok(Self::Hint),
            other => Err(ConfigError::UnknownSeverity(other.to_string())),
        }
    }
}

/// A diagnostic after the host has attributed it to a rule and severity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LintResult {
    pub rule_id: String,
    pub severity: Severity,
    pub message: String,
    pub path: JsonPath,
}

impl LintResult {
    pub fn from_diagnostic(rule_id: &str, severity: Severity, diagnostic: Diagnostic) -> Self {
        Self {
            rule_id: rule_id.to_string(),
            severity,
            message: diagnostic.message,
            path: diagnostic.path,
        }
    }
}

impl fmt::Display for LintResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let location = if self.path.is_empty() {
            "(root)".to_string()
        } else {
            self.path.to_string()
        };
        write!(
            f,
            "{:<5} {}: {} [{}]",
            self.severity, location, self.message, self.rule_id
        )
    }
}
