//! # Error Types
//!
//! oaslint separates three kinds of failure:
//!
//! - A rule that does not hold for the document is NOT an error. It is a
//!   [`Diagnostic`](crate::Diagnostic) returned by value.
//! - A rule catalog entry that is misconfigured (missing or malformed
//!   `functionOptions`, unknown function name) is a [`RuleError`]. The runner
//!   isolates these per rule so one bad entry cannot hide other results.
//! - A ruleset file that cannot be read or parsed is a [`ConfigError`].

use thiserror::Error;

/// Top-level error type for oaslint.
#[derive(Error, Debug)]
pub enum OasLintError {
    /// A rule function was invoked with an invalid configuration.
    #[error("rule error: {0}")]
    Rule(#[from] RuleError),

    /// The ruleset configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Programmer-contract violation raised by a rule function.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    /// A required entry of `functionOptions` is absent.
    #[error("rule '{rule}' is missing required function option '{option}'")]
    MissingOption {
        /// Id of the misconfigured rule.
        rule: String,
        /// Name of the absent option.
        option: String,
    },

    /// An entry of `functionOptions` has the wrong shape.
    #[error("rule '{rule}' has invalid function option '{option}': {reason}")]
    InvalidOption {
        /// Id of the misconfigured rule.
        rule: String,
        /// Name of the offending option.
        option: String,
        /// What was wrong with it.
        reason: String,
    },

    /// The ruleset names a function that is not registered.
    #[error("unknown rule function '{0}'")]
    UnknownFunction(String),
}

/// Failure to load a ruleset configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration text is not valid for its format.
    #[error("invalid {format} ruleset: {reason}")]
    Parse {
        /// `JSON` or `YAML`.
        format: &'static str,
        /// Parser message.
        reason: String,
    },

    /// A severity string was not recognized.
    #[error("unknown severity '{0}'")]
    UnknownSeverity(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_option_message() {
        let e = RuleError::MissingOption {
            rule: "no-accept-header".to_string(),
            option: "headerName".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "rule 'no-accept-header' is missing required function option 'headerName'"
        );
    }

    #[test]
    fn test_top_level_wraps_rule_error() {
        let e: OasLintError = RuleError::UnknownFunction("nope".to_string()).into();
        assert!(matches!(e, OasLintError::Rule(RuleError::UnknownFunction(_))));
        assert!(e.to_string().contains("nope"));
    }
}
