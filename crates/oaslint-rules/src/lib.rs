//! # oaslint-rules — Rule Layer
//!
//! Builds lint rules on top of the schema analysis in `oaslint-schema` and
//! runs them over API documents.
//!
//! ## Document Walking (`walker`)
//!
//! [`walk_document`] visits every object and array of a document in a
//! fixed order, for rules that apply anywhere rather than only to schemas.
//!
//! ## Rule Functions (`function`, `functions`)
//!
//! A [`RuleFunction`] checks one target node and returns
//! [`Diagnostic`](oaslint_core::Diagnostic)s. The [`FunctionRegistry`]
//! resolves the function names used in rulesets; [`FunctionRegistry::builtin`]
//! holds every function in [`functions`].
//!
//! ## Configuration (`ruleset`, `given`)
//!
//! A [`Ruleset`] is loaded from YAML or JSON and says, per rule id, which
//! function runs on which [`Given`] targets and at what severity.
//!
//! ## Running (`runner`)
//!
//! [`Linter::lint`] runs every enabled rule and returns a [`LintReport`].
//!
//! ## Crate Policy
//!
//! - Depends only on `oaslint-core` and `oaslint-schema` internally.
//! - Documents are supplied already parsed, with `$ref`s resolved by the
//!   caller. Nothing here reads API documents from disk.
//! - Logging goes through `tracing`; the crate never installs a subscriber.

pub mod function;
pub mod functions;
pub mod given;
pub mod ruleset;
pub mod runner;
pub mod walker;

pub use function::{
    optional_str_array_option, required_str_option, FunctionRegistry, RuleContext, RuleFunction,
};
pub use given::{Given, Target, HTTP_METHODS};
pub use ruleset::{RuleAction, RuleDefinition, RuleSeverity, Ruleset};
pub use runner::{LintReport, Linter, RuleFailure};
pub use walker::walk_document;
