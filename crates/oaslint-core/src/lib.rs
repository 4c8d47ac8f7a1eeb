//! # oaslint-core — Foundational Types for oaslint
//!
//! Defines the data shapes every other oaslint crate speaks: where a node is
//! ([`JsonPath`]), what is wrong with it ([`Diagnostic`]), how bad it is once a
//! rule has been attributed ([`Severity`], [`LintResult`]), and what can go
//! wrong while configuring rules ([`RuleError`], [`ConfigError`]).
//!
//! ## Crate Policy
//!
//! - Depends on no other `oaslint-*` crate; the schema and rule crates build
//!   on it.
//! - A schema or document that violates a rule produces a [`Diagnostic`]
//!   value. [`RuleError`] is reserved for misconfigured rule entries and
//!   [`ConfigError`] for unreadable rulesets.
//! - Paths are built by appending ([`JsonPath::child`]) and are never
//!   mutated in place.

pub mod diagnostic;
pub mod error;
pub mod path;
pub mod version;

pub use diagnostic::{Diagnostic, LintResult, Severity};
pub use error::{ConfigError, OasLintError, RuleError};
pub use path::{JsonPath, PathSegment};
pub use version::SpecVersion;
