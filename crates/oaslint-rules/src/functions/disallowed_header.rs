//! Header parameters that duplicate what the HTTP layer already carries.
//!
//! `Accept`, `Content-Type` and `Authorization` are described by
//! `produces`/`consumes`, media types and security schemes rather than as
//! parameters. Option `headerName` names the header to reject; the match is
//! case-insensitive.

use oaslint_core::{Diagnostic, RuleError};
use serde_json::Value;

use crate::function::{required_str_option, RuleContext, RuleFunction};

pub struct DisallowedHeader;

impl RuleFunction for DisallowedHeader {
    fn name(&self) -> &'static str {
        "disallowed-header"
    }

    fn check(
        &self,
        target: &Value,
        options: &Value,
        ctx: &RuleContext<'_>,
    ) -> Result<Vec<Diagnostic>, RuleError> {
        let header = required_str_option(options, "headerName", ctx)?;

        let is_header = target.get("in").and_then(Value::as_str) == Some("header");
        let name = target.get("name").and_then(Value::as_str);
        match name {
            Some(name) if is_header && name.eq_ignore_ascii_case(header) => Ok(vec![Diagnostic::new(
                format!("Header parameter '{name}' should not be defined explicitly"),
                ctx.path.child("name"),
            )]),
            _ => Ok(Vec::new()),
        }
    }
}
