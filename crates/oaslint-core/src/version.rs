//! Specification version detection for API documents.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Which flavour of API description a document is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecVersion {
    /// Swagger / OpenAPI 2.x (`swagger: "2.0"`).
    Swagger2,
    /// OpenAPI 3.x (`openapi: "3.0.3"`, `"3.1.0"`, ...).
    OpenApi3,
    Unknown,
}

impl SpecVersion {
    /// Detect the version from the root of a document.
    pub fn detect(document: &Value) -> Self {
        if let Some(v) = document.get("openapi").and_then(Value::as_str) {
            if v.starts_with("3.") {
                return Self::OpenApi3;
            }
        }
        if let Some(v) = document.get("swagger").and_then(Value::as_str) {
            if v.starts_with("2.") {
                return Self::Swagger2;
            }
        }
        Self::Unknown
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Swagger2 => "swagger2",
            Self::OpenApi3 => "openapi3",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for SpecVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
