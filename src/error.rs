//! Error types for the blocks validator

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::node::NodeKind;
use crate::path::NodePath;

/// Result type for crate operations
pub type Result<T> = std::result::Result<T, BlocksError>;

/// Crate-level errors; a rejected document surfaces as `Validation`
#[derive(Error, Debug)]
pub enum BlocksError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] config_crate::ConfigError),

    #[error("Semver error: {0}")]
    Semver(#[from] semver::Error),

    #[error("Schema not found in registry: {0}")]
    UnknownSchema(String),

    #[error("Schema already defined in registry: {0}")]
    SchemaAlreadyDefined(String),

    #[error("Schema still pending in registry: {0}")]
    PendingSchema(String),
}

/// Category of a grammar violation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Document-level `version` or `blocks` absent or malformed
    Envelope,
    /// Discriminant outside the closed union at its level
    UnknownType,
    /// Required field missing, null where not allowed, or wrongly typed
    RequiredField,
    /// A `children` sequence that needs at least one element is empty
    Cardinality,
    /// String present but not matching its grammar (SemVer, URL)
    Format,
    /// Depth or node-count limit exceeded
    Limit,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Envelope => "envelope",
            Self::UnknownType => "unknown_type",
            Self::RequiredField => "required_field",
            Self::Cardinality => "cardinality",
            Self::Format => "format",
            Self::Limit => "limit",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single grammar violation.
///
/// Validation is fail-fast, so a rejected document yields exactly one of
/// these, pointing at the first offending node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    /// What kind of rule was violated
    pub kind: ErrorKind,
    /// Node kind being validated when the violation was found
    pub node: NodeKind,
    /// Field that failed, when the violation is field-specific
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'static str>,
    /// Location of the offending value inside the candidate
    pub path: NodePath,
    /// Human-readable description of the violated rule
    pub message: String,
}

impl ValidationError {
    pub fn new(kind: ErrorKind, node: NodeKind, path: NodePath, message: impl Into<String>) -> Self {
        Self {
            kind,
            node,
            field: None,
            path,
            message: message.into(),
        }
    }

    pub fn with_field(mut self, field: &'static str) -> Self {
        self.field = Some(field);
        self
    }

    /// Path rendered as `blocks[0].children[1].url`, or `(root)`
    pub fn path_string(&self) -> String {
        self.path.to_string()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}: {}", self.kind, self.path, self.message)
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::PathSegment;

    #[test]
    fn test_display_includes_path_and_kind() {
        let path = NodePath::from_segments(vec![
            PathSegment::Key("blocks"),
            PathSegment::Index(2),
            PathSegment::Key("level"),
        ]);
        let err = ValidationError::new(
            ErrorKind::RequiredField,
            NodeKind::Heading,
            path,
            "heading level must be an integer between 1 and 6",
        )
        .with_field("level");

        assert_eq!(
            err.to_string(),
            "required_field at blocks[2].level: heading level must be an integer between 1 and 6"
        );
    }

    #[test]
    fn test_serializes_for_api_bodies() {
        let err = ValidationError::new(
            ErrorKind::Envelope,
            NodeKind::Document,
            NodePath::root(),
            "missing version",
        )
        .with_field("version");

        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["kind"], "envelope");
        assert_eq!(json["node"], "document");
        assert_eq!(json["field"], "version");
        assert_eq!(json["path"], "(root)");
    }
}
