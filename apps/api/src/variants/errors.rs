use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::variants::path::{PathConflict, PathError};

/// Which list of the variant a specification error points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecTarget {
    Rule,
    Override,
}

impl fmt::Display for SpecTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecTarget::Rule => f.write_str("rule"),
            SpecTarget::Override => f.write_str("override"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum SpecErrorKind {
    NotAnObject,
    MissingType,
    UnknownRuleType(String),
    MissingOperation,
    UnknownOperation(String),
    MissingPath,
    InvalidPath(String),
    InvalidValue(String),
    InvalidDateRange(String),
}

impl fmt::Display for SpecErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecErrorKind::NotAnObject => f.write_str("entry is not a JSON object"),
            SpecErrorKind::MissingType => f.write_str("missing 'type'"),
            SpecErrorKind::UnknownRuleType(t) => write!(f, "unknown rule type '{t}'"),
            SpecErrorKind::MissingOperation => f.write_str("missing 'operation'"),
            SpecErrorKind::UnknownOperation(op) => write!(f, "unknown operation '{op}'"),
            SpecErrorKind::MissingPath => f.write_str("missing 'path'"),
            SpecErrorKind::InvalidPath(msg) => write!(f, "invalid path: {msg}"),
            SpecErrorKind::InvalidValue(msg) => write!(f, "invalid value: {msg}"),
            SpecErrorKind::InvalidDateRange(msg) => write!(f, "invalid date range: {msg}"),
        }
    }
}

/// A malformed rule or override, identified by its position in the variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{target} #{index}: {kind}")]
pub struct SpecError {
    pub target: SpecTarget,
    pub index: usize,
    #[serde(flatten)]
    pub kind: SpecErrorKind,
}

/// Every specification error found in a variant. Never empty when returned as an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("variant specification has {} error(s)", .0.len())]
pub struct SpecErrors(pub Vec<SpecError>);

impl SpecErrors {
    pub fn iter(&self) -> impl Iterator<Item = &SpecError> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Failure of a single override application.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OverrideError {
    #[error(transparent)]
    InvalidPath(#[from] PathError),

    #[error(transparent)]
    PathConflict(#[from] PathConflict),

    #[error("override on '{path}' produced a document that no longer fits the resume shape: {reason}")]
    ShapeMismatch { path: String, reason: String },
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    InvalidSpec(#[from] SpecErrors),

    #[error("override #{index} ({operation} '{path}') failed: {source}")]
    Override {
        index: usize,
        operation: &'static str,
        path: String,
        #[source]
        source: OverrideError,
    },

    #[error("failed to encode document for overrides: {0}")]
    Encode(#[from] serde_json::Error),
}
