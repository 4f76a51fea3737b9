//! Error types for JSON-LD encoding and decoding.
//!
//! Structural problems abort a decode and carry the JSON path of the
//! offending value (e.g. `$.itinerary[0].geo`). Semantic problems such as a
//! unit code that does not match the requested dimension, or an attribute the
//! record does not know, are not errors: they degrade to an absent field.

use thiserror::Error;

/// Stable error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// E001: `@type` differs from the expected tag, or is unknown
    TypeTagMismatch,
    /// E002: timestamp text has no valid body or offset designator
    MalformedTimestamp,
    /// E003: missing field, wrong JSON kind, non-object node
    MalformedDocument,
    /// E004: input is not JSON, or a number cannot be represented
    InvalidJson,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::TypeTagMismatch => "E001",
            ErrorCode::MalformedTimestamp => "E002",
            ErrorCode::MalformedDocument => "E003",
            ErrorCode::InvalidJson => "E004",
        }
    }
}

/// Error during JSON-LD decoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    // === E001: Type tag ===
    #[error("[E001] expected @type '{expected}' at {path}, but found '{found}'")]
    TypeTagMismatch {
        expected: String,
        found: String,
        path: String,
    },

    #[error("[E001] unknown @type '{found}' at {path}")]
    UnknownTypeTag { found: String, path: String },

    // === E002: Timestamps ===
    #[error("[E002] malformed timestamp {value:?} at {path}: {reason}")]
    MalformedTimestamp {
        value: String,
        reason: String,
        path: String,
    },

    // === E003: Document shape ===
    #[error("[E003] missing required field '{key}' at {path}")]
    MissingField { key: &'static str, path: String },

    #[error("[E003] expected {expected} at {path}, found {found}")]
    InvalidField {
        expected: &'static str,
        found: &'static str,
        path: String,
    },

    #[error("[E003] expected a JSON object at {path}, found {found}")]
    NotAnObject { found: &'static str, path: String },

    // === E004: JSON ===
    #[error("[E004] invalid JSON: {0}")]
    Json(String),
}

impl DecodeError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            DecodeError::TypeTagMismatch { .. } | DecodeError::UnknownTypeTag { .. } => {
                ErrorCode::TypeTagMismatch
            }
            DecodeError::MalformedTimestamp { .. } => ErrorCode::MalformedTimestamp,
            DecodeError::Json(_) => ErrorCode::InvalidJson,
            _ => ErrorCode::MalformedDocument,
        }
    }

    /// Returns the JSON path the error refers to, if any.
    pub fn path(&self) -> Option<&str> {
        match self {
            DecodeError::TypeTagMismatch { path, .. }
            | DecodeError::UnknownTypeTag { path, .. }
            | DecodeError::MalformedTimestamp { path, .. }
            | DecodeError::MissingField { path, .. }
            | DecodeError::InvalidField { path, .. }
            | DecodeError::NotAnObject { path, .. } => Some(path),
            DecodeError::Json(_) => None,
        }
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        DecodeError::Json(err.to_string())
    }
}

/// Error during JSON-LD encoding.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    #[error("[E004] {value} at {path} cannot be represented in JSON")]
    NonFiniteNumber { value: f64, path: String },

    #[error("[E004] JSON serialization failed: {0}")]
    Json(String),
}

impl EncodeError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        ErrorCode::InvalidJson
    }
}

impl From<serde_json::Error> for EncodeError {
    fn from(err: serde_json::Error) -> Self {
        EncodeError::Json(err.to_string())
    }
}

/// Returns a short name for the JSON kind of a value, for error messages.
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
