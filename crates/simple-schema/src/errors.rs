//! Validation error types
//!
//! Two kinds of failure leave the engine: accumulated [`ValidationError`]
//! records describing invalid *data*, and the single fatal [`NoData`]
//! condition describing an invalid *call* (no subject at all).

use std::fmt;

use thiserror::Error;

use crate::types::Value;

/// Result of a validation run: the accumulated error records (empty = valid),
/// or [`NoData`] when the subject was missing entirely
pub type ValidationResult = Result<Vec<ValidationError>, NoData>;

// ============================================================================
// Error Code
// ============================================================================

/// Opaque scalar error code supplied by the schema author
///
/// Codes are carried verbatim into error records; the engine attaches no
/// meaning to them. Schema authors use whatever correlates best with their
/// own error handling — small integers, errno-style strings, even floats.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorCode {
    /// Integer code
    Int(i64),
    /// Float code
    Float(f64),
    /// String code
    Str(String),
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{}", i),
            Self::Float(x) => write!(f, "{}", x),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl From<i32> for ErrorCode {
    fn from(code: i32) -> Self {
        Self::Int(i64::from(code))
    }
}

impl From<i64> for ErrorCode {
    fn from(code: i64) -> Self {
        Self::Int(code)
    }
}

impl From<f64> for ErrorCode {
    fn from(code: f64) -> Self {
        Self::Float(code)
    }
}

impl From<&str> for ErrorCode {
    fn from(code: &str) -> Self {
        Self::Str(code.to_string())
    }
}

impl From<String> for ErrorCode {
    fn from(code: String) -> Self {
        Self::Str(code)
    }
}

// ============================================================================
// Single Validation Error
// ============================================================================

/// A single validation error
///
/// Carries the schema author's error descriptor plus the value that triggered
/// the failure (`None` when the property was absent). There is no
/// back-reference to the schema entry; callers correlate through their own
/// code/message design.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Code from the rule's error descriptor (or the fallback)
    pub code: ErrorCode,
    /// Message from the rule's error descriptor (or the fallback)
    pub message: String,
    /// Value that triggered the failure; `None` = property was absent
    pub value: Option<Value>,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new(
        code: impl Into<ErrorCode>,
        message: impl Into<String>,
        value: Option<Value>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            value,
        }
    }

    /// Export as a JSON object `{code, message, value?}`, with the value
    /// rendered through its text form
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> serde_json::Value {
        let mut object = serde_json::Map::new();
        let code = match &self.code {
            ErrorCode::Int(i) => serde_json::Value::from(*i),
            ErrorCode::Float(x) => serde_json::Value::from(*x),
            ErrorCode::Str(s) => serde_json::Value::from(s.as_str()),
        };
        object.insert("code".to_string(), code);
        object.insert(
            "message".to_string(),
            serde_json::Value::from(self.message.as_str()),
        );
        if let Some(value) = &self.value {
            object.insert(
                "value".to_string(),
                serde_json::Value::from(value.string_form().into_owned()),
            );
        }
        serde_json::Value::Object(object)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ErrorCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::Float(x) => serializer.serialize_f64(*x),
            Self::Str(s) => serializer.serialize_str(s),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ValidationError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("ValidationError", 3)?;
        state.serialize_field("code", &self.code)?;
        state.serialize_field("message", &self.message)?;
        state.serialize_field("value", &self.value.as_ref().map(|v| v.string_form()))?;
        state.end()
    }
}

// ============================================================================
// Fatal NoData Condition
// ============================================================================

/// The validation subject was missing entirely (null/undefined) while a
/// schema was supplied
///
/// This signals a caller bug, not invalid data, and is the only failure that
/// escapes as an error rather than an entry in the returned list.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("validation subject is missing")]
pub struct NoData;

impl NoData {
    /// Stable error code for this condition
    pub const CODE: &'static str = "ENODATA";

    /// Stable error code, e.g. for mapping into a host error space
    pub fn code(&self) -> &'static str {
        Self::CODE
    }
}
