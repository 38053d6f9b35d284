//! Core value model for validation
//!
//! This module defines the runtime [`Value`] a schema is validated against and
//! the closed [`TypeTag`] classification used by the rule clauses.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;

use crate::predicates::{BoxedPredicate, FnPredicate};

// ============================================================================
// TypeTag - Closed structural classification
// ============================================================================

/// Canonical structural type tag of a [`Value`].
///
/// Every value maps to exactly one tag via [`Value::type_tag`]; both the type
/// clause and the min/max clause classify values through this enum, so there
/// is a single source of truth for "what kind of thing is this".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    /// UTF-8 string
    String,
    /// Integer or float
    Number,
    /// Boolean
    Boolean,
    /// Ordered list of values
    Array,
    /// Keyed record
    Object,
    /// Callable predicate carried as data
    Function,
    /// Compiled regular expression
    Regexp,
    /// Point in time (possibly invalid)
    Date,
    /// Explicit null
    Null,
    /// Explicit undefined marker
    Undefined,
}

impl TypeTag {
    /// Tag name as used in schemas and error messages
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Object => "object",
            Self::Function => "function",
            Self::Regexp => "regexp",
            Self::Date => "date",
            Self::Null => "null",
            Self::Undefined => "undefined",
        }
    }

    /// Parse a tag name (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "string" => Some(Self::String),
            "number" => Some(Self::Number),
            "boolean" => Some(Self::Boolean),
            "array" => Some(Self::Array),
            "object" => Some(Self::Object),
            "function" => Some(Self::Function),
            "regexp" => Some(Self::Regexp),
            "date" => Some(Self::Date),
            "null" => Some(Self::Null),
            "undefined" => Some(Self::Undefined),
            _ => None,
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Value - Runtime values to be validated
// ============================================================================

/// Runtime value that can be validated
///
/// Subjects are arbitrary nested structures built from these variants. The
/// engine never mutates a subject; validation borrows it.
#[derive(Clone)]
pub enum Value {
    /// Null value
    Null,
    /// Explicit undefined marker (a *present* property holding "no value",
    /// distinct from the property being absent)
    Undefined,
    /// Boolean value
    Bool(bool),
    /// Integer value (i64), tag `number`
    Int(i64),
    /// Float value (f64), tag `number`
    Float(f64),
    /// String value
    String(String),
    /// List of values, tag `array`
    List(Vec<Value>),
    /// Keyed record (insertion-ordered key-value pairs)
    Object(Vec<(String, Value)>),
    /// Callable carried as data
    Function(BoxedPredicate),
    /// Compiled regular expression carried as data
    Regexp(Regex),
    /// Point in time; `None` is an invalid date (e.g. parsed from garbage),
    /// which still has tag `date` but fails the type clause's validity check
    Date(Option<DateTime<Utc>>),
}

impl Value {
    /// Structural tag of this value
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Self::Null => TypeTag::Null,
            Self::Undefined => TypeTag::Undefined,
            Self::Bool(_) => TypeTag::Boolean,
            Self::Int(_) | Self::Float(_) => TypeTag::Number,
            Self::String(_) => TypeTag::String,
            Self::List(_) => TypeTag::Array,
            Self::Object(_) => TypeTag::Object,
            Self::Function(_) => TypeTag::Function,
            Self::Regexp(_) => TypeTag::Regexp,
            Self::Date(_) => TypeTag::Date,
        }
    }

    /// Human-readable type name for error messages
    pub fn type_name(&self) -> &'static str {
        self.type_tag().as_str()
    }

    /// Check if value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Check if value is the explicit undefined marker
    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    /// Look up an own property. Only objects have own properties; every other
    /// variant (including lists, which are indexed, not keyed) yields `None`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Self::Object(pairs) => pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Build an object from key-value pairs, preserving order
    pub fn object<K>(pairs: impl IntoIterator<Item = (K, Value)>) -> Self
    where
        K: Into<String>,
    {
        Self::Object(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Build a list
    pub fn list(items: impl IntoIterator<Item = Value>) -> Self {
        Self::List(items.into_iter().collect())
    }

    /// Build a function value from a closure taking the enclosing record and
    /// the property name
    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&Value, &str) -> bool + Send + Sync + 'static,
    {
        Self::Function(Arc::new(FnPredicate::new(f)))
    }

    /// Build a valid date value
    pub fn date(datetime: DateTime<Utc>) -> Self {
        Self::Date(Some(datetime))
    }

    /// Build an invalid date value (tag `date`, fails the validity check)
    pub fn invalid_date() -> Self {
        Self::Date(None)
    }

    /// Parse a date from text. Accepts RFC 3339 timestamps and plain
    /// `YYYY-MM-DD` dates; anything else yields an *invalid* date value, not
    /// an error.
    pub fn parse_date(input: &str) -> Self {
        if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
            return Self::Date(Some(dt.with_timezone(&Utc)));
        }
        if let Ok(d) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
            if let Some(dt) = d.and_hms_opt(0, 0, 0) {
                return Self::Date(Some(dt.and_utc()));
            }
        }
        Self::Date(None)
    }

    /// Text form of the value, as seen by the regexp clauses. Scalars render
    /// their natural form; lists join their elements with `,`; the remaining
    /// variants render a fixed placeholder.
    pub fn string_form(&self) -> Cow<'_, str> {
        match self {
            Self::Null => Cow::Borrowed("null"),
            Self::Undefined => Cow::Borrowed("undefined"),
            Self::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
            Self::Int(i) => Cow::Owned(i.to_string()),
            Self::Float(f) => Cow::Owned(f.to_string()),
            Self::String(s) => Cow::Borrowed(s),
            Self::List(items) => Cow::Owned(
                items
                    .iter()
                    .map(|v| v.string_form().into_owned())
                    .collect::<Vec<_>>()
                    .join(","),
            ),
            Self::Object(_) => Cow::Borrowed("[object]"),
            Self::Function(_) => Cow::Borrowed("[function]"),
            Self::Regexp(re) => Cow::Borrowed(re.as_str()),
            Self::Date(Some(dt)) => Cow::Owned(dt.to_rfc3339()),
            Self::Date(None) => Cow::Borrowed("invalid date"),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Undefined => f.write_str("Undefined"),
            Self::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Self::Int(i) => f.debug_tuple("Int").field(i).finish(),
            Self::Float(x) => f.debug_tuple("Float").field(x).finish(),
            Self::String(s) => f.debug_tuple("String").field(s).finish(),
            Self::List(items) => f.debug_tuple("List").field(items).finish(),
            Self::Object(pairs) => f.debug_tuple("Object").field(pairs).finish(),
            Self::Function(_) => f.write_str("Function(..)"),
            Self::Regexp(re) => f.debug_tuple("Regexp").field(&re.as_str()).finish(),
            Self::Date(dt) => f.debug_tuple("Date").field(dt).finish(),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Undefined, Self::Undefined) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => a == b,
            // Functions compare by identity; there is no structural equality
            // for callables
            (Self::Function(a), Self::Function(b)) => Arc::ptr_eq(a, b),
            (Self::Regexp(a), Self::Regexp(b)) => a.as_str() == b.as_str(),
            (Self::Date(a), Self::Date(b)) => a == b,
            _ => false,
        }
    }
}

// ============================================================================
// Conversions
// ============================================================================

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::List(items)
    }
}

impl From<Regex> for Value {
    fn from(re: Regex) -> Self {
        Self::Regexp(re)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::Date(Some(dt))
    }
}

#[cfg(feature = "serde")]
impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(Into::into).collect())
            }
            serde_json::Value::Object(map) => {
                Self::Object(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}
