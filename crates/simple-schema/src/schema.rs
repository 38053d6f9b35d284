//! Schema and rule definitions
//!
//! A [`Schema`] maps property paths to [`Rule`]s. Paths use `.` to traverse
//! nested objects (`"billing.address.zip"`); when a path crosses an array,
//! the remainder applies to every element. Entry order is preserved and
//! determines error-reporting order.

use regex::Regex;

use crate::errors::ErrorCode;
use crate::predicates::{FnPredicate, Predicate, PredicateRef};
use crate::types::{TypeTag, Value};

// ============================================================================
// Error Descriptor
// ============================================================================

/// The `{code, message}` pair a rule author attaches to report on failure
///
/// Emitted verbatim on every error the rule produces. Rules without a
/// descriptor fall back to a generic code and a message naming the path.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorDescriptor {
    /// Opaque code, carried through unchanged
    pub code: ErrorCode,
    /// Human-readable message, carried through unchanged
    pub message: String,
}

impl ErrorDescriptor {
    /// Create a descriptor
    pub fn new(code: impl Into<ErrorCode>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

// ============================================================================
// Rule
// ============================================================================

/// Validation clauses attached to one schema path
///
/// All clauses are optional; an empty rule passes everything. Clauses are
/// evaluated in a fixed order (function, presence, type, min/max, regexp,
/// regexp_all) and the first failing clause reports the property.
#[derive(Debug, Clone, Default)]
pub struct Rule {
    /// Fail when the property is absent (default: absent passes)
    pub required: bool,
    /// Accepted type tags. `Some` with an empty set matches nothing and
    /// therefore always fails.
    pub types: Option<Vec<TypeTag>>,
    /// Lower magnitude bound (string/array length, or the number itself)
    pub min: Option<f64>,
    /// Upper magnitude bound
    pub max: Option<f64>,
    /// Patterns of which at least one must match the value's text form.
    /// `Some` with an empty set always fails.
    pub regexp: Option<Vec<Regex>>,
    /// Patterns which must all match the value's text form. `Some` with an
    /// empty set always passes.
    pub regexp_all: Option<Vec<Regex>>,
    /// Custom predicate, inline or named in the registry
    pub function: Option<PredicateRef>,
    /// Error descriptor emitted on failure
    pub error: Option<ErrorDescriptor>,
}

impl Rule {
    /// Create an empty rule (everything optional, no clauses)
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the property as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Accept a single type tag
    pub fn type_tag(mut self, tag: TypeTag) -> Self {
        self.types.get_or_insert_with(Vec::new).push(tag);
        self
    }

    /// Accept any of a set of type tags. Calling with an empty set still
    /// activates the clause, which then rejects every value.
    pub fn type_tags(mut self, tags: impl IntoIterator<Item = TypeTag>) -> Self {
        self.types.get_or_insert_with(Vec::new).extend(tags);
        self
    }

    /// Set the lower magnitude bound
    pub fn min(mut self, min: impl Into<f64>) -> Self {
        self.min = Some(min.into());
        self
    }

    /// Set the upper magnitude bound
    pub fn max(mut self, max: impl Into<f64>) -> Self {
        self.max = Some(max.into());
        self
    }

    /// Add a pattern to the any-match set
    pub fn regexp(mut self, pattern: Regex) -> Self {
        self.regexp.get_or_insert_with(Vec::new).push(pattern);
        self
    }

    /// Add patterns to the any-match set
    pub fn regexps(mut self, patterns: impl IntoIterator<Item = Regex>) -> Self {
        self.regexp.get_or_insert_with(Vec::new).extend(patterns);
        self
    }

    /// Add a pattern to the all-match set
    pub fn regexp_all(mut self, pattern: Regex) -> Self {
        self.regexp_all.get_or_insert_with(Vec::new).push(pattern);
        self
    }

    /// Add patterns to the all-match set
    pub fn regexps_all(mut self, patterns: impl IntoIterator<Item = Regex>) -> Self {
        self.regexp_all.get_or_insert_with(Vec::new).extend(patterns);
        self
    }

    /// Attach an inline predicate, invoked with the enclosing record and the
    /// property name
    pub fn function<F>(mut self, check_fn: F) -> Self
    where
        F: Fn(&Value, &str) -> bool + Send + Sync + 'static,
    {
        self.function = Some(PredicateRef::Inline(std::sync::Arc::new(FnPredicate::new(
            check_fn,
        ))));
        self
    }

    /// Attach a predicate object
    pub fn predicate(mut self, predicate: impl Predicate + 'static) -> Self {
        self.function = Some(PredicateRef::Inline(std::sync::Arc::new(predicate)));
        self
    }

    /// Reference a predicate by registry name. An unregistered name fails
    /// validation for the property; it is not a call error.
    pub fn function_name(mut self, name: impl Into<String>) -> Self {
        self.function = Some(PredicateRef::Named(name.into()));
        self
    }

    /// Attach the error descriptor emitted on failure
    pub fn error(mut self, code: impl Into<ErrorCode>, message: impl Into<String>) -> Self {
        self.error = Some(ErrorDescriptor::new(code, message));
        self
    }
}

// ============================================================================
// Schema
// ============================================================================

/// Insertion-ordered mapping from property paths to rules
#[derive(Debug, Clone, Default)]
pub struct Schema {
    entries: Vec<(String, Rule)>,
}

impl Schema {
    /// Create an empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule for a path
    pub fn rule(mut self, path: impl Into<String>, rule: Rule) -> Self {
        self.entries.push((path.into(), rule));
        self
    }

    /// Iterate entries in declaration order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Rule)> {
        self.entries.iter().map(|(path, rule)| (path.as_str(), rule))
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the schema has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Rule)> for Schema {
    fn from_iter<I: IntoIterator<Item = (String, Rule)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_defaults() {
        let rule = Rule::new();
        assert!(!rule.required);
        assert!(rule.types.is_none());
        assert!(rule.min.is_none());
        assert!(rule.max.is_none());
        assert!(rule.regexp.is_none());
        assert!(rule.regexp_all.is_none());
        assert!(rule.function.is_none());
        assert!(rule.error.is_none());
    }

    #[test]
    fn test_rule_builder() {
        let rule = Rule::new()
            .required()
            .type_tags([TypeTag::String, TypeTag::Date])
            .min(3)
            .max(10)
            .error(1, "one");

        assert!(rule.required);
        assert_eq!(
            rule.types.as_deref(),
            Some(&[TypeTag::String, TypeTag::Date][..])
        );
        assert_eq!(rule.min, Some(3.0));
        assert_eq!(rule.max, Some(10.0));
        assert_eq!(rule.error, Some(ErrorDescriptor::new(1, "one")));
    }

    #[test]
    fn test_empty_type_set_is_recorded() {
        // An empty tag set is not the same as "no type clause"
        let rule = Rule::new().type_tags([]);
        assert_eq!(rule.types.as_deref(), Some(&[][..]));
    }

    #[test]
    fn test_schema_preserves_order() {
        let schema = Schema::new()
            .rule("b", Rule::new())
            .rule("a", Rule::new())
            .rule("c.d", Rule::new());

        let paths: Vec<&str> = schema.entries().map(|(path, _)| path).collect();
        assert_eq!(paths, vec!["b", "a", "c.d"]);
        assert_eq!(schema.len(), 3);
        assert!(!schema.is_empty());
    }
}
