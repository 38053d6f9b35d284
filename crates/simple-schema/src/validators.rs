//! Core validation engine
//!
//! This module implements clause evaluation for a single resolved property
//! and the schema driver that ties path resolution, evaluation and error
//! aggregation together.

use tracing::{debug, trace};

use crate::errors::{ErrorCode, NoData, ValidationError, ValidationResult};
use crate::path::{self, Leaf};
use crate::predicates::{self, PredicateRegistry};
use crate::schema::{Rule, Schema};
use crate::types::Value;

/// Code used when a rule declares no error descriptor
const FALLBACK_CODE: &str = "EINVALID";

// ============================================================================
// Public API
// ============================================================================

/// Validate a subject against a schema.
///
/// Returns the accumulated error records in schema declaration order; an
/// empty list means the subject is valid. String-named `function` clauses are
/// resolved against the process-wide predicate table
/// (see [`predicates::register`]).
///
/// # Errors
///
/// Returns [`NoData`] when a schema is supplied but the subject is
/// null/undefined. Invalid *data* never produces an `Err`.
///
/// # Example
///
/// ```
/// use simple_schema::{Rule, Schema, TypeTag, Value, validate};
///
/// let schema = Schema::new()
///     .rule("name", Rule::new().required().type_tag(TypeTag::String))
///     .rule("age", Rule::new().type_tag(TypeTag::Number).min(0));
///
/// let subject = Value::object([("name", Value::from("Ada")), ("age", Value::from(36))]);
/// let errors = validate(&subject, Some(&schema)).unwrap();
/// assert!(errors.is_empty());
/// ```
pub fn validate(subject: &Value, schema: Option<&Schema>) -> ValidationResult {
    let registry = predicates::global_snapshot();
    validate_with_registry(subject, schema, &registry)
}

/// Validate a subject against a schema, resolving string-named predicates
/// through a caller-supplied registry instead of the process-wide table.
pub fn validate_with_registry(
    subject: &Value,
    schema: Option<&Schema>,
    registry: &PredicateRegistry,
) -> ValidationResult {
    // No schema, nothing to check. This holds even for a missing subject.
    let Some(schema) = schema else {
        return Ok(Vec::new());
    };

    if subject.is_null() || subject.is_undefined() {
        debug!("validation aborted: subject is {}", subject.type_name());
        return Err(NoData);
    }

    let mut errors = Vec::new();

    for (path, rule) in schema.entries() {
        let segments = path::split_path(path);
        let leaves = path::resolve(&segments, subject);
        trace!("resolved '{}' to {} leaf value(s)", path, leaves.len());

        for leaf in leaves {
            if let Verdict::Fail(value) = evaluate_rule(rule, &leaf, registry) {
                errors.push(descriptor_error(rule, path, value));
            }
        }
    }

    debug!("validation produced {} error(s)", errors.len());
    Ok(errors)
}

// ============================================================================
// Rule Evaluation
// ============================================================================

/// Outcome of evaluating one rule against one leaf. `Fail` carries the value
/// that triggered the failure (`None` = absent) for diagnostics.
enum Verdict {
    Pass,
    Fail(Option<Value>),
}

/// Evaluate every clause of a rule against one resolved leaf, in order:
/// function, presence, type, min/max, regexp, regexp_all. The first failing
/// clause short-circuits the rest.
fn evaluate_rule(rule: &Rule, leaf: &Leaf<'_>, registry: &PredicateRegistry) -> Verdict {
    let fail = || Verdict::Fail(leaf.value.cloned());

    // Function clause runs first, even for absent values: the predicate sees
    // the enclosing record and may implement cross-field logic that decides
    // whether this property should exist at all.
    if let Some(function) = &rule.function {
        if !function.run(leaf.record, leaf.property, registry) {
            return fail();
        }
    }

    // Presence clause
    let value = match leaf.value {
        Some(value) => value,
        None => {
            return if rule.required { fail() } else { Verdict::Pass };
        }
    };
    // A property explicitly holding the undefined marker is present (so
    // `required` is satisfied) but optional rules treat it as absent.
    if value.is_undefined() && !rule.required {
        return Verdict::Pass;
    }

    // Type clause
    if let Some(tags) = &rule.types {
        if !tags.contains(&value.type_tag()) {
            return fail();
        }
        // A date that matched through the `date` tag must also denote a real
        // point in time.
        if matches!(value, Value::Date(None)) {
            return fail();
        }
    }

    // Min/max clause: only values with a well-defined magnitude qualify
    if rule.min.is_some() || rule.max.is_some() {
        let magnitude = match value {
            Value::String(s) => s.chars().count() as f64,
            Value::List(items) => items.len() as f64,
            Value::Int(i) => *i as f64,
            Value::Float(f) => *f,
            _ => return fail(),
        };
        if let Some(min) = rule.min {
            if magnitude < min {
                return fail();
            }
        }
        if let Some(max) = rule.max {
            if magnitude > max {
                return fail();
            }
        }
    }

    // Regexp clause: at least one pattern must match
    if let Some(patterns) = &rule.regexp {
        let text = value.string_form();
        if !patterns.iter().any(|re| re.is_match(&text)) {
            return fail();
        }
    }

    // Regexp-all clause: every pattern must match
    if let Some(patterns) = &rule.regexp_all {
        let text = value.string_form();
        if !patterns.iter().all(|re| re.is_match(&text)) {
            return fail();
        }
    }

    Verdict::Pass
}

/// Build the error record for a failing leaf from the rule's descriptor, or
/// from the generic fallback when the rule declares none
fn descriptor_error(rule: &Rule, path: &str, value: Option<Value>) -> ValidationError {
    match &rule.error {
        Some(descriptor) => {
            ValidationError::new(descriptor.code.clone(), descriptor.message.clone(), value)
        }
        None => ValidationError::new(
            ErrorCode::Str(FALLBACK_CODE.to_string()),
            format!("property '{}' failed validation", path),
            value,
        ),
    }
}
