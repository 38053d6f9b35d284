//! Custom predicate support for the `function` rule clause
//!
//! A predicate is invoked with the *enclosing record* and the *property name*
//! (not the resolved value), which makes cross-field checks possible:
//!
//! ```rust
//! use simple_schema::{Rule, Schema, Value, validate};
//!
//! let schema = Schema::new().rule(
//!     "b",
//!     Rule::new().function(|record, _prop| record.get("a").is_some()),
//! );
//! let subject = Value::object([("a", Value::from(1)), ("b", Value::from(2))]);
//! assert!(validate(&subject, Some(&schema)).unwrap().is_empty());
//! ```
//!
//! Rules may also name a predicate registered in a [`PredicateRegistry`]. The
//! engine only ever reads registries; registration and removal belong to the
//! host program.

use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, RwLock};

use once_cell::sync::Lazy;

use crate::types::Value;

// ============================================================================
// Predicate Trait
// ============================================================================

/// Trait for custom validation predicates
///
/// `record` is the object enclosing the validated property (after path
/// resolution) and `property` is the final path segment.
pub trait Predicate: Send + Sync {
    /// Return `true` if the property passes
    fn check(&self, record: &Value, property: &str) -> bool;
}

/// Type alias for a shared, dynamically dispatched predicate
pub type BoxedPredicate = Arc<dyn Predicate>;

/// Create a predicate from a function
pub struct FnPredicate<F>
where
    F: Fn(&Value, &str) -> bool + Send + Sync,
{
    check_fn: F,
}

impl<F> FnPredicate<F>
where
    F: Fn(&Value, &str) -> bool + Send + Sync,
{
    /// Wrap a closure as a predicate
    pub fn new(check_fn: F) -> Self {
        Self { check_fn }
    }
}

impl<F> Predicate for FnPredicate<F>
where
    F: Fn(&Value, &str) -> bool + Send + Sync,
{
    fn check(&self, record: &Value, property: &str) -> bool {
        (self.check_fn)(record, property)
    }
}

// ============================================================================
// Predicate Reference (inline vs named)
// ============================================================================

/// How a rule refers to its predicate: inline, or by registry name
#[derive(Clone)]
pub enum PredicateRef {
    /// Predicate supplied directly in the rule
    Inline(BoxedPredicate),
    /// Name to look up in the registry at validation time. A name with no
    /// registry entry is a validation failure, not an error.
    Named(String),
}

impl PredicateRef {
    /// Run the referenced predicate against a record/property pair.
    ///
    /// Failure modes collapse to `false`: an unknown name, and a predicate
    /// that panics (the panic is contained here so invalid data never turns
    /// into a crash).
    pub(crate) fn run(&self, record: &Value, property: &str, registry: &PredicateRegistry) -> bool {
        let predicate = match self {
            Self::Inline(p) => Arc::clone(p),
            Self::Named(name) => match registry.get(name) {
                Some(p) => p,
                None => return false,
            },
        };
        catch_unwind(AssertUnwindSafe(|| predicate.check(record, property))).unwrap_or(false)
    }
}

impl std::fmt::Debug for PredicateRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Inline(_) => f.write_str("Inline(..)"),
            Self::Named(name) => f.debug_tuple("Named").field(name).finish(),
        }
    }
}

// ============================================================================
// Predicate Registry
// ============================================================================

/// Named predicate lookup table
///
/// Pass one to [`validate_with_registry`](crate::validate_with_registry) to
/// resolve string-named `function` clauses without global state.
#[derive(Default, Clone)]
pub struct PredicateRegistry {
    entries: HashMap<String, BoxedPredicate>,
}

impl PredicateRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a predicate under a name, replacing any previous entry
    pub fn register(&mut self, name: impl Into<String>, predicate: impl Predicate + 'static) {
        self.entries.insert(name.into(), Arc::new(predicate));
    }

    /// Register a closure under a name
    pub fn register_fn<F>(&mut self, name: impl Into<String>, check_fn: F)
    where
        F: Fn(&Value, &str) -> bool + Send + Sync + 'static,
    {
        self.register(name, FnPredicate::new(check_fn));
    }

    /// Remove a named predicate
    pub fn unregister(&mut self, name: &str) {
        self.entries.remove(name);
    }

    /// Look up a predicate by name
    pub fn get(&self, name: &str) -> Option<BoxedPredicate> {
        self.entries.get(name).map(Arc::clone)
    }

    /// Whether a name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of registered predicates
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for PredicateRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PredicateRegistry")
            .field("names", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

// ============================================================================
// Process-wide Default Registry
// ============================================================================

static GLOBAL_REGISTRY: Lazy<RwLock<PredicateRegistry>> =
    Lazy::new(|| RwLock::new(PredicateRegistry::new()));

/// Register a predicate in the process-wide table used by
/// [`validate`](crate::validate)
pub fn register(name: impl Into<String>, predicate: impl Predicate + 'static) {
    match GLOBAL_REGISTRY.write() {
        Ok(mut guard) => guard.register(name, predicate),
        Err(poisoned) => poisoned.into_inner().register(name, predicate),
    }
}

/// Register a closure in the process-wide table
pub fn register_fn<F>(name: impl Into<String>, check_fn: F)
where
    F: Fn(&Value, &str) -> bool + Send + Sync + 'static,
{
    register(name, FnPredicate::new(check_fn));
}

/// Remove a predicate from the process-wide table
pub fn unregister(name: &str) {
    match GLOBAL_REGISTRY.write() {
        Ok(mut guard) => guard.unregister(name),
        Err(poisoned) => poisoned.into_inner().unregister(name),
    }
}

/// Snapshot of the process-wide table. Taken once per `validate` call so the
/// lock is not held while predicates run.
pub(crate) fn global_snapshot() -> PredicateRegistry {
    match GLOBAL_REGISTRY.read() {
        Ok(guard) => guard.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}
