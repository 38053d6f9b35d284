//! Simple Schema
//!
//! Declarative validation of nested data records against a schema of
//! dot-path rules.
//!
//! A [`Schema`] maps property paths to [`Rule`]s; [`validate`] walks each
//! path through the subject [`Value`] and returns one [`ValidationError`]
//! per failing property (empty list = valid). Paths traverse nested objects
//! (`"billing.address.zip"`) and fan out over arrays: a path crossing an
//! array is checked against *every* element, producing one error per failing
//! element.
//!
//! # Rules
//!
//! Each rule composes optional clauses: `required`, accepted type tags,
//! `min`/`max` magnitude bounds, regexp sets and a custom predicate (inline
//! closure or a name registered in a predicate table). The first failing
//! clause reports the property with the rule's error descriptor.
//!
//! # Example
//!
//! ```rust
//! use simple_schema::{Rule, Schema, TypeTag, Value, validate};
//!
//! let schema = Schema::new()
//!     .rule(
//!         "name",
//!         Rule::new()
//!             .required()
//!             .type_tag(TypeTag::String)
//!             .min(1)
//!             .error(1, "name must be a non-empty string"),
//!     )
//!     .rule(
//!         "contacts.email",
//!         Rule::new()
//!             .required()
//!             .type_tag(TypeTag::String)
//!             .error(2, "every contact needs an email"),
//!     );
//!
//! let subject = Value::object([
//!     ("name", Value::from("Ada")),
//!     (
//!         "contacts",
//!         Value::list([
//!             Value::object([("email", Value::from("ada@example.com"))]),
//!             Value::object([("phone", Value::from("n/a"))]),
//!         ]),
//!     ),
//! ]);
//!
//! let errors = validate(&subject, Some(&schema)).unwrap();
//! assert_eq!(errors.len(), 1); // the second contact has no email
//! assert_eq!(errors[0].message, "every contact needs an email");
//! ```
//!
//! # Failure model
//!
//! Invalid data never raises: every property failure (including panicking or
//! unresolvable custom predicates) becomes an error record. The single
//! exception is [`NoData`], returned as `Err` when a schema is supplied but
//! the subject itself is null/undefined — that is a caller bug, not invalid
//! data.

pub mod errors;
pub mod predicates;
pub mod schema;
pub mod types;
pub mod validators;

mod path;

// Re-export commonly used types
pub use errors::{ErrorCode, NoData, ValidationError, ValidationResult};
pub use predicates::{
    register, register_fn, unregister, BoxedPredicate, FnPredicate, Predicate, PredicateRef,
    PredicateRegistry,
};
pub use schema::{ErrorDescriptor, Rule, Schema};
pub use types::{TypeTag, Value};
pub use validators::{validate, validate_with_registry};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
