//! Custom Predicates Example
//!
//! This example demonstrates the `function` clause: inline closures with
//! cross-field logic, and predicates registered by name in a caller-supplied
//! registry.
//!
//! Run with:
//! ```bash
//! cargo run -p simple-schema --example custom_predicates
//! ```

use simple_schema::{
    validate, validate_with_registry, PredicateRegistry, Rule, Schema, TypeTag, Value,
};

fn main() {
    // Inline predicate: `end` must not precede `start`. Predicates receive
    // the enclosing record, so they can read sibling fields.
    let ordered = |record: &Value, _prop: &str| {
        match (record.get("start"), record.get("end")) {
            (Some(Value::Int(start)), Some(Value::Int(end))) => start <= end,
            _ => false,
        }
    };

    let schema = Schema::new().rule(
        "end",
        Rule::new()
            .required()
            .type_tag(TypeTag::Number)
            .function(ordered)
            .error("E_RANGE", "end must not precede start"),
    );

    let valid = Value::object([("start", Value::from(3)), ("end", Value::from(7))]);
    let inverted = Value::object([("start", Value::from(7)), ("end", Value::from(3))]);

    println!(
        "ordered range:  {} error(s)",
        validate(&valid, Some(&schema)).expect("subject present").len()
    );
    println!(
        "inverted range: {} error(s)",
        validate(&inverted, Some(&schema)).expect("subject present").len()
    );

    // Named predicate resolved through a caller-supplied registry
    let mut registry = PredicateRegistry::new();
    registry.register_fn("nonempty", |record: &Value, prop: &str| {
        matches!(record.get(prop), Some(Value::String(s)) if !s.is_empty())
    });

    let schema = Schema::new().rule(
        "comment",
        Rule::new()
            .required()
            .function_name("nonempty")
            .error("E_COMMENT", "comment must be a non-empty string"),
    );

    let subject = Value::object([("comment", Value::from(""))]);
    let errors =
        validate_with_registry(&subject, Some(&schema), &registry).expect("subject present");
    println!("empty comment:  {} error(s)", errors.len());
    for error in &errors {
        println!("  {}", error);
    }
}
