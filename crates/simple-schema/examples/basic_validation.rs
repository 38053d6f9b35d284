//! Basic Validation Example
//!
//! This example demonstrates schema-driven validation of a flat record.
//!
//! Run with:
//! ```bash
//! cargo run -p simple-schema --example basic_validation
//! ```

use regex::Regex;
use simple_schema::{validate, Rule, Schema, TypeTag, Value};

fn main() {
    let schema = Schema::new()
        .rule(
            "username",
            Rule::new()
                .required()
                .type_tag(TypeTag::String)
                .min(3)
                .max(32)
                .error("E_USERNAME", "username must be a string of 3-32 characters"),
        )
        .rule(
            "email",
            Rule::new()
                .required()
                .type_tag(TypeTag::String)
                .regexp(Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid pattern"))
                .error("E_EMAIL", "email address is malformed"),
        )
        .rule(
            "age",
            Rule::new()
                .type_tag(TypeTag::Number)
                .min(13)
                .error("E_AGE", "age must be a number of at least 13"),
        );

    // A record that satisfies every rule
    let good = Value::object([
        ("username", Value::from("ada")),
        ("email", Value::from("ada@example.com")),
        ("age", Value::from(36)),
    ]);
    report("good record", &validate(&good, Some(&schema)).expect("subject present"));

    // Too-short username, broken email, age below the bound
    let bad = Value::object([
        ("username", Value::from("al")),
        ("email", Value::from("not-an-email")),
        ("age", Value::from(9)),
    ]);
    report("bad record", &validate(&bad, Some(&schema)).expect("subject present"));

    // `age` is optional: leaving it out is fine
    let partial = Value::object([
        ("username", Value::from("grace")),
        ("email", Value::from("grace@example.com")),
    ]);
    report("partial record", &validate(&partial, Some(&schema)).expect("subject present"));
}

fn report(label: &str, errors: &[simple_schema::ValidationError]) {
    if errors.is_empty() {
        println!("{}: valid", label);
    } else {
        println!("{}: {} error(s)", label, errors.len());
        for error in errors {
            println!("  {}", error);
        }
    }
    println!();
}
