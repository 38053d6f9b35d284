//! Nested Paths Example
//!
//! This example demonstrates dot-path traversal and array fan-out: a rule on
//! `items.sku` applies to every element of the `items` array, reporting one
//! error per failing element.
//!
//! Run with:
//! ```bash
//! cargo run -p simple-schema --example nested_paths
//! ```

use simple_schema::{validate, Rule, Schema, TypeTag, Value};

fn main() {
    let schema = Schema::new()
        .rule(
            "order.id",
            Rule::new()
                .required()
                .type_tag(TypeTag::Number)
                .error("E_ORDER_ID", "order id must be numeric"),
        )
        .rule(
            "order.items",
            Rule::new()
                .required()
                .type_tag(TypeTag::Array)
                .min(1)
                .error("E_ITEMS", "an order needs at least one item"),
        )
        .rule(
            "order.items.sku",
            Rule::new()
                .required()
                .type_tag(TypeTag::String)
                .error("E_SKU", "every item needs a string sku"),
        )
        .rule(
            "order.items.quantity",
            Rule::new()
                .required()
                .type_tag(TypeTag::Number)
                .min(1)
                .error("E_QUANTITY", "every item needs a positive quantity"),
        );

    let order = Value::object([(
        "order",
        Value::object([
            ("id", Value::from(981)),
            (
                "items",
                Value::list([
                    Value::object([
                        ("sku", Value::from("A-100")),
                        ("quantity", Value::from(2)),
                    ]),
                    // Missing sku
                    Value::object([("quantity", Value::from(1))]),
                    // Zero quantity
                    Value::object([
                        ("sku", Value::from("B-200")),
                        ("quantity", Value::from(0)),
                    ]),
                ]),
            ),
        ]),
    )]);

    let errors = validate(&order, Some(&schema)).expect("subject present");
    println!("{} error(s)", errors.len());
    for error in &errors {
        println!("  {}", error);
    }
}
