//! Basic usage example for pmf-core
//!
//! Run with: cargo run --example basic_usage

use pmf_core::ast::builder::{binary, counting_loop, if_else, increment, index, let_one};
use pmf_core::ast::{Expression, Operator};
use pmf_core::ir::{Dim, ElementKind, TypeDescriptor};
use pmf_core::Value;

fn main() {
    println!("=== PMF Core Basic Usage Example ===\n");

    // Example 1: Creating values
    println!("1. Creating Values:");
    let scalar = Value::Float(0.5);
    let array = Value::strings(["a", "b", "c"]);
    println!("   Scalar: {:?}", scalar);
    println!("   Array: {:?}\n", array);

    // Example 2: Type descriptors
    println!("2. Type Descriptors:");
    let tokens = TypeDescriptor::tensor(ElementKind::String, [Dim::Unbound]);
    let features = TypeDescriptor::tensor(ElementKind::Float, [Dim::Fixed(3)]);
    println!("   Tokens: {}", tokens);
    println!("   Features: {}\n", features);

    // Example 3: Summing a vector with a counting loop
    println!("3. Counting Loop:");
    let body = vec![
        let_one("total", Expression::literal(0.0f32)),
        counting_loop(
            "i",
            0,
            3,
            vec![Expression::set(
                "total",
                binary(
                    Operator::Add,
                    Expression::variable("total"),
                    Expression::ElementAccess {
                        container: Box::new(Expression::variable("features")),
                        path: vec![Expression::variable("i")],
                        default: None,
                    },
                ),
            )],
        ),
    ];
    println!("   {:#?}\n", body);

    // Example 4: Conditional on the first element
    println!("4. Conditional:");
    let cond = if_else(
        binary(
            Operator::Greater,
            index(Expression::variable("features"), 0),
            Expression::literal(0.0f32),
        ),
        vec![increment("positives", 1)],
        vec![Expression::comment("not positive")],
    );
    println!("   {:#?}", cond);
}
