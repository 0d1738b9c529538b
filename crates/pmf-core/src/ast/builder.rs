//! Composite expression idioms
//!
//! Stateless helpers that assemble common patterns from the primitive
//! constructors on [`Expression`].

use super::expression::{Binding, Expression};
use super::operator::Operator;
use crate::types::Value;

/// `Let(name = value)`
pub fn let_one(name: impl Into<String>, value: Expression) -> Expression {
    Expression::Let(vec![Binding::new(name, value)])
}

/// `Set(name, ref(name) + by)`
pub fn increment(name: &str, by: i64) -> Expression {
    Expression::set(
        name,
        Expression::call_op(
            Operator::Add,
            vec![Expression::variable(name), Expression::literal(by)],
        ),
    )
}

/// Bounded counting loop: `i` runs from `start` while `i < end`, advancing
/// by `step` after each iteration
pub fn simple_for(
    induction: &str,
    start: i64,
    end: i64,
    step: i64,
    body: Vec<Expression>,
) -> Expression {
    Expression::For {
        inits: vec![Binding::new(induction, Expression::literal(start))],
        condition: Box::new(Expression::call_op(
            Operator::Less,
            vec![Expression::variable(induction), Expression::literal(end)],
        )),
        body,
        step: vec![increment(induction, step)],
    }
}

/// `simple_for` with step 1
pub fn counting_loop(induction: &str, start: i64, end: i64, body: Vec<Expression>) -> Expression {
    simple_for(induction, start, end, 1, body)
}

/// Map-style iteration over a sequence
pub fn map_over(iterator: &str, sequence: Expression, body: Vec<Expression>) -> Expression {
    Expression::for_each(iterator, sequence, body)
}

/// `If(condition) { then_body }`
pub fn if_then(condition: Expression, then_body: Vec<Expression>) -> Expression {
    Expression::if_(condition, then_body, None)
}

/// `If(condition) { then_body } else { else_body }`
pub fn if_else(
    condition: Expression,
    then_body: Vec<Expression>,
    else_body: Vec<Expression>,
) -> Expression {
    Expression::if_(condition, then_body, Some(else_body))
}

/// `container[i]`
pub fn index(container: Expression, i: i64) -> Expression {
    Expression::ElementAccess {
        container: Box::new(container),
        path: vec![Expression::Literal(Value::Int64(i))],
        default: None,
    }
}

/// `Call(op, [lhs, rhs])`
pub fn binary(op: Operator, lhs: Expression, rhs: Expression) -> Expression {
    Expression::call_op(op, vec![lhs, rhs])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_for_shape() {
        let body = vec![Expression::comment("work")];
        let expr = simple_for("i", 0, 10, 1, body.clone());

        match expr {
            Expression::For {
                inits,
                condition,
                body: loop_body,
                step,
            } => {
                assert_eq!(inits.len(), 1);
                assert_eq!(inits[0].name, "i");
                assert_eq!(inits[0].value, Expression::literal(0i64));
                assert_eq!(
                    *condition,
                    binary(Operator::Less, Expression::variable("i"), Expression::literal(10i64))
                );
                assert_eq!(loop_body, body);
                assert_eq!(step, vec![increment("i", 1)]);
            }
            _ => panic!("Expected For expression"),
        }
    }

    #[test]
    fn test_counting_loop_steps_by_one() {
        assert_eq!(
            counting_loop("k", 2, 5, vec![]),
            simple_for("k", 2, 5, 1, vec![])
        );
    }

    #[test]
    fn test_increment() {
        match increment("n", 3) {
            Expression::Set { name, value } => {
                assert_eq!(name, "n");
                assert_eq!(
                    *value,
                    Expression::call_op(
                        Operator::Add,
                        vec![Expression::variable("n"), Expression::literal(3i64)]
                    )
                );
            }
            _ => panic!("Expected Set expression"),
        }
    }

    #[test]
    fn test_if_helpers() {
        let cond = Expression::variable("c");
        assert!(matches!(
            if_then(cond.clone(), vec![]),
            Expression::If { else_body: None, .. }
        ));
        assert!(matches!(
            if_else(cond, vec![], vec![Expression::comment("else")]),
            Expression::If { else_body: Some(_), .. }
        ));
    }

    #[test]
    fn test_index() {
        match index(Expression::variable("v"), 2) {
            Expression::ElementAccess { path, default, .. } => {
                assert_eq!(path, vec![Expression::literal(2i64)]);
                assert!(default.is_none());
            }
            _ => panic!("Expected ElementAccess expression"),
        }
    }

    #[test]
    fn test_let_one() {
        let expr = let_one("x", Expression::literal(1.5f32));
        assert_eq!(expr.bound_names(), vec!["x"]);
    }

    #[test]
    fn test_map_over() {
        let expr = map_over("tok", Expression::variable("tokens"), vec![]);
        assert_eq!(expr.variant_name(), "ForEach");
    }
}
