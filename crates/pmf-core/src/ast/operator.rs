//! Builtin operators callable from PMF expressions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Well-known builtin functions
///
/// Each operator is called through a `FunctionRef` carrying its canonical
/// name, so an interpreter only needs to recognize the names below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    // Comparison operators
    /// Less than (<)
    Less,
    /// Less than or equal (<=)
    LessOrEqual,
    /// Greater than (>)
    Greater,
    /// Greater than or equal (>=)
    GreaterOrEqual,
    /// Equal (==)
    Equal,
    /// Not equal (!=)
    NotEqual,

    // Arithmetic operators
    Add,
    Sub,
    Mul,
    Div,

    // Logical operators
    And,
    Or,
    Not,

    // Sequence operators
    /// Number of elements in a sequence
    Size,
    /// Append an element to a sequence
    Append,
    /// Integer range [start, end)
    Range,
}

const ALL: [Operator; 16] = [
    Operator::Less,
    Operator::LessOrEqual,
    Operator::Greater,
    Operator::GreaterOrEqual,
    Operator::Equal,
    Operator::NotEqual,
    Operator::Add,
    Operator::Sub,
    Operator::Mul,
    Operator::Div,
    Operator::And,
    Operator::Or,
    Operator::Not,
    Operator::Size,
    Operator::Append,
    Operator::Range,
];

impl Operator {
    /// Canonical function name
    pub fn function_name(&self) -> &'static str {
        match self {
            Operator::Less => "Less",
            Operator::LessOrEqual => "LessOrEqual",
            Operator::Greater => "Greater",
            Operator::GreaterOrEqual => "GreaterOrEqual",
            Operator::Equal => "Equal",
            Operator::NotEqual => "NotEqual",
            Operator::Add => "Add",
            Operator::Sub => "Sub",
            Operator::Mul => "Mul",
            Operator::Div => "Div",
            Operator::And => "And",
            Operator::Or => "Or",
            Operator::Not => "Not",
            Operator::Size => "Size",
            Operator::Append => "Append",
            Operator::Range => "Range",
        }
    }

    /// Look an operator up by its canonical function name
    pub fn from_function_name(name: &str) -> Option<Self> {
        ALL.iter().copied().find(|op| op.function_name() == name)
    }

    /// Number of arguments the operator expects
    pub fn arity(&self) -> usize {
        match self {
            Operator::Not | Operator::Size => 1,
            _ => 2,
        }
    }

    /// Returns true if this is a comparison operator
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            Operator::Less
                | Operator::LessOrEqual
                | Operator::Greater
                | Operator::GreaterOrEqual
                | Operator::Equal
                | Operator::NotEqual
        )
    }

    /// Returns true if this is an arithmetic operator
    pub fn is_arithmetic(&self) -> bool {
        matches!(
            self,
            Operator::Add | Operator::Sub | Operator::Mul | Operator::Div
        )
    }

    /// Returns true if this is a logical operator
    pub fn is_logical(&self) -> bool {
        matches!(self, Operator::And | Operator::Or | Operator::Not)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.function_name())
    }
}
