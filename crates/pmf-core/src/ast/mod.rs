//! Abstract Syntax Tree (AST) definitions for PMF
//!
//! This module contains:
//! - The expression language of exported programs
//! - Builtin operators
//! - Composite builders for common idioms

pub mod builder;
pub mod expression;
pub mod operator;

pub use expression::{Binding, Expression};
pub use operator::Operator;
