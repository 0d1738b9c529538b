//! Expression AST nodes

use super::operator::Operator;
use crate::error::{CoreError, Result};
use crate::ir::ParameterDecl;
use crate::types::Value;
use serde::{Deserialize, Serialize};

/// Expression AST node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    /// Literal value
    Literal(Value),

    /// Reference to a variable by name
    VariableRef(String),

    /// Reference to a function by name
    FunctionRef(String),

    /// Call of a function-valued expression
    Call {
        target: Box<Expression>,
        args: Vec<Expression>,
    },

    /// Introduce new names, initialized in order
    Let(Vec<Binding>),

    /// Overwrite the value visible under an existing name
    Set { name: String, value: Box<Expression> },

    /// General loop: bind `inits`, then run `body` and `step` while
    /// `condition` holds
    For {
        inits: Vec<Binding>,
        condition: Box<Expression>,
        body: Vec<Expression>,
        step: Vec<Expression>,
    },

    /// Run `body` once per element of `sequence`, bound to `iterator`
    ForEach {
        iterator: String,
        sequence: Box<Expression>,
        body: Vec<Expression>,
    },

    /// Conditional
    If {
        condition: Box<Expression>,
        then_body: Vec<Expression>,
        else_body: Option<Vec<Expression>>,
    },

    /// Indexing into a container; `default` is used when the path misses
    ElementAccess {
        container: Box<Expression>,
        path: Vec<Expression>,
        default: Option<Box<Expression>>,
    },

    /// Anonymous function
    Lambda {
        params: Vec<ParameterDecl>,
        body: Vec<Expression>,
    },

    /// Free text, ignored by interpreters
    Comment(String),
}

/// A name with its initializing expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Binding {
    pub name: String,
    pub value: Expression,
}

impl Binding {
    pub fn new(name: impl Into<String>, value: Expression) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

impl Expression {
    /// Create a literal expression
    pub fn literal(value: impl Into<Value>) -> Self {
        Expression::Literal(value.into())
    }

    /// Create a variable reference
    pub fn variable(name: impl Into<String>) -> Self {
        Expression::VariableRef(name.into())
    }

    /// Create a function reference
    pub fn function(name: impl Into<String>) -> Self {
        Expression::FunctionRef(name.into())
    }

    /// Create a call expression
    pub fn call(target: Expression, args: Vec<Expression>) -> Self {
        Expression::Call {
            target: Box::new(target),
            args,
        }
    }

    /// Call a builtin operator
    pub fn call_op(op: Operator, args: Vec<Expression>) -> Self {
        Self::call(Self::function(op.function_name()), args)
    }

    /// Create a let expression with one or more bindings
    pub fn let_bindings(bindings: Vec<Binding>) -> Result<Self> {
        if bindings.is_empty() {
            return Err(CoreError::InvalidOperation(
                "Let requires at least one binding".to_string(),
            ));
        }
        Ok(Expression::Let(bindings))
    }

    /// Create a set expression
    pub fn set(name: impl Into<String>, value: Expression) -> Self {
        Expression::Set {
            name: name.into(),
            value: Box::new(value),
        }
    }

    /// Create a general for loop with one or more induction bindings
    pub fn for_loop(
        inits: Vec<Binding>,
        condition: Expression,
        body: Vec<Expression>,
        step: Vec<Expression>,
    ) -> Result<Self> {
        if inits.is_empty() {
            return Err(CoreError::InvalidOperation(
                "For requires at least one induction binding".to_string(),
            ));
        }
        Ok(Expression::For {
            inits,
            condition: Box::new(condition),
            body,
            step,
        })
    }

    /// Create a for-each loop
    pub fn for_each(
        iterator: impl Into<String>,
        sequence: Expression,
        body: Vec<Expression>,
    ) -> Self {
        Expression::ForEach {
            iterator: iterator.into(),
            sequence: Box::new(sequence),
            body,
        }
    }

    /// Create a conditional
    pub fn if_(
        condition: Expression,
        then_body: Vec<Expression>,
        else_body: Option<Vec<Expression>>,
    ) -> Self {
        Expression::If {
            condition: Box::new(condition),
            then_body,
            else_body,
        }
    }

    /// Create an element access
    pub fn element_access(
        container: Expression,
        path: Vec<Expression>,
        default: Option<Expression>,
    ) -> Result<Self> {
        if path.is_empty() {
            return Err(CoreError::InvalidOperation(
                "Element access requires a non-empty path".to_string(),
            ));
        }
        Ok(Expression::ElementAccess {
            container: Box::new(container),
            path,
            default: default.map(Box::new),
        })
    }

    /// Create a lambda
    pub fn lambda(params: Vec<ParameterDecl>, body: Vec<Expression>) -> Self {
        Expression::Lambda { params, body }
    }

    /// Create a comment
    pub fn comment(text: impl Into<String>) -> Self {
        Expression::Comment(text.into())
    }

    /// Name of the variant, stable across serialization formats
    pub fn variant_name(&self) -> &'static str {
        match self {
            Expression::Literal(_) => "Literal",
            Expression::VariableRef(_) => "VariableRef",
            Expression::FunctionRef(_) => "FunctionRef",
            Expression::Call { .. } => "Call",
            Expression::Let(_) => "Let",
            Expression::Set { .. } => "Set",
            Expression::For { .. } => "For",
            Expression::ForEach { .. } => "ForEach",
            Expression::If { .. } => "If",
            Expression::ElementAccess { .. } => "ElementAccess",
            Expression::Lambda { .. } => "Lambda",
            Expression::Comment(_) => "Comment",
        }
    }

    /// Names introduced by this expression at its own level
    ///
    /// `Let` introduces each of its bindings, `Set` re-binds its target.
    /// Nested bodies are not inspected.
    pub fn bound_names(&self) -> Vec<&str> {
        match self {
            Expression::Let(bindings) => bindings.iter().map(|b| b.name.as_str()).collect(),
            Expression::Set { name, .. } => vec![name.as_str()],
            _ => Vec::new(),
        }
    }
}
