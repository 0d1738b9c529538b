//! Graph context
//!
//! The stateful accumulator of one export run. Every exportable pipeline
//! stage receives the same context, in source-to-terminal order, and appends
//! its contribution through the methods below. All operations are
//! append-only: names are never released, bindings are only overwritten, and
//! the body only grows.

use crate::assembler::ModelAssembler;
use crate::error::{CompileError, Result};
use crate::naming::{NameAllocator, NamePool};
use crate::translate::TypeTranslator;
use indexmap::IndexMap;
use pmf_core::ast::builder::let_one;
use pmf_core::ast::Expression;
use pmf_core::ir::{FunctionDef, FunctionalModel, Model, ParameterDecl, Signature, TypeDescriptor};
use pmf_core::types::{ColumnType, Value};
use std::collections::HashMap;

const CONST_PREFIX: &str = "const";
const ACCESS_PREFIX: &str = "elem";

/// Graph construction context for a single export run
#[derive(Debug, Default)]
pub struct GraphContext {
    /// Variable names plus the column -> variable binding map
    variables: NameAllocator,
    /// Operator and function names
    operators: NamePool,
    inputs: Vec<ParameterDecl>,
    outputs: Vec<ParameterDecl>,
    body: Vec<Expression>,
    functions: Vec<FunctionDef>,
    types: IndexMap<String, TypeDescriptor>,
    /// Cached VariableRef per declared name
    refs: HashMap<String, Expression>,
    /// Defining literal per name introduced through `declare`
    defs: HashMap<String, Expression>,
}

impl GraphContext {
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Names ==========

    /// Allocate a variable name from `prefix` and cache a reference to it
    pub fn declare_ref(&mut self, prefix: &str) -> Result<String> {
        let name = self.variables.fresh(prefix)?;
        self.cache_ref(&name);
        Ok(name)
    }

    /// Allocate a unique operator name from `prefix`
    pub fn operator_name(&mut self, prefix: &str) -> Result<String> {
        self.operators.allocate(prefix)
    }

    /// Cached reference expression for a declared name
    pub fn reference(&self, name: &str) -> Option<&Expression> {
        self.refs.get(name)
    }

    /// Defining literal of a name introduced through [`GraphContext::declare`]
    pub fn definition(&self, name: &str) -> Option<&Expression> {
        self.defs.get(name)
    }

    // ========== Column bindings ==========

    /// Whether `column` is bound to an IR variable
    pub fn contains_column(&self, column: &str) -> bool {
        self.variables.is_bound(column)
    }

    /// The IR variable currently bound to `column`
    pub fn variable_name(&self, column: &str) -> Result<String> {
        self.variables
            .lookup(column)
            .map(str::to_string)
            .ok_or_else(|| CompileError::UndefinedColumn(column.to_string()))
    }

    /// The IR variable bound to `column`, allocating a fresh one when the
    /// column was never bound
    pub fn lookup_or_allocate(&mut self, column: &str) -> Result<String> {
        check_column(column)?;
        let name = self.variables.lookup_or_allocate(column)?;
        self.cache_ref(&name);
        Ok(name)
    }

    /// Bind `column` to an existing variable; later lookups see `name`
    pub fn bind_column(&mut self, column: &str, name: &str) -> Result<()> {
        check_column(column)?;
        self.variables.bind(column, name)
    }

    /// Allocate a variable for a column produced by a stage
    ///
    /// Rebinds `column` to the new variable and records its type.
    pub fn add_intermediate_variable(&mut self, ty: &ColumnType, column: &str) -> Result<String> {
        check_column(column)?;
        let translated = TypeTranslator::translate(ty)?;
        let name = self.variables.allocate(column)?;
        self.types.insert(name.clone(), translated);
        self.cache_ref(&name);
        Ok(name)
    }

    // ========== Signature ==========

    /// Register a model input for `column` and bind the column to it
    pub fn add_model_input(&mut self, ty: &ColumnType, column: &str) -> Result<String> {
        check_column(column)?;
        let translated = TypeTranslator::translate(ty)?;
        let name = self.variables.allocate(column)?;

        tracing::debug!(column, variable = %name, ty = %translated, "model input");

        self.types.insert(name.clone(), translated.clone());
        self.inputs.push(ParameterDecl::new(name.clone(), translated));
        self.cache_ref(&name);
        Ok(name)
    }

    /// Register a model output for `column`
    ///
    /// The output always gets a fresh name and is materialized by copying
    /// the variable currently bound to the column, so the output identity
    /// does not depend on how often the column was rebound upstream.
    pub fn add_model_output(&mut self, ty: &ColumnType, column: &str) -> Result<String> {
        check_column(column)?;
        let source = self.variable_name(column)?;
        let translated = TypeTranslator::translate(ty)?;
        let name = self.variables.fresh(column)?;

        tracing::debug!(column, source = %source, variable = %name, ty = %translated, "model output");

        self.types.insert(name.clone(), translated.clone());
        self.outputs.push(ParameterDecl::new(name.clone(), translated));
        self.body
            .push(Expression::set(name.clone(), Expression::variable(source)));
        self.cache_ref(&name);
        Ok(name)
    }

    /// Whether `name` is a registered model output
    pub fn is_output(&self, name: &str) -> bool {
        self.outputs.iter().any(|p| p.name == name)
    }

    // ========== Body ==========

    /// Declare a literal under `name`, or under a fresh name when `None`
    ///
    /// Emits `Let` for new names and `Set` when `name` is a model output.
    pub fn declare(&mut self, value: impl Into<Value>, name: Option<&str>) -> Result<String> {
        let value = value.into();
        let name = self.claim_name(name, CONST_PREFIX)?;
        let literal = Expression::Literal(value);

        let statement = if self.is_output(&name) {
            Expression::set(name.clone(), literal.clone())
        } else {
            let_one(name.clone(), literal.clone())
        };

        self.body.push(statement);
        self.defs.insert(name.clone(), literal);
        self.cache_ref(&name);
        Ok(name)
    }

    /// Append an expression to the body
    pub fn add_expression(&mut self, expr: Expression) {
        self.body.push(expr);
    }

    /// Append expressions to the body, in order
    pub fn add_expressions(&mut self, exprs: impl IntoIterator<Item = Expression>) {
        self.body.extend(exprs);
    }

    /// Bind `container[path]` (or `default` when the path misses) to a name
    pub fn access(
        &mut self,
        container: Expression,
        path: Vec<Expression>,
        default: Option<Expression>,
        name: Option<&str>,
    ) -> Result<String> {
        let access = Expression::element_access(container, path, default)?;
        let name = self.claim_name(name, ACCESS_PREFIX)?;
        self.body.push(let_one(name.clone(), access));
        self.cache_ref(&name);
        Ok(name)
    }

    // ========== Functions ==========

    /// Add a function to the function table
    pub fn add_function(&mut self, function: FunctionDef) -> Result<()> {
        if function.name.is_empty() {
            return Err(CompileError::InvalidArgument(
                "function name must not be empty".to_string(),
            ));
        }
        if self.functions.iter().any(|f| f.name == function.name)
            || !self.operators.reserve(&function.name)
        {
            return Err(CompileError::DuplicateFunction(function.name));
        }
        self.functions.push(function);
        Ok(())
    }

    // ========== Accessors ==========

    pub fn inputs(&self) -> &[ParameterDecl] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[ParameterDecl] {
        &self.outputs
    }

    pub fn body(&self) -> &[Expression] {
        &self.body
    }

    pub fn functions(&self) -> &[FunctionDef] {
        &self.functions
    }

    pub fn variable_types(&self) -> &IndexMap<String, TypeDescriptor> {
        &self.types
    }

    // ========== Finalization ==========

    /// Finalize into a model with default envelope metadata
    pub fn make_model(self) -> Model {
        ModelAssembler::default().assemble(self)
    }

    /// Finalize into a functional model named `name`
    pub fn into_functional_model(self, name: impl Into<String>) -> FunctionalModel {
        FunctionalModel {
            name: name.into(),
            signature: Signature {
                inputs: self.inputs,
                outputs: self.outputs,
            },
            body: self.body,
            functions: self.functions,
            types: self.types,
        }
    }

    fn claim_name(&mut self, name: Option<&str>, prefix: &str) -> Result<String> {
        match name {
            None => self.variables.fresh(prefix),
            Some("") => Err(CompileError::InvalidArgument(
                "variable name must not be empty".to_string(),
            )),
            Some(name) => {
                if !self.variables.reserve(name) {
                    tracing::debug!(variable = name, "redeclaring an existing variable");
                }
                Ok(name.to_string())
            }
        }
    }

    fn cache_ref(&mut self, name: &str) {
        self.refs
            .entry(name.to_string())
            .or_insert_with(|| Expression::variable(name));
    }
}

fn check_column(column: &str) -> Result<()> {
    if column.is_empty() {
        return Err(CompileError::InvalidArgument(
            "column name must not be empty".to_string(),
        ));
    }
    Ok(())
}
