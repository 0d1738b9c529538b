//! Common test stages and predictors for SDK integration tests

#![allow(dead_code)]

use pmf_compiler::GraphContext;
use pmf_core::ast::builder::{binary, index, let_one};
use pmf_core::ast::{Expression, Operator};
use pmf_core::types::{ColumnType, DataKind, Schema};
use pmf_sdk::{BindableMapper, Exportable, Predictor, Role, RoleMapping, Transform};
use std::cell::Cell;
use std::rc::Rc;

/// Shared export invocation counter
pub type Calls = Rc<Cell<usize>>;

pub fn float() -> ColumnType {
    ColumnType::scalar(DataKind::Float32)
}

/// Exportable stage computing `output = input * factor`
pub struct Scale {
    name: String,
    input: String,
    output: String,
    factor: f32,
    schema: Schema,
    calls: Calls,
}

impl Scale {
    pub fn new(name: &str, upstream: &Schema, input: &str, output: &str, factor: f32) -> (Self, Calls) {
        let calls = Calls::default();
        let stage = Self {
            name: name.to_string(),
            input: input.to_string(),
            output: output.to_string(),
            factor,
            schema: upstream.clone().with_column(output, float()),
            calls: calls.clone(),
        };
        (stage, calls)
    }
}

impl Transform for Scale {
    fn name(&self) -> &str {
        &self.name
    }

    fn output_schema(&self) -> &Schema {
        &self.schema
    }

    fn as_exportable(&self) -> Option<&dyn Exportable> {
        Some(self)
    }
}

impl Exportable for Scale {
    fn export(&self, ctx: &mut GraphContext) -> pmf_compiler::Result<()> {
        self.calls.set(self.calls.get() + 1);

        let src = ctx.variable_name(&self.input)?;
        let dst = ctx.add_intermediate_variable(&float(), &self.output)?;
        ctx.add_expression(let_one(
            dst,
            binary(
                Operator::Mul,
                Expression::variable(src),
                Expression::literal(self.factor),
            ),
        ));
        Ok(())
    }
}

/// Stage with no export capability
pub struct Opaque {
    name: String,
    schema: Schema,
}

impl Opaque {
    pub fn new(name: &str, upstream: &Schema, output: &str) -> Self {
        Self {
            name: name.to_string(),
            schema: upstream.clone().with_column(output, float()),
        }
    }
}

impl Transform for Opaque {
    fn name(&self) -> &str {
        &self.name
    }

    fn output_schema(&self) -> &Schema {
        &self.schema
    }
}

/// Stage that implements export but reports itself not ready
pub struct Untrained {
    schema: Schema,
}

impl Untrained {
    pub fn new(upstream: &Schema) -> Self {
        Self {
            schema: upstream.clone(),
        }
    }
}

impl Transform for Untrained {
    fn name(&self) -> &str {
        "Untrained"
    }

    fn output_schema(&self) -> &Schema {
        &self.schema
    }

    fn as_exportable(&self) -> Option<&dyn Exportable> {
        Some(self)
    }
}

impl Exportable for Untrained {
    fn can_export(&self) -> bool {
        false
    }

    fn export(&self, _ctx: &mut GraphContext) -> pmf_compiler::Result<()> {
        unreachable!("an unexportable stage is never replayed")
    }
}

/// Predictor scoring the first feature
pub struct FirstFeature {
    pub exportable: bool,
}

struct FirstFeatureMapper {
    features: String,
    schema: Schema,
    exportable: bool,
}

impl Predictor for FirstFeature {
    fn name(&self) -> &str {
        "FirstFeature"
    }

    fn bind(&self, _input: &Schema, roles: &RoleMapping) -> Option<Box<dyn BindableMapper>> {
        let features = roles.column(&Role::Features)?.to_string();
        Some(Box::new(FirstFeatureMapper {
            features,
            schema: Schema::new().with_column("Score", float()),
            exportable: self.exportable,
        }))
    }
}

impl BindableMapper for FirstFeatureMapper {
    fn output_schema(&self) -> &Schema {
        &self.schema
    }

    fn can_export(&self) -> bool {
        self.exportable
    }

    fn export(&self, ctx: &mut GraphContext, outputs: &[String]) -> pmf_compiler::Result<()> {
        let features = ctx.variable_name(&self.features)?;
        ctx.add_expression(Expression::set(
            outputs[0].clone(),
            index(Expression::variable(features), 0),
        ));
        Ok(())
    }
}

/// Source with a feature vector and a label
pub fn labeled_source() -> Schema {
    Schema::new()
        .with_column("Features", ColumnType::vector(DataKind::Float32, vec![3]))
        .with_column("Label", ColumnType::scalar(DataKind::Boolean))
}
