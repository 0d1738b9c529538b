//! Model assembly
//!
//! Packages a finished [`GraphContext`] into the model envelope.

use crate::context::GraphContext;
use pmf_core::ir::{Model, IR_VERSION};

/// Producer name stamped into every envelope
pub const PRODUCER_NAME: &str = "pmf";

/// Producer version stamped into every envelope
pub const PRODUCER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default model name
pub const DEFAULT_MODEL_NAME: &str = "model";

/// Default model domain
pub const DEFAULT_DOMAIN: &str = "ai.pmf";

/// Envelope metadata applied at assembly
#[derive(Debug, Clone)]
pub struct ModelAssembler {
    /// Functional model name
    pub name: String,
    /// Reverse-DNS style domain
    pub domain: String,
    pub model_version: i64,
}

impl Default for ModelAssembler {
    fn default() -> Self {
        Self {
            name: DEFAULT_MODEL_NAME.to_string(),
            domain: DEFAULT_DOMAIN.to_string(),
            model_version: 0,
        }
    }
}

impl ModelAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    pub fn with_model_version(mut self, version: i64) -> Self {
        self.model_version = version;
        self
    }

    /// Finalize `ctx` into a model envelope
    ///
    /// Consumes the context, so a context is finalized at most once. The
    /// body, signature and function table are carried over in order.
    pub fn assemble(&self, ctx: GraphContext) -> Model {
        let model = ctx.into_functional_model(self.name.clone());

        tracing::info!(
            name = %model.name,
            inputs = model.signature.inputs.len(),
            outputs = model.signature.outputs.len(),
            expressions = model.body.len(),
            functions = model.functions.len(),
            "assembled model"
        );

        Model {
            ir_version: IR_VERSION,
            producer_name: PRODUCER_NAME.to_string(),
            producer_version: PRODUCER_VERSION.to_string(),
            domain: self.domain.clone(),
            model_version: self.model_version,
            model,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pmf_core::ast::Expression;
    use pmf_core::types::{ColumnType, DataKind};

    #[test]
    fn test_default_envelope() {
        let model = ModelAssembler::default().assemble(GraphContext::new());
        assert_eq!(model.ir_version, IR_VERSION);
        assert_eq!(model.producer_name, "pmf");
        assert_eq!(model.producer_version, env!("CARGO_PKG_VERSION"));
        assert_eq!(model.domain, DEFAULT_DOMAIN);
        assert_eq!(model.model.name, DEFAULT_MODEL_NAME);
        assert_eq!(model.model_version, 0);
        assert_eq!(model.body_len(), 0);
    }

    #[test]
    fn test_custom_metadata() {
        let model = ModelAssembler::new()
            .with_name("sentiment")
            .with_domain("com.example")
            .with_model_version(3)
            .assemble(GraphContext::new());
        assert_eq!(model.model.name, "sentiment");
        assert_eq!(model.domain, "com.example");
        assert_eq!(model.model_version, 3);
    }

    #[test]
    fn test_body_order_preserved() {
        let mut ctx = GraphContext::new();
        ctx.add_model_input(&ColumnType::scalar(DataKind::Float32), "x")
            .unwrap();
        ctx.add_expression(Expression::comment("first"));
        ctx.declare(1.5f32, None).unwrap();
        ctx.add_expression(Expression::comment("last"));

        let model = ctx.make_model();
        assert_eq!(model.body_variants(), vec!["Comment", "Let", "Comment"]);
        assert_eq!(model.model.input_names(), vec!["x"]);
    }
}
