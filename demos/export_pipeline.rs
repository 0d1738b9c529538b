//! Export Pipeline Example
//!
//! Builds a small text pipeline, exports it together with a scorer and
//! writes the binary and JSON models to the system temp directory:
//! - Source columns: Text, Label
//! - Tokenize (exportable): Text -> Tokens
//! - Count (exportable): Tokens -> Length
//! - LengthScore predictor bound through the default roles
//!
//! Run with: RUST_LOG=pmf_sdk=debug cargo run --example export_pipeline

use pmf_compiler::{GraphContext, Result};
use pmf_core::ast::builder::{binary, let_one};
use pmf_core::ast::{Expression, Operator};
use pmf_core::types::{ColumnType, DataKind, Schema};
use pmf_sdk::{
    BindableMapper, Exportable, ExportOptions, Pipeline, PipelineExporter, Predictor,
    Role, RoleMapping, Transform,
};

/// Splits a text column on whitespace
struct Tokenize {
    schema: Schema,
}

impl Transform for Tokenize {
    fn name(&self) -> &str {
        "Tokenize"
    }

    fn output_schema(&self) -> &Schema {
        &self.schema
    }

    fn as_exportable(&self) -> Option<&dyn Exportable> {
        Some(self)
    }
}

impl Exportable for Tokenize {
    fn export(&self, ctx: &mut GraphContext) -> Result<()> {
        let text = ctx.variable_name("Text")?;
        let separator = ctx.declare(" ", Some("separator"))?;
        let split = ctx.operator_name("Split")?;
        let tokens = ctx.add_intermediate_variable(&ColumnType::var_vector(DataKind::Text), "Tokens")?;
        ctx.add_expression(let_one(
            tokens,
            Expression::call(
                Expression::function(split),
                vec![Expression::variable(text), Expression::variable(separator)],
            ),
        ));
        Ok(())
    }
}

/// Counts tokens
struct Count {
    schema: Schema,
}

impl Transform for Count {
    fn name(&self) -> &str {
        "Count"
    }

    fn output_schema(&self) -> &Schema {
        &self.schema
    }

    fn as_exportable(&self) -> Option<&dyn Exportable> {
        Some(self)
    }
}

impl Exportable for Count {
    fn export(&self, ctx: &mut GraphContext) -> Result<()> {
        let tokens = ctx.variable_name("Tokens")?;
        let length = ctx.add_intermediate_variable(&ColumnType::scalar(DataKind::UInt32), "Length")?;
        ctx.add_expression(let_one(
            length,
            Expression::call_op(Operator::Size, vec![Expression::variable(tokens)]),
        ));
        Ok(())
    }
}

/// Scores a row by its token count
struct LengthScore;

struct LengthScoreMapper {
    features: String,
    schema: Schema,
}

impl Predictor for LengthScore {
    fn name(&self) -> &str {
        "LengthScore"
    }

    fn bind(&self, input: &Schema, roles: &RoleMapping) -> Option<Box<dyn BindableMapper>> {
        let features = roles
            .column(&Role::Features)
            .or_else(|| input.column("Length").map(|c| c.name.as_str()))?
            .to_string();
        Some(Box::new(LengthScoreMapper {
            features,
            schema: Schema::new().with_column("Score", ColumnType::scalar(DataKind::Float32)),
        }))
    }
}

impl BindableMapper for LengthScoreMapper {
    fn output_schema(&self) -> &Schema {
        &self.schema
    }

    fn can_export(&self) -> bool {
        true
    }

    fn export(&self, ctx: &mut GraphContext, outputs: &[String]) -> Result<()> {
        let length = ctx.variable_name(&self.features)?;
        let weight = ctx.declare(0.1f32, None)?;
        ctx.add_expression(Expression::set(
            outputs[0].clone(),
            binary(
                Operator::Mul,
                Expression::variable(length),
                Expression::variable(weight),
            ),
        ));
        Ok(())
    }
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("{}", "=".repeat(80));
    println!("Export Pipeline Example");
    println!("{}", "=".repeat(80));

    let source = Schema::new()
        .with_column("Text", ColumnType::scalar(DataKind::Text))
        .with_column("Label", ColumnType::scalar(DataKind::Boolean));
    let tokenize = Tokenize {
        schema: source
            .clone()
            .with_column("Tokens", ColumnType::var_vector(DataKind::Text)),
    };
    let count = Count {
        schema: tokenize
            .output_schema()
            .clone()
            .with_column("Length", ColumnType::scalar(DataKind::UInt32)),
    };
    let pipeline = Pipeline::new(source).with_stage(tokenize).with_stage(count);

    let out_dir = std::env::temp_dir().join("pmf-demo");
    let options = ExportOptions::new()
        .with_model_path(out_dir.join("text_length.pmf"))
        .with_json_path(out_dir.join("text_length.json"))
        .with_outputs_to_drop("Tokens");

    let report =
        PipelineExporter::new(options).export_and_save(&pipeline, Some(&LengthScore), None)?;

    println!("Exported stages: {:?}", report.exported_stages);
    println!("Inputs: {:?}", report.model.model.input_names());
    println!("Outputs: {:?}", report.model.model.output_names());
    for warning in &report.warnings {
        println!("Warning: {}", warning);
    }
    println!("Model written to {}", out_dir.display());

    Ok(())
}
