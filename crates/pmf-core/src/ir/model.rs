//! IR Model
//!
//! A functional model is an ordered expression body with a signature,
//! a function table and a variable type table. The model envelope wraps it
//! with producer metadata.

use crate::ast::Expression;
use crate::ir::TypeDescriptor;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Version of the IR layout written into every envelope
pub const IR_VERSION: i64 = 1;

/// A named, typed parameter of a model or function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDecl {
    pub name: String,
    pub ty: TypeDescriptor,
    #[serde(default)]
    pub doc: String,
    #[serde(default)]
    pub variadic: bool,
}

/// Inputs and outputs of a model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Signature {
    pub inputs: Vec<ParameterDecl>,
    pub outputs: Vec<ParameterDecl>,
}

/// A function callable from the model body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDef {
    pub name: String,
    pub inputs: Vec<ParameterDecl>,
    pub outputs: Vec<ParameterDecl>,
    pub body: Vec<Expression>,
}

/// The exported program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionalModel {
    pub name: String,
    pub signature: Signature,
    pub body: Vec<Expression>,
    #[serde(default)]
    pub functions: Vec<FunctionDef>,
    /// Variable name -> type, in registration order
    #[serde(default)]
    pub types: IndexMap<String, TypeDescriptor>,
}

/// Top-level model envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub ir_version: i64,
    pub producer_name: String,
    pub producer_version: String,
    pub domain: String,
    pub model_version: i64,
    pub model: FunctionalModel,
}

impl ParameterDecl {
    pub fn new(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            ty,
            doc: String::new(),
            variadic: false,
        }
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = doc.into();
        self
    }

    pub fn variadic(mut self) -> Self {
        self.variadic = true;
        self
    }
}

impl FunctionDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            body: Vec::new(),
        }
    }

    pub fn with_input(mut self, param: ParameterDecl) -> Self {
        self.inputs.push(param);
        self
    }

    pub fn with_output(mut self, param: ParameterDecl) -> Self {
        self.outputs.push(param);
        self
    }

    pub fn with_body(mut self, body: Vec<Expression>) -> Self {
        self.body = body;
        self
    }
}

impl FunctionalModel {
    pub fn input_names(&self) -> Vec<&str> {
        self.signature.inputs.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn output_names(&self) -> Vec<&str> {
        self.signature.outputs.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn function(&self, name: &str) -> Option<&FunctionDef> {
        self.functions.iter().find(|f| f.name == name)
    }
}

impl Model {
    /// Number of top-level expressions in the body
    pub fn body_len(&self) -> usize {
        self.model.body.len()
    }

    /// Variant names of the top-level body, in program order
    pub fn body_variants(&self) -> Vec<&'static str> {
        self.model.body.iter().map(Expression::variant_name).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::ElementKind;
    use crate::types::Value;

    fn sample_model() -> Model {
        let mut types = IndexMap::new();
        types.insert(
            "x".to_string(),
            TypeDescriptor::scalar(ElementKind::Float),
        );
        types.insert(
            "y".to_string(),
            TypeDescriptor::scalar(ElementKind::Float),
        );

        Model {
            ir_version: IR_VERSION,
            producer_name: "pmf".to_string(),
            producer_version: "0.1.0".to_string(),
            domain: "ai.pmf".to_string(),
            model_version: 0,
            model: FunctionalModel {
                name: "sample".to_string(),
                signature: Signature {
                    inputs: vec![ParameterDecl::new("x", TypeDescriptor::scalar(ElementKind::Float))],
                    outputs: vec![ParameterDecl::new("y", TypeDescriptor::scalar(ElementKind::Float))],
                },
                body: vec![
                    Expression::comment("copy"),
                    Expression::set("y", Expression::variable("x")),
                ],
                functions: vec![FunctionDef::new("identity")
                    .with_input(ParameterDecl::new("v", TypeDescriptor::scalar(ElementKind::Int64)))
                    .with_output(ParameterDecl::new("r", TypeDescriptor::scalar(ElementKind::Int64)))
                    .with_body(vec![Expression::set("r", Expression::literal(Value::Int64(0)))])],
                types,
            },
        }
    }

    #[test]
    fn test_signature_names() {
        let model = sample_model();
        assert_eq!(model.model.input_names(), vec!["x"]);
        assert_eq!(model.model.output_names(), vec!["y"]);
    }

    #[test]
    fn test_body_variants() {
        let model = sample_model();
        assert_eq!(model.body_len(), 2);
        assert_eq!(model.body_variants(), vec!["Comment", "Set"]);
    }

    #[test]
    fn test_function_lookup() {
        let model = sample_model();
        assert!(model.model.function("identity").is_some());
        assert!(model.model.function("missing").is_none());
    }

    #[test]
    fn test_parameter_builder() {
        let param = ParameterDecl::new("args", TypeDescriptor::scalar(ElementKind::String))
            .with_doc("trailing arguments")
            .variadic();
        assert!(param.variadic);
        assert_eq!(param.doc, "trailing arguments");
    }

    #[test]
    fn test_model_serde_json() {
        let model = sample_model();
        let json = serde_json::to_string_pretty(&model).unwrap();
        assert!(json.contains("\"producer_name\": \"pmf\""));
        let back: Model = serde_json::from_str(&json).unwrap();
        assert_eq!(back, model);
    }

    #[test]
    fn test_type_table_keeps_order() {
        let model = sample_model();
        let bytes = postcard::to_allocvec(&model).unwrap();
        let back: Model = postcard::from_bytes(&bytes).unwrap();
        let names: Vec<_> = back.model.types.keys().cloned().collect();
        assert_eq!(names, vec!["x", "y"]);
    }
}
