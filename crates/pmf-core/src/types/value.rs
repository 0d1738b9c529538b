//! Literal values embedded in PMF expressions
//!
//! A literal is either a scalar of one of the canonical element kinds or a
//! dense tensor of them. Tensors carry their own shape; a plain array literal
//! is a 1-D tensor whose single dimension is its length.

use crate::error::{CoreError, Result};
use crate::ir::ElementKind;
use serde::{Deserialize, Serialize};

/// Literal value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// 64-bit signed integer
    Int64(i64),
    /// 32-bit float
    Float(#[serde(with = "super::float")] f32),
    /// UTF-8 string
    String(String),
    /// Dense tensor
    Tensor(Tensor),
}

/// Dense tensor literal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tensor {
    dims: Vec<u64>,
    data: TensorData,
}

/// Tensor payload, stored row-major
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TensorData {
    Int64s(Vec<i64>),
    Floats(#[serde(with = "super::float::vec")] Vec<f32>),
    Strings(Vec<String>),
}

impl Value {
    /// Canonical element kind of this value (the item kind for tensors)
    pub fn kind(&self) -> ElementKind {
        match self {
            Value::Int64(_) => ElementKind::Int64,
            Value::Float(_) => ElementKind::Float,
            Value::String(_) => ElementKind::String,
            Value::Tensor(tensor) => tensor.kind(),
        }
    }

    /// Returns true for tensor values
    pub fn is_tensor(&self) -> bool {
        matches!(self, Value::Tensor(_))
    }

    /// Neutral scalar of `kind`: 0, 0.0 or the empty string
    pub fn zero(kind: ElementKind) -> Self {
        match kind {
            ElementKind::Int64 => Value::Int64(0),
            ElementKind::Float => Value::Float(0.0),
            ElementKind::String => Value::String(String::new()),
        }
    }

    /// Empty 1-D tensor of `kind`
    pub fn empty(kind: ElementKind) -> Self {
        let data = match kind {
            ElementKind::Int64 => TensorData::Int64s(Vec::new()),
            ElementKind::Float => TensorData::Floats(Vec::new()),
            ElementKind::String => TensorData::Strings(Vec::new()),
        };
        Value::Tensor(Tensor::vector(data))
    }

    /// 1-D tensor of integers
    pub fn int64s(values: Vec<i64>) -> Self {
        Value::Tensor(Tensor::vector(TensorData::Int64s(values)))
    }

    /// 1-D tensor of floats
    pub fn floats(values: Vec<f32>) -> Self {
        Value::Tensor(Tensor::vector(TensorData::Floats(values)))
    }

    /// 1-D tensor of strings
    pub fn strings<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Value::Tensor(Tensor::vector(TensorData::Strings(
            values.into_iter().map(Into::into).collect(),
        )))
    }
}

impl Tensor {
    /// Create a tensor with an explicit shape
    ///
    /// The product of `dims` must equal the number of elements in `data`.
    pub fn new(dims: Vec<u64>, data: TensorData) -> Result<Self> {
        let actual = data.len();
        let expected = dims
            .iter()
            .try_fold(1u64, |acc, d| acc.checked_mul(*d))
            .and_then(|n| usize::try_from(n).ok())
            .ok_or_else(|| CoreError::InvalidValue(format!("tensor dims {:?} overflow", dims)))?;
        if dims.is_empty() || expected != actual {
            return Err(CoreError::ShapeMismatch { expected, actual });
        }
        Ok(Self { dims, data })
    }

    /// Create a 1-D tensor whose only dimension is the data length
    pub fn vector(data: TensorData) -> Self {
        Self {
            dims: vec![data.len() as u64],
            data,
        }
    }

    pub fn dims(&self) -> &[u64] {
        &self.dims
    }

    pub fn data(&self) -> &TensorData {
        &self.data
    }

    pub fn kind(&self) -> ElementKind {
        self.data.kind()
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.len() == 0
    }
}

impl TensorData {
    pub fn kind(&self) -> ElementKind {
        match self {
            TensorData::Int64s(_) => ElementKind::Int64,
            TensorData::Floats(_) => ElementKind::Float,
            TensorData::Strings(_) => ElementKind::String,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            TensorData::Int64s(v) => v.len(),
            TensorData::Floats(v) => v.len(),
            TensorData::Strings(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int64(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<Vec<i64>> for Value {
    fn from(values: Vec<i64>) -> Self {
        Value::int64s(values)
    }
}

impl From<Vec<f32>> for Value {
    fn from(values: Vec<f32>) -> Self {
        Value::floats(values)
    }
}

impl From<Vec<String>> for Value {
    fn from(values: Vec<String>) -> Self {
        Value::strings(values)
    }
}

impl From<Tensor> for Value {
    fn from(tensor: Tensor) -> Self {
        Value::Tensor(tensor)
    }
}
