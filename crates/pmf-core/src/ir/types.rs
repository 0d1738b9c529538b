//! IR type descriptors
//!
//! Canonical types of IR variables. Tensor shapes always start with the
//! batch dimension, which is synthesized here and never supplied by callers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical element kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    Int64,
    Float,
    String,
}

/// A single tensor dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dim {
    /// Known positive extent
    Fixed(u64),
    /// Extent known only at run time
    Unbound,
}

/// Batch dimension prepended to every tensor shape
pub const BATCH_DIM: Dim = Dim::Fixed(1);

/// Type of an IR variable
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeDescriptor {
    Scalar(ElementKind),
    Tensor { kind: ElementKind, shape: Vec<Dim> },
    Map {
        key: ElementKind,
        value: Box<TypeDescriptor>,
    },
}

impl TypeDescriptor {
    pub fn scalar(kind: ElementKind) -> Self {
        TypeDescriptor::Scalar(kind)
    }

    /// Tensor whose shape is the batch dimension followed by `dims`
    pub fn tensor(kind: ElementKind, dims: impl IntoIterator<Item = Dim>) -> Self {
        let mut shape = vec![BATCH_DIM];
        shape.extend(dims);
        TypeDescriptor::Tensor { kind, shape }
    }

    pub fn map(key: ElementKind, value: TypeDescriptor) -> Self {
        TypeDescriptor::Map {
            key,
            value: Box::new(value),
        }
    }

    /// Element kind of scalars and tensors, value kind of maps
    pub fn element_kind(&self) -> ElementKind {
        match self {
            TypeDescriptor::Scalar(kind) => *kind,
            TypeDescriptor::Tensor { kind, .. } => *kind,
            TypeDescriptor::Map { value, .. } => value.element_kind(),
        }
    }

    /// Tensor shape, batch dimension included
    pub fn shape(&self) -> Option<&[Dim]> {
        match self {
            TypeDescriptor::Tensor { shape, .. } => Some(shape),
            _ => None,
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementKind::Int64 => write!(f, "int64"),
            ElementKind::Float => write!(f, "float"),
            ElementKind::String => write!(f, "string"),
        }
    }
}

impl fmt::Display for Dim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dim::Fixed(n) => write!(f, "{}", n),
            Dim::Unbound => write!(f, "?"),
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Scalar(kind) => write!(f, "{}", kind),
            TypeDescriptor::Tensor { kind, shape } => {
                let dims: Vec<String> = shape.iter().map(|d| d.to_string()).collect();
                write!(f, "{}[{}]", kind, dims.join(","))
            }
            TypeDescriptor::Map { key, value } => write!(f, "map<{}, {}>", key, value),
        }
    }
}
