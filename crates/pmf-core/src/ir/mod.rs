//! Intermediate Representation (IR) for PMF
//!
//! Type descriptors and the model records that an export run produces.

pub mod model;
pub mod types;

pub use model::{FunctionDef, FunctionalModel, Model, ParameterDecl, Signature, IR_VERSION};
pub use types::{Dim, ElementKind, TypeDescriptor, BATCH_DIM};
