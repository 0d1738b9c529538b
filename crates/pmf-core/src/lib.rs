//! PMF Core - Core types for the portable model format
//!
//! This crate provides the fundamental types used across the PMF exporter:
//! - Literal values and column schemas
//! - The expression AST and its builders
//! - IR type descriptors and the model envelope
//! - Error types

pub mod ast;
pub mod error;
pub mod ir;
pub mod types;

// Re-export commonly used types
pub use ast::{Binding, Expression, Operator};
pub use error::CoreError;
pub use ir::{Model, TypeDescriptor};
pub use types::{ColumnType, Schema, Value};
