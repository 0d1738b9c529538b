//! Value and schema types
//!
//! - Literal values carried by IR expressions
//! - Column schemas describing pipeline views

mod float;
pub mod schema;
pub mod value;

pub use schema::{Column, ColumnType, DataKind, ItemType, Schema};
pub use value::{Tensor, TensorData, Value};
