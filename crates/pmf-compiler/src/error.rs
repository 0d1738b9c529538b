//! Compiler error types

use pmf_core::types::DataKind;
use pmf_core::CoreError;
use thiserror::Error;

/// Compiler error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    /// Column item kind with no IR counterpart
    #[error("Translation error: no IR element kind for column kind {0:?}")]
    Translation(DataKind),

    /// Precondition violation at a builder or context call
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Column has no IR variable bound to it
    #[error("Undefined column: {0}")]
    UndefinedColumn(String),

    /// Function name already present in the function table
    #[error("Duplicate function: {0}")]
    DuplicateFunction(String),

    /// Error raised by the core types
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type for compiler operations
pub type Result<T> = std::result::Result<T, CompileError>;
