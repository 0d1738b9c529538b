//! Error types for PMF Core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Shape mismatch: dims describe {expected} elements but {actual} were supplied")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_mismatch_message() {
        let error = CoreError::ShapeMismatch {
            expected: 6,
            actual: 4,
        };
        assert!(error.to_string().contains("6 elements"));
        assert!(error.to_string().contains("4 were supplied"));
    }

    #[test]
    fn test_invalid_value_message() {
        let error = CoreError::InvalidValue("empty tensor".to_string());
        assert_eq!(error.to_string(), "Invalid value: empty tensor");
    }
}
