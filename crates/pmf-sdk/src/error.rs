//! SDK error types

use pmf_compiler::CompileError;
use thiserror::Error;

/// Export error type
#[derive(Error, Debug)]
pub enum ExportError {
    /// Predictor inclusion was demanded but cannot be honored
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Graph construction error
    #[error("Compiler error: {0}")]
    Compile(#[from] CompileError),

    /// A stage failed while contributing to the graph
    #[error("Stage '{stage}' failed to export: {source}")]
    StageFailed {
        stage: String,
        #[source]
        source: CompileError,
    },

    /// A stage in the export list no longer reports itself exportable
    #[error("Stage '{0}' cannot be exported")]
    NotExportable(String),

    /// Model encoding or decoding error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid export options
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for export operations
pub type Result<T> = std::result::Result<T, ExportError>;

#[cfg(test)]
mod tests {
    use super::*;
    use pmf_core::types::DataKind;

    #[test]
    fn test_configuration_error() {
        let error = ExportError::Configuration("no predictor".to_string());
        assert!(error.to_string().contains("Configuration error"));
        assert!(error.to_string().contains("no predictor"));
    }

    #[test]
    fn test_compile_error_conversion() {
        let error: ExportError = CompileError::Translation(DataKind::Float64).into();
        assert!(matches!(
            error,
            ExportError::Compile(CompileError::Translation(DataKind::Float64))
        ));
    }

    #[test]
    fn test_stage_failed_carries_source() {
        use std::error::Error;

        let error = ExportError::StageFailed {
            stage: "Tokenize".to_string(),
            source: CompileError::UndefinedColumn("Text".to_string()),
        };
        assert!(error.to_string().contains("Tokenize"));
        assert!(error.source().is_some());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let error: ExportError = io_error.into();
        assert!(error.to_string().contains("I/O error"));
        assert!(error.to_string().contains("File not found"));
    }

    #[test]
    fn test_error_debug_format() {
        let error = ExportError::InvalidConfig("test".to_string());
        let debug_str = format!("{:?}", error);
        assert!(debug_str.contains("InvalidConfig"));
    }
}
