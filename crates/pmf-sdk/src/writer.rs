//! Model writer
//!
//! Binary form is postcard, textual form is pretty-printed JSON. Both carry
//! the same logical schema.

use crate::config::ExportOptions;
use crate::error::{ExportError, Result};
use pmf_core::Model;
use std::fs;
use std::path::Path;

/// Model serialization and persistence
pub struct ModelWriter;

impl ModelWriter {
    /// Encode a model into its binary interchange form
    pub fn encode(model: &Model) -> Result<Vec<u8>> {
        postcard::to_allocvec(model).map_err(|e| ExportError::Serialization(e.to_string()))
    }

    /// Decode a model from its binary interchange form
    pub fn decode(bytes: &[u8]) -> Result<Model> {
        postcard::from_bytes(bytes).map_err(|e| ExportError::Serialization(e.to_string()))
    }

    /// Render a model as pretty-printed JSON
    pub fn to_json(model: &Model) -> Result<String> {
        serde_json::to_string_pretty(model).map_err(|e| ExportError::Serialization(e.to_string()))
    }

    /// Parse a model from JSON
    pub fn from_json(json: &str) -> Result<Model> {
        serde_json::from_str(json).map_err(|e| ExportError::Serialization(e.to_string()))
    }

    /// Write the outputs configured in `options`
    ///
    /// Missing parent directories are created. Nothing is written when no
    /// output path is configured.
    pub fn save(model: &Model, options: &ExportOptions) -> Result<()> {
        if let Some(path) = &options.model_path {
            let bytes = Self::encode(model)?;
            write_file(path, &bytes)?;
            tracing::info!(path = %path.display(), bytes = bytes.len(), "wrote binary model");
        }

        if let Some(path) = &options.json_path {
            let json = Self::to_json(model)?;
            write_file(path, json.as_bytes())?;
            tracing::info!(path = %path.display(), "wrote JSON model");
        }

        Ok(())
    }
}

fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;
    Ok(())
}
