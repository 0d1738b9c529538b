//! Configuration types for pipeline export

use crate::error::{ExportError, Result};
use pmf_compiler::assembler::{DEFAULT_DOMAIN, DEFAULT_MODEL_NAME};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Export run configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Binary model output path
    pub model_path: Option<PathBuf>,

    /// Optional JSON model output path
    pub json_path: Option<PathBuf>,

    /// Model display name
    pub name: Option<String>,

    /// Model domain
    pub domain: Option<String>,

    /// Columns that never become model inputs (nor outputs)
    pub inputs_to_drop: BTreeSet<String>,

    /// Columns that never become model outputs
    pub outputs_to_drop: BTreeSet<String>,

    /// Predictor inclusion: demanded, forbidden, or best effort when unset
    pub load_predictor: Option<bool>,
}

impl ExportOptions {
    /// Create default export options
    pub fn new() -> Self {
        Self::default()
    }

    /// Load options from a YAML document
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| ExportError::InvalidConfig(e.to_string()))
    }

    /// Load options from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Set the binary output path
    pub fn with_model_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.model_path = Some(path.into());
        self
    }

    /// Set the JSON output path
    pub fn with_json_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.json_path = Some(path.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Add columns to the input drop list from a comma-separated string
    pub fn with_inputs_to_drop(mut self, columns: &str) -> Self {
        self.inputs_to_drop.extend(parse_column_list(columns));
        self
    }

    /// Add columns to the output drop list from a comma-separated string
    pub fn with_outputs_to_drop(mut self, columns: &str) -> Self {
        self.outputs_to_drop.extend(parse_column_list(columns));
        self
    }

    pub fn with_load_predictor(mut self, load: bool) -> Self {
        self.load_predictor = Some(load);
        self
    }

    /// Effective model name: explicit name, else the model file stem
    pub fn model_name(&self) -> String {
        if let Some(name) = &self.name {
            return name.clone();
        }
        self.model_path
            .as_deref()
            .and_then(Path::file_stem)
            .and_then(|stem| stem.to_str())
            .map(str::to_string)
            .unwrap_or_else(|| DEFAULT_MODEL_NAME.to_string())
    }

    /// Effective model domain
    pub fn model_domain(&self) -> String {
        self.domain
            .clone()
            .unwrap_or_else(|| DEFAULT_DOMAIN.to_string())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if let (Some(model), Some(json)) = (&self.model_path, &self.json_path) {
            if model == json {
                return Err(ExportError::InvalidConfig(format!(
                    "JSON output path must differ from model path: {}",
                    json.display()
                )));
            }
        }
        if matches!(&self.name, Some(name) if name.is_empty()) {
            return Err(ExportError::InvalidConfig(
                "model name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Parse a comma-separated column list, trimming whitespace and skipping
/// empty segments
pub fn parse_column_list(columns: &str) -> BTreeSet<String> {
    columns
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect()
}
