//! Pipeline stages and their export capability
//!
//! A [`Pipeline`] is a source schema followed by a linear chain of
//! [`Transform`] stages. Each stage's upstream is the stage before it, or the
//! source for the first stage. A stage takes part in export by returning
//! itself from [`Transform::as_exportable`].

use pmf_compiler::{GraphContext, Result};
use pmf_core::types::Schema;

/// A stage of a pipeline
pub trait Transform {
    /// Stage name, used in logs and reports
    fn name(&self) -> &str;

    /// Columns visible downstream of this stage
    fn output_schema(&self) -> &Schema;

    /// Export capability, if the stage has one
    fn as_exportable(&self) -> Option<&dyn Exportable> {
        None
    }
}

/// Capability of contributing a stage's logic to a graph
pub trait Exportable {
    /// Whether the stage can export in its current state
    fn can_export(&self) -> bool {
        true
    }

    /// Emit the stage's expressions and bindings into `ctx`
    ///
    /// Input columns are read through their current bindings; produced
    /// columns should be rebound so downstream stages and the output pass
    /// see them.
    fn export(&self, ctx: &mut GraphContext) -> Result<()>;
}

/// Whether `stage` implements export and currently reports itself exportable
pub fn exportable(stage: &dyn Transform) -> Option<&dyn Exportable> {
    stage.as_exportable().filter(|e| e.can_export())
}

/// A source schema followed by a linear chain of stages
pub struct Pipeline {
    source: Schema,
    stages: Vec<Box<dyn Transform>>,
}

impl Pipeline {
    pub fn new(source: Schema) -> Self {
        Self {
            source,
            stages: Vec::new(),
        }
    }

    /// Append a stage downstream of the current terminal
    pub fn with_stage(mut self, stage: impl Transform + 'static) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    pub fn push(&mut self, stage: Box<dyn Transform>) {
        self.stages.push(stage);
    }

    pub fn source(&self) -> &Schema {
        &self.source
    }

    pub fn stages(&self) -> &[Box<dyn Transform>] {
        &self.stages
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Schema of the terminal view
    pub fn terminal_schema(&self) -> &Schema {
        self.stages
            .last()
            .map(|stage| stage.output_schema())
            .unwrap_or(&self.source)
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.stages.iter().map(|s| s.name()).collect();
        f.debug_struct("Pipeline")
            .field("source", &self.source)
            .field("stages", &names)
            .finish()
    }
}
