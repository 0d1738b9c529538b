//! PMF SDK
//!
//! High-level API for exporting pipelines into portable models.

pub mod config;
pub mod error;
pub mod exporter;
pub mod pipeline;
pub mod scorer;
pub mod walker;
pub mod writer;

// Re-export main types
pub use config::ExportOptions;
pub use error::{ExportError, Result};
pub use exporter::{ExportReport, PipelineExporter};
pub use pipeline::{Exportable, Pipeline, Transform};
pub use scorer::{
    BindableMapper, DefaultScorerResolver, Predictor, Role, RoleMapping, ScorerResolver,
    ScoringTransform,
};
pub use walker::{PipelineWalker, WalkPlan, WalkState};
pub use writer::ModelWriter;

// Re-export commonly used types from dependencies
pub use pmf_compiler::GraphContext;
pub use pmf_core::{Model, Schema};
