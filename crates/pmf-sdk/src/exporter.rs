//! Pipeline exporter
//!
//! Drives one export run: walk the pipeline, decide on the predictor, replay
//! the exportable stages into a fresh graph context and assemble the model.

use crate::config::ExportOptions;
use crate::error::{ExportError, Result};
use crate::pipeline::{exportable, Pipeline};
use crate::scorer::{DefaultScorerResolver, Predictor, RoleMapping, ScorerResolver};
use crate::walker::PipelineWalker;
use crate::writer::ModelWriter;
use pmf_compiler::{GraphContext, ModelAssembler};
use pmf_core::Model;

/// Outcome of an export run
#[derive(Debug, Clone)]
pub struct ExportReport {
    pub model: Model,
    /// Non-fatal problems, in the order they were found
    pub warnings: Vec<String>,
    /// Exported stage names, source to terminal
    pub exported_stages: Vec<String>,
    /// Stage where the backward walk stopped, if it stopped early
    pub truncated_at: Option<String>,
}

/// Exports pipelines into models
pub struct PipelineExporter {
    options: ExportOptions,
    resolver: Box<dyn ScorerResolver>,
}

impl PipelineExporter {
    pub fn new(options: ExportOptions) -> Self {
        Self {
            options,
            resolver: Box::new(DefaultScorerResolver),
        }
    }

    /// Use a custom predictor-to-scorer resolver
    pub fn with_resolver(mut self, resolver: impl ScorerResolver + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Export `pipeline`, optionally terminated by a scorer for `predictor`
    ///
    /// `roles` maps predictor roles onto terminal columns; the default roles
    /// present in the terminal view are used when it is `None`.
    pub fn export(
        &self,
        pipeline: &Pipeline,
        predictor: Option<&dyn Predictor>,
        roles: Option<&RoleMapping>,
    ) -> Result<ExportReport> {
        self.options.validate()?;

        let mut warnings = Vec::new();

        // Resolved before walking so the scorer outlives the plan borrowing it
        let scorer = match (predictor, self.options.load_predictor) {
            (_, Some(false)) => {
                tracing::debug!("predictor export disabled");
                None
            }
            (None, Some(true)) => {
                return Err(ExportError::Configuration(
                    "predictor export was requested but no predictor is present".to_string(),
                ));
            }
            (None, None) => None,
            (Some(predictor), demand) => {
                let scorer = self
                    .resolver
                    .resolve(predictor, pipeline.terminal_schema(), roles)
                    .filter(|scorer| exportable(scorer).is_some());

                if scorer.is_none() {
                    if demand == Some(true) {
                        return Err(ExportError::Configuration(format!(
                            "predictor export was requested but predictor '{}' cannot be exported",
                            predictor.name()
                        )));
                    }
                    let warning = format!(
                        "predictor '{}' cannot be exported; ignoring it",
                        predictor.name()
                    );
                    tracing::warn!("{}", warning);
                    warnings.push(warning);
                }
                scorer
            }
        };

        let mut plan = PipelineWalker::walk(pipeline);
        if let Some(stage) = plan.truncated_at() {
            warnings.push(format!(
                "stopped walking back the pipeline at '{}' since it cannot be exported",
                stage
            ));
        }
        if let Some(scorer) = &scorer {
            plan.push_terminal(scorer);
        }

        let mut ctx = GraphContext::new();
        plan.replay(
            &mut ctx,
            &self.options.inputs_to_drop,
            &self.options.outputs_to_drop,
        )?;

        let model = ModelAssembler::new()
            .with_name(self.options.model_name())
            .with_domain(self.options.model_domain())
            .assemble(ctx);

        Ok(ExportReport {
            model,
            warnings,
            exported_stages: plan.stage_names(),
            truncated_at: plan.truncated_at().map(str::to_string),
        })
    }

    /// Export and write the outputs configured in the options
    pub fn export_and_save(
        &self,
        pipeline: &Pipeline,
        predictor: Option<&dyn Predictor>,
        roles: Option<&RoleMapping>,
    ) -> Result<ExportReport> {
        let report = self.export(pipeline, predictor, roles)?;
        ModelWriter::save(&report.model, &self.options)?;
        Ok(report)
    }
}

impl Default for PipelineExporter {
    fn default() -> Self {
        Self::new(ExportOptions::default())
    }
}
