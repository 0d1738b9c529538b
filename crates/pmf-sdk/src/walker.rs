//! Pipeline walker
//!
//! Walks a pipeline backward from its terminal stage to find the longest
//! exportable suffix, then replays that suffix into a graph context in
//! source-to-terminal order.

use crate::error::{ExportError, Result};
use crate::pipeline::{exportable, Pipeline, Transform};
use pmf_compiler::GraphContext;
use pmf_core::types::Schema;
use std::collections::{BTreeSet, VecDeque};

/// Position of the backward walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkState {
    /// Cursor at the stage with this index
    Walking(usize),
    /// Cursor reached the pipeline source
    StoppedAtSource,
    /// Cursor reached a stage that cannot export
    StoppedAtUnexportable(usize),
}

/// The exportable suffix of a pipeline
#[derive(Clone)]
pub struct WalkPlan<'a> {
    /// Effective source: the pipeline source, or the output of the stage
    /// where the walk stopped
    source: &'a Schema,
    /// Stages to replay, oldest first
    stages: Vec<&'a dyn Transform>,
    /// Schema of the terminal view
    terminal: &'a Schema,
    state: WalkState,
    truncated_at: Option<String>,
}

/// Backward pipeline walker
pub struct PipelineWalker;

impl PipelineWalker {
    /// Determine the maximal exportable suffix of `pipeline`
    ///
    /// The walk stops for good at the first stage that does not implement
    /// export or reports itself unexportable; stages upstream of it are never
    /// inspected.
    pub fn walk(pipeline: &Pipeline) -> WalkPlan<'_> {
        let stages = pipeline.stages();
        let mut suffix: VecDeque<&dyn Transform> = VecDeque::new();

        let mut state = match stages.len() {
            0 => WalkState::StoppedAtSource,
            n => WalkState::Walking(n - 1),
        };

        while let WalkState::Walking(index) = state {
            let stage = stages[index].as_ref();
            if exportable(stage).is_none() {
                state = WalkState::StoppedAtUnexportable(index);
                break;
            }

            tracing::debug!(stage = stage.name(), index, "stage is exportable");
            suffix.push_front(stage);
            state = match index {
                0 => WalkState::StoppedAtSource,
                i => WalkState::Walking(i - 1),
            };
        }

        let (source, truncated_at) = match state {
            WalkState::StoppedAtUnexportable(index) => {
                let stage = stages[index].as_ref();
                tracing::warn!(
                    stage = stage.name(),
                    index,
                    "stopped walking back the pipeline at a stage that cannot be exported"
                );
                (stage.output_schema(), Some(stage.name().to_string()))
            }
            _ => (pipeline.source(), None),
        };

        WalkPlan {
            source,
            stages: suffix.into_iter().collect(),
            terminal: pipeline.terminal_schema(),
            state,
            truncated_at,
        }
    }
}

impl<'a> WalkPlan<'a> {
    pub fn source(&self) -> &'a Schema {
        self.source
    }

    pub fn terminal(&self) -> &'a Schema {
        self.terminal
    }

    /// Final walk state; never `Walking`
    pub fn state(&self) -> WalkState {
        self.state
    }

    /// Name of the stage the walk stopped at, if it stopped early
    pub fn truncated_at(&self) -> Option<&str> {
        self.truncated_at.as_deref()
    }

    /// Names of the stages to export, oldest first
    pub fn stage_names(&self) -> Vec<String> {
        self.stages.iter().map(|s| s.name().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Append a stage downstream of the terminal view; its output becomes
    /// the new terminal view
    pub fn push_terminal(&mut self, stage: &'a dyn Transform) {
        self.stages.push(stage);
        self.terminal = stage.output_schema();
    }

    /// Replay the plan into `ctx`
    ///
    /// Registers a model input per visible source column, lets every stage
    /// contribute in order, then registers a model output per visible
    /// terminal column. Columns in `inputs_to_drop` are skipped on both
    /// sides; columns in `outputs_to_drop` only on the output side.
    pub fn replay(
        &self,
        ctx: &mut GraphContext,
        inputs_to_drop: &BTreeSet<String>,
        outputs_to_drop: &BTreeSet<String>,
    ) -> Result<()> {
        for column in self.source.visible_columns() {
            if inputs_to_drop.contains(&column.name) {
                continue;
            }
            ctx.add_model_input(&column.ty, &column.name)?;
        }

        for stage in &self.stages {
            let exporter = exportable(*stage)
                .ok_or_else(|| ExportError::NotExportable(stage.name().to_string()))?;

            tracing::debug!(stage = stage.name(), "exporting stage");
            exporter
                .export(ctx)
                .map_err(|source| ExportError::StageFailed {
                    stage: stage.name().to_string(),
                    source,
                })?;
        }

        for column in self.terminal.visible_columns() {
            if outputs_to_drop.contains(&column.name) || inputs_to_drop.contains(&column.name) {
                continue;
            }
            ctx.lookup_or_allocate(&column.name)?;
            ctx.add_model_output(&column.ty, &column.name)?;
        }

        Ok(())
    }
}

impl std::fmt::Debug for WalkPlan<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalkPlan")
            .field("stages", &self.stage_names())
            .field("state", &self.state)
            .field("truncated_at", &self.truncated_at)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::Exportable;
    use pmf_core::types::{ColumnType, DataKind};

    struct Stage {
        name: &'static str,
        schema: Schema,
        exportable: bool,
    }

    impl Transform for Stage {
        fn name(&self) -> &str {
            self.name
        }

        fn output_schema(&self) -> &Schema {
            &self.schema
        }

        fn as_exportable(&self) -> Option<&dyn Exportable> {
            Some(self)
        }
    }

    impl Exportable for Stage {
        fn can_export(&self) -> bool {
            self.exportable
        }

        fn export(&self, _ctx: &mut GraphContext) -> pmf_compiler::Result<()> {
            Ok(())
        }
    }

    fn stage(name: &'static str, exportable: bool) -> Stage {
        Stage {
            name,
            schema: Schema::new().with_column(name, ColumnType::scalar(DataKind::Float32)),
            exportable,
        }
    }

    #[test]
    fn test_empty_pipeline_stops_at_source() {
        let pipeline = Pipeline::new(Schema::new());
        let plan = PipelineWalker::walk(&pipeline);
        assert_eq!(plan.state(), WalkState::StoppedAtSource);
        assert!(plan.is_empty());
        assert!(plan.truncated_at().is_none());
    }

    #[test]
    fn test_fully_exportable_pipeline() {
        let pipeline = Pipeline::new(Schema::new())
            .with_stage(stage("A", true))
            .with_stage(stage("B", true));
        let plan = PipelineWalker::walk(&pipeline);
        assert_eq!(plan.state(), WalkState::StoppedAtSource);
        assert_eq!(plan.stage_names(), vec!["A", "B"]);
    }

    #[test]
    fn test_walk_halts_at_first_unexportable() {
        let pipeline = Pipeline::new(Schema::new())
            .with_stage(stage("A", true))
            .with_stage(stage("B", false))
            .with_stage(stage("C", true))
            .with_stage(stage("D", true));
        let plan = PipelineWalker::walk(&pipeline);
        assert_eq!(plan.state(), WalkState::StoppedAtUnexportable(1));
        assert_eq!(plan.stage_names(), vec!["C", "D"]);
        assert_eq!(plan.truncated_at(), Some("B"));
        assert!(plan.source().column("B").is_some());
        assert!(plan.terminal().column("D").is_some());
    }

    #[test]
    fn test_unexportable_terminal_exports_nothing() {
        let pipeline = Pipeline::new(Schema::new()).with_stage(stage("A", false));
        let plan = PipelineWalker::walk(&pipeline);
        assert!(plan.is_empty());
        assert_eq!(plan.state(), WalkState::StoppedAtUnexportable(0));
        assert!(plan.source().column("A").is_some());
    }

    #[test]
    fn test_push_terminal_moves_terminal_view() {
        let pipeline = Pipeline::new(Schema::new()).with_stage(stage("A", true));
        let scorer = stage("Scorer", true);
        let mut plan = PipelineWalker::walk(&pipeline);
        plan.push_terminal(&scorer);
        assert_eq!(plan.stage_names(), vec!["A", "Scorer"]);
        assert!(plan.terminal().column("Scorer").is_some());
    }
}
