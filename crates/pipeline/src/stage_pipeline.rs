//! The StagePipeline runs generation stages in order.
//!
//! This module provides the main StagePipeline struct that chains
//! stages together using the builder pattern.

use std::time::Instant;

use llm_client::PromptExecutor;
use tracing::{Instrument, debug, info, warn};
use trip_model::PlanningState;

use crate::context::RunContext;
use crate::error::PipelineError;
use crate::stages::{GearStage, PlannerStage, ResortStage, WeatherStage};
use crate::traits::Stage;

/// Chains stages together into a planning pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = StagePipeline::ski_trip();
/// let state = pipeline
///     .run("Aspen", "beginner", executor.as_ref(), &RunContext::new("cli"))
///     .await?;
/// ```
pub struct StagePipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl StagePipeline {
    /// Create a new empty StagePipeline.
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// The standard ski trip chain: Weather, Resort, Gear, Planner.
    pub fn ski_trip() -> Self {
        Self::new()
            .add_stage(WeatherStage)
            .add_stage(ResortStage)
            .add_stage(GearStage)
            .add_stage(PlannerStage)
    }

    /// Add a stage to the end of the pipeline (builder pattern).
    pub fn add_stage(mut self, stage: impl Stage + 'static) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Run every stage in sequence, starting from a fresh state.
    ///
    /// ## Algorithm
    /// 1. Initialize state with `location` and `skill_level`
    /// 2. For each stage in order:
    ///    a. Run it against the current state
    ///    b. Merge its update into the state
    /// 3. Return the final state
    ///
    /// The first failing stage aborts the run; no partial state is returned.
    pub async fn run(
        &self,
        location: &str,
        skill_level: &str,
        executor: &dyn PromptExecutor,
        context: &RunContext,
    ) -> Result<PlanningState, PipelineError> {
        let span = context.span(location, skill_level);
        self.run_stages(PlanningState::new(location, skill_level), executor)
            .instrument(span)
            .await
    }

    async fn run_stages(
        &self,
        mut state: PlanningState,
        executor: &dyn PromptExecutor,
    ) -> Result<PlanningState, PipelineError> {
        if self.stages.is_empty() {
            return Err(PipelineError::Empty);
        }

        let start_time = Instant::now();
        for stage in &self.stages {
            let stage_start = Instant::now();
            debug!("Running stage: {}", stage.kind());

            let update = match stage.run(&state, executor).await {
                Ok(update) => update,
                Err(e) => {
                    warn!("Stage {} failed after {:.2?}: {}", stage.kind(), stage_start.elapsed(), e);
                    return Err(e);
                }
            };
            state.apply(update);

            debug!(
                "Stage {} complete in {:.2?} (wrote {})",
                stage.kind(),
                stage_start.elapsed(),
                stage.writes()
            );
        }

        info!(
            "Pipeline finished {} stages in {:.2?}",
            self.stages.len(),
            start_time.elapsed()
        );
        Ok(state)
    }
}

impl Default for StagePipeline {
    fn default() -> Self {
        Self::ski_trip()
    }
}
