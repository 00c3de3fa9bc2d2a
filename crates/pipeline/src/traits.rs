//! Core traits for the planning pipeline.
//!
//! This module defines the Stage trait: one prompt call that reads the
//! accumulated state and produces a single content field.

use async_trait::async_trait;
use llm_client::PromptExecutor;
use trip_model::{ContentField, PlanningState, StageKind, StateUpdate, TranscriptEntry};

use crate::error::PipelineError;

/// Core trait for a generation stage.
///
/// All stages must implement this trait to be used in the StagePipeline.
///
/// ## Design Note
/// - Stages are pure with respect to `PlanningState`: they borrow it and
///   return a `StateUpdate` rather than mutating it
/// - `Send + Sync` lets one stage list serve concurrent runs
#[async_trait]
pub trait Stage: Send + Sync {
    /// Which stage this is (for logging and transcripts)
    fn kind(&self) -> StageKind;

    /// The content field this stage owns
    fn writes(&self) -> ContentField;

    /// Fixed role description sent as the system instruction
    fn system_instruction(&self) -> &str;

    /// Build the user instruction from the fields this stage reads.
    ///
    /// # Errors
    /// `ModelError::MissingField` if an input field has not been written.
    fn user_instruction(&self, state: &PlanningState) -> trip_model::Result<String>;

    /// Run the stage: build both instructions, call the executor once and
    /// wrap the reply in a `StateUpdate`.
    async fn run(
        &self,
        state: &PlanningState,
        executor: &dyn PromptExecutor,
    ) -> Result<StateUpdate, PipelineError> {
        let system_instruction = self.system_instruction().to_string();
        let user_instruction = self.user_instruction(state)?;

        let response = executor
            .execute(&system_instruction, &user_instruction)
            .await
            .map_err(|source| PipelineError::Generation {
                stage: self.kind(),
                source,
            })?;

        Ok(StateUpdate {
            field: self.writes(),
            text: response.clone(),
            entry: TranscriptEntry {
                stage: self.kind(),
                system_instruction,
                user_instruction,
                response,
            },
        })
    }
}
