//! Error types for pipeline runs.

use llm_client::GenerationError;
use thiserror::Error;
use trip_model::{ModelError, StageKind};

/// Errors that abort a pipeline run
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The model call of a stage failed
    #[error("Stage {stage} failed: {source}")]
    Generation {
        stage: StageKind,
        #[source]
        source: GenerationError,
    },

    /// A stage ran before one of its inputs was written
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("Pipeline has no stages")]
    Empty,
}

impl PipelineError {
    /// The stage that failed, if the failure came from a model call.
    pub fn stage(&self) -> Option<StageKind> {
        match self {
            PipelineError::Generation { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}
