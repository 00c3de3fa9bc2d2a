//! Text generation client for the ski trip planner.
//!
//! This crate provides the single capability the planning pipeline needs
//! from a language model: take a system instruction and a user instruction,
//! return generated text. It handles:
//! - The `PromptExecutor` trait the pipeline is written against
//! - A Bedrock Converse API implementation (`BedrockClient`)
//! - Error classification for generation failures

use async_trait::async_trait;
use thiserror::Error;

mod bedrock;

pub use bedrock::{BedrockClient, BedrockConfig, DEFAULT_MODEL_ID, DEFAULT_REGION};

/// Errors that can occur when asking the model for text
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("No Bedrock API key configured")]
    MissingCredentials,

    #[error("System and user instructions must both be non-empty")]
    EmptyInstruction,

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Bedrock API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Invalid Bedrock endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Invalid response from model: {0}")]
    InvalidResponse(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GenerationError {
    /// Whether the failure is likely to clear on its own (network faults,
    /// throttling, server-side errors).
    ///
    /// Nothing in this workspace retries; the flag only lets callers and
    /// logs tell transient faults from configuration problems.
    pub fn is_transient(&self) -> bool {
        match self {
            GenerationError::Network(_) => true,
            GenerationError::Api { status, .. } => *status == 429 || *status >= 500,
            GenerationError::MissingCredentials
            | GenerationError::EmptyInstruction
            | GenerationError::InvalidEndpoint(_)
            | GenerationError::InvalidResponse(_)
            | GenerationError::Json(_) => false,
        }
    }
}

/// Something that turns a pair of instructions into generated text.
///
/// Implementations must be shareable across concurrent pipeline runs.
#[async_trait]
pub trait PromptExecutor: Send + Sync {
    /// Generate text for the given instructions.
    ///
    /// # Errors
    /// Any fault in the underlying model call surfaces as a `GenerationError`.
    async fn execute(
        &self,
        system_instruction: &str,
        user_instruction: &str,
    ) -> Result<String, GenerationError>;
}

/// Reject empty instructions before any work is done.
pub fn check_instructions(
    system_instruction: &str,
    user_instruction: &str,
) -> Result<(), GenerationError> {
    if system_instruction.trim().is_empty() || user_instruction.trim().is_empty() {
        return Err(GenerationError::EmptyInstruction);
    }
    Ok(())
}
