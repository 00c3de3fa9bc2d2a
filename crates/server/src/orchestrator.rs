//! # Trip Planner
//!
//! This module is the entry point for a planning request:
//! 1. Open a run context for log tagging
//! 2. Run the four-stage pipeline (weather, resort, gear, planner)
//! 3. Project the final state into a `PlanningResult`
//!
//! Failures of any kind are collapsed here: `plan_trip` returns
//! `FALLBACK_PLAN` and `get_detailed_plan` returns `None`. The cause is
//! logged, not returned.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{error, info};

use llm_client::{BedrockClient, BedrockConfig, PromptExecutor};
use pipeline::{PipelineError, RunContext, StagePipeline};
use trip_model::{PlanningResult, PlanningState};

/// Returned by `plan_trip` when no plan could be generated
pub const FALLBACK_PLAN: &str =
    "Unable to generate ski plan. Please check your AWS Bedrock API key and region settings.";

/// Request entry point that runs the planning pipeline
#[derive(Clone)]
pub struct TripPlanner {
    executor: Arc<dyn PromptExecutor>,
    pipeline: Arc<StagePipeline>,
}

impl TripPlanner {
    /// Create a planner around any prompt executor.
    pub fn new(executor: Arc<dyn PromptExecutor>) -> Self {
        Self {
            executor,
            pipeline: Arc::new(StagePipeline::ski_trip()),
        }
    }

    /// Create a planner backed by Bedrock.
    pub fn from_config(config: BedrockConfig) -> Result<Self> {
        let client = BedrockClient::new(config).context("Failed to create Bedrock client")?;
        Ok(Self::new(Arc::new(client)))
    }

    /// Main entry point: get only the final plan text.
    ///
    /// # Returns
    /// The generated plan, or `FALLBACK_PLAN` if any stage failed
    pub async fn plan_trip(&self, location: &str, skill_level: &str) -> String {
        self.plan_trip_with_context(location, skill_level, &RunContext::new("library"))
            .await
    }

    pub async fn plan_trip_with_context(
        &self,
        location: &str,
        skill_level: &str,
        context: &RunContext,
    ) -> String {
        match self.get_detailed_plan_with_context(location, skill_level, context).await {
            Some(result) => result.final_plan,
            None => FALLBACK_PLAN.to_string(),
        }
    }

    /// Get every intermediate artifact of the plan.
    ///
    /// # Returns
    /// `Some(PlanningResult)` on success, `None` on any failure
    pub async fn get_detailed_plan(
        &self,
        location: &str,
        skill_level: &str,
    ) -> Option<PlanningResult> {
        self.get_detailed_plan_with_context(location, skill_level, &RunContext::new("library"))
            .await
    }

    pub async fn get_detailed_plan_with_context(
        &self,
        location: &str,
        skill_level: &str,
        context: &RunContext,
    ) -> Option<PlanningResult> {
        match self.run(location, skill_level, context).await {
            Ok(state) => Some(PlanningResult::from(state)),
            Err(e) => {
                let stage = e.stage().map(|s| s.as_str()).unwrap_or("none");
                let e = anyhow::Error::from(e);
                error!(
                    request_id = %context.request_id(),
                    stage,
                    "Failed to generate ski plan: {:#}",
                    e
                );
                None
            }
        }
    }

    /// Run the pipeline and keep the full state, transcript included.
    ///
    /// Unlike the entry points above this surfaces the error itself.
    pub async fn run(
        &self,
        location: &str,
        skill_level: &str,
        context: &RunContext,
    ) -> Result<PlanningState, PipelineError> {
        let start_time = Instant::now();
        info!(
            "Planning trip: request_id={}, origin={}, location={}, skill_level={}",
            context.request_id(),
            context.origin(),
            location,
            skill_level
        );

        let state = self
            .pipeline
            .run(location, skill_level, self.executor.as_ref(), context)
            .await?;

        info!(
            "Total time to plan trip {}: {:.2?}",
            context.request_id(),
            start_time.elapsed()
        );
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use llm_client::GenerationError;

    // ============================================================================
    // Test Executors
    // ============================================================================

    /// Deterministic executor: echoes a fixed prefix of the user instruction
    struct StubExecutor;

    #[async_trait]
    impl PromptExecutor for StubExecutor {
        async fn execute(&self, _system: &str, user: &str) -> Result<String, GenerationError> {
            Ok(format!("reply to: {}", user.lines().next().unwrap_or_default()))
        }
    }

    /// Always fails the way a missing credential does
    struct NoCredentialsExecutor;

    #[async_trait]
    impl PromptExecutor for NoCredentialsExecutor {
        async fn execute(&self, _system: &str, _user: &str) -> Result<String, GenerationError> {
            Err(GenerationError::MissingCredentials)
        }
    }

    fn stub_planner() -> TripPlanner {
        TripPlanner::new(Arc::new(StubExecutor))
    }

    // ============================================================================
    // Unit Tests
    // ============================================================================

    #[tokio::test]
    async fn test_plan_trip_returns_final_plan() {
        let plan = stub_planner().plan_trip("Aspen", "beginner").await;

        assert!(plan.starts_with("reply to: Create a complete ski trip plan to Aspen"));
    }

    #[tokio::test]
    async fn test_detailed_plan_passes_inputs_through() {
        let result = stub_planner()
            .get_detailed_plan("Val d'Isère", "expert")
            .await
            .expect("plan should succeed");

        assert_eq!(result.location, "Val d'Isère");
        assert_eq!(result.skill_level, "expert");
        assert!(!result.weather_info.is_empty());
        assert!(!result.resort_recommendations.is_empty());
        assert!(!result.gear_suggestions.is_empty());
        assert!(!result.final_plan.is_empty());
    }

    #[tokio::test]
    async fn test_missing_credentials_yields_fallback() {
        let planner = TripPlanner::new(Arc::new(NoCredentialsExecutor));

        assert_eq!(planner.plan_trip("Aspen", "beginner").await, FALLBACK_PLAN);
        assert!(planner.get_detailed_plan("Aspen", "beginner").await.is_none());
    }

    #[tokio::test]
    async fn test_unconfigured_bedrock_yields_fallback() {
        let planner = TripPlanner::from_config(BedrockConfig::default()).unwrap();

        assert_eq!(planner.plan_trip("Aspen", "beginner").await, FALLBACK_PLAN);
        assert!(planner.get_detailed_plan("Aspen", "beginner").await.is_none());
    }

    #[tokio::test]
    async fn test_sequential_runs_are_identical() {
        let planner = stub_planner();

        let first = planner.get_detailed_plan("Verbier", "intermediate").await;
        let second = planner.get_detailed_plan("Verbier", "intermediate").await;

        assert!(first.is_some());
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_run_keeps_transcript() {
        let state = stub_planner()
            .run("Aspen", "beginner", &RunContext::new("test"))
            .await
            .unwrap();

        assert_eq!(state.transcript().len(), 4);
    }
}
