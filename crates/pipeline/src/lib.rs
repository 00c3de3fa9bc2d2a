//! Multi-stage generation pipeline for ski trip planning.
//!
//! This crate provides:
//! - Stage trait and the four ski trip stages
//! - StagePipeline for running stages in order over a PlanningState
//! - RunContext for tagging the logs of one run
//!
//! ## Architecture
//! The pipeline processes a trip request in stages:
//! 1. Weather analyzes conditions at the location
//! 2. Resort picks resorts given the weather
//! 3. Gear suggests equipment for those resorts and conditions
//! 4. Planner synthesizes everything into the final plan
//!
//! Each stage reads only fields written by earlier stages and writes exactly
//! one field of its own.
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{RunContext, StagePipeline};
//!
//! let pipeline = StagePipeline::ski_trip();
//! let state = pipeline
//!     .run("Aspen", "beginner", executor.as_ref(), &RunContext::new("cli"))
//!     .await?;
//! let result = trip_model::PlanningResult::from(state);
//! ```

pub mod context;
pub mod error;
pub mod stage_pipeline;
pub mod stages;
pub mod traits;

// Re-export main types
pub use context::RunContext;
pub use error::PipelineError;
pub use stage_pipeline::StagePipeline;
pub use traits::Stage;
