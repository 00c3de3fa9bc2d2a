//! # Trip Model Crate
//!
//! Shared data model for the ski trip planner.
//!
//! ## Main Components
//!
//! - **types**: `PlanningState`, the per-run record threaded through the
//!   stages, and `PlanningResult`, its read-only projection
//! - **error**: Error types for state access
//!
//! ## Example Usage
//!
//! ```ignore
//! use trip_model::{ContentField, PlanningResult, PlanningState};
//!
//! let mut state = PlanningState::new("Aspen", "beginner");
//! state.apply(update_from_weather_stage);
//! let weather = state.require(ContentField::WeatherInfo)?;
//!
//! let result = PlanningResult::from(state);
//! ```

// Public modules
pub mod error;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{ModelError, Result};
pub use types::{
    ContentField,
    PlanningResult,
    PlanningState,
    StageKind,
    StateUpdate,
    TranscriptEntry,
};
