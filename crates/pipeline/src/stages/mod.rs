//! Stage implementations for the planning pipeline.
//!
//! This module contains the four concrete stages that make up the
//! ski trip StagePipeline, in execution order.

pub mod weather;
pub mod resort;
pub mod gear;
pub mod planner;

// Re-export for convenience
pub use weather::WeatherStage;
pub use resort::ResortStage;
pub use gear::GearStage;
pub use planner::PlannerStage;

/// Test helper: a Whistler/intermediate state with the given fields written
/// as `<fieldName>` placeholders.
#[cfg(test)]
pub(crate) fn state_through(fields: &[trip_model::ContentField]) -> trip_model::PlanningState {
    use trip_model::{PlanningState, StateUpdate, TranscriptEntry};

    let mut state = PlanningState::new("Whistler", "intermediate");
    for field in fields {
        let text = format!("<{field}>");
        state.apply(StateUpdate {
            field: *field,
            text: text.clone(),
            entry: TranscriptEntry {
                stage: trip_model::StageKind::Weather,
                system_instruction: String::new(),
                user_instruction: String::new(),
                response: text,
            },
        });
    }
    state
}
