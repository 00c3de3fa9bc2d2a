//! Stage 4: the final itinerary.
//!
//! Reads everything the earlier stages produced and synthesizes it into
//! one plan. This is the only stage whose output `plan_trip` returns.

use crate::traits::Stage;
use trip_model::{ContentField, PlanningState, StageKind};

const SYSTEM_INSTRUCTION: &str = "You are a ski trip planner. Combine weather, resort and \
equipment research into a clear, prioritized itinerary.";

/// Produces `finalPlan` from all three earlier fields.
pub struct PlannerStage;

impl Stage for PlannerStage {
    fn kind(&self) -> StageKind {
        StageKind::Planner
    }

    fn writes(&self) -> ContentField {
        ContentField::FinalPlan
    }

    fn system_instruction(&self) -> &str {
        SYSTEM_INSTRUCTION
    }

    fn user_instruction(&self, state: &PlanningState) -> trip_model::Result<String> {
        let weather_info = state.require(ContentField::WeatherInfo)?;
        let resort_recommendations = state.require(ContentField::ResortRecommendations)?;
        let gear_suggestions = state.require(ContentField::GearSuggestions)?;
        let location = state.location();
        let skill_level = state.skill_level();
        Ok(format!(
            "Create a complete ski trip plan to {location} for a {skill_level} skier.\n\n\
             Weather:\n{weather_info}\n\n\
             Resorts:\n{resort_recommendations}\n\n\
             Gear:\n{gear_suggestions}\n\n\
             Include a day-by-day itinerary, the top priorities for the trip, \
             timing advice based on the conditions, and safety reminders."
        ))
    }
}
