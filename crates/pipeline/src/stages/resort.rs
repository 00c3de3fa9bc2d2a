//! Stage 2: resort recommendations.

use crate::traits::Stage;
use trip_model::{ContentField, PlanningState, StageKind};

const SYSTEM_INSTRUCTION: &str = "You are an experienced ski travel advisor with detailed \
knowledge of resorts, their terrain and their facilities.";

/// Picks 2-3 named resorts, taking the weather report into account.
pub struct ResortStage;

impl Stage for ResortStage {
    fn kind(&self) -> StageKind {
        StageKind::Resort
    }

    fn writes(&self) -> ContentField {
        ContentField::ResortRecommendations
    }

    fn system_instruction(&self) -> &str {
        SYSTEM_INSTRUCTION
    }

    fn user_instruction(&self, state: &PlanningState) -> trip_model::Result<String> {
        let weather_info = state.require(ContentField::WeatherInfo)?;
        let location = state.location();
        let skill_level = state.skill_level();
        Ok(format!(
            "Recommend 2-3 ski resorts in or near {location} for a {skill_level} skier.\n\n\
             Current weather conditions:\n{weather_info}\n\n\
             For each resort give its name, why it suits a {skill_level} skier, \
             the terrain worth focusing on, and how today's conditions affect the choice."
        ))
    }
}
