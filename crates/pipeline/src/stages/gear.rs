//! Stage 3: equipment list.

use crate::traits::Stage;
use trip_model::{ContentField, PlanningState, StageKind};

const SYSTEM_INSTRUCTION: &str = "You are a ski equipment specialist who fits skiers with \
the right gear for their ability and the conditions they will face.";

/// Suggests categorized gear for the chosen resorts and conditions.
pub struct GearStage;

impl Stage for GearStage {
    fn kind(&self) -> StageKind {
        StageKind::Gear
    }

    fn writes(&self) -> ContentField {
        ContentField::GearSuggestions
    }

    fn system_instruction(&self) -> &str {
        SYSTEM_INSTRUCTION
    }

    fn user_instruction(&self, state: &PlanningState) -> trip_model::Result<String> {
        let weather_info = state.require(ContentField::WeatherInfo)?;
        let resort_recommendations = state.require(ContentField::ResortRecommendations)?;
        let skill_level = state.skill_level();
        Ok(format!(
            "Suggest ski gear for a {skill_level} skier.\n\n\
             Weather conditions:\n{weather_info}\n\n\
             Planned resorts:\n{resort_recommendations}\n\n\
             Organize the list into categories:\n\
             - Clothing and layering\n\
             - Ski equipment (skis, boots, poles), noting what to rent versus bring\n\
             - Safety gear\n\
             - Accessories and comfort items"
        ))
    }
}
