//! Stage 1: weather and snow conditions.
//!
//! The first stage in the pipeline. It reads only the trip inputs, so it
//! can never fail on a missing field.

use crate::traits::Stage;
use trip_model::{ContentField, PlanningState, StageKind};

const SYSTEM_INSTRUCTION: &str = "You are a mountain weather analyst who specializes in \
ski conditions. Give practical, safety-minded assessments that a skier can act on.";

/// Produces `weatherInfo` from the location and skill level.
pub struct WeatherStage;

impl Stage for WeatherStage {
    fn kind(&self) -> StageKind {
        StageKind::Weather
    }

    fn writes(&self) -> ContentField {
        ContentField::WeatherInfo
    }

    fn system_instruction(&self) -> &str {
        SYSTEM_INSTRUCTION
    }

    fn user_instruction(&self, state: &PlanningState) -> trip_model::Result<String> {
        let location = state.location();
        let skill_level = state.skill_level();
        Ok(format!(
            "Analyze the ski weather conditions for {location} for a {skill_level} skier.\n\n\
             Cover:\n\
             - Snow conditions (base depth, recent snowfall, snow quality)\n\
             - Temperature range through the day\n\
             - Wind speed and its effect on lifts and exposed terrain\n\
             - Visibility\n\
             - Safety notes and advisories relevant to a {skill_level} skier"
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weather_instruction_uses_trip_inputs() {
        let state = PlanningState::new("Aspen", "beginner");
        let instruction = WeatherStage.user_instruction(&state).unwrap();

        assert!(instruction.contains("Aspen"));
        assert!(instruction.contains("beginner skier"));
        assert!(instruction.contains("Visibility"));
    }

    #[test]
    fn test_weather_stage_owns_weather_info() {
        assert_eq!(WeatherStage.kind(), StageKind::Weather);
        assert_eq!(WeatherStage.writes(), ContentField::WeatherInfo);
        assert!(!WeatherStage.system_instruction().is_empty());
    }
}
