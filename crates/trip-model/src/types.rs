//! Core domain types for a ski trip planning run.
//!
//! `PlanningState` is the record threaded through the four generation
//! stages. Stages never mutate it directly: each one returns a
//! `StateUpdate`, and the pipeline merges updates in order.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::error::{ModelError, Result};

// =============================================================================
// Stage and Field Identifiers
// =============================================================================

/// The four stages of the planning pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageKind {
    Weather,
    Resort,
    Gear,
    Planner,
}

impl StageKind {
    /// Stable lowercase name used in logs and transcripts
    pub fn as_str(&self) -> &'static str {
        match self {
            StageKind::Weather => "weather",
            StageKind::Resort => "resort",
            StageKind::Gear => "gear",
            StageKind::Planner => "planner",
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The content fields of `PlanningState` that stages write.
///
/// Each field has exactly one owning stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContentField {
    WeatherInfo,
    ResortRecommendations,
    GearSuggestions,
    FinalPlan,
}

impl ContentField {
    /// Wire name, matching the camelCase keys of `PlanningResult`
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentField::WeatherInfo => "weatherInfo",
            ContentField::ResortRecommendations => "resortRecommendations",
            ContentField::GearSuggestions => "gearSuggestions",
            ContentField::FinalPlan => "finalPlan",
        }
    }
}

impl fmt::Display for ContentField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Transcript
// =============================================================================

/// Audit record of one completed stage call.
///
/// Transcripts are for debugging only; no stage reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub stage: StageKind,
    pub system_instruction: String,
    pub user_instruction: String,
    pub response: String,
}

// =============================================================================
// Planning State
// =============================================================================

/// Partial state produced by a single stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateUpdate {
    pub field: ContentField,
    pub text: String,
    pub entry: TranscriptEntry,
}

/// The accumulating record for one pipeline run.
///
/// `location` and `skill_level` are fixed at construction. The four content
/// fields start empty and are filled in pipeline order. Writes are tracked
/// separately from content, so an empty reply still counts as written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanningState {
    location: String,
    skill_level: String,
    weather_info: String,
    resort_recommendations: String,
    gear_suggestions: String,
    final_plan: String,
    written: HashSet<ContentField>,
    transcript: Vec<TranscriptEntry>,
}

impl PlanningState {
    /// Create the initial state for a run.
    pub fn new(location: impl Into<String>, skill_level: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            skill_level: skill_level.into(),
            ..Self::default()
        }
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn skill_level(&self) -> &str {
        &self.skill_level
    }

    /// Current value of a content field (empty if not yet written).
    pub fn field(&self, field: ContentField) -> &str {
        match field {
            ContentField::WeatherInfo => &self.weather_info,
            ContentField::ResortRecommendations => &self.resort_recommendations,
            ContentField::GearSuggestions => &self.gear_suggestions,
            ContentField::FinalPlan => &self.final_plan,
        }
    }

    /// Whether a content field has been written by its stage.
    pub fn is_written(&self, field: ContentField) -> bool {
        self.written.contains(&field)
    }

    /// Read a content field that a stage depends on.
    ///
    /// # Errors
    /// `ModelError::MissingField` if the owning stage has not run yet.
    pub fn require(&self, field: ContentField) -> Result<&str> {
        if self.is_written(field) {
            Ok(self.field(field))
        } else {
            Err(ModelError::MissingField { field })
        }
    }

    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    /// Merge a stage's update: overwrite its field and append its transcript entry.
    pub fn apply(&mut self, update: StateUpdate) {
        let slot = match update.field {
            ContentField::WeatherInfo => &mut self.weather_info,
            ContentField::ResortRecommendations => &mut self.resort_recommendations,
            ContentField::GearSuggestions => &mut self.gear_suggestions,
            ContentField::FinalPlan => &mut self.final_plan,
        };
        *slot = update.text;
        self.written.insert(update.field);
        self.transcript.push(update.entry);
    }
}

// =============================================================================
// Planning Result
// =============================================================================

/// Externally visible projection of a finished `PlanningState`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanningResult {
    pub location: String,
    pub skill_level: String,
    pub weather_info: String,
    pub resort_recommendations: String,
    pub gear_suggestions: String,
    pub final_plan: String,
}

impl From<PlanningState> for PlanningResult {
    fn from(state: PlanningState) -> Self {
        Self {
            location: state.location,
            skill_level: state.skill_level,
            weather_info: state.weather_info,
            resort_recommendations: state.resort_recommendations,
            gear_suggestions: state.gear_suggestions,
            final_plan: state.final_plan,
        }
    }
}
