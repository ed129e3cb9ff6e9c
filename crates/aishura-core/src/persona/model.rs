//! Persona domain model.
//!
//! Captures who the user is in career terms: where they are, what they
//! do, what they want, and how they feel about it right now.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Where the user stands in their career.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "title_case")]
pub enum CareerStage {
    Student,
    EarlyCareer,
    MidCareer,
    Senior,
    Transitioning,
    Returning,
}

/// What the user wants out of the guidance.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "title_case")]
pub enum CareerGoal {
    FindFirstJob,
    SwitchIndustry,
    GetPromoted,
    GrowSkills,
    StartBusiness,
    FindMentor,
}

/// The structured profile collected during onboarding.
///
/// The emotional state stays a free string: greeting selection and the
/// gateway's tone prompt only ever do coarse substring matches on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Persona {
    /// Name the user wants to be addressed by
    pub display_name: String,
    /// Free-form location
    pub location: String,
    /// Free-form industry or field
    pub industry: String,
    /// Career stage (single select)
    pub career_stage: CareerStage,
    /// Goals (multi select, at least one)
    pub goals: Vec<CareerGoal>,
    /// Self-reported emotional state (e.g. "Anxious but hopeful")
    pub emotional_state: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_display_is_title_case() {
        assert_eq!(CareerStage::EarlyCareer.to_string(), "Early Career");
        assert_eq!(CareerGoal::SwitchIndustry.to_string(), "Switch Industry");
    }

    #[test]
    fn test_persona_serializes_camel_case() {
        let persona = Persona {
            display_name: "Kai".to_string(),
            location: "Lisbon".to_string(),
            industry: "Design".to_string(),
            career_stage: CareerStage::MidCareer,
            goals: vec![CareerGoal::SwitchIndustry],
            emotional_state: "Excited".to_string(),
        };
        let json = serde_json::to_string(&persona).unwrap();
        assert!(json.contains(r#""displayName":"Kai""#));
        assert!(json.contains(r#""careerStage":"mid_career""#));
    }
}
