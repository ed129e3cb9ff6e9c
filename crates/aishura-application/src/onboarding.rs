//! Onboarding wizard.
//!
//! A short linear flow collecting the persona the conversation service
//! forwards to the completion gateway. Steps validate only for presence:
//! non-empty trimmed text for free-text fields, a selection for the
//! select fields.

use aishura_core::error::{AishuraError, Result};
use aishura_core::persona::{CareerGoal, CareerStage, Persona};
use strum::Display;

/// The wizard's steps, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum OnboardingStep {
    DisplayName,
    Location,
    Industry,
    CareerStage,
    Goals,
    EmotionalState,
}

const STEPS: &[OnboardingStep] = &[
    OnboardingStep::DisplayName,
    OnboardingStep::Location,
    OnboardingStep::Industry,
    OnboardingStep::CareerStage,
    OnboardingStep::Goals,
    OnboardingStep::EmotionalState,
];

/// Linear step-index wizard producing a [`Persona`].
#[derive(Debug, Clone, Default)]
pub struct OnboardingWizard {
    step: usize,
    display_name: Option<String>,
    location: Option<String>,
    industry: Option<String>,
    career_stage: Option<CareerStage>,
    goals: Vec<CareerGoal>,
    emotional_state: Option<String>,
}

impl OnboardingWizard {
    pub fn new() -> Self {
        Self::default()
    }

    /// The step the wizard is currently on.
    pub fn step(&self) -> OnboardingStep {
        STEPS[self.step.min(STEPS.len() - 1)]
    }

    pub fn is_last_step(&self) -> bool {
        self.step == STEPS.len() - 1
    }

    pub fn set_display_name(&mut self, value: &str) -> Result<()> {
        self.display_name = Some(required_text("display name", value)?);
        Ok(())
    }

    pub fn set_location(&mut self, value: &str) -> Result<()> {
        self.location = Some(required_text("location", value)?);
        Ok(())
    }

    pub fn set_industry(&mut self, value: &str) -> Result<()> {
        self.industry = Some(required_text("industry", value)?);
        Ok(())
    }

    pub fn set_career_stage(&mut self, stage: CareerStage) {
        self.career_stage = Some(stage);
    }

    pub fn set_goals(&mut self, goals: Vec<CareerGoal>) -> Result<()> {
        if goals.is_empty() {
            return Err(AishuraError::invalid_argument("select at least one goal"));
        }
        self.goals = goals;
        Ok(())
    }

    pub fn set_emotional_state(&mut self, value: &str) -> Result<()> {
        self.emotional_state = Some(required_text("emotional state", value)?);
        Ok(())
    }

    /// Advances to the next step.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when the current step has no valid answer yet,
    /// or when already on the last step.
    pub fn next(&mut self) -> Result<()> {
        if !self.step_answered(self.step()) {
            return Err(AishuraError::invalid_argument(format!(
                "step {} is not answered",
                self.step()
            )));
        }
        if self.is_last_step() {
            return Err(AishuraError::invalid_argument("already on the last step"));
        }
        self.step += 1;
        Ok(())
    }

    /// Steps back; a no-op on the first step.
    pub fn back(&mut self) {
        self.step = self.step.saturating_sub(1);
    }

    /// Completes the wizard.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` naming the first unanswered step, if any.
    pub fn finish(self) -> Result<Persona> {
        for step in STEPS {
            if !self.step_answered(*step) {
                return Err(AishuraError::invalid_argument(format!(
                    "step {step} is not answered"
                )));
            }
        }
        // Safe to unwrap: every step was just checked as answered
        Ok(Persona {
            display_name: self.display_name.unwrap(),
            location: self.location.unwrap(),
            industry: self.industry.unwrap(),
            career_stage: self.career_stage.unwrap(),
            goals: self.goals,
            emotional_state: self.emotional_state.unwrap(),
        })
    }

    fn step_answered(&self, step: OnboardingStep) -> bool {
        match step {
            OnboardingStep::DisplayName => self.display_name.is_some(),
            OnboardingStep::Location => self.location.is_some(),
            OnboardingStep::Industry => self.industry.is_some(),
            OnboardingStep::CareerStage => self.career_stage.is_some(),
            OnboardingStep::Goals => !self.goals.is_empty(),
            OnboardingStep::EmotionalState => self.emotional_state.is_some(),
        }
    }
}

fn required_text(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AishuraError::invalid_argument(format!(
            "{field} must not be empty"
        )));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> OnboardingWizard {
        let mut wizard = OnboardingWizard::new();
        wizard.set_display_name("Kai").unwrap();
        wizard.set_location("Lisbon").unwrap();
        wizard.set_industry("Design").unwrap();
        wizard.set_career_stage(CareerStage::MidCareer);
        wizard.set_goals(vec![CareerGoal::SwitchIndustry]).unwrap();
        wizard.set_emotional_state("Anxious but hopeful").unwrap();
        wizard
    }

    #[test]
    fn test_linear_navigation() {
        let mut wizard = filled();
        assert_eq!(wizard.step(), OnboardingStep::DisplayName);
        for _ in 0..5 {
            wizard.next().unwrap();
        }
        assert!(wizard.is_last_step());
        assert!(wizard.next().unwrap_err().is_invalid_argument());
        wizard.back();
        assert_eq!(wizard.step(), OnboardingStep::Goals);
    }

    #[test]
    fn test_next_requires_an_answer() {
        let mut wizard = OnboardingWizard::new();
        assert!(wizard.next().unwrap_err().is_invalid_argument());
        wizard.set_display_name("Kai").unwrap();
        wizard.next().unwrap();
        assert_eq!(wizard.step(), OnboardingStep::Location);
    }

    #[test]
    fn test_whitespace_answers_rejected() {
        let mut wizard = OnboardingWizard::new();
        assert!(wizard.set_display_name("   ").is_err());
        assert!(wizard.set_goals(vec![]).is_err());
    }

    #[test]
    fn test_finish_produces_trimmed_persona() {
        let mut wizard = OnboardingWizard::new();
        wizard.set_display_name("  Kai  ").unwrap();
        wizard.set_location("Lisbon").unwrap();
        wizard.set_industry("Design").unwrap();
        wizard.set_career_stage(CareerStage::Student);
        wizard.set_goals(vec![CareerGoal::FindFirstJob]).unwrap();
        wizard.set_emotional_state("Excited").unwrap();

        let persona = wizard.finish().unwrap();
        assert_eq!(persona.display_name, "Kai");
        assert_eq!(persona.career_stage, CareerStage::Student);
    }

    #[test]
    fn test_finish_names_the_missing_step() {
        let mut wizard = filled();
        wizard.goals.clear();
        let err = wizard.finish().unwrap_err();
        assert!(err.to_string().contains("Goals"));
    }
}
