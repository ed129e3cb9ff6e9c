//! Greeting selection.
//!
//! Picks one of several canned opening paragraphs keyed by coarse
//! matches on the persona's self-reported emotional state.

use aishura_core::persona::Persona;

/// Selects the opening message for a freshly onboarded user.
pub fn greeting_for(persona: &Persona) -> String {
    let state = persona.emotional_state.to_lowercase();
    let goal = persona
        .goals
        .first()
        .map(|g| g.to_string().to_lowercase())
        .unwrap_or_else(|| "your next step".to_string());

    if state.contains("anxious") {
        format!(
            "Hi {name}, I'm really glad you're here. Feeling uncertain about {goal} is \
             completely normal; it usually means you care about getting it right. We'll \
             take this one small, concrete step at a time, starting wherever feels \
             easiest. What's sitting heaviest on your mind today?",
            name = persona.display_name
        )
    } else if state.contains("excited") {
        format!(
            "Hi {name}! I love the energy, so let's put it to work on {goal}. You already \
             know the {industry} world better than you might give yourself credit for. \
             What would make the next month feel like a win?",
            name = persona.display_name,
            industry = persona.industry
        )
    } else {
        format!(
            "Hi {name}, welcome. You mentioned {goal}, and that's a great place to start; \
             being {stage} gives us plenty to build on. Tell me a bit about where \
             things stand right now, and we'll map out what comes next together.",
            name = persona.display_name,
            stage = persona.career_stage.to_string().to_lowercase()
        )
    }
}
