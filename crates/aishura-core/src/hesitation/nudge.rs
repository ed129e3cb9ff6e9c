//! Nudge catalog.
//!
//! Each nudge type maps to a small fixed set of candidate messages; one
//! is chosen uniformly at random per triggered episode. Selection takes
//! a caller-supplied RNG so tests can seed it and assert deterministic
//! choice.

use rand::Rng;
use serde::{Deserialize, Serialize};
use strum::EnumIter;

/// The hesitation signal a nudge responds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "snake_case")]
pub enum NudgeKind {
    /// The first idle window elapsed while a draft was in progress.
    Pause,
    /// The longer idle window elapsed.
    ExtendedPause,
    /// Repeated backspacing over a substantial draft.
    Deletion,
}

const PAUSE_MESSAGES: &[&str] = &[
    "Take your time. Whatever you're weighing up, there's no wrong way to start.",
    "No rush at all. Sometimes it helps to type the messy version first; we can shape it together.",
    "Still thinking it over? Even a single word about what's on your mind gives us somewhere to begin.",
];

const EXTENDED_PAUSE_MESSAGES: &[&str] = &[
    "I'm still here with you. Naming the hardest part out loud often makes it smaller. Want to try?",
    "It's okay if this feels big. What's one small piece of it we could look at first?",
    "Whenever you're ready. If it helps, tell me what you'd say to a friend in your situation.",
];

const DELETION_MESSAGES: &[&str] = &[
    "I noticed you rewording that. The rough version is more than good enough for me.",
    "You don't need the perfect phrasing here. I'd genuinely like to hear the unpolished thought.",
    "Second-guessing the words? Send it as it is; we can untangle it together.",
];

/// The fixed candidate pool for a nudge type.
pub fn candidates(kind: NudgeKind) -> &'static [&'static str] {
    match kind {
        NudgeKind::Pause => PAUSE_MESSAGES,
        NudgeKind::ExtendedPause => EXTENDED_PAUSE_MESSAGES,
        NudgeKind::Deletion => DELETION_MESSAGES,
    }
}

/// Chooses one candidate uniformly at random from the type's pool.
pub fn pick<R: Rng + ?Sized>(kind: NudgeKind, rng: &mut R) -> &'static str {
    let pool = candidates(kind);
    pool[rng.gen_range(0..pool.len())]
}
