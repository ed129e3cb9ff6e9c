//! Hesitation detection.
//!
//! Infers, from raw composition-box edits, when the user appears stuck,
//! and produces at most one nudge per composition episode. The state
//! machine here is pure and timer-agnostic; `aishura-application` drives
//! it from real (cancellable) idle timers.

mod detector;
mod nudge;

// Re-export public API
pub use detector::{HesitationDetector, HesitationSnapshot, IdleStage, Phase};
pub use nudge::{NudgeKind, candidates, pick};
