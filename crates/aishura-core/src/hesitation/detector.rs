//! Composition-episode state machine.

use super::nudge::NudgeKind;
use crate::config::HesitationConfig;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where the current composition episode stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No in-progress text.
    Idle,
    /// Text length is above the composition threshold.
    Composing,
    /// A nudge has been emitted this episode.
    NudgeShown,
}

/// Which idle timer fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdleStage {
    /// The first (shorter) idle window elapsed.
    First,
    /// The second (longer) idle window elapsed.
    Second,
}

/// Counters forwarded to the completion gateway as part of the user
/// context, and surfaced to callers for inspection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HesitationSnapshot {
    /// Backspace-driven shrink events since the last reset.
    pub deletion_count: u32,
    /// Timestamp of the last edit, if any.
    pub last_edit_at: Option<DateTime<Utc>>,
    /// Whether a nudge has already been shown this episode.
    pub nudge_shown: bool,
}

/// Tracks one composition episode: the span between two submissions.
///
/// An episode emits at most one nudge, across all kinds. The guard is
/// cleared only by [`reset`](Self::reset), i.e. on submit. Clearing
/// the composition box, even by backspacing to empty, returns the phase
/// to `Idle` but keeps the guard, so re-composing without submitting
/// cannot produce a second nudge.
#[derive(Debug)]
pub struct HesitationDetector {
    config: HesitationConfig,
    phase: Phase,
    prev_len: usize,
    deletion_count: u32,
    last_edit_at: Option<DateTime<Utc>>,
    nudge_shown: bool,
}

impl HesitationDetector {
    pub fn new(config: HesitationConfig) -> Self {
        Self {
            config,
            phase: Phase::Idle,
            prev_len: 0,
            deletion_count: 0,
            last_edit_at: None,
            nudge_shown: false,
        }
    }

    /// Consumes one raw edit event (the draft's new character length).
    ///
    /// Returns `Some(NudgeKind::Deletion)` when this edit pushes the
    /// shrink count past the configured threshold and no nudge has been
    /// shown this episode.
    pub fn record_edit(&mut self, len: usize) -> Option<NudgeKind> {
        let prev = self.prev_len;
        self.prev_len = len;
        self.last_edit_at = Some(Utc::now());

        // Shrinks only count when the previous draft was long enough to
        // rule out trivial corrections.
        if len < prev && prev > self.config.shrink_floor {
            self.deletion_count += 1;
        }

        if len == 0 {
            // Draft cleared without submitting: episode continues, the
            // guard stays armed until reset().
            self.phase = Phase::Idle;
            return None;
        }

        if self.phase == Phase::Idle && len > self.config.min_compose_len {
            self.phase = Phase::Composing;
        }

        if self.deletion_count > self.config.shrink_threshold {
            self.deletion_count = 0;
            return self.arm_nudge(NudgeKind::Deletion);
        }

        None
    }

    /// Reacts to an elapsed idle timer.
    ///
    /// Returns the pause-type nudge for the stage, or `None` when the
    /// episode's nudge has already been spent or nothing is being composed.
    pub fn idle_elapsed(&mut self, stage: IdleStage) -> Option<NudgeKind> {
        if self.phase != Phase::Composing {
            return None;
        }
        let kind = match stage {
            IdleStage::First => NudgeKind::Pause,
            IdleStage::Second => NudgeKind::ExtendedPause,
        };
        self.arm_nudge(kind)
    }

    fn arm_nudge(&mut self, kind: NudgeKind) -> Option<NudgeKind> {
        if self.nudge_shown {
            return None;
        }
        self.nudge_shown = true;
        self.phase = Phase::NudgeShown;
        Some(kind)
    }

    /// Ends the episode. Called on message submission, which clears the
    /// composition text, the counters, and the nudge guard.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.prev_len = 0;
        self.deletion_count = 0;
        self.last_edit_at = None;
        self.nudge_shown = false;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the driver should keep idle timers scheduled.
    pub fn wants_idle_timer(&self) -> bool {
        self.phase == Phase::Composing && !self.nudge_shown
    }

    /// Current counters, for the gateway context bundle.
    pub fn snapshot(&self) -> HesitationSnapshot {
        HesitationSnapshot {
            deletion_count: self.deletion_count,
            last_edit_at: self.last_edit_at,
            nudge_shown: self.nudge_shown,
        }
    }

    pub fn config(&self) -> &HesitationConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> HesitationDetector {
        HesitationDetector::new(HesitationConfig::default())
    }

    #[test]
    fn test_short_draft_stays_idle() {
        let mut d = detector();
        assert_eq!(d.record_edit(2), None);
        assert_eq!(d.phase(), Phase::Idle);
    }

    #[test]
    fn test_composing_above_threshold() {
        let mut d = detector();
        d.record_edit(6);
        assert_eq!(d.phase(), Phase::Composing);
        assert!(d.wants_idle_timer());
    }

    #[test]
    fn test_idle_elapsed_emits_once() {
        let mut d = detector();
        d.record_edit(6);
        assert_eq!(d.idle_elapsed(IdleStage::First), Some(NudgeKind::Pause));
        // The longer stage firing afterwards is swallowed by the guard.
        assert_eq!(d.idle_elapsed(IdleStage::Second), None);
        assert_eq!(d.phase(), Phase::NudgeShown);
    }

    #[test]
    fn test_idle_without_composition_is_ignored() {
        let mut d = detector();
        assert_eq!(d.idle_elapsed(IdleStage::First), None);
    }

    #[test]
    fn test_shrinks_below_floor_not_counted() {
        let mut d = detector();
        d.record_edit(3);
        d.record_edit(2);
        d.record_edit(1);
        assert_eq!(d.snapshot().deletion_count, 0);
    }

    #[test]
    fn test_deletion_nudge_after_threshold_and_counter_reset() {
        let mut d = detector();
        assert_eq!(d.record_edit(10), None);
        assert_eq!(d.record_edit(9), None); // shrink 1
        assert_eq!(d.record_edit(8), None); // shrink 2
        assert_eq!(d.record_edit(7), Some(NudgeKind::Deletion)); // shrink 3
        assert_eq!(d.snapshot().deletion_count, 0);
    }

    #[test]
    fn test_no_second_nudge_same_episode() {
        let mut d = detector();
        d.record_edit(10);
        d.record_edit(9);
        d.record_edit(8);
        assert_eq!(d.record_edit(7), Some(NudgeKind::Deletion));
        // Keep shrinking well past another threshold crossing.
        assert_eq!(d.record_edit(6), None);
        assert_eq!(d.record_edit(5), None);
        assert_eq!(d.record_edit(4), None);
        assert_eq!(d.idle_elapsed(IdleStage::First), None);
    }

    #[test]
    fn test_guard_survives_clearing_the_draft() {
        let mut d = detector();
        d.record_edit(6);
        assert_eq!(d.idle_elapsed(IdleStage::First), Some(NudgeKind::Pause));
        // Backspace everything away, then start over without submitting.
        d.record_edit(0);
        d.record_edit(8);
        assert_eq!(d.idle_elapsed(IdleStage::First), None);
    }

    #[test]
    fn test_reset_starts_a_fresh_episode() {
        let mut d = detector();
        d.record_edit(6);
        assert_eq!(d.idle_elapsed(IdleStage::First), Some(NudgeKind::Pause));
        d.reset();
        assert_eq!(d.snapshot(), HesitationSnapshot::default());
        d.record_edit(6);
        assert_eq!(d.idle_elapsed(IdleStage::First), Some(NudgeKind::Pause));
    }

    #[test]
    fn test_clearing_draft_returns_to_idle() {
        let mut d = detector();
        d.record_edit(6);
        d.record_edit(0);
        assert_eq!(d.phase(), Phase::Idle);
        assert!(!d.wants_idle_timer());
    }
}
