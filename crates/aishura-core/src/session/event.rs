use serde::{Deserialize, Serialize};

use crate::hesitation::NudgeKind;

/// High-level notifications published when session state changes.
///
/// The store itself stays synchronous; the application layer publishes
/// these over a broadcast channel so UI layers can re-render without
/// polling transcripts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A fresh session was created and made active.
    SessionCreated { session_id: String },
    /// The active session changed.
    SessionSelected { session_id: String },
    /// A session was removed.
    SessionDeleted { session_id: String },
    /// A session's title was overwritten.
    SessionRenamed { session_id: String, title: String },
    /// A turn was appended to the session's transcript.
    TranscriptChanged { session_id: String },
    /// A hesitation nudge was inserted into the transcript.
    NudgeEmitted {
        session_id: String,
        kind: NudgeKind,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serializes_tagged() {
        let event = SessionEvent::NudgeEmitted {
            session_id: "s1".to_string(),
            kind: NudgeKind::Pause,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""type":"nudge_emitted""#));
        assert!(json.contains(r#""kind":"pause""#));
    }
}
