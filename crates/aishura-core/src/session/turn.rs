//! Transcript entry types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Author of a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnAuthor {
    /// Message from the user.
    User,
    /// Message from the assistant, including system-generated nudges.
    Assistant,
}

/// A single entry in a session transcript.
///
/// Turns are immutable once appended; a transcript is only ever extended,
/// and display order equals append order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    /// Unique identifier (UUID format), unique within a session.
    pub id: String,
    /// Who authored this turn.
    pub author: TurnAuthor,
    /// Message content. May embed lightweight markup for links and action blocks.
    pub text: String,
    /// Timestamp when the turn was created.
    pub created_at: DateTime<Utc>,
    /// Marks system-generated hesitation prompts. Nudges are not replies
    /// to a submitted message and never trigger a gateway call.
    #[serde(default)]
    pub is_nudge: bool,
}

impl Turn {
    fn build(author: TurnAuthor, text: String, is_nudge: bool) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            author,
            text,
            created_at: Utc::now(),
            is_nudge,
        }
    }

    /// Creates a user-authored turn.
    pub fn user(text: impl Into<String>) -> Self {
        Self::build(TurnAuthor::User, text.into(), false)
    }

    /// Creates an assistant-authored turn.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::build(TurnAuthor::Assistant, text.into(), false)
    }

    /// Creates a system-generated nudge turn.
    pub fn nudge(text: impl Into<String>) -> Self {
        Self::build(TurnAuthor::Assistant, text.into(), true)
    }
}
