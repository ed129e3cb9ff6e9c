//! Session domain model.

use super::turn::Turn;
use crate::config::SessionConfig;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Title given to a session before its first turn derives one.
pub const PLACEHOLDER_TITLE: &str = "New conversation";

/// One independent chat transcript with its own title and turn history.
///
/// The title is derived from the first appended turn (capped at the
/// configured character limit) unless the user renamed the session
/// before that; after derivation it only changes via an explicit rename.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Unique session identifier (UUID format)
    pub id: String,
    /// Human-readable session title
    pub title: String,
    /// Truncated text of the last turn, for list displays
    pub preview: String,
    /// Ordered transcript; append order equals display order
    pub transcript: Vec<Turn>,
    /// Timestamp when the session was created
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last append
    pub last_activity: DateTime<Utc>,
}

impl Session {
    /// Creates an empty session with a placeholder title.
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title: PLACEHOLDER_TITLE.to_string(),
            preview: String::new(),
            transcript: Vec::new(),
            created_at: now,
            last_activity: now,
        }
    }

    /// Appends a turn, refreshing the preview and, on the very first
    /// turn of an unrenamed session, deriving the title from it.
    pub(crate) fn push_turn(&mut self, turn: Turn, config: &SessionConfig) {
        if self.transcript.is_empty() && self.title == PLACEHOLDER_TITLE {
            self.title = truncate_chars(&turn.text, config.title_max_chars);
        }
        self.preview = truncate_chars(&turn.text, config.preview_max_chars);
        self.last_activity = turn.created_at;
        self.transcript.push(turn);
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Caps `text` at `max_chars` characters, appending an ellipsis marker
/// when anything was cut. Operates on characters, not bytes.
fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(max_chars).collect();
    truncated.push('…');
    truncated
}
