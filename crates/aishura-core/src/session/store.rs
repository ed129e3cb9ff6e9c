//! In-memory session lifecycle management.

use super::model::Session;
use super::turn::Turn;
use crate::config::SessionConfig;
use crate::error::{AishuraError, Result};

/// Owns the collection of sessions and the identity of the active one.
///
/// Sessions are ordered newest-first. The store is the single mutable
/// shared resource of the core; it is synchronous because the scheduling
/// model is a single event loop, and callers that need concurrent access
/// wrap it in a lock. Operating on an absent session id is a `NotFound`
/// error rather than a silent no-op.
///
/// Invariant: the active id, if set, always references an existing session.
#[derive(Debug, Default)]
pub struct SessionStore {
    /// All sessions, newest first.
    sessions: Vec<Session>,
    /// Id of the active session, if any.
    active: Option<String>,
    /// Display-derivation caps.
    config: SessionConfig,
}

impl SessionStore {
    /// Creates an empty store.
    pub fn new(config: SessionConfig) -> Self {
        Self {
            sessions: Vec::new(),
            active: None,
            config,
        }
    }

    /// Creates a fresh session with an empty transcript and a placeholder
    /// title, inserts it at the head of the collection, and sets it active.
    pub fn create_session(&mut self) -> &Session {
        let session = Session::new();
        tracing::debug!("[SessionStore] Created session {}", session.id);
        self.active = Some(session.id.clone());
        self.sessions.insert(0, session);
        &self.sessions[0]
    }

    /// Sets the active session.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no session has the given id.
    pub fn select_session(&mut self, id: &str) -> Result<()> {
        if !self.sessions.iter().any(|s| s.id == id) {
            return Err(AishuraError::not_found("session", id));
        }
        self.active = Some(id.to_string());
        Ok(())
    }

    /// Removes a session. If it was active, the most recently created
    /// remaining session becomes active, or none if the store is empty.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no session has the given id.
    pub fn delete_session(&mut self, id: &str) -> Result<()> {
        let index = self
            .sessions
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| AishuraError::not_found("session", id))?;
        self.sessions.remove(index);
        tracing::debug!("[SessionStore] Deleted session {}", id);

        if self.active.as_deref() == Some(id) {
            // Newest-first order makes the head the most recently created.
            self.active = self.sessions.first().map(|s| s.id.clone());
        }
        Ok(())
    }

    /// Appends a turn to the referenced session's transcript, updating
    /// its preview and deriving the title on the first turn.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no session has the given id.
    pub fn append_turn(&mut self, id: &str, turn: Turn) -> Result<()> {
        let config = self.config.clone();
        let session = self
            .sessions
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| AishuraError::not_found("session", id))?;
        session.push_turn(turn, &config);
        Ok(())
    }

    /// Overwrites a session's title. Empty or whitespace-only titles are
    /// a silent no-op.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no session has the given id.
    pub fn rename_session(&mut self, id: &str, title: &str) -> Result<()> {
        let session = self
            .sessions
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| AishuraError::not_found("session", id))?;
        let trimmed = title.trim();
        if trimmed.is_empty() {
            tracing::debug!("[SessionStore] Ignoring empty rename for session {}", id);
            return Ok(());
        }
        session.title = trimmed.to_string();
        Ok(())
    }

    /// Returns a session by id.
    pub fn get(&self, id: &str) -> Option<&Session> {
        self.sessions.iter().find(|s| s.id == id)
    }

    /// Returns the active session, if any.
    pub fn active_session(&self) -> Option<&Session> {
        self.active.as_deref().and_then(|id| self.get(id))
    }

    /// Returns the id of the active session, if any.
    pub fn active_session_id(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// All sessions, newest first.
    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::PLACEHOLDER_TITLE;
    use crate::session::turn::TurnAuthor;

    fn store() -> SessionStore {
        SessionStore::new(SessionConfig::default())
    }

    #[test]
    fn test_create_session_becomes_active() {
        let mut store = store();
        let id = store.create_session().id.clone();
        assert_eq!(store.active_session_id(), Some(id.as_str()));
        assert_eq!(store.active_session().unwrap().title, PLACEHOLDER_TITLE);
    }

    #[test]
    fn test_newest_session_first() {
        let mut store = store();
        let first = store.create_session().id.clone();
        let second = store.create_session().id.clone();
        assert_eq!(store.sessions()[0].id, second);
        assert_eq!(store.sessions()[1].id, first);
    }

    #[test]
    fn test_select_missing_session_is_not_found() {
        let mut store = store();
        store.create_session();
        let err = store.select_session("nope").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_transcript_preserves_append_order() {
        let mut store = store();
        let id = store.create_session().id.clone();
        for i in 0..5 {
            let turn = if i % 2 == 0 {
                Turn::user(format!("msg {i}"))
            } else {
                Turn::assistant(format!("msg {i}"))
            };
            store.append_turn(&id, turn).unwrap();
        }
        let texts: Vec<_> = store
            .get(&id)
            .unwrap()
            .transcript
            .iter()
            .map(|t| t.text.clone())
            .collect();
        assert_eq!(texts, vec!["msg 0", "msg 1", "msg 2", "msg 3", "msg 4"]);
    }

    #[test]
    fn test_delete_active_selects_most_recent_remaining() {
        let mut store = store();
        let oldest = store.create_session().id.clone();
        let newest = store.create_session().id.clone();
        let active = store.create_session().id.clone();
        // `active` is newest overall; deleting it must fall back to `newest`.
        assert_ne!(newest, oldest);
        store.delete_session(&active).unwrap();
        assert_eq!(store.active_session_id(), Some(newest.as_str()));
        assert!(store.get(store.active_session_id().unwrap()).is_some());
    }

    #[test]
    fn test_delete_last_session_leaves_no_active() {
        let mut store = store();
        let id = store.create_session().id.clone();
        store.delete_session(&id).unwrap();
        assert_eq!(store.active_session_id(), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_delete_inactive_keeps_active() {
        let mut store = store();
        let inactive = store.create_session().id.clone();
        let active = store.create_session().id.clone();
        store.delete_session(&inactive).unwrap();
        assert_eq!(store.active_session_id(), Some(active.as_str()));
    }

    #[test]
    fn test_rename_and_empty_rename() {
        let mut store = store();
        let id = store.create_session().id.clone();
        store.append_turn(&id, Turn::user("Hello")).unwrap();
        store.rename_session(&id, "Career plan").unwrap();
        assert_eq!(store.get(&id).unwrap().title, "Career plan");

        store.rename_session(&id, "   ").unwrap();
        assert_eq!(store.get(&id).unwrap().title, "Career plan");
    }

    #[test]
    fn test_append_to_missing_session_is_not_found() {
        let mut store = store();
        let err = store.append_turn("ghost", Turn::user("hi")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_nudge_turn_keeps_assistant_author() {
        let mut store = store();
        let id = store.create_session().id.clone();
        store.append_turn(&id, Turn::nudge("take a breath")).unwrap();
        let turn = &store.get(&id).unwrap().transcript[0];
        assert_eq!(turn.author, TurnAuthor::Assistant);
        assert!(turn.is_nudge);
    }
}
