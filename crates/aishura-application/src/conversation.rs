//! Conversation service.
//!
//! Orchestrates the turn-submission lifecycle: validating input,
//! appending turns, resetting hesitation state, calling the completion
//! gateway, and degrading gracefully when the gateway fails. Also drives
//! the hesitation detector from cancellable idle timers.

use aishura_core::config::AppConfig;
use aishura_core::error::{AishuraError, Result};
use aishura_core::gateway::{CompletionGateway, CompletionRequest, UserContext};
use aishura_core::hesitation::{self, HesitationDetector, HesitationSnapshot, IdleStage};
use aishura_core::persona::Persona;
use aishura_core::session::{Session, SessionEvent, SessionStore, Turn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use tokio::sync::{RwLock, broadcast};
use tokio::task::JoinHandle;

use crate::onboarding::OnboardingWizard;
use crate::profile_service::ProfileService;

/// Shown in place of a reply when the completion gateway fails. The raw
/// error is never surfaced to the end user.
pub const FALLBACK_REPLY: &str = "I'm having a little trouble reaching my thinking space right now, \
but I'm still here with you. While I reconnect, you could:\n\n\
- Jot down the one question you most want answered about your next step\n\
- Revisit a recent win, however small, and note what made it work\n\
- Step away from the screen for a short breath\n\n\
Send your message again in a moment and we'll pick this right up.";

/// Pending idle timers for the current composition episode.
///
/// Every qualifying edit aborts the previous handles and bumps the
/// epoch; a fired timer re-checks the epoch before acting, so a timer
/// scheduled before a reset can never emit into the episode after it.
#[derive(Default)]
struct TimerState {
    epoch: u64,
    handles: Vec<JoinHandle<()>>,
}

struct Inner {
    config: AppConfig,
    store: RwLock<SessionStore>,
    detector: Mutex<HesitationDetector>,
    timers: Mutex<TimerState>,
    /// Session ids with a submission in flight. A busy flag, not a queue:
    /// only one outstanding completion per session is meaningful.
    pending: Mutex<HashSet<String>>,
    persona: Mutex<Option<Persona>>,
    profile: Arc<ProfileService>,
    gateway: Arc<dyn CompletionGateway>,
    nudge_rng: Mutex<StdRng>,
    events: broadcast::Sender<SessionEvent>,
}

/// Removes the session from the pending set when dropped, so the busy
/// flag clears on every exit path of `submit`.
struct PendingGuard<'a> {
    pending: &'a Mutex<HashSet<String>>,
    session_id: String,
}

impl<'a> PendingGuard<'a> {
    fn acquire(pending: &'a Mutex<HashSet<String>>, session_id: &str) -> Result<Self> {
        let mut set = pending.lock().unwrap();
        if !set.insert(session_id.to_string()) {
            return Err(AishuraError::busy(session_id));
        }
        Ok(Self {
            pending,
            session_id: session_id.to_string(),
        })
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.pending.lock().unwrap().remove(&self.session_id);
    }
}

/// Sits between the composition box and the completion gateway.
///
/// Cheap to clone; all state is behind the shared inner. The service is
/// the only writer of the session store, and every mutation is a
/// whole-transcript append.
#[derive(Clone)]
pub struct ConversationService {
    inner: Arc<Inner>,
}

impl ConversationService {
    pub fn new(
        config: AppConfig,
        gateway: Arc<dyn CompletionGateway>,
        profile: Arc<ProfileService>,
    ) -> Self {
        let (events, _) = broadcast::channel(64);
        Self {
            inner: Arc::new(Inner {
                store: RwLock::new(SessionStore::new(config.session.clone())),
                detector: Mutex::new(HesitationDetector::new(config.hesitation.clone())),
                timers: Mutex::new(TimerState::default()),
                pending: Mutex::new(HashSet::new()),
                persona: Mutex::new(None),
                profile,
                gateway,
                nudge_rng: Mutex::new(StdRng::from_entropy()),
                events,
                config,
            }),
        }
    }

    /// Replaces the nudge-selection RNG with a seeded one, for
    /// deterministic selection in tests and replays.
    pub fn with_rng_seed(self, seed: u64) -> Self {
        *self.inner.nudge_rng.lock().unwrap() = StdRng::seed_from_u64(seed);
        self
    }

    /// Subscribes to session change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.inner.events.subscribe()
    }

    // ------------------------------------------------------------------
    // Session lifecycle
    // ------------------------------------------------------------------

    /// Creates a fresh session, makes it active, and starts a new
    /// composition episode.
    pub async fn create_session(&self) -> String {
        let session_id = {
            let mut store = self.inner.store.write().await;
            store.create_session().id.clone()
        };
        self.reset_composition();
        tracing::info!("[ConversationService] Created session {}", session_id);
        self.emit(SessionEvent::SessionCreated {
            session_id: session_id.clone(),
        });
        session_id
    }

    /// Switches the active session. Pending hesitation timers belong to
    /// the previous composition context and are cancelled.
    pub async fn select_session(&self, session_id: &str) -> Result<()> {
        {
            let mut store = self.inner.store.write().await;
            store.select_session(session_id)?;
        }
        self.reset_composition();
        self.emit(SessionEvent::SessionSelected {
            session_id: session_id.to_string(),
        });
        Ok(())
    }

    /// Deletes a session. An in-flight completion bound to it is allowed
    /// to finish but its result is discarded rather than appended.
    pub async fn delete_session(&self, session_id: &str) -> Result<()> {
        let was_active = {
            let mut store = self.inner.store.write().await;
            let was_active = store.active_session_id() == Some(session_id);
            store.delete_session(session_id)?;
            was_active
        };
        if was_active {
            self.reset_composition();
        }
        tracing::info!("[ConversationService] Deleted session {}", session_id);
        self.emit(SessionEvent::SessionDeleted {
            session_id: session_id.to_string(),
        });
        Ok(())
    }

    /// Renames a session. Empty titles are ignored by the store and
    /// publish no event.
    pub async fn rename_session(&self, session_id: &str, title: &str) -> Result<()> {
        {
            let mut store = self.inner.store.write().await;
            store.rename_session(session_id, title)?;
        }
        let trimmed = title.trim();
        if !trimmed.is_empty() {
            self.emit(SessionEvent::SessionRenamed {
                session_id: session_id.to_string(),
                title: trimmed.to_string(),
            });
        }
        Ok(())
    }

    /// All sessions, newest first.
    pub async fn sessions(&self) -> Vec<Session> {
        self.inner.store.read().await.sessions().to_vec()
    }

    /// The transcript of one session.
    pub async fn transcript(&self, session_id: &str) -> Result<Vec<Turn>> {
        let store = self.inner.store.read().await;
        store
            .get(session_id)
            .map(|s| s.transcript.clone())
            .ok_or_else(|| AishuraError::not_found("session", session_id))
    }

    pub async fn active_session_id(&self) -> Option<String> {
        self.inner
            .store
            .read()
            .await
            .active_session_id()
            .map(str::to_string)
    }

    // ------------------------------------------------------------------
    // Persona
    // ------------------------------------------------------------------

    pub fn set_persona(&self, persona: Persona) {
        *self.inner.persona.lock().unwrap() = Some(persona);
    }

    pub fn persona(&self) -> Option<Persona> {
        self.inner.persona.lock().unwrap().clone()
    }

    /// Finishes the onboarding wizard: stores the persona, opens a fresh
    /// session, and greets the user in it. Returns the new session id.
    pub async fn complete_onboarding(&self, wizard: OnboardingWizard) -> Result<String> {
        let persona = wizard.finish()?;
        let greeting = crate::greeting::greeting_for(&persona);
        self.set_persona(persona);

        let session_id = self.create_session().await;
        {
            let mut store = self.inner.store.write().await;
            store.append_turn(&session_id, Turn::assistant(greeting))?;
        }
        self.emit(SessionEvent::TranscriptChanged {
            session_id: session_id.clone(),
        });
        Ok(session_id)
    }

    // ------------------------------------------------------------------
    // Composition and hesitation
    // ------------------------------------------------------------------

    /// Feeds one composition-box edit (the draft's current text) into
    /// the hesitation detector and reschedules the idle timers.
    pub async fn compose_edit(&self, draft: &str) -> Result<()> {
        let len = draft.chars().count();
        let fired = self.inner.detector.lock().unwrap().record_edit(len);
        if let Some(kind) = fired {
            self.append_nudge(kind).await;
        }
        self.reschedule_idle_timers();
        Ok(())
    }

    /// Clears the draft without submitting. The composition episode and
    /// its one-nudge guard continue until the next submit.
    pub async fn clear_composition(&self) {
        self.inner.detector.lock().unwrap().record_edit(0);
        self.cancel_timers();
    }

    /// Current hesitation counters.
    pub fn hesitation_snapshot(&self) -> HesitationSnapshot {
        self.inner.detector.lock().unwrap().snapshot()
    }

    /// Whether a submission is in flight for the session.
    pub fn is_pending(&self, session_id: &str) -> bool {
        self.inner.pending.lock().unwrap().contains(session_id)
    }

    // ------------------------------------------------------------------
    // Submission
    // ------------------------------------------------------------------

    /// Submits a message on the active session.
    ///
    /// Appends the user turn, resets hesitation state, calls the
    /// completion gateway, and appends either the reply or a fixed
    /// fallback turn. Gateway failures are a user-visible degradation,
    /// not an error: they are logged and recovered here.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` when the trimmed message is empty or no
    ///   session is active (nothing is appended, the gateway is not
    ///   called).
    /// - `Busy` when a submission is already in flight for the session.
    pub async fn submit(&self, text: &str) -> Result<()> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(AishuraError::invalid_argument("message must not be empty"));
        }
        let session_id = self
            .active_session_id()
            .await
            .ok_or_else(|| AishuraError::invalid_argument("no active session"))?;

        let _guard = PendingGuard::acquire(&self.inner.pending, &session_id)?;

        // Snapshot the counters before the reset so the gateway sees the
        // hesitation that led to this message.
        let hesitation = {
            let mut detector = self.inner.detector.lock().unwrap();
            let snapshot = detector.snapshot();
            detector.reset();
            snapshot
        };
        self.cancel_timers();

        {
            let mut store = self.inner.store.write().await;
            store.append_turn(&session_id, Turn::user(trimmed))?;
        }
        self.emit(SessionEvent::TranscriptChanged {
            session_id: session_id.clone(),
        });

        let request = CompletionRequest {
            message: trimmed.to_string(),
            user_context: self.user_context(hesitation).await,
            session_id: session_id.clone(),
        };

        let reply = match self.inner.gateway.complete(request).await {
            Ok(response) => Turn::assistant(response.response),
            Err(err) => {
                tracing::warn!(
                    "[ConversationService] Completion gateway failed for session {} \
                     (retryable: {}): {}",
                    session_id,
                    err.is_retryable(),
                    err
                );
                Turn::assistant(FALLBACK_REPLY)
            }
        };

        let append = {
            let mut store = self.inner.store.write().await;
            store.append_turn(&session_id, reply)
        };
        match append {
            Ok(()) => {
                self.emit(SessionEvent::TranscriptChanged { session_id });
                Ok(())
            }
            Err(err) if err.is_not_found() => {
                // The session was deleted while the call was in flight;
                // the result is discarded, not an error.
                tracing::debug!(
                    "[ConversationService] Discarding reply for deleted session {}",
                    session_id
                );
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    async fn user_context(&self, hesitation: HesitationSnapshot) -> UserContext {
        let profile = self.inner.profile.profile().await;
        UserContext {
            name: profile.display_name,
            trust_score: profile.trust_score,
            persona: self.persona(),
            level: profile.level,
            xp: profile.xp,
            hesitation,
        }
    }

    async fn append_nudge(&self, kind: hesitation::NudgeKind) {
        let text = {
            let mut rng = self.inner.nudge_rng.lock().unwrap();
            hesitation::pick(kind, &mut *rng)
        };
        let mut store = self.inner.store.write().await;
        let Some(session_id) = store.active_session_id().map(str::to_string) else {
            tracing::debug!("[ConversationService] No active session for nudge, dropping");
            return;
        };
        if let Err(err) = store.append_turn(&session_id, Turn::nudge(text)) {
            tracing::debug!("[ConversationService] Failed to append nudge: {}", err);
            return;
        }
        drop(store);
        tracing::debug!(
            "[ConversationService] Emitted {:?} nudge into session {}",
            kind,
            session_id
        );
        self.emit(SessionEvent::NudgeEmitted {
            session_id: session_id.clone(),
            kind,
        });
        self.emit(SessionEvent::TranscriptChanged { session_id });
    }

    /// Cancels the previous episode's timers and, while composition is
    /// live and un-nudged, schedules the idle stages afresh. Cancel then
    /// reschedule: at most one pending timer pair exists per episode.
    fn reschedule_idle_timers(&self) {
        let mut timers = self.inner.timers.lock().unwrap();
        timers.epoch += 1;
        for handle in timers.handles.drain(..) {
            handle.abort();
        }

        if !self.inner.detector.lock().unwrap().wants_idle_timer() {
            return;
        }

        let epoch = timers.epoch;
        let config = &self.inner.config.hesitation;

        let service = self.clone();
        let idle_after = config.idle_after();
        timers.handles.push(tokio::spawn(async move {
            tokio::time::sleep(idle_after).await;
            service.idle_fired(IdleStage::First, epoch).await;
        }));

        if let Some(extended) = config.extended_idle_after() {
            let service = self.clone();
            timers.handles.push(tokio::spawn(async move {
                tokio::time::sleep(extended).await;
                service.idle_fired(IdleStage::Second, epoch).await;
            }));
        }
    }

    async fn idle_fired(&self, stage: IdleStage, epoch: u64) {
        // A stale timer (scheduled before a cancel) must never act.
        if self.inner.timers.lock().unwrap().epoch != epoch {
            return;
        }
        let fired = self.inner.detector.lock().unwrap().idle_elapsed(stage);
        if let Some(kind) = fired {
            self.append_nudge(kind).await;
        }
    }

    fn cancel_timers(&self) {
        let mut timers = self.inner.timers.lock().unwrap();
        timers.epoch += 1;
        for handle in timers.handles.drain(..) {
            handle.abort();
        }
    }

    fn reset_composition(&self) {
        self.inner.detector.lock().unwrap().reset();
        self.cancel_timers();
    }

    fn emit(&self, event: SessionEvent) {
        // No receivers is fine; notifications are best-effort.
        let _ = self.inner.events.send(event);
    }
}
