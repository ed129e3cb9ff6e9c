//! Domain layer for the AIShura conversational core.
//!
//! This crate owns the entities and pure logic of the chat core: the
//! in-memory session store, the hesitation state machine and its nudge
//! catalog, the persona and profile models, and the completion-gateway
//! boundary. Async orchestration (timers, the submission lifecycle)
//! lives in `aishura-application`; the HTTP gateway client lives in
//! `aishura-gateway`.

pub mod config;
pub mod error;
pub mod gateway;
pub mod hesitation;
pub mod persona;
pub mod profile;
pub mod session;

// Re-export common error type
pub use error::{AishuraError, Result};
