//! Session domain module.
//!
//! This module contains the session and turn models, the in-memory
//! session store, and the notification events the application layer
//! publishes when transcripts change.
//!
//! # Module Structure
//!
//! - `turn`: transcript entry types (`Turn`, `TurnAuthor`)
//! - `model`: the session entity (`Session`)
//! - `store`: in-memory lifecycle management (`SessionStore`)
//! - `event`: change notifications (`SessionEvent`)

mod event;
mod model;
mod store;
mod turn;

// Re-export public API
pub use event::SessionEvent;
pub use model::{PLACEHOLDER_TITLE, Session};
pub use store::SessionStore;
pub use turn::{Turn, TurnAuthor};
