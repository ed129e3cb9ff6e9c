//! Application layer for the AIShura conversational core.
//!
//! This crate coordinates the domain layer into the running product:
//! the conversation service (turn-submission lifecycle and hesitation
//! timers), the onboarding wizard, the greeting selector, and the
//! profile service.

pub mod conversation;
pub mod greeting;
pub mod onboarding;
pub mod profile_service;

pub use conversation::{ConversationService, FALLBACK_REPLY};
pub use onboarding::{OnboardingStep, OnboardingWizard};
pub use profile_service::ProfileService;
