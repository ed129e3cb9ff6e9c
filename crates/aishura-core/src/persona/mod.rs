//! Persona domain module.
//!
//! The structured profile collected during onboarding and forwarded as
//! context to the completion gateway.

mod model;

pub use model::{CareerGoal, CareerStage, Persona};
