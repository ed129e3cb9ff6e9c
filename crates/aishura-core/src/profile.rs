//! User profile domain model.
//!
//! The authentication collaborator is external; this core only consumes
//! the identity it yields and seeds a local profile record with fixed
//! first-login defaults. The profile is the only locally persisted data,
//! as a flat JSON snapshot.

use serde::{Deserialize, Serialize};

pub const DEFAULT_TRUST_SCORE: u32 = 50;
pub const DEFAULT_LEVEL: u32 = 1;
pub const DEFAULT_XP: u32 = 0;
pub const DEFAULT_TOKEN_BALANCE: u32 = 100;

/// Experience points per level step.
const XP_PER_LEVEL: u32 = 100;

/// What the external authentication service hands back on sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub email: String,
    pub display_name: String,
}

/// Local profile record seeded on first login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_id: String,
    pub email: String,
    pub display_name: String,
    pub trust_score: u32,
    pub level: u32,
    pub xp: u32,
    pub token_balance: u32,
    /// Career goal captured before sign-in and carried across the
    /// authentication step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending_career_goal: Option<String>,
}

impl UserProfile {
    /// Seeds a profile from an authenticated identity with fixed defaults.
    pub fn from_identity(identity: Identity) -> Self {
        Self {
            user_id: identity.id,
            email: identity.email,
            display_name: identity.display_name,
            trust_score: DEFAULT_TRUST_SCORE,
            level: DEFAULT_LEVEL,
            xp: DEFAULT_XP,
            token_balance: DEFAULT_TOKEN_BALANCE,
            pending_career_goal: None,
        }
    }

    /// Adds experience points, recomputing the level.
    pub fn award_xp(&mut self, amount: u32) {
        self.xp = self.xp.saturating_add(amount);
        self.level = 1 + self.xp / XP_PER_LEVEL;
    }

    /// Serializes the profile for the client-side snapshot.
    pub fn to_snapshot_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Restores a profile from a snapshot.
    pub fn from_snapshot_json(content: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(content)?)
    }
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            user_id: String::new(),
            email: String::new(),
            display_name: "Explorer".to_string(),
            trust_score: DEFAULT_TRUST_SCORE,
            level: DEFAULT_LEVEL,
            xp: DEFAULT_XP,
            token_balance: DEFAULT_TOKEN_BALANCE,
            pending_career_goal: None,
        }
    }
}
