//! Profile service.
//!
//! Owns the local profile record: seeds it from the identity the
//! external authentication service yields, carries the transient
//! pending career goal across the sign-in step, and persists the
//! client-side JSON snapshot with a temp-file-then-rename write.

use aishura_core::error::Result;
use aishura_core::profile::{Identity, UserProfile};
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

/// Thread-safe holder of the current user's profile.
pub struct ProfileService {
    profile: RwLock<UserProfile>,
}

impl ProfileService {
    /// Starts with the anonymous default profile.
    pub fn new() -> Self {
        Self {
            profile: RwLock::new(UserProfile::default()),
        }
    }

    /// Seeds the profile from an authenticated identity. A career goal
    /// captured before sign-in survives the switch.
    pub async fn sign_in(&self, identity: Identity) -> UserProfile {
        let mut profile = self.profile.write().await;
        let pending = profile.pending_career_goal.take();
        *profile = UserProfile::from_identity(identity);
        profile.pending_career_goal = pending;
        tracing::info!(
            "[ProfileService] Seeded profile for {}",
            profile.display_name
        );
        profile.clone()
    }

    /// The current profile.
    pub async fn profile(&self) -> UserProfile {
        self.profile.read().await.clone()
    }

    /// Remembers a career goal stated before authentication.
    pub async fn set_pending_career_goal(&self, goal: &str) {
        let trimmed = goal.trim();
        if trimmed.is_empty() {
            return;
        }
        self.profile.write().await.pending_career_goal = Some(trimmed.to_string());
    }

    /// Takes the pending career goal, clearing it.
    pub async fn take_pending_career_goal(&self) -> Option<String> {
        self.profile.write().await.pending_career_goal.take()
    }

    /// Adds experience points to the profile.
    pub async fn award_xp(&self, amount: u32) -> UserProfile {
        let mut profile = self.profile.write().await;
        profile.award_xp(amount);
        profile.clone()
    }

    /// Writes the snapshot atomically: serialize to a sibling temp file,
    /// then rename over the target.
    pub async fn save_snapshot(&self, path: &Path) -> Result<()> {
        let json = self.profile.read().await.to_snapshot_json()?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let tmp = path.with_extension("tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, path).await?;
        Ok(())
    }

    /// Restores the profile from a snapshot file.
    ///
    /// Returns `false` (leaving the profile untouched) when the file
    /// does not exist; a present-but-unreadable snapshot is an error.
    pub async fn load_snapshot(&self, path: &Path) -> Result<bool> {
        let content = match tokio::fs::read_to_string(path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(false),
            Err(err) => return Err(err.into()),
        };
        let restored = UserProfile::from_snapshot_json(&content)?;
        *self.profile.write().await = restored;
        Ok(true)
    }

    /// Default platform location for the snapshot.
    pub fn default_snapshot_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("aishura").join("profile.json"))
    }
}

impl Default for ProfileService {
    fn default() -> Self {
        Self::new()
    }
}
