//! Configuration for the conversational core.
//!
//! Hesitation thresholds are tunables, not contracts: the two observed
//! timing profiles (a two-stage 6s/12s pair and a single ~3.8s window)
//! are both expressible here, and nothing outside this module hard-codes
//! either.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tunables for the hesitation detector.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct HesitationConfig {
    /// Composition begins once the draft length exceeds this many characters.
    pub min_compose_len: usize,
    /// Shrink edits are only counted when the previous length exceeded this floor.
    pub shrink_floor: usize,
    /// A deletion nudge fires once the shrink count exceeds this value.
    pub shrink_threshold: u32,
    /// First idle stage, in milliseconds.
    pub idle_after_ms: u64,
    /// Optional second idle stage, in milliseconds. `None` disables it.
    pub extended_idle_after_ms: Option<u64>,
}

impl Default for HesitationConfig {
    fn default() -> Self {
        Self {
            min_compose_len: 3,
            shrink_floor: 3,
            shrink_threshold: 2,
            idle_after_ms: 6_000,
            extended_idle_after_ms: Some(12_000),
        }
    }
}

impl HesitationConfig {
    /// The single-stage timing profile observed in the compact chat widget.
    pub fn compact() -> Self {
        Self {
            idle_after_ms: 3_800,
            extended_idle_after_ms: None,
            ..Self::default()
        }
    }

    pub fn idle_after(&self) -> Duration {
        Duration::from_millis(self.idle_after_ms)
    }

    pub fn extended_idle_after(&self) -> Option<Duration> {
        self.extended_idle_after_ms.map(Duration::from_millis)
    }
}

/// Display-derivation caps for sessions.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct SessionConfig {
    /// Character cap for a title derived from the first turn.
    pub title_max_chars: usize,
    /// Character cap for the sidebar preview of the last turn.
    pub preview_max_chars: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            title_max_chars: 30,
            preview_max_chars: 60,
        }
    }
}

/// Connection settings for the hosted completion gateway.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct GatewayConfig {
    /// Endpoint of the hosted gateway function.
    pub endpoint: String,
    /// Optional bearer key sent with every request.
    pub api_key: Option<String>,
    /// Whole-request timeout, in milliseconds. Expiry is routed through
    /// the same failure path as a transport error.
    pub timeout_ms: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.aishura.app/functions/v1/chat".to_string(),
            api_key: None,
            timeout_ms: 30_000,
        }
    }
}

impl GatewayConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Aggregate configuration for the core.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    pub hesitation: HesitationConfig,
    pub session: SessionConfig,
    pub gateway: GatewayConfig,
}

impl AppConfig {
    /// Parses a TOML document; absent sections and fields keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}
