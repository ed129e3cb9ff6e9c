//! Completion gateway boundary.
//!
//! The remote completion service is an opaque collaborator: text in,
//! text out, with a free-form user-context bundle alongside. This module
//! owns the wire types and the trait the application layer talks to;
//! `aishura-gateway` provides the HTTP implementation.

use crate::hesitation::HesitationSnapshot;
use crate::persona::Persona;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Context bundle forwarded with every completion request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserContext {
    pub name: String,
    pub trust_score: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persona: Option<Persona>,
    pub level: u32,
    pub xp: u32,
    #[serde(rename = "hesitationData")]
    pub hesitation: HesitationSnapshot,
}

/// Request payload for the hosted gateway function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionRequest {
    pub message: String,
    pub user_context: UserContext,
    pub session_id: String,
}

/// Response payload from the hosted gateway function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionResponse {
    pub response: String,
    pub session_id: String,
}

/// Failure modes of a completion call.
///
/// Callers recover every one of these locally (fallback turn + diagnostic
/// log); none is ever surfaced raw to the end user.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("gateway returned status {code}: {message}")]
    Status { code: u16, message: String },
    #[error("malformed gateway response: {0}")]
    MalformedResponse(String),
}

impl GatewayError {
    /// Whether a fresh attempt could plausibly succeed. The core never
    /// retries automatically; this informs diagnostics only.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) | Self::Timeout(_) => true,
            Self::Status { code, .. } => *code == 429 || *code >= 500,
            Self::MalformedResponse(_) => false,
        }
    }
}

/// The remote completion service seam.
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    /// Sends one message with its context bundle and returns the
    /// generated reply.
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> UserContext {
        UserContext {
            name: "Kai".to_string(),
            trust_score: 50,
            persona: None,
            level: 1,
            xp: 0,
            hesitation: HesitationSnapshot::default(),
        }
    }

    #[test]
    fn test_request_wire_shape() {
        let request = CompletionRequest {
            message: "Hello".to_string(),
            user_context: context(),
            session_id: "s-1".to_string(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["message"], "Hello");
        assert_eq!(json["sessionId"], "s-1");
        assert_eq!(json["userContext"]["trustScore"], 50);
        assert_eq!(json["userContext"]["hesitationData"]["deletionCount"], 0);
        // Absent persona is omitted, not null.
        assert!(json["userContext"].get("persona").is_none());
    }

    #[test]
    fn test_response_parses() {
        let response: CompletionResponse =
            serde_json::from_str(r#"{"response":"Hi there","sessionId":"s-1"}"#).unwrap();
        assert_eq!(response.response, "Hi there");
    }

    #[test]
    fn test_retryability() {
        assert!(GatewayError::Transport("refused".into()).is_retryable());
        assert!(GatewayError::Timeout(Duration::from_secs(30)).is_retryable());
        assert!(
            GatewayError::Status {
                code: 503,
                message: "unavailable".into()
            }
            .is_retryable()
        );
        assert!(
            !GatewayError::Status {
                code: 400,
                message: "bad request".into()
            }
            .is_retryable()
        );
        assert!(!GatewayError::MalformedResponse("truncated".into()).is_retryable());
    }
}
