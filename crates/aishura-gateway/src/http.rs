//! Reqwest-backed completion gateway.

use aishura_core::config::GatewayConfig;
use aishura_core::gateway::{
    CompletionGateway, CompletionRequest, CompletionResponse, GatewayError,
};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

/// Talks to the hosted gateway function over HTTPS.
#[derive(Clone)]
pub struct HttpCompletionGateway {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl HttpCompletionGateway {
    /// Builds a client with the configured whole-request timeout.
    /// Timer expiry surfaces as [`GatewayError::Timeout`] and takes the
    /// same failure path as any transport error.
    pub fn new(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|err| GatewayError::Transport(format!("failed to build client: {err}")))?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            timeout: config.timeout(),
        })
    }

    async fn send_request(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, GatewayError> {
        let mut builder = self.client.post(&self.endpoint).json(request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await.map_err(|err| {
            if err.is_timeout() {
                GatewayError::Timeout(self.timeout)
            } else {
                GatewayError::Transport(err.to_string())
            }
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read gateway error body".to_string());
            return Err(map_http_error(status, &body));
        }

        response
            .json::<CompletionResponse>()
            .await
            .map_err(|err| GatewayError::MalformedResponse(err.to_string()))
    }
}

#[async_trait]
impl CompletionGateway for HttpCompletionGateway {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, GatewayError> {
        let session_id = request.session_id.clone();
        match self.send_request(&request).await {
            Ok(response) => Ok(response),
            Err(err) => {
                tracing::warn!(
                    "[HttpCompletionGateway] Request for session {} failed \
                     (retryable: {}): {}",
                    session_id,
                    err.is_retryable(),
                    err
                );
                Err(err)
            }
        }
    }
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Distills a non-success response into a `Status` error, preferring the
/// gateway's own `{"error": {"message": ...}}` body when it parses.
fn map_http_error(status: StatusCode, body: &str) -> GatewayError {
    let message = serde_json::from_str::<ErrorWrapper>(body)
        .ok()
        .and_then(|wrapper| wrapper.error.message)
        .unwrap_or_else(|| body.to_string());
    GatewayError::Status {
        code: status.as_u16(),
        message,
    }
}
