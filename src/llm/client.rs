//! Raw HTTP client for the text-completion endpoint.
//!
//! No routing awareness — just posts envelopes via reqwest and pulls the
//! reply text back out.

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use super::types::{extract_reply_text, TaskEnvelope};

/// Path appended to the configured host.
pub const TASKS_PATH: &str = "/tasks/send";

/// Timeout for generation and classification calls.
pub const GENERATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Timeout for liveness pings.
pub const PING_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors from completion calls.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("could not reach LLM server: {0}")]
    Http(#[from] reqwest::Error),

    #[error("LLM request timed out after {after:?}")]
    Timeout { after: Duration },

    #[error("LLM server returned status {status}")]
    Status { status: u16, body: String },

    #[error("invalid response from LLM server: {0}")]
    InvalidResponse(String),
}

impl LlmError {
    /// The user-facing failure text, always prefixed `"Error: "`.
    pub fn error_text(&self) -> String {
        format!("Error: {self}")
    }

    fn from_send(err: reqwest::Error, after: Duration) -> Self {
        if err.is_timeout() {
            LlmError::Timeout { after }
        } else {
            LlmError::Http(err)
        }
    }
}

/// HTTP client for a `/tasks/send` completion endpoint.
#[derive(Debug, Clone)]
pub struct CompletionClient {
    http: Client,
    host: String,
    generation_timeout: Duration,
    ping_timeout: Duration,
}

impl CompletionClient {
    /// Create a client with the default timeouts.
    pub fn new(host: impl Into<String>) -> Self {
        Self::with_timeouts(host, GENERATION_TIMEOUT, PING_TIMEOUT)
    }

    /// Create a client with explicit timeouts.
    pub fn with_timeouts(
        host: impl Into<String>,
        generation_timeout: Duration,
        ping_timeout: Duration,
    ) -> Self {
        Self {
            http: Client::new(),
            host: host.into(),
            generation_timeout,
            ping_timeout,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn generation_timeout(&self) -> Duration {
        self.generation_timeout
    }

    /// Full URL of the completion endpoint.
    pub fn endpoint(&self) -> String {
        format!("{}{TASKS_PATH}", self.host.trim_end_matches('/'))
    }

    /// Post `text` and return the raw JSON reply body.
    pub async fn send_task(&self, text: &str, timeout: Duration) -> Result<Value, LlmError> {
        let url = self.endpoint();
        debug!("POST {url} ({} chars)", text.len());

        let response = self
            .http
            .post(&url)
            .timeout(timeout)
            .json(&TaskEnvelope::text(text))
            .send()
            .await
            .map_err(|e| LlmError::from_send(e, timeout))?;

        let status = response.status().as_u16();
        if status != 200 {
            let body = response.text().await.unwrap_or_else(|_| "(no body)".into());
            warn!("{url} returned status {status}");
            return Err(LlmError::Status { status, body });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| LlmError::from_send(e, timeout))?;
        serde_json::from_slice(&bytes)
            .map_err(|e| LlmError::InvalidResponse(format!("malformed JSON: {e}")))
    }

    /// Send a prompt and return the reply text.
    pub async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let body = self.send_task(prompt, self.generation_timeout).await?;
        extract_reply_text(&body)
            .map(str::to_string)
            .ok_or_else(|| LlmError::InvalidResponse("no reply text in response".into()))
    }

    /// Lightweight liveness check using the short timeout.
    pub async fn ping(&self) -> Result<(), LlmError> {
        self.send_task("ping", self.ping_timeout).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_host_and_path() {
        let client = CompletionClient::new("http://localhost:5001/");
        assert_eq!(client.endpoint(), "http://localhost:5001/tasks/send");
        assert_eq!(client.host(), "http://localhost:5001/");
    }

    #[test]
    fn error_text_is_prefixed() {
        let err = LlmError::Status {
            status: 500,
            body: String::new(),
        };
        assert_eq!(err.error_text(), "Error: LLM server returned status 500");

        let err = LlmError::Timeout {
            after: Duration::from_secs(30),
        };
        assert_eq!(err.error_text(), "Error: LLM request timed out after 30s");
    }

    #[tokio::test]
    async fn unreachable_host() {
        let client = CompletionClient::new("http://127.0.0.1:1");
        let err = client.complete("hi").await.unwrap_err();
        assert!(matches!(err, LlmError::Http(_)));
        assert!(err.error_text().starts_with("Error: could not reach"));
    }
}
