//! Remote completion — the opaque text-completion service behind the router
//! and the coding agent.
//!
//! `CompletionBackend` is the seam: `CompletionClient` talks HTTP, tests
//! substitute scripted backends.

pub mod client;
pub mod types;

use async_trait::async_trait;

pub use client::{CompletionClient, LlmError};

/// Anything that turns a prompt into reply text.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;
}

#[async_trait]
impl CompletionBackend for CompletionClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        CompletionClient::complete(self, prompt).await
    }
}
