//! Remote agent — forwards tasks to another process over `/tasks/send`.

use async_trait::async_trait;
use serde_json::Value;
use tracing::{info, warn};

use super::{Agent, Task, TaskResult};
use crate::llm::types::extract_reply_text;
use crate::llm::CompletionClient;

/// Proxy for an agent served elsewhere.
pub struct RemoteAgent {
    name: String,
    description: String,
    client: CompletionClient,
}

impl RemoteAgent {
    pub fn new(name: &str, description: &str, client: CompletionClient) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            client,
        }
    }

    pub fn url(&self) -> &str {
        self.client.host()
    }
}

/// Turn a remote reply into a task result for `task_id`.
///
/// A full task result (optionally under `result`) is taken as is; otherwise
/// any reply text counts as completion.
pub fn result_from_reply(task_id: &str, body: &Value) -> TaskResult {
    if let Some(mut result) = TaskResult::from_json(body) {
        result.id = task_id.to_string();
        return result;
    }
    match extract_reply_text(body) {
        Some(text) => TaskResult::completed(task_id, text),
        None => TaskResult::failed(
            task_id,
            "Error: remote agent reply held neither a task status nor reply text",
        ),
    }
}

#[async_trait]
impl Agent for RemoteAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    async fn handle(&self, task: Task) -> TaskResult {
        info!("forwarding task {} to {}", task.id, self.client.endpoint());
        match self
            .client
            .send_task(task.text(), self.client.generation_timeout())
            .await
        {
            Ok(body) => result_from_reply(&task.id, &body),
            Err(e) => {
                warn!("remote agent {} failed: {e}", self.name);
                TaskResult::failed(&task.id, &e.error_text())
            }
        }
    }

    async fn ping(&self) -> Result<(), String> {
        self.client.ping().await.map_err(|e| e.to_string())
    }

    fn is_remote(&self) -> bool {
        true
    }
}
